//! Single-course tag generation

use anyhow::{Context, Result};
use colored::*;

use coursetag::core::config::Config;
use coursetag::core::paths::working_dir;
use coursetag::core::record::{CourseRecord, TagSet};
use coursetag::tags::{self, Keyword};

pub fn run(name: &str, desc: &str, json: bool) -> Result<()> {
    let record = CourseRecord::new(name, desc);

    // Validate before paying for model load
    if let Err(e) = record.validate() {
        if json {
            println!("{}", serde_json::json!({ "error": e.to_string() }));
        } else {
            println!("{} {}", "!".yellow().bold(), e);
        }
        std::process::exit(1);
    }

    let config = Config::load(&working_dir());
    let extractor = tags::initialize(&config).context("Failed to load keyword model")?;

    let (keywords, warning) = match extractor.extract_scored(&record) {
        Ok(keywords) => (keywords, None),
        Err(e) if e.is_row_recoverable() => (Vec::new(), Some(e.to_string())),
        Err(e) => return Err(e.into()),
    };

    let joined = joined_tags(&keywords);

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "course_name": name,
                "tags": keywords,
                "joined": joined,
                "warning": warning,
            }))?
        );
        return Ok(());
    }

    if let Some(warning) = warning {
        println!("{} Could not extract tags: {}", "!".yellow().bold(), warning);
        println!();
    }

    println!("{}", "Relevant Tags".bold());
    println!("{}", "=".repeat(50));
    println!();

    if keywords.is_empty() {
        println!("  {}", "(no tags)".dimmed());
    } else {
        for (i, keyword) in keywords.iter().enumerate() {
            println!(
                "  {}. {} {}",
                i + 1,
                keyword.phrase.cyan(),
                format!("({:.2})", keyword.score).dimmed()
            );
        }
    }

    println!();
    println!("{}", joined);

    Ok(())
}

fn joined_tags(keywords: &[Keyword]) -> String {
    TagSet::from_ranked(keywords.iter().map(|k| k.phrase.as_str())).joined()
}
