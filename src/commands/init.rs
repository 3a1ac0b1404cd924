//! Config initialization

use anyhow::Result;
use colored::*;

use coursetag::core::config::Config;
use coursetag::core::paths::{config_path, working_dir};

pub fn run(force: bool) -> Result<()> {
    let root = working_dir();
    let path = config_path(&root);

    println!("{}", "Coursetag Configuration Generator".bold());
    println!("{}", "=".repeat(50));
    println!();

    if path.exists() && !force {
        println!(
            "{} Config already exists: {}",
            "→".blue(),
            path.display()
        );
        println!("  Use {} to overwrite with defaults", "--force".cyan());
        return Ok(());
    }

    let existed = path.exists();
    let path = Config::default().save(&root)?;

    if existed {
        println!("{} Reset {}", "✓".green(), path.display());
    } else {
        println!("{} Created {}", "✓".green(), path.display());
    }

    println!();
    println!("Options:");
    println!(
        "  {} - {} (default) or {} for offline use",
        "embedder.backend".cyan(),
        "model2vec",
        "hashing"
    );
    println!(
        "  {} - local Model2Vec directory instead of the hub",
        "embedder.modelPath".cyan()
    );
    println!(
        "  {} - where CourseTagGen_Result.csv is written",
        "output.dir".cyan()
    );

    Ok(())
}
