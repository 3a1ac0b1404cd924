//! Batch CSV processing

use anyhow::{Context, Result};
use colored::*;
use std::path::{Path, PathBuf};

use coursetag::batch::{write_output, BatchProcessor, RESULT_FILE_NAME, RESULT_MIME_TYPE};
use coursetag::core::config::Config;
use coursetag::core::paths::working_dir;
use coursetag::tags;

const PREVIEW_ROWS: usize = 5;

pub fn run(file: &Path, output_dir: Option<PathBuf>, json: bool) -> Result<()> {
    let root = working_dir();
    let config = Config::load(&root);
    let output_dir = output_dir.unwrap_or_else(|| config.output_dir(&root));

    let extractor = tags::initialize(&config).context("Failed to load keyword model")?;

    if !json {
        println!("{} Processing {}...", "→".dimmed(), file.display());
    }

    let output = BatchProcessor::new(&extractor)
        .process_file(file)
        .with_context(|| format!("Failed to process {}", file.display()))?;
    let output_path = write_output(&output_dir, &output.bytes)
        .with_context(|| format!("Failed to write results to {}", output_dir.display()))?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "rows": output.table.len(),
                "failed_rows": output.failures,
                "output_path": output_path.display().to_string(),
                "file_name": RESULT_FILE_NAME,
                "mime_type": RESULT_MIME_TYPE,
                "duration_ms": output.duration_ms,
            }))?
        );
        return Ok(());
    }

    println!();
    println!("{}", "Batch Results".bold());
    println!("{}", "=".repeat(50));
    println!();
    println!("  Rows:        {}", output.table.len());

    let failed = if output.failures.is_empty() {
        "0".green()
    } else {
        output.failures.len().to_string().yellow()
    };
    println!("  Failed rows: {}", failed);
    println!("  Duration:    {}ms", output.duration_ms);
    println!();

    let preview = output.table.preview(PREVIEW_ROWS);
    if !preview.is_empty() {
        println!("{}", "Preview:".bold());
        for row in &preview {
            println!("  {} {}", row.course_name.cyan(), "→".dimmed());
            println!("    {}", row.relevant_tags);
        }
        if output.table.len() > preview.len() {
            println!(
                "  {}",
                format!("... and {} more", output.table.len() - preview.len()).dimmed()
            );
        }
        println!();
    }

    for failure in &output.failures {
        println!(
            "  {} Row {} ({}): {}",
            "!".yellow().bold(),
            failure.row,
            failure.course_name,
            failure.error
        );
    }
    if !output.failures.is_empty() {
        println!();
    }

    println!(
        "{} Saved {} ({})",
        "✓".green().bold(),
        output_path.display(),
        RESULT_MIME_TYPE.dimmed()
    );

    Ok(())
}
