//! Model management commands - Inspect and download the embedding model

use anyhow::Result;
use colored::Colorize;

use coursetag::core::config::{Config, EmbedderBackend, EMBEDDING_MODEL_ID};
use coursetag::core::paths::{cached_model_path, working_dir};
use coursetag::tags::create_embedder;

/// Run model subcommand
pub fn run(subcmd: &str, json: bool) -> Result<()> {
    match subcmd {
        "download" => download(json),
        "status" => status(json),
        _ => {
            if json {
                println!(
                    "{}",
                    serde_json::json!({
                        "success": false,
                        "error": format!("Unknown subcommand: {}", subcmd),
                    })
                );
            } else {
                println!("{} Unknown subcommand: {}", "!".yellow().bold(), subcmd);
                println!();
                println!("Available subcommands:");
                println!(
                    "  {} - Download the embedding model into the local cache",
                    "download".cyan()
                );
                println!("  {} - Show model status", "status".cyan());
            }
            anyhow::bail!("Unknown model subcommand: {}", subcmd)
        }
    }
}

/// Load the configured model, fetching it from HuggingFace Hub if needed
fn download(json: bool) -> Result<()> {
    let config = Config::load(&working_dir());
    let model_id = EMBEDDING_MODEL_ID;

    if !json {
        match (&config.embedder.backend, &config.embedder.model_path) {
            (EmbedderBackend::Hashing, _) => {
                println!("{} Hashing backend needs no model files", "→".dimmed());
            }
            (_, Some(path)) => {
                println!("{} Loading model from local path {}...", "→".dimmed(), path);
            }
            _ => {
                println!("{} Downloading model: {}", "→".dimmed(), model_id.cyan());
                println!("  This may take a few minutes on first download...");
                println!();
            }
        }
    }

    match create_embedder(&config.embedder) {
        Ok(embedder) => {
            let dimension = embedder.embed("course")?.len();

            if json {
                println!(
                    "{}",
                    serde_json::json!({
                        "success": true,
                        "model_id": model_id,
                        "dimension": dimension,
                        "name": embedder.name(),
                    })
                );
            } else {
                println!("{} Model ready", "✓".green().bold());
                println!();
                println!("  {} Model: {}", "→".dimmed(), embedder.name());
                println!("  {} Dimension: {}", "→".dimmed(), dimension);
            }
            Ok(())
        }
        Err(e) => {
            if json {
                println!(
                    "{}",
                    serde_json::json!({
                        "success": false,
                        "error": e.to_string(),
                    })
                );
            } else {
                println!("{} Failed to load model: {}", "✗".red().bold(), e);
            }
            Err(e.into())
        }
    }
}

/// Show which model the config resolves to and whether it is available locally
fn status(json: bool) -> Result<()> {
    let config = Config::load(&working_dir());
    let embedder = &config.embedder;

    let cached = cached_model_path(EMBEDDING_MODEL_ID);
    let local_ready = embedder
        .model_path
        .as_deref()
        .map(|p| std::path::Path::new(p).exists())
        .unwrap_or(false);
    let ready = match embedder.backend {
        EmbedderBackend::Hashing => true,
        EmbedderBackend::Model2vec => local_ready || cached.is_some(),
    };

    if json {
        println!(
            "{}",
            serde_json::json!({
                "backend": embedder.backend,
                "model_id": EMBEDDING_MODEL_ID,
                "model_path": embedder.model_path,
                "cached_path": cached.as_ref().map(|p| p.display().to_string()),
                "ready": ready,
            })
        );
        return Ok(());
    }

    println!("{}", "Model Status".bold());
    println!();

    let backend = match embedder.backend {
        EmbedderBackend::Model2vec => "model2vec",
        EmbedderBackend::Hashing => "hashing",
    };
    println!("  {} Backend: {}", "→".dimmed(), backend.cyan());
    println!("  {} Model ID: {}", "→".dimmed(), EMBEDDING_MODEL_ID.cyan());

    if let Some(path) = &embedder.model_path {
        let status = if local_ready {
            "found".green()
        } else {
            "missing".red()
        };
        println!("  {} Local path: {} ({})", "→".dimmed(), path, status);
    }

    match &cached {
        Some(path) => println!("  {} Cached: {}", "→".dimmed(), path.display()),
        None => println!("  {} Cached: {}", "→".dimmed(), "Not Downloaded".yellow()),
    }

    println!();
    if ready {
        println!("  {} Tag generation is {}", "✓".green().bold(), "ready".green().bold());
    } else {
        println!(
            "  {} Run {} to download the model",
            "!".yellow().bold(),
            "coursetag model download".cyan()
        );
    }

    Ok(())
}
