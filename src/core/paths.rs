//! Path resolution
//!
//! Handles config file discovery and the local HuggingFace model cache.

use std::path::{Path, PathBuf};

use super::config::CONFIG_FILE_NAME;

/// Environment variable naming an explicit config file
pub const CONFIG_PATH_ENV: &str = "COURSETAG_CONFIG";

/// Config file location for `root`.
/// Priority: COURSETAG_CONFIG env var > `<root>/.coursetag.json`
pub fn config_path(root: &Path) -> PathBuf {
    match std::env::var(CONFIG_PATH_ENV) {
        Ok(path) if !path.trim().is_empty() => PathBuf::from(path),
        _ => root.join(CONFIG_FILE_NAME),
    }
}

/// Working directory, or `.` if it cannot be determined
pub fn working_dir() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

/// HuggingFace hub cache root (`$HF_HOME/hub` or `~/.cache/huggingface/hub`)
fn hub_cache_root() -> Option<PathBuf> {
    if let Ok(hf_home) = std::env::var("HF_HOME") {
        return Some(PathBuf::from(hf_home).join("hub"));
    }
    let home = std::env::var("HOME").ok()?;
    Some(PathBuf::from(home).join(".cache/huggingface/hub"))
}

/// Cache directory name for a hub model ID (`org/name` -> `models--org--name`)
pub fn hub_cache_dir_name(model_id: &str) -> String {
    format!("models--{}", model_id.replace('/', "--"))
}

/// Locate a cached snapshot of `model_id`, if one exists
pub fn cached_model_path(model_id: &str) -> Option<PathBuf> {
    let snapshots = hub_cache_root()?
        .join(hub_cache_dir_name(model_id))
        .join("snapshots");

    std::fs::read_dir(&snapshots)
        .ok()?
        .flatten()
        .find(|entry| entry.file_type().map(|t| t.is_dir()).unwrap_or(false))
        .map(|entry| entry.path())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hub_cache_dir_name() {
        assert_eq!(
            hub_cache_dir_name("minishlab/potion-base-8M"),
            "models--minishlab--potion-base-8M"
        );
    }

    #[test]
    fn test_config_path_defaults_to_root() {
        if std::env::var(CONFIG_PATH_ENV).is_ok() {
            return;
        }
        let root = Path::new("/tmp/courses");
        assert_eq!(config_path(root), root.join(CONFIG_FILE_NAME));
    }
}
