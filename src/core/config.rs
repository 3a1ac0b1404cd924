//! coursetag configuration module
//!
//! Config loading priority:
//! 1. File named by the `COURSETAG_CONFIG` environment variable
//! 2. `.coursetag.json` in the working directory
//! 3. Built-in defaults
//!
//! The ranking constants below are compiled in. The config file only chooses
//! where the embedding model comes from and where batch results are written.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use super::paths::config_path;

pub const CONFIG_FILE_NAME: &str = ".coursetag.json";
pub const CONFIG_VERSION: u32 = 1;

/// Pretrained static embedding model (HuggingFace ID)
pub const EMBEDDING_MODEL_ID: &str = "minishlab/potion-base-8M";
/// Language of the linguistic pipeline (tokenizer + part-of-speech tagger)
pub const PIPELINE_LANGUAGE: &str = "en";
/// Candidate grammar: optional adjectives followed by one or more nouns
pub const CANDIDATE_PATTERN: &str = "<J.*>*<N.*>+";
/// Stopword list applied to candidate phrases
pub const STOPWORD_LANGUAGE: &str = "english";
/// Relevance/redundancy trade-off for maximal marginal relevance
pub const DIVERSITY: f32 = 0.5;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default)]
    pub embedder: EmbedderConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

fn default_version() -> u32 {
    CONFIG_VERSION
}

/// Which embedding backend ranks candidates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmbedderBackend {
    /// Pretrained Model2Vec static embeddings
    Model2vec,
    /// Built-in feature hashing, no model file
    Hashing,
}

impl Default for EmbedderBackend {
    fn default() -> Self {
        EmbedderBackend::Model2vec
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbedderConfig {
    #[serde(default)]
    pub backend: EmbedderBackend,

    /// Local model directory; skips the HuggingFace cache and hub
    #[serde(default, rename = "modelPath")]
    pub model_path: Option<String>,
}

impl Default for EmbedderConfig {
    fn default() -> Self {
        Self {
            backend: EmbedderBackend::default(),
            model_path: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory batch results are written to (default: working directory)
    #[serde(default)]
    pub dir: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            embedder: EmbedderConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Config {
    /// Load config for `root`, falling back to defaults on any problem.
    pub fn load(root: &Path) -> Self {
        let path = config_path(root);
        if !path.exists() {
            return Self::default();
        }

        match Self::load_from_file(&path) {
            Ok(config) => {
                if config.version > CONFIG_VERSION {
                    tracing::warn!(
                        "Config version {} is newer than supported version {}",
                        config.version,
                        CONFIG_VERSION
                    );
                }
                config
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to load {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    pub fn save(&self, root: &Path) -> Result<PathBuf> {
        let path = config_path(root);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(path)
    }

    /// Directory for batch results, resolved against `root`
    pub fn output_dir(&self, root: &Path) -> PathBuf {
        match &self.output.dir {
            Some(dir) => root.join(dir),
            None => root.to_path_buf(),
        }
    }
}
