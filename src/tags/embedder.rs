//! Embedder trait and implementations for keyphrase ranking
//!
//! Provides abstraction over different embedding models:
//! - Model2VecEmbedder: pretrained static embeddings (default)
//! - HashingEmbedder: feature hashing, built-in, no model file

use anyhow::{Context, Result};
use model2vec::Model2Vec;
use std::path::Path;

use crate::core::config::{EmbedderBackend, EmbedderConfig, EMBEDDING_MODEL_ID};
use crate::core::error::TagGenError;
use crate::core::paths::cached_model_path;

/// Embedding model abstraction
pub trait Embedder: Send + Sync {
    /// Generate embedding for a single text
    fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Generate embeddings for multiple texts
    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>>;

    /// Get model name/identifier
    fn name(&self) -> &str;
}

/// Calculate cosine similarity between two embeddings
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a > 0.0 && norm_b > 0.0 {
        dot / (norm_a * norm_b)
    } else {
        0.0
    }
}

// ============================================================================
// Model2Vec Embedder
// ============================================================================

/// Model2Vec based embedder
pub struct Model2VecEmbedder {
    model: Model2Vec,
    model_name: String,
}

impl Model2VecEmbedder {
    /// Load model from local path
    pub fn from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            anyhow::bail!("Model path does not exist: {}", path.display());
        }
        let model = Model2Vec::from_pretrained(path.to_string_lossy().as_ref(), None, None)
            .with_context(|| format!("Failed to load Model2Vec from: {}", path.display()))?;

        Ok(Self {
            model,
            model_name: path.to_string_lossy().to_string(),
        })
    }

    /// Load model from HuggingFace Hub
    pub fn from_pretrained(model_id: &str) -> Result<Self> {
        let model = Model2Vec::from_pretrained(model_id, None, None)
            .with_context(|| format!("Failed to load Model2Vec: {}", model_id))?;

        Ok(Self {
            model,
            model_name: model_id.to_string(),
        })
    }

    /// Load per config: explicit local path, then HuggingFace cache, then hub
    pub fn load(config: &EmbedderConfig) -> Result<Self> {
        if let Some(path) = &config.model_path {
            return Self::from_path(Path::new(path));
        }

        if let Some(cache_path) = cached_model_path(EMBEDDING_MODEL_ID) {
            tracing::debug!("Using cached model snapshot at {}", cache_path.display());
            return Self::from_path(&cache_path);
        }

        Self::from_pretrained(EMBEDDING_MODEL_ID)
    }
}

impl Embedder for Model2VecEmbedder {
    fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let texts = [text];
        let embeddings = self.model.encode(&texts).context("Failed to encode text")?;
        Ok(embeddings.row(0).to_vec())
    }

    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        let embeddings = self.model.encode(texts).context("Failed to encode texts")?;
        Ok(embeddings.rows().into_iter().map(|r| r.to_vec()).collect())
    }

    fn name(&self) -> &str {
        &self.model_name
    }
}

// ============================================================================
// Hashing Embedder
// ============================================================================

/// Dimension of the built-in hashing embedder
pub const HASHING_DIM: usize = 256;

/// Feature-hashing embedder over words and character trigrams.
///
/// Captures lexical overlap only. Used for offline runs and tests.
#[derive(Debug, Default, Clone)]
pub struct HashingEmbedder;

impl HashingEmbedder {
    pub fn new() -> Self {
        Self
    }

    fn add_feature(vector: &mut [f32], feature: &str, weight: f32) {
        let hash = fnv1a(feature.as_bytes());
        let index = (hash % HASHING_DIM as u64) as usize;
        let sign = if (hash >> 63) == 0 { 1.0 } else { -1.0 };
        vector[index] += sign * weight;
    }
}

fn fnv1a(bytes: &[u8]) -> u64 {
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for &b in bytes {
        hash ^= b as u64;
        hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
    }
    hash
}

impl Embedder for HashingEmbedder {
    fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let mut vector = vec![0.0f32; HASHING_DIM];

        for word in text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
        {
            let word = word.to_lowercase();
            Self::add_feature(&mut vector, &word, 1.0);

            let padded: Vec<char> = format!("<{}>", word).chars().collect();
            for gram in padded.windows(3) {
                let gram: String = gram.iter().collect();
                Self::add_feature(&mut vector, &gram, 0.5);
            }
        }

        let norm = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for v in &mut vector {
                *v /= norm;
            }
        }

        Ok(vector)
    }

    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        texts.iter().map(|t| self.embed(t)).collect()
    }

    fn name(&self) -> &str {
        "hashing-256"
    }
}

// ============================================================================
// Factory function
// ============================================================================

/// Create embedder based on configuration
pub fn create_embedder(
    config: &EmbedderConfig,
) -> std::result::Result<Box<dyn Embedder>, TagGenError> {
    match config.backend {
        EmbedderBackend::Model2vec => {
            let embedder = Model2VecEmbedder::load(config)
                .map_err(|e| TagGenError::ModelLoad(format!("{:#}", e)))?;
            Ok(Box::new(embedder))
        }
        EmbedderBackend::Hashing => Ok(Box::new(HashingEmbedder::new())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cosine_similarity() {
        assert!((cosine_similarity(&[1.0, 0.0], &[1.0, 0.0]) - 1.0).abs() < 1e-6);
        assert!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).abs() < 1e-6);
        assert_eq!(cosine_similarity(&[1.0], &[1.0, 2.0]), 0.0);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 2.0]), 0.0);
    }

    #[test]
    fn test_hashing_embedder_overlap() {
        let embedder = HashingEmbedder::new();
        let doc = embedder.embed("relational algebra and sql").unwrap();
        let close = embedder.embed("relational algebra").unwrap();
        let far = embedder.embed("impressionist painting").unwrap();

        assert_eq!(doc.len(), HASHING_DIM);
        assert!(cosine_similarity(&doc, &close) > cosine_similarity(&doc, &far));
    }

    #[test]
    fn test_hashing_embedder_is_deterministic() {
        let embedder = HashingEmbedder::new();
        let batch = embedder.embed_batch(&["sql", "sql"]).unwrap();
        assert_eq!(batch[0], batch[1]);
        assert_eq!(embedder.embed("").unwrap(), vec![0.0; HASHING_DIM]);
    }

    #[test]
    fn test_create_embedder_hashing() {
        let config = EmbedderConfig {
            backend: EmbedderBackend::Hashing,
            ..Default::default()
        };
        let embedder = create_embedder(&config).unwrap();
        assert_eq!(embedder.name(), "hashing-256");
    }

    #[test]
    fn test_missing_local_model_is_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = EmbedderConfig {
            model_path: Some(dir.path().join("absent").to_string_lossy().to_string()),
            ..Default::default()
        };
        assert!(matches!(
            create_embedder(&config),
            Err(TagGenError::ModelLoad(_))
        ));
    }

    #[test]
    #[ignore] // Requires model download
    fn test_model2vec_similarity() {
        let embedder = create_embedder(&EmbedderConfig::default()).unwrap();

        let emb1 = embedder.embed("relational databases").unwrap();
        let emb2 = embedder.embed("sql queries").unwrap();
        let emb3 = embedder.embed("cooking recipes").unwrap();

        assert!(cosine_similarity(&emb1, &emb2) > cosine_similarity(&emb1, &emb3));
    }
}
