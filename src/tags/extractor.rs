//! Keyphrase extractor
//!
//! Turns a course name and description into a ranked, deduplicated set of
//! keyword phrases: candidates come from the part-of-speech grammar, ranking
//! comes from embedding similarity with maximal marginal relevance.

use serde::Serialize;

use crate::core::config::{
    Config, CANDIDATE_PATTERN, DIVERSITY, PIPELINE_LANGUAGE, STOPWORD_LANGUAGE,
};
use crate::core::error::{Result, TagGenError};
use crate::core::record::{CourseRecord, TagSet, MAX_TAGS};

use super::candidates::CandidateGenerator;
use super::embedder::{create_embedder, Embedder};
use super::scorer::KeywordScorerType;

/// Extracted keyword with relevance score
#[derive(Debug, Clone, Serialize)]
pub struct Keyword {
    pub phrase: String,
    pub score: f32,
}

pub struct KeyphraseExtractor {
    embedder: Box<dyn Embedder>,
    candidates: CandidateGenerator,
    scorer: KeywordScorerType,
    num_keywords: usize,
}

impl KeyphraseExtractor {
    /// Build an extractor around `embedder` with the fixed English pipeline,
    /// candidate grammar and ranking settings.
    pub fn new(embedder: Box<dyn Embedder>) -> Result<Self> {
        let candidates =
            CandidateGenerator::new(PIPELINE_LANGUAGE, CANDIDATE_PATTERN, STOPWORD_LANGUAGE)?;

        Ok(Self {
            embedder,
            candidates,
            scorer: KeywordScorerType::MaximalMarginRelevance {
                diversity: DIVERSITY,
            },
            num_keywords: MAX_TAGS,
        })
    }

    /// Load the configured embedding model and build the extractor
    pub fn from_config(config: &Config) -> Result<Self> {
        let embedder = create_embedder(&config.embedder)?;
        tracing::info!("Loaded embedding model {}", embedder.name());
        Self::new(embedder)
    }

    pub fn embedder_name(&self) -> &str {
        self.embedder.name()
    }

    /// Ranked keywords with their document similarity
    pub fn extract_scored(&self, record: &CourseRecord) -> Result<Vec<Keyword>> {
        if record.is_blank() {
            return Ok(Vec::new());
        }

        let text = record.document_text();
        let phrases = self.candidates.candidates(&text)?;
        tracing::debug!("{} candidate phrases for '{}'", phrases.len(), record.name.trim());
        if phrases.is_empty() {
            return Ok(Vec::new());
        }

        let document_embedding = self
            .embedder
            .embed(&text)
            .map_err(|e| TagGenError::Extraction(format!("{:#}", e)))?;
        let phrase_refs: Vec<&str> = phrases.iter().map(|p| p.as_str()).collect();
        let word_embeddings = self
            .embedder
            .embed_batch(&phrase_refs)
            .map_err(|e| TagGenError::Extraction(format!("{:#}", e)))?;

        if word_embeddings.len() != phrases.len() {
            return Err(TagGenError::Extraction(format!(
                "Embedder returned {} vectors for {} phrases",
                word_embeddings.len(),
                phrases.len()
            )));
        }

        Ok(self
            .scorer
            .score_keywords(&document_embedding, &word_embeddings, self.num_keywords)
            .into_iter()
            .map(|(index, score)| Keyword {
                phrase: phrases[index].clone(),
                score,
            })
            .collect())
    }

    /// Up to seven tags for the record, most relevant first
    pub fn extract(&self, record: &CourseRecord) -> Result<TagSet> {
        let keywords = self.extract_scored(record)?;
        Ok(TagSet::from_ranked(keywords.into_iter().map(|k| k.phrase)))
    }
}
