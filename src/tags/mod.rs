//! Keyphrase extraction for course tags
//!
//! # Components
//!
//! - `candidates`: tokenizer, tagger and grammar producing candidate phrases
//! - `embedder`: embedding backends (Model2Vec, feature hashing)
//! - `scorer`: cosine / maximal marginal relevance ranking
//! - `extractor`: ties the above together into ranked tag sets
//! - `cache`: process-wide, load-once extractor handle

pub mod cache;
pub mod candidates;
pub mod embedder;
pub mod extractor;
pub mod pos;
pub mod scorer;
pub mod stopwords;

pub use cache::{initialize, ExtractorHandle, ModelCache};
pub use candidates::{CandidateGenerator, LinguisticPipeline, PosPattern};
pub use embedder::{create_embedder, Embedder, HashingEmbedder, Model2VecEmbedder};
pub use extractor::{KeyphraseExtractor, Keyword};
pub use scorer::KeywordScorerType;
