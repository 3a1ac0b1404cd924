//! Shared building blocks: configuration, errors, records, paths

pub mod config;
pub mod error;
pub mod logging;
pub mod paths;
pub mod record;

pub use config::{Config, EmbedderBackend};
pub use error::{Result, TagGenError};
pub use record::{CourseRecord, TagSet, MAX_TAGS};
