//! Error taxonomy for tag generation
//!
//! `ModelLoad` is fatal at startup. `Extraction` is recoverable per record,
//! the rest are recoverable at the call boundary.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TagGenError {
    #[error("Failed to load model: {0}")]
    ModelLoad(String),

    #[error("Extraction failed: {0}")]
    Extraction(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Invalid input table: {0}")]
    InputFormat(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl TagGenError {
    /// Whether a batch may continue past this error
    pub fn is_row_recoverable(&self) -> bool {
        matches!(self, TagGenError::Extraction(_))
    }
}

impl From<csv::Error> for TagGenError {
    fn from(err: csv::Error) -> Self {
        if err.is_io_error() {
            match err.into_kind() {
                csv::ErrorKind::Io(io) => TagGenError::Io(io),
                other => TagGenError::InputFormat(format!("{:?}", other)),
            }
        } else {
            TagGenError::InputFormat(err.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, TagGenError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_extraction_is_row_recoverable() {
        assert!(TagGenError::Extraction("bad".into()).is_row_recoverable());
        assert!(!TagGenError::ModelLoad("gone".into()).is_row_recoverable());
        assert!(!TagGenError::InputFormat("cols".into()).is_row_recoverable());
    }

    #[test]
    fn test_csv_io_error_maps_to_io() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: TagGenError = csv::Error::from(io).into();
        assert!(matches!(err, TagGenError::Io(_)));
    }
}
