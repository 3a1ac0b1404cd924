//! Batch CSV tagging
//!
//! - `table`: in-memory course table and CSV serialization
//! - `processor`: per-row extraction with partial-failure tolerance
//! - `output`: atomic write of the downloadable result file

pub mod output;
pub mod processor;
pub mod table;

pub use output::{write_output, RESULT_FILE_NAME, RESULT_MIME_TYPE};
pub use processor::{BatchOutput, BatchProcessor, RowFailure};
pub use table::{CourseTable, TaggedRow, DESC_COLUMN, NAME_COLUMN, TAGS_COLUMN};
