//! Batch processor
//!
//! Reads a CSV table with "Course Name" and "Course Desc" columns, tags
//! every row in input order and serializes the augmented table. A row whose
//! extraction fails gets an empty tag set; the batch carries on.

use serde::Serialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::time::Instant;

use crate::core::error::Result;
use crate::core::record::TagSet;
use crate::tags::KeyphraseExtractor;

use super::table::CourseTable;

/// A row whose tags could not be extracted
#[derive(Debug, Clone, Serialize)]
pub struct RowFailure {
    /// 1-based data row number (header excluded)
    pub row: usize,
    pub course_name: String,
    pub error: String,
}

/// Result of one batch run
#[derive(Debug)]
pub struct BatchOutput {
    pub table: CourseTable,
    pub bytes: Vec<u8>,
    pub failures: Vec<RowFailure>,
    pub duration_ms: u128,
}

pub struct BatchProcessor<'a> {
    extractor: &'a KeyphraseExtractor,
}

impl<'a> BatchProcessor<'a> {
    pub fn new(extractor: &'a KeyphraseExtractor) -> Self {
        Self { extractor }
    }

    /// Process a CSV file from disk
    pub fn process_file(&self, path: &Path) -> Result<BatchOutput> {
        let file = File::open(path)?;
        self.process(file)
    }

    /// Process CSV data from any reader. The whole table is held in memory.
    pub fn process<R: Read>(&self, source: R) -> Result<BatchOutput> {
        let start = Instant::now();
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(source);

        let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();
        let mut table = CourseTable::new(headers)?;
        let mut failures = Vec::new();

        for (index, result) in reader.records().enumerate() {
            let record = result?;
            let row: Vec<String> = record.iter().map(|f| f.to_string()).collect();
            let course = table.record_for(&row);

            let tags = match self.extractor.extract(&course) {
                Ok(tags) => tags,
                Err(e) if e.is_row_recoverable() => {
                    tracing::warn!("Row {}: {}; leaving tags empty", index + 1, e);
                    failures.push(RowFailure {
                        row: index + 1,
                        course_name: course.name.clone(),
                        error: e.to_string(),
                    });
                    TagSet::empty()
                }
                Err(e) => return Err(e),
            };

            table.push(row, tags);
        }

        let bytes = table.to_csv_bytes()?;
        let duration_ms = start.elapsed().as_millis();
        tracing::info!(
            "Tagged {} rows ({} failed) in {} ms",
            table.len(),
            failures.len(),
            duration_ms
        );

        Ok(BatchOutput {
            table,
            bytes,
            failures,
            duration_ms,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::TagGenError;
    use crate::core::record::MAX_TAGS;
    use crate::tags::HashingEmbedder;

    fn extractor() -> KeyphraseExtractor {
        KeyphraseExtractor::new(Box::new(HashingEmbedder::new())).unwrap()
    }

    const INPUT: &str = "\
Code,Course Name,Course Desc
CS340,Intro to Databases,\"Covers relational algebra, SQL, normalization, and transactions.\"
ART101,Drawing Fundamentals,\"Line, shading, perspective and figure drawing.\"
MATH210,Linear Algebra,\"Vector spaces, linear transformations, eigenvalues and matrix decompositions.\"
";

    #[test]
    fn test_rows_preserved_and_tags_appended() {
        let extractor = extractor();
        let output = BatchProcessor::new(&extractor)
            .process(INPUT.as_bytes())
            .unwrap();

        assert_eq!(output.table.len(), 3);
        assert!(output.failures.is_empty());
        assert!(output.table.tags().iter().all(|t| !t.is_empty() && t.len() <= 7));

        let mut reader = csv::Reader::from_reader(output.bytes.as_slice());
        let headers = reader.headers().unwrap().clone();
        assert_eq!(
            headers.iter().collect::<Vec<_>>(),
            vec!["Code", "Course Name", "Course Desc", "Relevant Tags"]
        );

        let codes: Vec<String> = reader
            .records()
            .map(|r| r.unwrap()[0].to_string())
            .collect();
        assert_eq!(codes, vec!["CS340", "ART101", "MATH210"]);
    }

    #[test]
    fn test_non_ascii_rows_are_tagged() {
        let input = "Course Name,Course Desc\n\
                     Chem,Reduction of co₂s in industry\n\
                     Japanese,丸丸ed characters and 日本語 grammar\n\
                     French,\"Café culture, naïve painting\"\n";
        let extractor = extractor();
        let output = BatchProcessor::new(&extractor)
            .process(input.as_bytes())
            .unwrap();

        assert_eq!(output.table.len(), 3);
        assert!(output.failures.is_empty());
        assert!(!output.table.tags()[0].is_empty());
        assert!(output.table.tags().iter().all(|t| t.len() <= MAX_TAGS));

        let text = String::from_utf8(output.bytes).unwrap();
        assert!(text.starts_with("Course Name,Course Desc,Relevant Tags\n"));
        assert!(text.contains("Reduction of co₂s in industry"));
    }

    #[test]
    fn test_failing_row_gets_empty_tags() {
        let input = "Course Name,Course Desc\n\
                     Databases,SQL and transactions\n\
                     Broken,bad \u{0007} text\n\
                     Algebra,Groups and rings\n";
        let extractor = extractor();
        let output = BatchProcessor::new(&extractor)
            .process(input.as_bytes())
            .unwrap();

        assert_eq!(output.table.len(), 3);
        assert_eq!(output.failures.len(), 1);
        assert_eq!(output.failures[0].row, 2);
        assert_eq!(output.failures[0].course_name, "Broken");

        let tags = output.table.tags();
        assert!(!tags[0].is_empty());
        assert!(tags[1].is_empty());
        assert!(!tags[2].is_empty());
    }

    #[test]
    fn test_missing_desc_column_is_input_format_error() {
        let extractor = extractor();
        let err = BatchProcessor::new(&extractor)
            .process("Course Name,Description\nArt,Painting\n".as_bytes())
            .unwrap_err();
        assert!(matches!(err, TagGenError::InputFormat(msg) if msg.contains("Course Desc")));
    }

    #[test]
    fn test_ragged_row_is_input_format_error() {
        let extractor = extractor();
        let err = BatchProcessor::new(&extractor)
            .process("Course Name,Course Desc\nArt,Painting,extra\n".as_bytes())
            .unwrap_err();
        assert!(matches!(err, TagGenError::InputFormat(_)));
    }

    #[test]
    fn test_blank_cells_yield_empty_tags() {
        let extractor = extractor();
        let output = BatchProcessor::new(&extractor)
            .process("Course Name,Course Desc\n,\n".as_bytes())
            .unwrap();
        assert_eq!(output.table.len(), 1);
        assert!(output.table.tags()[0].is_empty());
        assert!(output.failures.is_empty());
    }

    #[test]
    fn test_empty_table() {
        let extractor = extractor();
        let output = BatchProcessor::new(&extractor)
            .process("Course Name,Course Desc\n".as_bytes())
            .unwrap();
        assert!(output.table.is_empty());
        assert_eq!(
            String::from_utf8(output.bytes).unwrap(),
            "Course Name,Course Desc,Relevant Tags\n"
        );
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let extractor = extractor();
        let err = BatchProcessor::new(&extractor)
            .process_file(&dir.path().join("absent.csv"))
            .unwrap_err();
        assert!(matches!(err, TagGenError::Io(_)));
    }
}
