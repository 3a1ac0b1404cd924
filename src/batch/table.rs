//! In-memory course table
//!
//! Holds the input headers and rows exactly as read, plus one tag set per
//! row, and serializes them back to CSV with the tag column last.

use serde::Serialize;

use crate::core::error::{Result, TagGenError};
use crate::core::record::{CourseRecord, TagSet};

pub const NAME_COLUMN: &str = "Course Name";
pub const DESC_COLUMN: &str = "Course Desc";
pub const TAGS_COLUMN: &str = "Relevant Tags";

/// Positions of the columns the processor reads and writes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnLayout {
    pub name: usize,
    pub description: usize,
    /// Existing `Relevant Tags` column, replaced in place when present
    pub tags: Option<usize>,
}

impl ColumnLayout {
    /// Locate required columns; names are case-sensitive
    pub fn resolve(headers: &[String]) -> Result<Self> {
        let find = |column: &str| headers.iter().position(|h| h == column);

        let missing: Vec<&str> = [NAME_COLUMN, DESC_COLUMN]
            .into_iter()
            .filter(|c| find(*c).is_none())
            .collect();

        match (find(NAME_COLUMN), find(DESC_COLUMN)) {
            (Some(name), Some(description)) => Ok(Self {
                name,
                description,
                tags: find(TAGS_COLUMN),
            }),
            _ => Err(TagGenError::InputFormat(format!(
                "Missing required column(s): {}",
                missing
                    .iter()
                    .map(|c| format!("\"{}\"", c))
                    .collect::<Vec<_>>()
                    .join(", ")
            ))),
        }
    }
}

/// Input rows augmented with one tag set each
#[derive(Debug, Clone)]
pub struct CourseTable {
    headers: Vec<String>,
    layout: ColumnLayout,
    rows: Vec<Vec<String>>,
    tags: Vec<TagSet>,
}

/// One output row as shown in previews
#[derive(Debug, Clone, Serialize)]
pub struct TaggedRow {
    pub course_name: String,
    pub relevant_tags: String,
}

impl CourseTable {
    pub fn new(headers: Vec<String>) -> Result<Self> {
        let layout = ColumnLayout::resolve(&headers)?;
        Ok(Self {
            headers,
            layout,
            rows: Vec::new(),
            tags: Vec::new(),
        })
    }

    pub fn layout(&self) -> ColumnLayout {
        self.layout
    }

    /// Record for a raw row under this table's layout
    pub fn record_for(&self, row: &[String]) -> CourseRecord {
        let cell = |i: usize| row.get(i).cloned().unwrap_or_default();
        CourseRecord::new(cell(self.layout.name), cell(self.layout.description))
    }

    pub fn push(&mut self, row: Vec<String>, tags: TagSet) {
        self.rows.push(row);
        self.tags.push(tags);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn tags(&self) -> &[TagSet] {
        &self.tags
    }

    /// Output header row: input order, `Relevant Tags` last unless it
    /// already existed
    pub fn output_headers(&self) -> Vec<String> {
        let mut headers = self.headers.clone();
        if self.layout.tags.is_none() {
            headers.push(TAGS_COLUMN.to_string());
        }
        headers
    }

    /// Output rows with the joined tag string in place
    pub fn output_rows(&self) -> impl Iterator<Item = Vec<String>> + '_ {
        self.rows.iter().zip(&self.tags).map(move |(row, tags)| {
            let mut row = row.clone();
            match self.layout.tags {
                Some(i) => row[i] = tags.joined(),
                None => row.push(tags.joined()),
            }
            row
        })
    }

    /// Name and tags of the first `limit` rows
    pub fn preview(&self, limit: usize) -> Vec<TaggedRow> {
        self.rows
            .iter()
            .zip(&self.tags)
            .take(limit)
            .map(|(row, tags)| TaggedRow {
                course_name: row.get(self.layout.name).cloned().unwrap_or_default(),
                relevant_tags: tags.joined(),
            })
            .collect()
    }

    /// Serialize with header row, comma delimiter and `\n` line endings
    pub fn to_csv_bytes(&self) -> Result<Vec<u8>> {
        let mut writer = csv::WriterBuilder::new()
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(Vec::new());

        writer.write_record(self.output_headers())?;
        for row in self.output_rows() {
            writer.write_record(&row)?;
        }

        writer
            .into_inner()
            .map_err(|e| TagGenError::Io(std::io::Error::new(std::io::ErrorKind::Other, e.to_string())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_layout_resolves_columns() {
        let layout =
            ColumnLayout::resolve(&headers(&["Code", "Course Name", "Course Desc"])).unwrap();
        assert_eq!(layout.name, 1);
        assert_eq!(layout.description, 2);
        assert_eq!(layout.tags, None);
    }

    #[test]
    fn test_layout_missing_columns_are_named() {
        let err = ColumnLayout::resolve(&headers(&["Course Name", "course desc"])).unwrap_err();
        match err {
            TagGenError::InputFormat(msg) => {
                assert!(msg.contains("\"Course Desc\""));
                assert!(!msg.contains("\"Course Name\""));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_tags_column_appended_last() {
        let mut table = CourseTable::new(headers(&["Course Name", "Course Desc", "Credits"])).unwrap();
        table.push(
            vec!["Algebra".into(), "Groups, rings".into(), "4".into()],
            TagSet::from_ranked(["groups", "rings"]),
        );

        let bytes = table.to_csv_bytes().unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            "Course Name,Course Desc,Credits,Relevant Tags\nAlgebra,\"Groups, rings\",4,\"groups, rings\"\n"
        );
    }

    #[test]
    fn test_existing_tags_column_replaced_in_place() {
        let mut table =
            CourseTable::new(headers(&["Relevant Tags", "Course Name", "Course Desc"])).unwrap();
        table.push(
            vec!["old".into(), "Art".into(), "Painting".into()],
            TagSet::from_ranked(["painting"]),
        );

        assert_eq!(
            table.output_headers(),
            headers(&["Relevant Tags", "Course Name", "Course Desc"])
        );
        let rows: Vec<Vec<String>> = table.output_rows().collect();
        assert_eq!(rows[0][0], "painting");
    }

    #[test]
    fn test_preview() {
        let mut table = CourseTable::new(headers(&["Course Name", "Course Desc"])).unwrap();
        table.push(vec!["A".into(), "x".into()], TagSet::from_ranked(["x"]));
        table.push(vec!["B".into(), "y".into()], TagSet::empty());

        let preview = table.preview(1);
        assert_eq!(preview.len(), 1);
        assert_eq!(preview[0].course_name, "A");
        assert_eq!(preview[0].relevant_tags, "x");
    }
}
