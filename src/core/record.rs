//! Course records and tag sets
//!
//! A `CourseRecord` is built per extraction call and a `TagSet` is the
//! ranked result rendered as a comma-joined string.

use serde::Serialize;

use super::error::{Result, TagGenError};

/// Maximum number of tags kept per record
pub const MAX_TAGS: usize = 7;

/// Separator used when rendering a tag set
pub const TAG_SEPARATOR: &str = ", ";

/// A course name and description pair
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseRecord {
    pub name: String,
    pub description: String,
}

impl CourseRecord {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }

    /// Reject records with an empty name or description.
    ///
    /// Used by the interactive single-record path before any model work.
    pub fn validate(&self) -> Result<()> {
        let mut missing = Vec::new();
        if self.name.trim().is_empty() {
            missing.push("course name");
        }
        if self.description.trim().is_empty() {
            missing.push("course description");
        }

        if missing.is_empty() {
            Ok(())
        } else {
            Err(TagGenError::Validation(format!(
                "Please fill in both the course name and description (missing: {})",
                missing.join(", ")
            )))
        }
    }

    /// True when both fields are blank after trimming
    pub fn is_blank(&self) -> bool {
        self.name.trim().is_empty() && self.description.trim().is_empty()
    }

    /// Normalized text fed to the extractor: `"{name}. {description}"`,
    /// trimmed and lowercased.
    pub fn document_text(&self) -> String {
        format!(
            "{}. {}",
            self.name.trim().to_lowercase(),
            self.description.trim().to_lowercase()
        )
    }
}

/// Ranked keyword phrases, most relevant first
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TagSet {
    tags: Vec<String>,
}

impl TagSet {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build from ranked phrases, dropping duplicates and anything past `MAX_TAGS`
    pub fn from_ranked<I, S>(phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut tags: Vec<String> = Vec::with_capacity(MAX_TAGS);
        for phrase in phrases {
            if tags.len() == MAX_TAGS {
                break;
            }
            let phrase = phrase.into().trim().to_lowercase();
            if phrase.is_empty() || tags.contains(&phrase) {
                continue;
            }
            tags.push(phrase);
        }
        Self { tags }
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(|t| t.as_str())
    }

    pub fn as_slice(&self) -> &[String] {
        &self.tags
    }

    /// Comma-and-space joined rendering used in output tables
    pub fn joined(&self) -> String {
        self.tags.join(TAG_SEPARATOR)
    }
}

impl std::fmt::Display for TagSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.joined())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_text_normalizes() {
        let record = CourseRecord::new("  Intro to Databases ", "Covers SQL.\n");
        assert_eq!(record.document_text(), "intro to databases. covers sql.");
    }

    #[test]
    fn test_validate_reports_missing_fields() {
        assert!(CourseRecord::new("Algebra", "Groups and rings").validate().is_ok());

        let err = CourseRecord::new("Algebra", "   ").validate().unwrap_err();
        match err {
            TagGenError::Validation(msg) => assert!(msg.contains("course description")),
            other => panic!("unexpected error: {other:?}"),
        }

        assert!(CourseRecord::new("", "").validate().is_err());
    }

    #[test]
    fn test_blank_record() {
        assert!(CourseRecord::new(" ", "").is_blank());
        assert!(!CourseRecord::new("x", "").is_blank());
    }

    #[test]
    fn test_tagset_dedup_and_cap() {
        let tags = TagSet::from_ranked([
            "sql", "SQL", "relational algebra", "", "a", "b", "c", "d", "e", "f",
        ]);
        assert_eq!(tags.len(), MAX_TAGS);
        assert_eq!(tags.as_slice()[0], "sql");
        assert_eq!(tags.as_slice()[1], "relational algebra");
        assert_eq!(tags.joined(), "sql, relational algebra, a, b, c, d, e");
    }

    #[test]
    fn test_empty_tagset_renders_empty() {
        assert_eq!(TagSet::empty().joined(), "");
        assert_eq!(TagSet::empty().to_string(), "");
    }
}
