//! JSON output types for MCP tools

use serde::Serialize;

use crate::batch::{RowFailure, TaggedRow};
use crate::tags::Keyword;

#[derive(Debug, Serialize)]
pub struct GenerateTagsJson {
    pub tags: Vec<Keyword>,
    pub joined: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ProcessCsvJson {
    pub rows: usize,
    pub failed_rows: Vec<RowFailure>,
    pub output_path: String,
    pub file_name: String,
    pub mime_type: String,
    pub duration_ms: u128,
    pub preview: Vec<TaggedRow>,
}
