//! Parameter structures for MCP tools

use schemars::JsonSchema;
use serde::Deserialize;

/// Parameters for generate_tags tool
#[derive(Debug, Deserialize, JsonSchema)]
pub struct GenerateTagsParams {
    /// Course name (e.g., "Intro to Databases")
    #[schemars(description = "Course name")]
    pub course_name: String,
    /// Course description text
    #[schemars(description = "Course description")]
    pub course_desc: String,
}

/// Parameters for process_csv tool
#[derive(Debug, Deserialize, JsonSchema)]
pub struct ProcessCsvParams {
    /// Path to a CSV file with "Course Name" and "Course Desc" columns
    #[schemars(description = "Path to a CSV file with 'Course Name' and 'Course Desc' columns")]
    pub path: String,
    /// Directory for CourseTagGen_Result.csv (default: server output directory)
    #[schemars(description = "Directory to write CourseTagGen_Result.csv into (optional)")]
    #[serde(default)]
    pub output_dir: Option<String>,
    /// Number of tagged rows to include in the response (default: 5)
    #[schemars(description = "Number of tagged rows to preview (default: 5, max: 50)")]
    #[serde(default = "default_preview")]
    pub preview: usize,
}

pub fn default_preview() -> usize {
    5
}
