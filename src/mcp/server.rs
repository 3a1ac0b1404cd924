//! Course tag MCP server implementation

use anyhow::Result;
use rmcp::{
    handler::server::{tool::ToolRouter, wrapper::Parameters},
    model::{CallToolResult, Content, ServerInfo},
    tool, tool_router, ErrorData as McpError, ServerHandler, ServiceExt,
};
use std::path::{Path, PathBuf};

use crate::batch::{write_output, BatchProcessor, RESULT_FILE_NAME, RESULT_MIME_TYPE};
use crate::core::error::TagGenError;
use crate::core::record::{CourseRecord, TagSet};
use crate::tags::ExtractorHandle;

use super::params::{GenerateTagsParams, ProcessCsvParams};
use super::types::{GenerateTagsJson, ProcessCsvJson};

/// Course tag MCP Service
#[derive(Clone)]
pub struct TagService {
    extractor: ExtractorHandle,
    output_dir: PathBuf,
    tool_router: ToolRouter<Self>,
}

impl TagService {
    pub fn new(extractor: ExtractorHandle, output_dir: PathBuf) -> Self {
        Self {
            extractor,
            output_dir,
            tool_router: Self::tool_router(),
        }
    }
}

fn to_mcp_error(err: TagGenError) -> McpError {
    match err {
        TagGenError::Validation(_) | TagGenError::InputFormat(_) => {
            McpError::invalid_params(err.to_string(), None)
        }
        _ => McpError::internal_error(err.to_string(), None),
    }
}

/// Tag `source` and write the result file into `output_dir`
fn run_batch(
    extractor: &ExtractorHandle,
    source: &Path,
    output_dir: &Path,
    preview: usize,
) -> std::result::Result<ProcessCsvJson, TagGenError> {
    let output = BatchProcessor::new(extractor).process_file(source)?;
    let output_path = write_output(output_dir, &output.bytes)?;

    Ok(ProcessCsvJson {
        rows: output.table.len(),
        preview: output.table.preview(preview),
        failed_rows: output.failures,
        output_path: output_path.display().to_string(),
        file_name: RESULT_FILE_NAME.to_string(),
        mime_type: RESULT_MIME_TYPE.to_string(),
        duration_ms: output.duration_ms,
    })
}

fn json_result<T: serde::Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let output = serde_json::to_string_pretty(value).map_err(|e| {
        McpError::internal_error(format!("JSON serialization failed: {}", e), None)
    })?;
    Ok(CallToolResult::success(vec![Content::text(output)]))
}

#[tool_router]
impl TagService {
    /// Generate tags for one course
    #[tool(
        description = "Generate up to 7 keyword tags for a college course from its name and description. Both fields are required."
    )]
    async fn generate_tags(
        &self,
        params: Parameters<GenerateTagsParams>,
    ) -> Result<CallToolResult, McpError> {
        let record = CourseRecord::new(&params.0.course_name, &params.0.course_desc);
        record.validate().map_err(to_mcp_error)?;

        let output = match self.extractor.extract_scored(&record) {
            Ok(keywords) => {
                let joined =
                    TagSet::from_ranked(keywords.iter().map(|k| k.phrase.clone())).joined();
                GenerateTagsJson {
                    tags: keywords,
                    joined,
                    warning: None,
                }
            }
            Err(e) if e.is_row_recoverable() => GenerateTagsJson {
                tags: Vec::new(),
                joined: String::new(),
                warning: Some(e.to_string()),
            },
            Err(e) => return Err(to_mcp_error(e)),
        };

        json_result(&output)
    }

    /// Tag every row of a CSV file
    #[tool(
        description = "Tag every course in a CSV file with 'Course Name' and 'Course Desc' columns. Writes CourseTagGen_Result.csv with a 'Relevant Tags' column appended and returns its path."
    )]
    async fn process_csv(
        &self,
        params: Parameters<ProcessCsvParams>,
    ) -> Result<CallToolResult, McpError> {
        let source = PathBuf::from(&params.0.path);
        let output_dir = params
            .0
            .output_dir
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| self.output_dir.clone());
        let preview = params.0.preview.min(50);

        // Tagging blocks; run it off the async workers
        let extractor = self.extractor.clone();
        let output = tokio::task::spawn_blocking(move || {
            run_batch(&extractor, &source, &output_dir, preview)
        })
        .await
        .map_err(|e| McpError::internal_error(format!("Batch task failed: {}", e), None))?
        .map_err(to_mcp_error)?;

        json_result(&output)
    }
}

#[rmcp::tool_handler]
impl ServerHandler for TagService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "College course tag generator. Extracts keyword tags from course names and descriptions, one at a time or from a CSV file.".to_string()
            ),
            ..Default::default()
        }
    }
}

/// Run the MCP server
pub async fn run_mcp_server(extractor: ExtractorHandle, output_dir: PathBuf) -> Result<()> {
    use tokio::io::{stdin, stdout};

    let service = TagService::new(extractor, output_dir);
    let transport = (stdin(), stdout());
    let server = service.serve(transport).await?;
    server.waiting().await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tags::{HashingEmbedder, KeyphraseExtractor};
    use std::fs;
    use std::sync::Arc;

    fn service(output_dir: PathBuf) -> TagService {
        let extractor = KeyphraseExtractor::new(Box::new(HashingEmbedder::new())).unwrap();
        TagService::new(Arc::new(extractor), output_dir)
    }

    #[tokio::test]
    async fn test_process_csv_writes_result() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("courses.csv");
        fs::write(
            &source,
            "Course Name,Course Desc\nIntro to Databases,Relational algebra and SQL\n",
        )
        .unwrap();
        let out = dir.path().join("out");

        let result = service(dir.path().to_path_buf())
            .process_csv(Parameters(ProcessCsvParams {
                path: source.to_string_lossy().to_string(),
                output_dir: Some(out.to_string_lossy().to_string()),
                preview: 5,
            }))
            .await;

        assert!(result.is_ok());
        let written = fs::read_to_string(out.join(RESULT_FILE_NAME)).unwrap();
        assert!(written.starts_with("Course Name,Course Desc,Relevant Tags\n"));
    }

    #[tokio::test]
    async fn test_process_csv_missing_column_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("courses.csv");
        fs::write(&source, "Course Name\nArt\n").unwrap();

        let result = service(dir.path().to_path_buf())
            .process_csv(Parameters(ProcessCsvParams {
                path: source.to_string_lossy().to_string(),
                output_dir: None,
                preview: 5,
            }))
            .await;

        assert!(result.is_err());
        assert!(!dir.path().join(RESULT_FILE_NAME).exists());
    }

    #[tokio::test]
    async fn test_generate_tags_rejects_empty_field() {
        let dir = tempfile::tempdir().unwrap();
        let result = service(dir.path().to_path_buf())
            .generate_tags(Parameters(GenerateTagsParams {
                course_name: "Databases".to_string(),
                course_desc: "  ".to_string(),
            }))
            .await;
        assert!(result.is_err());
    }
}
