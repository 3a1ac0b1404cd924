//! Batch result artifact
//!
//! Results are written to a temporary file in the target directory and then
//! renamed, so a failed write never leaves a partial result behind.

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::core::error::{Result, TagGenError};

/// File name of the batch result
pub const RESULT_FILE_NAME: &str = "CourseTagGen_Result.csv";
/// MIME type of the batch result
pub const RESULT_MIME_TYPE: &str = "text/csv";

/// Write `bytes` to `<dir>/CourseTagGen_Result.csv`, replacing any previous result
pub fn write_output(dir: &Path, bytes: &[u8]) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let target = dir.join(RESULT_FILE_NAME);

    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(bytes)?;
    file.flush()?;
    file.persist(&target)
        .map_err(|e| TagGenError::Io(e.error))?;

    tracing::info!("Wrote {} bytes to {}", bytes.len(), target.display());
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_output_creates_result_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_output(&dir.path().join("out"), b"a,b\n1,2\n").unwrap();

        assert_eq!(path.file_name().unwrap(), RESULT_FILE_NAME);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "a,b\n1,2\n");
    }

    #[test]
    fn test_write_output_replaces_previous_result() {
        let dir = tempfile::tempdir().unwrap();
        write_output(dir.path(), b"old\n").unwrap();
        let path = write_output(dir.path(), b"new\n").unwrap();

        assert_eq!(std::fs::read_to_string(path).unwrap(), "new\n");
        let entries = std::fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(entries, 1);
    }
}
