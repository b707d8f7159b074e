//! Document sinks and the atomic file writer.
//!
//! ## `atomic_write` protocol
//!
//! 1. Ensure the parent directory exists.
//! 2. Write the full content to `<path>.nafuda.tmp`.
//! 3. Rename to the final path (atomic on POSIX).
//! 4. On rename failure, remove the tmp file and leave any previous file untouched.
//!
//! A run that fails or is interrupted before step 3 never leaves a partial
//! document at the destination.

use std::path::{Path, PathBuf};

use serde::Serialize;

use nafuda_renderer::Document;

use crate::error::{io_err, SinkError};

// ---------------------------------------------------------------------------
// Write result
// ---------------------------------------------------------------------------

/// Outcome of handing a document to a sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteResult {
    /// The document was written.
    Written { path: PathBuf, bytes: usize },
    /// `--dry-run` mode: the document *would* have been written.
    WouldWrite { path: PathBuf, bytes: usize },
}

impl WriteResult {
    pub fn path(&self) -> &Path {
        match self {
            WriteResult::Written { path, .. } | WriteResult::WouldWrite { path, .. } => path,
        }
    }
}

// ---------------------------------------------------------------------------
// DocumentSink
// ---------------------------------------------------------------------------

/// Caller-chosen destination for a rendered document.
pub trait DocumentSink {
    fn write_document(&mut self, doc: &Document) -> Result<WriteResult, SinkError>;
}

/// Writes the document atomically to a file.
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
    dry_run: bool,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            dry_run: false,
        }
    }

    /// Report what would be written without touching the filesystem.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DocumentSink for FileSink {
    fn write_document(&mut self, doc: &Document) -> Result<WriteResult, SinkError> {
        let bytes = doc.as_bytes().len();
        if self.dry_run {
            tracing::info!("[dry-run] would write: {}", self.path.display());
            return Ok(WriteResult::WouldWrite {
                path: self.path.clone(),
                bytes,
            });
        }
        atomic_write(&self.path, doc.as_bytes())?;
        tracing::info!("wrote {bytes} bytes ({}): {}", doc.content_type, self.path.display());
        Ok(WriteResult::Written {
            path: self.path.clone(),
            bytes,
        })
    }
}

// ---------------------------------------------------------------------------
// atomic_write
// ---------------------------------------------------------------------------

/// Atomically replace `path` with `content`.
pub fn atomic_write(path: &Path, content: &[u8]) -> Result<(), SinkError> {
    let tmp = PathBuf::from(format!("{}.nafuda.tmp", path.display()));
    atomic_write_with_tmp(path, content, &tmp)
}

fn atomic_write_with_tmp(path: &Path, content: &[u8], tmp: &Path) -> Result<(), SinkError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| io_err(parent, e))?;
    }
    if let Some(tmp_parent) = tmp.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(tmp_parent).map_err(|e| io_err(tmp_parent, e))?;
    }
    std::fs::write(tmp, content).map_err(|e| io_err(tmp, e))?;

    if let Err(e) = std::fs::rename(tmp, path) {
        let _ = std::fs::remove_file(tmp);
        return Err(io_err(path, e));
    }
    Ok(())
}

/// Pretty-print `value` as JSON and write it atomically (run reports, record dumps).
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), SinkError> {
    let mut json = serde_json::to_string_pretty(value)?;
    json.push('\n');
    atomic_write(path, json.as_bytes())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn doc(content: &str) -> Document {
        Document::html(content.to_string())
    }

    #[test]
    fn file_sink_writes_content() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("name_badges.html");
        let result = FileSink::new(&path).write_document(&doc("<html></html>")).unwrap();
        assert_eq!(
            result,
            WriteResult::Written {
                path: path.clone(),
                bytes: 13
            }
        );
        assert_eq!(fs::read_to_string(&path).unwrap(), "<html></html>");
    }

    #[test]
    fn dry_run_does_not_write_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nope.html");
        let result = FileSink::new(&path)
            .dry_run(true)
            .write_document(&doc("x"))
            .unwrap();
        assert!(matches!(result, WriteResult::WouldWrite { .. }));
        assert!(!path.exists(), "dry-run must not create files");
    }

    #[test]
    fn overwrites_existing_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("sheet.html");
        fs::write(&path, "old").unwrap();
        atomic_write(&path, b"new").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
    }

    #[test]
    fn tmp_file_removed_after_write() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("clean.html");
        atomic_write(&path, b"data").unwrap();
        let tmp_path = PathBuf::from(format!("{}.nafuda.tmp", path.display()));
        assert!(!tmp_path.exists(), ".nafuda.tmp must be cleaned up");
    }

    #[test]
    fn creates_parent_directories() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("print").join("2026").join("badges.html");
        atomic_write(&path, b"content").unwrap();
        assert!(path.exists());
    }

    #[test]
    fn write_json_round_trips() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("report.json");
        write_json(&path, &serde_json::json!({"skipped": ["U1"]})).unwrap();
        let back: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(back["skipped"][0], "U1");
    }

    #[test]
    #[cfg(unix)]
    fn rename_failure_leaves_original_and_cleans_tmp() {
        use std::os::unix::fs::PermissionsExt;

        let root = TempDir::new().unwrap();
        let readonly_dir = root.path().join("readonly");
        fs::create_dir_all(&readonly_dir).unwrap();

        let path = readonly_dir.join("badges.html");
        fs::write(&path, "original").unwrap();

        let mut perms = fs::metadata(&readonly_dir).unwrap().permissions();
        perms.set_mode(0o555);
        fs::set_permissions(&readonly_dir, perms).unwrap();

        let tmp_dir = TempDir::new().unwrap();
        let tmp_path = tmp_dir.path().join("badges.html.nafuda.tmp");

        let result = atomic_write_with_tmp(&path, b"new content", &tmp_path);

        let mut restore = fs::metadata(&readonly_dir).unwrap().permissions();
        restore.set_mode(0o755);
        fs::set_permissions(&readonly_dir, restore).unwrap();

        // Root can rename into a 0555 directory; only assert when the OS refused.
        if let Err(err) = result {
            assert!(matches!(err, SinkError::Io { .. }));
            assert_eq!(fs::read_to_string(&path).unwrap(), "original");
            assert!(!tmp_path.exists(), "tmp file must be removed on failure");
        }
    }
}
