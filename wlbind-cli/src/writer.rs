//! File writer for generated artifacts.
//!
//! Files are written to a temporary file beside the destination and then
//! renamed over it, so readers never observe a partial artifact.

use crate::error::{CliResult, WriteError};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Result of a write operation.
#[derive(Debug)]
pub enum WriteResult {
    /// File was written successfully.
    Written {
        /// Path to the written file.
        path: PathBuf,
        /// Number of bytes written.
        bytes: usize,
    },
    /// Dry run - content was not written.
    DryRun {
        /// Content that would have been written.
        content: String,
        /// Path where content would have been written.
        path: PathBuf,
    },
}

/// File writer with dry-run support.
#[derive(Debug)]
pub struct FileWriter {
    dry_run: bool,
    overwrite: bool,
}

impl FileWriter {
    /// Create a new file writer that replaces existing files.
    pub fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            overwrite: true,
        }
    }

    /// Set whether an existing destination may be replaced.
    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Write content to a file.
    ///
    /// In dry-run mode, returns the content without writing.
    pub fn write(&self, path: &Path, content: &str) -> CliResult<WriteResult> {
        if !self.overwrite && path.exists() {
            return Err(WriteError::AlreadyExists {
                path: path.to_path_buf(),
            }
            .into());
        }

        if self.dry_run {
            return Ok(WriteResult::DryRun {
                content: content.to_string(),
                path: path.to_path_buf(),
            });
        }

        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        if !parent.exists() {
            std::fs::create_dir_all(parent).map_err(|e| WriteError::CreateDir {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let write_error = |e: std::io::Error| WriteError::WriteFile {
            path: path.to_path_buf(),
            source: e,
        };
        let mut file = NamedTempFile::new_in(parent).map_err(write_error)?;
        file.write_all(content.as_bytes()).map_err(write_error)?;
        file.as_file().sync_all().map_err(write_error)?;
        file.persist(path).map_err(|e| WriteError::Persist {
            path: path.to_path_buf(),
            source: e.error,
        })?;

        tracing::debug!(path = %path.display(), bytes = content.len(), "wrote artifact");
        Ok(WriteResult::Written {
            path: path.to_path_buf(),
            bytes: content.len(),
        })
    }

    /// Check if running in dry-run mode.
    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }
}

impl WriteResult {
    /// Get the path associated with this result.
    pub fn path(&self) -> &Path {
        match self {
            WriteResult::Written { path, .. } => path,
            WriteResult::DryRun { path, .. } => path,
        }
    }

    /// Check if the write was successful (not dry-run).
    pub fn was_written(&self) -> bool {
        matches!(self, WriteResult::Written { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use tempfile::TempDir;

    const CONTENT: &str = "pub struct WlCallbackDeleter;\n";

    #[test]
    fn test_write_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("wayland_contract.rs");

        let result = FileWriter::new(false).write(&path, CONTENT).unwrap();

        assert!(result.was_written());
        assert_eq!(result.path(), path.as_path());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), CONTENT);
        // only the destination is left behind
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_write_creates_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("src/protocols/wayland_glue.rs");

        FileWriter::new(false).write(&path, CONTENT).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_write_replaces_existing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("wayland_glue.rs");
        std::fs::write(&path, "stale").unwrap();

        FileWriter::new(false).write(&path, CONTENT).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), CONTENT);
    }

    #[test]
    fn test_refuses_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("wlbind.toml");
        std::fs::write(&path, "keep").unwrap();

        let err = FileWriter::new(false)
            .with_overwrite(false)
            .write(&path, CONTENT)
            .unwrap_err();
        assert!(matches!(err, CliError::Write(WriteError::AlreadyExists { .. })));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "keep");
    }

    #[test]
    fn test_dry_run_does_not_write() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("wayland_contract.rs");

        let writer = FileWriter::new(true);
        assert!(writer.is_dry_run());
        let result = writer.write(&path, CONTENT).unwrap();

        assert!(!path.exists());
        match result {
            WriteResult::DryRun { content, .. } => assert_eq!(content, CONTENT),
            other => panic!("expected a dry run, got {:?}", other),
        }
    }
}
