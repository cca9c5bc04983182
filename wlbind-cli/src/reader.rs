//! Schema tree loading.
//!
//! The XML parser runs outside this tool. Schemas arrive as the JSON form of
//! [`Element`], either from a file or from stdin when the path is `-`.

use crate::error::{CliResult, ReadError};
use std::io::Read;
use std::path::{Path, PathBuf};
use wlbind_gen::dom::Element;

/// Reads schema trees.
#[derive(Debug, Default)]
pub struct SchemaReader;

impl SchemaReader {
    /// Create a new reader.
    pub fn new() -> Self {
        Self
    }

    /// Load the tree at `path`, or from stdin when `path` is `-`.
    pub fn read(&self, path: &Path) -> CliResult<Element> {
        if path == Path::new("-") {
            let mut content = String::new();
            std::io::stdin()
                .read_to_string(&mut content)
                .map_err(|e| ReadError::Io {
                    path: PathBuf::from("<stdin>"),
                    source: e,
                })?;
            return self.parse(Path::new("<stdin>"), &content);
        }

        if !path.exists() {
            return Err(ReadError::NotFound {
                path: path.to_path_buf(),
            }
            .into());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ReadError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        self.parse(path, &content)
    }

    /// Parse tree text read from `path`.
    pub fn parse(&self, path: &Path, content: &str) -> CliResult<Element> {
        let tree = Element::from_json(content)
            .map_err(|e| ReadError::invalid_json(path.to_path_buf(), e.to_string()))?;
        tracing::debug!(path = %path.display(), root = %tree.tag, "loaded schema tree");
        Ok(tree)
    }
}
