use std::path::{Path, PathBuf};

use crate::{Result, Schema, parse_str_with_filename};

/// Represents a kiln.toml file with both raw content and parsed schema.
///
/// The raw content is kept so later validation steps can attach labeled
/// spans to the original source.
#[derive(Debug)]
pub struct KilnToml {
    path: PathBuf,
    content: String,
    schema: Schema,
}

impl KilnToml {
    /// Open and parse a kiln.toml file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let content = std::fs::read_to_string(&path).map_err(|e| {
            Box::new(crate::Error::Io {
                path: path.clone(),
                source: e,
            })
        })?;
        let filename = path.display().to_string();
        let schema = parse_str_with_filename(&content, &filename)?;

        Ok(Self {
            path,
            content,
            schema,
        })
    }

    /// Get the file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the raw content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Get the parsed schema.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }
}
