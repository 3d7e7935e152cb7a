//! The parsing seam between discovery and a real source front-end.
//!
//! The engine only needs three facts about a source file: the path, the
//! declared package, and the trigger annotations it carries. Anything that
//! can supply those implements [`SourceParser`]; the bundled
//! [`DeclarationScanner`] reads them straight off the declaration lines so
//! the CLI works against real trees without a full front-end.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// A parsed source file, reduced to what generation needs.
#[derive(Debug, Clone)]
pub struct CompilationUnit {
    pub path: PathBuf,
    /// Declared package; empty for the default package.
    pub package: String,
    /// Fully qualified trigger annotation names, in declaration order.
    pub annotations: Vec<String>,
}

/// A single source unit could not be parsed.
#[derive(Debug, Error)]
#[error("failed to parse '{}': {message}", path.display())]
pub struct ParseError {
    pub path: PathBuf,
    pub message: String,
}

impl ParseError {
    pub fn new(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Turns candidate files into compilation units.
pub trait SourceParser: Send + Sync {
    /// Whether this parser wants the given file at all.
    fn handles(&self, path: &Path) -> bool;

    /// Parse one source file.
    fn parse(&self, path: &Path) -> Result<CompilationUnit, ParseError>;
}

/// Line-level scanner for package and annotation declarations.
///
/// Reads the `package` declaration, single-type imports, and leading `@`
/// tokens. Bare annotation names are qualified through the unit's imports,
/// falling back to the declared package, which is how an unimported
/// same-package annotation resolves.
pub struct DeclarationScanner {
    extension: String,
}

impl DeclarationScanner {
    pub fn new() -> Self {
        Self::with_extension("java")
    }

    pub fn with_extension(extension: impl Into<String>) -> Self {
        Self {
            extension: extension.into(),
        }
    }
}

impl Default for DeclarationScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl SourceParser for DeclarationScanner {
    fn handles(&self, path: &Path) -> bool {
        path.extension()
            .is_some_and(|ext| ext == self.extension.as_str())
    }

    fn parse(&self, path: &Path) -> Result<CompilationUnit, ParseError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| ParseError::new(path, format!("unreadable source file: {e}")))?;

        let mut package = String::new();
        let mut imports: HashMap<String, String> = HashMap::new();
        let mut annotations: Vec<String> = Vec::new();

        for line in text.lines() {
            let line = line.trim();

            if let Some(decl) = line.strip_prefix("package ") {
                let decl = decl.trim();
                let Some(name) = decl.strip_suffix(';') else {
                    return Err(ParseError::new(path, "malformed package declaration"));
                };
                let name = name.trim();
                if name.is_empty() {
                    return Err(ParseError::new(path, "malformed package declaration"));
                }
                package = name.to_string();
            } else if let Some(target) = line.strip_prefix("import ") {
                let target = target.trim();
                if target.starts_with("static ") {
                    continue;
                }
                if let Some(full_name) = target.strip_suffix(';') {
                    let full_name = full_name.trim();
                    if full_name.ends_with(".*") {
                        continue;
                    }
                    if let Some(simple) = full_name.rsplit('.').next() {
                        imports.insert(simple.to_string(), full_name.to_string());
                    }
                }
            } else if let Some(rest) = line.strip_prefix('@') {
                let token: String = rest
                    .chars()
                    .take_while(|c| c.is_alphanumeric() || matches!(c, '.' | '_' | '$'))
                    .collect();
                if token.is_empty() || token == "interface" {
                    continue;
                }
                let full_name = if token.contains('.') {
                    token
                } else if let Some(imported) = imports.get(&token) {
                    imported.clone()
                } else if package.is_empty() {
                    token
                } else {
                    format!("{package}.{token}")
                };
                if !annotations.contains(&full_name) {
                    annotations.push(full_name);
                }
            }
        }

        Ok(CompilationUnit {
            path: path.to_path_buf(),
            package,
            annotations,
        })
    }
}
