use std::path::PathBuf;

use kiln_core::ResolutionError;
use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result type for manifest operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read '{path}'")]
    #[diagnostic(help("create a kiln.toml or point --config at one"))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse kiln.toml")]
    #[diagnostic(code(kiln::parse_error))]
    Parse {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: toml::de::Error,
    },

    #[error("{message}")]
    #[diagnostic(code(kiln::invalid_config))]
    Validation {
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: Option<SourceSpan>,
        message: String,
    },

    #[error("invalid {what} '{value}'")]
    #[diagnostic(code(kiln::invalid_pattern), help("{reason}"))]
    InvalidPattern {
        #[source_code]
        src: NamedSource<String>,
        #[label("does not compile")]
        span: Option<SourceSpan>,
        what: String,
        value: String,
        reason: String,
    },

    #[error("cannot resolve the project classpath")]
    #[diagnostic(
        code(kiln::unresolved_classpath),
        help("run the build's dependency-resolution step before generating sources")
    )]
    Resolution {
        #[source]
        source: ResolutionError,
    },
}

impl Error {
    /// Create a parse error from a toml error with source context
    pub fn parse(source: toml::de::Error, src: &str, filename: &str) -> Box<Self> {
        let span = source.span().map(SourceSpan::from);
        Box::new(Error::Parse {
            src: NamedSource::new(filename, src.to_string()),
            span,
            source,
        })
    }

    /// Create a validation error with an optional source span
    pub fn validation(
        message: impl Into<String>,
        src: &str,
        filename: &str,
        span: Option<SourceSpan>,
    ) -> Box<Self> {
        Box::new(Error::Validation {
            src: NamedSource::new(filename, src.to_string()),
            span,
            message: message.into(),
        })
    }

    /// Create an invalid pattern/expression error
    pub fn invalid_pattern(
        what: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
        src: &str,
        filename: &str,
        span: Option<SourceSpan>,
    ) -> Box<Self> {
        Box::new(Error::InvalidPattern {
            src: NamedSource::new(filename, src.to_string()),
            span,
            what: what.into(),
            value: value.into(),
            reason: reason.into(),
        })
    }

    /// Wrap a classpath resolution failure
    pub fn resolution(source: ResolutionError) -> Box<Self> {
        Box::new(Error::Resolution { source })
    }
}
