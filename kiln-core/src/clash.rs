//! Conflict policy for generated output.
//!
//! Every generated write goes through [`write_artifact`], which applies the
//! run's clash strategy when the target path already exists. The decision
//! is presence-based only: an existing file with identical content is
//! treated exactly like a differing one.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// What to do when a generated artifact collides with an existing file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClashStrategy {
    /// Leave the existing file untouched and report a skip.
    #[default]
    Skip,
    /// Replace any existing content unconditionally.
    Overwrite,
    /// Abort the run on the first collision.
    Fail,
}

impl ClashStrategy {
    /// Decide the action for a proposed artifact.
    ///
    /// A first generation (no existing file) always writes, whatever the
    /// strategy.
    pub fn decide(&self, target_exists: bool) -> ClashAction {
        if !target_exists {
            return ClashAction::Write;
        }
        match self {
            ClashStrategy::Skip => ClashAction::Skip,
            ClashStrategy::Overwrite => ClashAction::Write,
            ClashStrategy::Fail => ClashAction::Fail,
        }
    }
}

impl std::fmt::Display for ClashStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClashStrategy::Skip => write!(f, "skip"),
            ClashStrategy::Overwrite => write!(f, "overwrite"),
            ClashStrategy::Fail => write!(f, "fail"),
        }
    }
}

impl std::str::FromStr for ClashStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "skip" => Ok(ClashStrategy::Skip),
            "overwrite" => Ok(ClashStrategy::Overwrite),
            "fail" => Ok(ClashStrategy::Fail),
            other => Err(format!(
                "unknown clash strategy '{other}', expected skip, overwrite, or fail"
            )),
        }
    }
}

/// The resolved action for one proposed artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClashAction {
    Write,
    Skip,
    Fail,
}

/// Result of a mediated write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WriteOutcome {
    /// The artifact was written.
    Written,
    /// An existing file was left untouched.
    Skipped,
}

/// A mediated write was refused or failed.
#[derive(Debug, Error)]
pub enum ClashError {
    #[error("generated artifact already exists at '{path}'")]
    Exists { path: PathBuf },

    #[error("failed to write artifact '{path}'")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Write a generated artifact under the run's clash strategy.
///
/// Parent directories are created as needed. On [`ClashStrategy::Fail`] the
/// existing file's bytes are left untouched and the error aborts the run.
pub fn write_artifact(
    path: &Path,
    content: &str,
    strategy: ClashStrategy,
) -> Result<WriteOutcome, ClashError> {
    match strategy.decide(path.exists()) {
        ClashAction::Write => {
            write_file(path, content)?;
            Ok(WriteOutcome::Written)
        }
        ClashAction::Skip => Ok(WriteOutcome::Skipped),
        ClashAction::Fail => Err(ClashError::Exists {
            path: path.to_path_buf(),
        }),
    }
}

fn write_file(path: &Path, content: &str) -> Result<(), ClashError> {
    let io = |source| ClashError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(io)?;
    }
    std::fs::write(path, content).map_err(io)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_first_generation_is_never_skipped() {
        let temp = TempDir::new().unwrap();
        for strategy in [ClashStrategy::Skip, ClashStrategy::Overwrite, ClashStrategy::Fail] {
            let path = temp.path().join(format!("{strategy}.txt"));
            let outcome = write_artifact(&path, "fresh", strategy).unwrap();
            assert_eq!(outcome, WriteOutcome::Written);
            assert_eq!(fs::read_to_string(&path).unwrap(), "fresh");
        }
    }

    #[test]
    fn test_skip_leaves_existing_bytes() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("existing.txt");
        fs::write(&path, "original").unwrap();

        let outcome = write_artifact(&path, "proposed", ClashStrategy::Skip).unwrap();
        assert_eq!(outcome, WriteOutcome::Skipped);
        assert_eq!(fs::read_to_string(&path).unwrap(), "original");
    }

    #[test]
    fn test_overwrite_replaces_bytes() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("existing.txt");
        fs::write(&path, "original").unwrap();

        let outcome = write_artifact(&path, "proposed", ClashStrategy::Overwrite).unwrap();
        assert_eq!(outcome, WriteOutcome::Written);
        assert_eq!(fs::read_to_string(&path).unwrap(), "proposed");
    }

    #[test]
    fn test_fail_reports_and_leaves_bytes() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("existing.txt");
        fs::write(&path, "original").unwrap();

        let err = write_artifact(&path, "proposed", ClashStrategy::Fail).unwrap_err();
        assert!(matches!(err, ClashError::Exists { .. }));
        assert_eq!(fs::read_to_string(&path).unwrap(), "original");
    }

    #[test]
    fn test_identical_content_still_follows_policy() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("existing.txt");
        fs::write(&path, "same").unwrap();

        let outcome = write_artifact(&path, "same", ClashStrategy::Skip).unwrap();
        assert_eq!(outcome, WriteOutcome::Skipped);
        assert!(write_artifact(&path, "same", ClashStrategy::Fail).is_err());
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("a/b/c/generated.txt");

        let outcome = write_artifact(&path, "nested", ClashStrategy::Skip).unwrap();
        assert_eq!(outcome, WriteOutcome::Written);
        assert_eq!(fs::read_to_string(&path).unwrap(), "nested");
    }

    #[test]
    fn test_decide_matrix() {
        assert_eq!(ClashStrategy::Skip.decide(false), ClashAction::Write);
        assert_eq!(ClashStrategy::Skip.decide(true), ClashAction::Skip);
        assert_eq!(ClashStrategy::Overwrite.decide(true), ClashAction::Write);
        assert_eq!(ClashStrategy::Fail.decide(false), ClashAction::Write);
        assert_eq!(ClashStrategy::Fail.decide(true), ClashAction::Fail);
    }
}
