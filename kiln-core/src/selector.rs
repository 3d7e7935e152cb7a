//! Pure filters that narrow the scan set.

use std::path::Path;

use crate::glob::Glob;
use crate::root::RootSet;

/// Keep only directory roots whose path matches the ant-style glob.
///
/// Root locations are matched relative to `base_dir` when they live under
/// it, so a pattern like `src/generated/**` works against absolute roots.
/// The default `**` pattern is a no-op filter.
pub fn filter_directories(roots: &RootSet, pattern: &Glob, base_dir: &Path) -> RootSet {
    roots
        .iter()
        .filter(|root| root.is_directory())
        .filter(|root| pattern.matches(&glob_text(root.location(), base_dir)))
        .cloned()
        .collect()
}

/// Whether a compilation unit declared in `package` is admitted.
///
/// The default `*` pattern admits every package, the unnamed default
/// package included.
pub fn package_matches(pattern: &Glob, package: &str) -> bool {
    pattern.matches(package)
}

fn glob_text(location: &Path, base_dir: &Path) -> String {
    let relative = location.strip_prefix(base_dir).unwrap_or(location);
    let segments: Vec<_> = relative
        .components()
        .filter(|c| matches!(c, std::path::Component::Normal(_)))
        .map(|c| c.as_os_str().to_string_lossy())
        .collect();
    segments.join("/")
}
