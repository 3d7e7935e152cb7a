use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};

use serde::Serialize;

/// Where a root came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RootOrigin {
    /// Declared by the project itself.
    Main,
    /// Pulled in through the project's dependencies.
    Dependency,
}

/// What a root holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RootContent {
    /// Source files, scannable for generation triggers.
    Source,
    /// Compiled classes or archives, usable for resolution only.
    Binary,
}

impl std::fmt::Display for RootOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RootOrigin::Main => write!(f, "main"),
            RootOrigin::Dependency => write!(f, "dependency"),
        }
    }
}

impl std::fmt::Display for RootContent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RootContent::Source => write!(f, "source"),
            RootContent::Binary => write!(f, "binary"),
        }
    }
}

/// A classified location usable for symbol resolution or trigger scanning.
///
/// Two roots are equal iff their locations are equal; origin and content
/// play no part in identity. When the same location is seen with different
/// classifications, [`RootSet`] keeps the first one.
#[derive(Debug, Clone, Serialize)]
pub struct Root {
    location: PathBuf,
    origin: RootOrigin,
    content: RootContent,
    is_directory: bool,
}

impl Root {
    /// Create a root with an explicit directory flag.
    pub fn new(
        location: impl Into<PathBuf>,
        origin: RootOrigin,
        content: RootContent,
        is_directory: bool,
    ) -> Self {
        Self {
            location: location.into(),
            origin,
            content,
            is_directory,
        }
    }

    /// Create a directory root.
    pub fn directory(location: impl Into<PathBuf>, origin: RootOrigin, content: RootContent) -> Self {
        Self::new(location, origin, content, true)
    }

    pub fn location(&self) -> &Path {
        &self.location
    }

    pub fn origin(&self) -> RootOrigin {
        self.origin
    }

    pub fn content(&self) -> RootContent {
        self.content
    }

    pub fn is_directory(&self) -> bool {
        self.is_directory
    }
}

impl PartialEq for Root {
    fn eq(&self, other: &Self) -> bool {
        self.location == other.location
    }
}

impl Eq for Root {}

impl Hash for Root {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.location.hash(state);
    }
}

/// An ordered set of roots.
///
/// Insertion order is preserved and duplicate locations are dropped, first
/// occurrence wins. Building a set from the same inputs always yields the
/// same sequence.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RootSet {
    roots: Vec<Root>,
}

impl RootSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a root, returning whether it was admitted.
    ///
    /// A root whose location is already present is dropped silently and
    /// `false` is returned; the earlier classification stands.
    pub fn insert(&mut self, root: Root) -> bool {
        if self.contains(root.location()) {
            return false;
        }
        self.roots.push(root);
        true
    }

    pub fn contains(&self, location: &Path) -> bool {
        self.roots.iter().any(|r| r.location() == location)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Root> {
        self.roots.iter()
    }

    pub fn locations(&self) -> impl Iterator<Item = &Path> {
        self.roots.iter().map(Root::location)
    }

    pub fn len(&self) -> usize {
        self.roots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }
}

impl<'a> IntoIterator for &'a RootSet {
    type Item = &'a Root;
    type IntoIter = std::slice::Iter<'a, Root>;

    fn into_iter(self) -> Self::IntoIter {
        self.roots.iter()
    }
}

impl FromIterator<Root> for RootSet {
    fn from_iter<I: IntoIterator<Item = Root>>(iter: I) -> Self {
        let mut set = RootSet::new();
        for root in iter {
            set.insert(root);
        }
        set
    }
}
