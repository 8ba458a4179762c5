use super::DomainError;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// A path inside a [`Structure`](super::structure::Structure).
///
/// Invariant: relative, at least one segment, no segment is empty, `.` or
/// `..`, and no segment contains a `/`. Enforced at construction.
///
/// The last segment is the leaf name; every preceding segment names a
/// directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StructPath(Vec<String>);

impl StructPath {
    /// Parse a `/`-separated path.
    ///
    /// # Panics
    /// Panics if the path is invalid (use `try_new` for fallible).
    pub fn new(path: &str) -> Self {
        match Self::try_new(path) {
            Ok(p) => p,
            Err(e) => panic!("invalid StructPath {path:?}: {e}"),
        }
    }

    /// Fallible constructor.
    pub fn try_new(path: &str) -> Result<Self, DomainError> {
        if path.starts_with('/') {
            return Err(DomainError::AbsolutePathNotAllowed { path: path.into() });
        }
        Self::from_segments(path.split('/')).map_err(|e| match e {
            DomainError::EmptySegment { .. } => DomainError::EmptySegment { path: path.into() },
            other => other,
        })
    }

    /// Build a path from already-split segments.
    pub fn from_segments<I, S>(segments: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments: Vec<String> = segments.into_iter().map(Into::into).collect();
        let joined = segments.join("/");

        if segments.is_empty() {
            return Err(DomainError::EmptySegment { path: joined });
        }
        for segment in &segments {
            validate_segment(segment, &joined)?;
        }

        Ok(Self(segments))
    }

    /// Segments taken from an existing [`Structure`](super::structure::Structure)
    /// walk; validity is checked by `DomainValidator` before anything is written.
    pub(crate) fn from_trusted(segments: Vec<String>) -> Self {
        Self(segments)
    }

    /// Append a segment, maintaining the invariant.
    pub fn join(&self, segment: &str) -> Result<Self, DomainError> {
        let mut segments = self.0.clone();
        segments.extend(segment.split('/').map(str::to_string));
        Self::from_segments(segments)
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// The leaf name (final segment).
    pub fn file_name(&self) -> &str {
        // Non-empty by construction.
        self.0.last().map(String::as_str).unwrap_or_default()
    }

    /// Directory segments preceding the leaf name.
    pub fn parent_segments(&self) -> &[String] {
        &self.0[..self.0.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Resolve against a filesystem root.
    pub fn to_path_buf(&self, root: &Path) -> PathBuf {
        let mut path = root.to_path_buf();
        path.extend(&self.0);
        path
    }
}

/// Validate a single segment. `context` is the full path for error messages.
pub(crate) fn validate_segment(segment: &str, context: &str) -> Result<(), DomainError> {
    if segment.is_empty() {
        return Err(DomainError::EmptySegment {
            path: context.into(),
        });
    }
    if segment == "." || segment == ".." {
        return Err(DomainError::InvalidPath {
            path: context.into(),
            reason: format!("'{segment}' segments are not allowed"),
        });
    }
    if segment.contains('/') || segment.contains('\\') {
        return Err(DomainError::InvalidPath {
            path: context.into(),
            reason: format!("segment '{segment}' contains a path separator"),
        });
    }
    Ok(())
}

impl FromStr for StructPath {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_new(s)
    }
}

impl fmt::Display for StructPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("/"))
    }
}
