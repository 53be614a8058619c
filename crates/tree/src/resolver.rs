//! Path normalization seam used by [`crate::NodeCache`].

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

/// Turns arbitrary paths into the canonical form used as node cache keys.
///
/// Implementations decide when a path is already canonical and how to fully
/// resolve one that is not. The default [`CanonicalResolver`] delegates to the
/// operating system.
pub trait PathResolver {
    /// Returns `true` when `path` can be used as a cache key without further
    /// resolution.
    fn is_resolved(&self, path: &Path) -> bool;

    /// Fully resolves `path`, following every symlink and `..` component.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error when resolution fails, including when
    /// the path does not exist.
    fn resolve(&self, path: &Path) -> io::Result<PathBuf>;
}

/// Resolver backed by [`fs::canonicalize`].
///
/// A path counts as resolved when it is absolute and free of `.` and `..`
/// components.
#[derive(Clone, Copy, Debug, Default)]
pub struct CanonicalResolver;

impl PathResolver for CanonicalResolver {
    fn is_resolved(&self, path: &Path) -> bool {
        is_normalized(path)
    }

    fn resolve(&self, path: &Path) -> io::Result<PathBuf> {
        fs::canonicalize(path)
    }
}

/// Returns `true` when `path` is absolute and has no `.` or `..` components.
#[must_use]
pub fn is_normalized(path: &Path) -> bool {
    path.is_absolute()
        && path
            .components()
            .all(|component| !matches!(component, Component::CurDir | Component::ParentDir))
}

/// Rebuilds `path` from its components, dropping trailing separators and
/// interior `.` segments so equal locations produce equal keys.
pub(crate) fn lexical_key(path: &Path) -> PathBuf {
    path.components().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    #[test]
    fn normalized_paths_are_absolute_without_dot_segments() {
        assert!(is_normalized(Path::new("/a/b")));
        assert!(is_normalized(Path::new("/a/./b")));
        assert!(!is_normalized(Path::new("/a/../b")));
        assert!(!is_normalized(Path::new("a/b")));
        assert!(!is_normalized(Path::new("./a")));
    }

    #[cfg(unix)]
    #[test]
    fn lexical_key_collapses_equivalent_spellings() {
        assert_eq!(lexical_key(Path::new("/a/./b/")), PathBuf::from("/a/b"));
        assert_eq!(lexical_key(Path::new("/a//b")), PathBuf::from("/a/b"));
    }

    #[test]
    fn canonical_resolver_resolves_parent_segments() {
        let temp = tempfile::tempdir().expect("tempdir");
        let nested = temp.path().join("nested");
        fs::create_dir(&nested).expect("create nested");

        let resolver = CanonicalResolver;
        let resolved = resolver
            .resolve(&nested.join("..").join("nested"))
            .expect("resolve");
        assert_eq!(resolved, fs::canonicalize(&nested).expect("canonicalize"));
        assert!(resolver.is_resolved(&resolved));
    }

    #[test]
    fn canonical_resolver_reports_missing_paths() {
        let temp = tempfile::tempdir().expect("tempdir");
        let error = CanonicalResolver
            .resolve(&temp.path().join("missing").join(".."))
            .expect_err("missing path");
        assert_eq!(error.kind(), io::ErrorKind::NotFound);
    }
}
