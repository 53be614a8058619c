use std::error::Error;
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// Error returned when resolving paths or building tree nodes fails.
#[derive(Debug)]
pub struct TreeError {
    kind: TreeErrorKind,
}

impl TreeError {
    pub(crate) fn new(kind: TreeErrorKind) -> Self {
        Self { kind }
    }

    pub(crate) fn metadata(path: PathBuf, source: io::Error) -> Self {
        Self::new(TreeErrorKind::Metadata { path, source })
    }

    pub(crate) fn read_dir(path: PathBuf, source: io::Error) -> Self {
        Self::new(TreeErrorKind::ReadDir { path, source })
    }

    pub(crate) fn read_dir_entry(path: PathBuf, source: io::Error) -> Self {
        Self::new(TreeErrorKind::ReadDirEntry { path, source })
    }

    pub(crate) fn read_link(path: PathBuf, source: io::Error) -> Self {
        Self::new(TreeErrorKind::ReadLink { path, source })
    }

    pub(crate) fn canonicalize(path: PathBuf, source: io::Error) -> Self {
        Self::new(TreeErrorKind::Canonicalize { path, source })
    }

    pub(crate) fn unsupported_file_type(path: PathBuf) -> Self {
        Self::new(TreeErrorKind::UnsupportedFileType { path })
    }

    pub(crate) fn symlink_loop(path: PathBuf) -> Self {
        Self::new(TreeErrorKind::SymlinkLoop { path })
    }

    pub(crate) fn invalid_entry_name(name: OsString) -> Self {
        Self::new(TreeErrorKind::InvalidEntryName { name })
    }

    pub(crate) fn not_normalized(path: PathBuf) -> Self {
        Self::new(TreeErrorKind::NotNormalized { path })
    }

    pub(crate) fn not_a_directory(path: PathBuf) -> Self {
        Self::new(TreeErrorKind::NotADirectory { path })
    }

    /// Returns the specific failure.
    #[must_use]
    pub fn kind(&self) -> &TreeErrorKind {
        &self.kind
    }

    /// Returns the filesystem path associated with the error.
    ///
    /// For [`TreeErrorKind::InvalidEntryName`] this is the rejected name.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.kind.path()
    }
}

impl fmt::Display for TreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            TreeErrorKind::Metadata { path, source } => {
                write!(
                    f,
                    "failed to inspect metadata for '{}': {}",
                    path.display(),
                    source
                )
            }
            TreeErrorKind::ReadDir { path, source } => {
                write!(
                    f,
                    "failed to read directory '{}': {}",
                    path.display(),
                    source
                )
            }
            TreeErrorKind::ReadDirEntry { path, source } => {
                write!(
                    f,
                    "failed to read entry in '{}': {}",
                    path.display(),
                    source
                )
            }
            TreeErrorKind::ReadLink { path, source } => {
                write!(f, "failed to read symlink '{}': {}", path.display(), source)
            }
            TreeErrorKind::Canonicalize { path, source } => {
                write!(f, "failed to canonicalize '{}': {}", path.display(), source)
            }
            TreeErrorKind::UnsupportedFileType { path } => {
                write!(f, "unsupported file type at '{}'", path.display())
            }
            TreeErrorKind::SymlinkLoop { path } => {
                write!(
                    f,
                    "too many levels of symbolic links resolving '{}'",
                    path.display()
                )
            }
            TreeErrorKind::InvalidEntryName { name } => {
                write!(
                    f,
                    "invalid directory entry name '{}'",
                    name.to_string_lossy()
                )
            }
            TreeErrorKind::NotNormalized { path } => {
                write!(
                    f,
                    "expected an absolute normalized path, got '{}'",
                    path.display()
                )
            }
            TreeErrorKind::NotADirectory { path } => {
                write!(f, "'{}' is not a directory", path.display())
            }
        }
    }
}

impl Error for TreeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.kind {
            TreeErrorKind::Metadata { source, .. }
            | TreeErrorKind::ReadDir { source, .. }
            | TreeErrorKind::ReadDirEntry { source, .. }
            | TreeErrorKind::ReadLink { source, .. }
            | TreeErrorKind::Canonicalize { source, .. } => Some(source),
            TreeErrorKind::UnsupportedFileType { .. }
            | TreeErrorKind::SymlinkLoop { .. }
            | TreeErrorKind::InvalidEntryName { .. }
            | TreeErrorKind::NotNormalized { .. }
            | TreeErrorKind::NotADirectory { .. } => None,
        }
    }
}

/// Classification of tree construction failures.
#[derive(Debug)]
pub enum TreeErrorKind {
    /// Failed to lstat a path during resolution.
    Metadata {
        /// Path whose metadata could not be retrieved.
        path: PathBuf,
        /// Underlying error emitted by the operating system.
        source: io::Error,
    },
    /// Failed to open a directory for scanning.
    ReadDir {
        /// Directory whose contents could not be read.
        path: PathBuf,
        /// Underlying error emitted by the operating system.
        source: io::Error,
    },
    /// Failed to obtain a directory entry during a scan.
    ReadDirEntry {
        /// Directory containing the problematic entry.
        path: PathBuf,
        /// Underlying error emitted by the operating system.
        source: io::Error,
    },
    /// Failed to read the target of a symlink.
    ReadLink {
        /// Symlink whose target could not be read.
        path: PathBuf,
        /// Underlying error emitted by the operating system.
        source: io::Error,
    },
    /// The path resolver could not produce a canonical path.
    Canonicalize {
        /// Path that failed to resolve.
        path: PathBuf,
        /// Underlying error emitted by the operating system.
        source: io::Error,
    },
    /// The path is neither a regular file, a directory nor a symlink.
    UnsupportedFileType {
        /// Offending path.
        path: PathBuf,
    },
    /// A symlink chain exceeded [`crate::MAX_SYMLINK_HOPS`].
    SymlinkLoop {
        /// Link at which resolution gave up.
        path: PathBuf,
    },
    /// A directory index entry name was empty, `.`, `..` or contained a
    /// path separator.
    InvalidEntryName {
        /// Rejected name.
        name: OsString,
    },
    /// A node was constructed from a relative path or one containing `..`.
    NotNormalized {
        /// Rejected path.
        path: PathBuf,
    },
    /// A directory was required but the path resolved to a file.
    NotADirectory {
        /// Offending path.
        path: PathBuf,
    },
}

impl TreeErrorKind {
    /// Returns the filesystem path tied to the failure.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            TreeErrorKind::Metadata { path, .. }
            | TreeErrorKind::ReadDir { path, .. }
            | TreeErrorKind::ReadDirEntry { path, .. }
            | TreeErrorKind::ReadLink { path, .. }
            | TreeErrorKind::Canonicalize { path, .. }
            | TreeErrorKind::UnsupportedFileType { path }
            | TreeErrorKind::SymlinkLoop { path }
            | TreeErrorKind::NotNormalized { path }
            | TreeErrorKind::NotADirectory { path } => path,
            TreeErrorKind::InvalidEntryName { name } => Path::new(OsStr::new(name)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn io_error(message: &'static str) -> io::Error {
        io::Error::other(message)
    }

    #[test]
    fn tree_error_path_matches_variant_path() {
        let metadata = TreeError::metadata(PathBuf::from("meta"), io_error("meta"));
        assert_eq!(Path::new("meta"), metadata.path());

        let read_link = TreeError::read_link(PathBuf::from("link"), io_error("link"));
        assert_eq!(Path::new("link"), read_link.path());

        let unsupported = TreeError::unsupported_file_type(PathBuf::from("fifo"));
        assert_eq!(Path::new("fifo"), unsupported.path());

        let invalid = TreeError::invalid_entry_name(OsString::from(".."));
        assert_eq!(Path::new(".."), invalid.path());
    }

    #[test]
    fn tree_error_display_is_specific_per_variant() {
        let read_dir = TreeError::read_dir(PathBuf::from("dir"), io_error("boom"));
        assert_eq!("failed to read directory 'dir': boom", read_dir.to_string());

        let read_dir_entry = TreeError::read_dir_entry(PathBuf::from("dir"), io_error("boom"));
        assert_eq!("failed to read entry in 'dir': boom", read_dir_entry.to_string());

        let canonicalize = TreeError::canonicalize(PathBuf::from("rel"), io_error("boom"));
        assert_eq!("failed to canonicalize 'rel': boom", canonicalize.to_string());

        let looped = TreeError::symlink_loop(PathBuf::from("/a"));
        assert_eq!(
            "too many levels of symbolic links resolving '/a'",
            looped.to_string()
        );

        let invalid = TreeError::invalid_entry_name(OsString::from("a/b"));
        assert_eq!("invalid directory entry name 'a/b'", invalid.to_string());

        let relative = TreeError::not_normalized(PathBuf::from("rel"));
        assert_eq!(
            "expected an absolute normalized path, got 'rel'",
            relative.to_string()
        );

        let not_dir = TreeError::not_a_directory(PathBuf::from("/f"));
        assert_eq!("'/f' is not a directory", not_dir.to_string());
    }

    #[test]
    fn tree_error_source_refers_to_underlying_io_error() {
        let error = TreeError::read_dir(PathBuf::from("dir"), io_error("source"));
        let source_ref = error
            .source()
            .and_then(|err| err.downcast_ref::<io::Error>())
            .expect("tree error should expose the underlying io::Error");
        assert_eq!(source_ref.to_string(), "source");

        assert!(TreeError::symlink_loop(PathBuf::from("x")).source().is_none());
    }
}
