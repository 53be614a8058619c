//! Error type for apply passes.

use std::io;
use std::path::{Path, PathBuf};

use metadata::MetadataError;

/// Errors that can occur while applying a tree to an output location.
#[derive(Debug, thiserror::Error)]
pub enum ApplyError {
    /// A filesystem call failed.
    #[error("failed to {action} '{}': {source}", path.display())]
    Io {
        /// Action being performed.
        action: &'static str,
        /// Path involved in the failure.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },

    /// Permissions or timestamps could not be stamped onto a copied file.
    #[error(transparent)]
    Metadata(#[from] MetadataError),

    /// The platform offers no primitive for the requested link type.
    #[error("cannot {operation} at '{}': not supported on this platform", path.display())]
    Unsupported {
        /// Operation that was attempted.
        operation: &'static str,
        /// Path that would have been created.
        path: PathBuf,
    },
}

impl ApplyError {
    /// Creates an I/O error with action context.
    pub fn io(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            action,
            path: path.into(),
            source,
        }
    }

    /// Returns the path the failed operation targeted.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Io { path, .. } | Self::Unsupported { path, .. } => path,
            Self::Metadata(error) => error.path(),
        }
    }

    /// Returns the kind of the underlying I/O error, if any.
    #[must_use]
    pub fn io_error_kind(&self) -> Option<io::ErrorKind> {
        match self {
            Self::Io { source, .. } => Some(source.kind()),
            Self::Metadata(error) => Some(error.io_error().kind()),
            Self::Unsupported { .. } => None,
        }
    }
}

/// Maps `io::Result` failures to [`ApplyError::Io`] with action context.
pub(crate) trait IoResultExt<T> {
    fn with_action(self, action: &'static str, path: &Path) -> Result<T, ApplyError>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn with_action(self, action: &'static str, path: &Path) -> Result<T, ApplyError> {
        self.map_err(|error| ApplyError::io(action, path, error))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_display_names_action_and_path() {
        let error = ApplyError::io(
            "create directory",
            "/out/a",
            io::Error::new(io::ErrorKind::AlreadyExists, "exists"),
        );
        assert_eq!(
            error.to_string(),
            "failed to create directory '/out/a': exists"
        );
        assert_eq!(error.path(), Path::new("/out/a"));
        assert_eq!(error.io_error_kind(), Some(io::ErrorKind::AlreadyExists));
    }

    #[test]
    fn metadata_errors_are_transparent() {
        let inner = MetadataError::new(
            "preserve timestamps",
            Path::new("/out/f"),
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        let expected = inner.to_string();
        let error = ApplyError::from(inner);

        assert_eq!(error.to_string(), expected);
        assert_eq!(error.path(), Path::new("/out/f"));
        assert_eq!(error.io_error_kind(), Some(io::ErrorKind::PermissionDenied));
    }

    #[test]
    fn unsupported_has_no_io_kind() {
        let error = ApplyError::Unsupported {
            operation: "create junction",
            path: PathBuf::from("/out/j"),
        };
        assert!(error.to_string().contains("not supported"));
        assert!(error.io_error_kind().is_none());
    }

    #[test]
    fn with_action_wraps_io_errors() {
        let result: io::Result<()> = Err(io::Error::new(io::ErrorKind::NotFound, "gone"));
        let error = result
            .with_action("remove entry", Path::new("/out/x"))
            .expect_err("mapped");
        assert!(matches!(
            error,
            ApplyError::Io {
                action: "remove entry",
                ..
            }
        ));
    }
}
