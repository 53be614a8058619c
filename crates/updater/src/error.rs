use std::io;
use std::path::{Path, PathBuf};

use engine::ApplyError;
use tree::NodeKind;

/// Errors reported by [`crate::Updater`].
#[derive(Debug, thiserror::Error)]
pub enum UpdaterError {
    /// The output path exists as a directory with entries in it.
    #[error("output directory '{}' is not empty", path.display())]
    OutputNotEmpty {
        /// Output path.
        path: PathBuf,
    },

    /// The output path exists but is not a directory.
    #[error("output path '{}' exists and is not a directory", path.display())]
    OutputNotDirectory {
        /// Output path.
        path: PathBuf,
    },

    /// The output path could not be inspected.
    #[error("failed to inspect output '{}': {source}", path.display())]
    InspectOutput {
        /// Output path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },

    /// The tree root was not a directory index.
    #[error("tree root must be a directory index, got a {kind}")]
    UnexpectedNodeType {
        /// Kind of the rejected root.
        kind: NodeKind,
    },

    /// The update failed and no rebuild was attempted.
    #[error("failed to update '{}': {source}", path.display())]
    Apply {
        /// Output path.
        path: PathBuf,
        /// Failure of the update pass.
        #[source]
        source: ApplyError,
    },

    /// The update failed and the full rebuild attempted afterwards failed too.
    #[error(
        "failed to rebuild '{}' after an update failure ({original}): {source}",
        path.display()
    )]
    Rebuild {
        /// Output path.
        path: PathBuf,
        /// Failure of the incremental pass that triggered the rebuild.
        original: ApplyError,
        /// Failure of the rebuild.
        #[source]
        source: ApplyError,
    },
}

impl UpdaterError {
    /// Returns the output path involved, if the error concerns one.
    #[must_use]
    pub fn output_path(&self) -> Option<&Path> {
        match self {
            Self::OutputNotEmpty { path }
            | Self::OutputNotDirectory { path }
            | Self::InspectOutput { path, .. }
            | Self::Apply { path, .. }
            | Self::Rebuild { path, .. } => Some(path),
            Self::UnexpectedNodeType { .. } => None,
        }
    }

    /// Returns the apply failure that ended the update, if any.
    #[must_use]
    pub const fn apply_error(&self) -> Option<&ApplyError> {
        match self {
            Self::Apply { source, .. } | Self::Rebuild { source, .. } => Some(source),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn rebuild_display_includes_both_failures() {
        let error = UpdaterError::Rebuild {
            path: PathBuf::from("/out"),
            original: ApplyError::io(
                "remove entry",
                "/out/a",
                io::Error::new(io::ErrorKind::NotFound, "gone"),
            ),
            source: ApplyError::io(
                "open source file",
                "/src/a",
                io::Error::new(io::ErrorKind::NotFound, "missing"),
            ),
        };
        assert_eq!(
            error.to_string(),
            "failed to rebuild '/out' after an update failure \
             (failed to remove entry '/out/a': gone): \
             failed to open source file '/src/a': missing"
        );
        assert_eq!(error.output_path(), Some(Path::new("/out")));
        assert_eq!(error.apply_error().map(ApplyError::path), Some(Path::new("/src/a")));
        assert!(error.source().is_some());
    }

    #[test]
    fn unexpected_node_type_names_kind() {
        let error = UpdaterError::UnexpectedNodeType {
            kind: NodeKind::File,
        };
        assert_eq!(error.to_string(), "tree root must be a directory index, got a file");
        assert!(error.output_path().is_none());
        assert!(error.apply_error().is_none());
    }
}
