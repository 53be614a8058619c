use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Error produced when metadata cannot be applied to a destination.
#[derive(Debug, Error)]
#[error("failed to {context} for '{}': {source}", path.display())]
pub struct MetadataError {
    context: &'static str,
    path: PathBuf,
    #[source]
    source: io::Error,
}

impl MetadataError {
    /// Creates a new error describing the failed action.
    pub fn new(context: &'static str, path: &Path, source: io::Error) -> Self {
        Self {
            context,
            path: path.to_path_buf(),
            source,
        }
    }

    /// Returns the action that failed, e.g. `"preserve timestamps"`.
    #[must_use]
    pub const fn context(&self) -> &'static str {
        self.context
    }

    /// Returns the destination path involved in the failure.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the underlying I/O error.
    #[must_use]
    pub const fn io_error(&self) -> &io::Error {
        &self.source
    }

    /// Consumes the error and returns its parts.
    #[must_use]
    pub fn into_parts(self) -> (&'static str, PathBuf, io::Error) {
        (self.context, self.path, self.source)
    }
}
