use std::fs;
use std::path::Path;
use std::process;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::fs_ops;
use crate::mode::LinkMode;

static NEXT_PROBE_ID: AtomicUsize = AtomicUsize::new(0);

/// Returns `true` when a file symlink can be created inside `dir`.
///
/// A uniquely named dangling link is created and removed again. Any failure,
/// including a missing or read-only `dir`, reports `false`.
pub fn probe_symlink_support(dir: &Path) -> bool {
    let id = NEXT_PROBE_ID.fetch_add(1, Ordering::Relaxed);
    let link = dir.join(format!(".fs-mirror-probe-{}-{id}", process::id()));

    if fs_ops::symlink_file(Path::new("fs-mirror-probe-target"), &link).is_err() {
        return false;
    }
    if let Err(error) = fs::remove_file(&link) {
        tracing::warn!(
            target: logging::targets::APPLY,
            path = %link.display(),
            %error,
            "failed to remove symlink probe"
        );
    }
    true
}

impl LinkMode {
    /// Picks [`LinkMode::Symlink`] when `dir` supports symlinks, otherwise
    /// [`LinkMode::Copy`].
    #[must_use]
    pub fn detect(dir: &Path) -> Self {
        if probe_symlink_support(dir) {
            Self::Symlink
        } else {
            Self::Copy
        }
    }
}
