//! crates/logging/src/tracing_macros.rs
//! Convenience macros for fs-mirror tracing.
//!
//! These macros wrap the standard tracing macros with the targets from
//! [`crate::targets`]. Callers must depend on `tracing` themselves.

/// Emit a trace for an entry created in the output tree.
///
/// # Example
/// ```ignore
/// trace_create!(path = %path.display(), "created directory");
/// ```
#[macro_export]
macro_rules! trace_create {
    ($($arg:tt)*) => {
        ::tracing::debug!(target: "fs_mirror::apply", $($arg)*);
    };
}

/// Emit a trace for an entry or subtree removed from the output tree.
///
/// # Example
/// ```ignore
/// trace_delete!(path = %path.display(), "removed subtree");
/// ```
#[macro_export]
macro_rules! trace_delete {
    ($($arg:tt)*) => {
        ::tracing::debug!(target: "fs_mirror::delete", $($arg)*);
    };
}

/// Emit a trace for a subtree left untouched by a fast path.
///
/// # Example
/// ```ignore
/// trace_skip!(path = %path.display(), reason = "same node", "skipped");
/// ```
#[macro_export]
macro_rules! trace_skip {
    ($($arg:tt)*) => {
        ::tracing::trace!(target: "fs_mirror::apply", $($arg)*);
    };
}

/// Emit a directory scan trace.
///
/// # Example
/// ```ignore
/// trace_scan!(path = %path.display(), entries = count, "scanned directory");
/// ```
#[macro_export]
macro_rules! trace_scan {
    ($($arg:tt)*) => {
        ::tracing::debug!(target: "fs_mirror::scan", $($arg)*);
    };
}

/// Emit a path resolution trace.
///
/// # Example
/// ```ignore
/// trace_resolve!(link = %link.display(), target = %target.display(), "followed symlink");
/// ```
#[macro_export]
macro_rules! trace_resolve {
    ($($arg:tt)*) => {
        ::tracing::trace!(target: "fs_mirror::resolve", $($arg)*);
    };
}

/// Emit an updater lifecycle trace.
///
/// # Example
/// ```ignore
/// trace_update!(output = %output.display(), "wiped output");
/// ```
#[macro_export]
macro_rules! trace_update {
    ($($arg:tt)*) => {
        ::tracing::info!(target: "fs_mirror::update", $($arg)*);
    };
}
