//! Tracing targets used across the workspace.
//!
//! All targets share the [`ROOT`] prefix so `fs_mirror=debug` enables every
//! subsystem at once.

/// Prefix shared by every target.
pub const ROOT: &str = "fs_mirror";

/// Entry creation performed by the apply engine (directories, links, copies).
pub const APPLY: &str = "fs_mirror::apply";

/// Entry and subtree removal performed by the apply engine.
pub const DELETE: &str = "fs_mirror::delete";

/// Directory scans that build directory indexes.
pub const SCAN: &str = "fs_mirror::scan";

/// Path and symlink resolution in the node cache.
pub const RESOLVE: &str = "fs_mirror::resolve";

/// Updater state transitions, wipes and rebuilds.
pub const UPDATE: &str = "fs_mirror::update";

/// Every target, in the order used when rendering filter directives.
pub const ALL: [&str; 5] = [APPLY, DELETE, SCAN, RESOLVE, UPDATE];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_target_is_nested_under_root() {
        for target in ALL {
            assert!(target.starts_with(ROOT), "{target} outside {ROOT}");
            assert_eq!(&target[ROOT.len()..ROOT.len() + 2], "::");
        }
    }

    #[test]
    fn targets_are_unique() {
        let mut seen = ALL.to_vec();
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), ALL.len());
    }
}
