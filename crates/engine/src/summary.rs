use std::path::{Path, PathBuf};

/// Filesystem action taken (or avoided) by an apply pass.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ApplyAction {
    /// A directory was created for a directory index.
    CreateDirectory,
    /// A file or directory symlink was created.
    CreateSymlink,
    /// A directory junction was created.
    CreateJunction,
    /// A file was copied.
    CopyFile,
    /// A directory subtree was removed.
    RemoveTree,
    /// A single file or link was removed.
    RemoveEntry,
    /// A subtree was left untouched because it was unchanged.
    Skip,
}

impl ApplyAction {
    /// Returns `true` for actions that modify the output.
    #[must_use]
    pub const fn is_mutation(self) -> bool {
        !matches!(self, Self::Skip)
    }
}

/// A single action and the output path it touched.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ApplyRecord {
    action: ApplyAction,
    path: PathBuf,
}

impl ApplyRecord {
    /// Returns the action.
    #[must_use]
    pub const fn action(&self) -> ApplyAction {
        self.action
    }

    /// Returns the output path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Counters describing what an apply pass did.
///
/// When record collection is enabled the summary also keeps an ordered log of
/// every [`ApplyRecord`].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ApplySummary {
    directories_created: u64,
    symlinks_created: u64,
    junctions_created: u64,
    files_copied: u64,
    bytes_copied: u64,
    trees_removed: u64,
    entries_removed: u64,
    skipped: u64,
    records: Option<Vec<ApplyRecord>>,
}

impl ApplySummary {
    /// Creates an empty summary that also collects records.
    #[must_use]
    pub fn with_records() -> Self {
        Self {
            records: Some(Vec::new()),
            ..Self::default()
        }
    }

    pub(crate) fn record(&mut self, action: ApplyAction, path: &Path) {
        match action {
            ApplyAction::CreateDirectory => self.directories_created += 1,
            ApplyAction::CreateSymlink => self.symlinks_created += 1,
            ApplyAction::CreateJunction => self.junctions_created += 1,
            ApplyAction::CopyFile => self.files_copied += 1,
            ApplyAction::RemoveTree => self.trees_removed += 1,
            ApplyAction::RemoveEntry => self.entries_removed += 1,
            ApplyAction::Skip => self.skipped += 1,
        }
        if let Some(records) = self.records.as_mut() {
            records.push(ApplyRecord {
                action,
                path: path.to_path_buf(),
            });
        }
    }

    pub(crate) const fn add_bytes_copied(&mut self, bytes: u64) {
        self.bytes_copied += bytes;
    }

    /// Returns the number of directories created.
    #[must_use]
    pub const fn directories_created(&self) -> u64 {
        self.directories_created
    }

    /// Returns the number of symlinks created.
    #[must_use]
    pub const fn symlinks_created(&self) -> u64 {
        self.symlinks_created
    }

    /// Returns the number of junctions created.
    #[must_use]
    pub const fn junctions_created(&self) -> u64 {
        self.junctions_created
    }

    /// Returns the number of files copied.
    #[must_use]
    pub const fn files_copied(&self) -> u64 {
        self.files_copied
    }

    /// Returns the number of bytes written by file copies.
    #[must_use]
    pub const fn bytes_copied(&self) -> u64 {
        self.bytes_copied
    }

    /// Returns the number of subtrees removed recursively.
    #[must_use]
    pub const fn trees_removed(&self) -> u64 {
        self.trees_removed
    }

    /// Returns the number of single files or links removed.
    #[must_use]
    pub const fn entries_removed(&self) -> u64 {
        self.entries_removed
    }

    /// Returns the number of unchanged subtrees skipped.
    #[must_use]
    pub const fn skipped(&self) -> u64 {
        self.skipped
    }

    /// Returns the collected records, or an empty slice when collection is
    /// disabled.
    #[must_use]
    pub fn records(&self) -> &[ApplyRecord] {
        self.records.as_deref().unwrap_or_default()
    }

    /// Returns `true` when record collection is enabled.
    #[must_use]
    pub const fn collects_records(&self) -> bool {
        self.records.is_some()
    }

    /// Returns `true` when the pass did not modify the output at all.
    #[must_use]
    pub const fn is_noop(&self) -> bool {
        self.directories_created == 0
            && self.symlinks_created == 0
            && self.junctions_created == 0
            && self.files_copied == 0
            && self.trees_removed == 0
            && self.entries_removed == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_do_not_count_as_mutations() {
        let mut summary = ApplySummary::default();
        summary.record(ApplyAction::Skip, Path::new("a"));
        assert!(summary.is_noop());
        assert_eq!(summary.skipped(), 1);
        assert!(summary.records().is_empty());
    }

    #[test]
    fn records_are_kept_in_order_when_enabled() {
        let mut summary = ApplySummary::with_records();
        summary.record(ApplyAction::RemoveEntry, Path::new("old"));
        summary.record(ApplyAction::CopyFile, Path::new("new"));
        summary.add_bytes_copied(4);

        let actions: Vec<_> = summary.records().iter().map(ApplyRecord::action).collect();
        assert_eq!(actions, vec![ApplyAction::RemoveEntry, ApplyAction::CopyFile]);
        assert_eq!(summary.records()[1].path(), Path::new("new"));
        assert_eq!(summary.files_copied(), 1);
        assert_eq!(summary.entries_removed(), 1);
        assert_eq!(summary.bytes_copied(), 4);
        assert!(!summary.is_noop());
        assert!(summary.collects_records());
    }
}
