use std::path::Path;

use logging::trace_skip;
use tree::{DirectoryIndex, Node};

use crate::error::ApplyError;
use crate::fs_ops;
use crate::mode::LinkMode;
use crate::summary::{ApplyAction, ApplySummary};

/// Reconciles an output location from an old tree description to a new one.
///
/// The applier assumes `old` accurately describes what currently exists at
/// the output path. Unchanged subtrees are skipped without touching disk.
/// Stale entries are removed before new ones are created, and a changed entry
/// is always removed before its replacement is created, so two different
/// objects never need to share a name.
///
/// Removal never follows symlinks or junctions, so sources referenced from
/// the output are never modified.
#[derive(Debug)]
pub struct TreeApplier {
    mode: LinkMode,
    summary: ApplySummary,
}

impl TreeApplier {
    /// Creates an applier materializing nodes with `mode`.
    #[must_use]
    pub fn new(mode: LinkMode) -> Self {
        Self {
            mode,
            summary: ApplySummary::default(),
        }
    }

    /// Enables or disables collection of per-action records.
    #[must_use]
    pub fn collect_records(mut self, enabled: bool) -> Self {
        if enabled != self.summary.collects_records() {
            self.summary = if enabled {
                ApplySummary::with_records()
            } else {
                ApplySummary::default()
            };
        }
        self
    }

    /// Returns the configured link mode.
    #[must_use]
    pub const fn mode(&self) -> LinkMode {
        self.mode
    }

    /// Returns the actions accumulated so far.
    #[must_use]
    pub const fn summary(&self) -> &ApplySummary {
        &self.summary
    }

    /// Consumes the applier and returns its summary.
    #[must_use]
    pub fn into_summary(self) -> ApplySummary {
        self.summary
    }

    /// Transforms `output` from the state described by `old` into the state
    /// described by `new`.
    ///
    /// `None` on either side means nothing exists (or should exist) at
    /// `output`.
    ///
    /// # Errors
    ///
    /// Returns [`ApplyError`] on the first filesystem failure. The output is
    /// left partially updated in that case.
    pub fn apply(
        &mut self,
        output: &Path,
        old: Option<&Node>,
        new: Option<&Node>,
    ) -> Result<(), ApplyError> {
        if old.is_none() && new.is_none() {
            return Ok(());
        }
        if self.is_unchanged(old, new) {
            trace_skip!(path = %output.display(), "unchanged");
            self.summary.record(ApplyAction::Skip, output);
            return Ok(());
        }

        let both_indexes = matches!((old, new), (Some(Node::Index(_)), Some(Node::Index(_))));
        if let Some(old) = old
            && !both_indexes
        {
            self.remove(output, old)?;
        }

        match new {
            None => Ok(()),
            Some(Node::Index(index)) => {
                let previous = match old {
                    Some(Node::Index(previous)) => Some(previous.as_ref()),
                    _ => None,
                };
                self.apply_index(output, previous, index)
            }
            Some(Node::Directory(dir)) => {
                let target = dir.path();
                match self.mode {
                    LinkMode::Symlink => {
                        fs_ops::symlink_directory(target, output)?;
                        self.summary.record(ApplyAction::CreateSymlink, output);
                    }
                    LinkMode::Copy => {
                        fs_ops::junction(target, output)?;
                        self.summary.record(ApplyAction::CreateJunction, output);
                    }
                }
                Ok(())
            }
            Some(Node::File(file)) => {
                match self.mode {
                    LinkMode::Symlink => {
                        fs_ops::symlink_file(file.path(), output)?;
                        self.summary.record(ApplyAction::CreateSymlink, output);
                    }
                    LinkMode::Copy => {
                        let bytes = fs_ops::copy_file(file, output)?;
                        self.summary.add_bytes_copied(bytes);
                        self.summary.record(ApplyAction::CopyFile, output);
                    }
                }
                Ok(())
            }
        }
    }

    fn is_unchanged(&self, old: Option<&Node>, new: Option<&Node>) -> bool {
        let (Some(old), Some(new)) = (old, new) else {
            return false;
        };
        if old.is_same(new) {
            return true;
        }
        match (self.mode, old, new) {
            (LinkMode::Symlink, Node::File(old), Node::File(new)) => old.path() == new.path(),
            (LinkMode::Symlink, Node::Directory(old), Node::Directory(new)) => {
                old.path() == new.path()
            }
            (LinkMode::Copy, Node::File(old), Node::File(new)) => {
                old.path() == new.path()
                    && old
                        .cached_stat()
                        .is_some_and(|cached| new.stat().is_ok_and(|current| current == cached))
            }
            _ => false,
        }
    }

    fn remove(&mut self, output: &Path, old: &Node) -> Result<(), ApplyError> {
        let recursive = match old {
            Node::Index(_) => true,
            Node::Directory(_) => self.mode == LinkMode::Copy,
            Node::File(_) => false,
        };
        if recursive {
            fs_ops::remove_tree(output)?;
            self.summary.record(ApplyAction::RemoveTree, output);
        } else {
            fs_ops::remove_entry(output)?;
            self.summary.record(ApplyAction::RemoveEntry, output);
        }
        Ok(())
    }

    fn apply_index(
        &mut self,
        output: &Path,
        previous: Option<&DirectoryIndex>,
        index: &DirectoryIndex,
    ) -> Result<(), ApplyError> {
        match previous {
            Some(previous) => {
                for (name, child) in previous {
                    if !index.contains(name) {
                        self.apply(&output.join(name), Some(child), None)?;
                    }
                }
            }
            None => {
                fs_ops::create_directory(output)?;
                self.summary.record(ApplyAction::CreateDirectory, output);
            }
        }

        for (name, child) in index {
            let old_child = previous.and_then(|previous| previous.get(name));
            self.apply(&output.join(name), old_child, Some(child))?;
        }
        Ok(())
    }
}
