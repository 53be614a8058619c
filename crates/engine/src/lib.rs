#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `engine` reconciles an output directory with a tree description built by
//! the [`tree`] crate. Given the node previously applied at a path and the
//! node that should be there now, [`TreeApplier::apply`] performs the minimal
//! set of filesystem operations: create directory, create symlink or
//! junction, copy file, remove subtree, remove entry.
//!
//! # Design
//!
//! - Unchanged subtrees are detected without touching disk: identical node
//!   instances, equal link targets in [`LinkMode::Symlink`], and equal
//!   [`tree::FileStat`] snapshots for copied files in [`LinkMode::Copy`].
//! - Directory indexes are diffed entry by entry. Stale entries are removed
//!   in a first pass, new and changed entries are applied in a second.
//! - [`ApplySummary`] counts what happened and can keep an ordered log of
//!   [`ApplyRecord`]s.
//! - [`probe_symlink_support`] decides the link mode when callers do not.
//!
//! # Invariants
//!
//! - Removal never follows links: a symlink or junction is unlinked and its
//!   target left untouched. Nothing outside the output path is modified.
//! - Copies use exclusive-create semantics. An existing entry where a new one
//!   is expected is an error, never silently overwritten.
//!
//! # Errors
//!
//! All failures are reported as [`ApplyError`], carrying the attempted action
//! and the path involved.
//!
//! # Examples
//!
//! ```
//! use engine::{LinkMode, TreeApplier};
//! use std::fs;
//! use tree::{DirectoryIndex, Node, NodeCache};
//!
//! # fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let temp = tempfile::tempdir()?;
//! let source = temp.path().join("notes.txt");
//! fs::write(&source, b"hello")?;
//!
//! let cache = NodeCache::new();
//! let tree = Node::from(DirectoryIndex::new().with_entry("notes.txt", cache.resolve(&source)?)?);
//!
//! let output = temp.path().join("out");
//! let mut applier = TreeApplier::new(LinkMode::Copy);
//! applier.apply(&output, None, Some(&tree))?;
//! assert_eq!(fs::read(output.join("notes.txt"))?, b"hello");
//!
//! let mut again = TreeApplier::new(LinkMode::Copy);
//! again.apply(&output, Some(&tree), Some(&tree))?;
//! assert!(again.summary().is_noop());
//! # Ok(())
//! # }
//! # demo().unwrap();
//! ```

mod apply;
mod error;
mod fs_ops;
mod mode;
mod probe;
mod summary;

pub use apply::TreeApplier;
pub use error::ApplyError;
pub use fs_ops::{remove_children, remove_tree};
pub use mode::{LinkMode, LinkModeParseError};
pub use probe::probe_symlink_support;
pub use summary::{ApplyAction, ApplyRecord, ApplySummary};
