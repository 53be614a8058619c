#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `updater` owns an output directory and keeps it mirroring the latest tree
//! handed to [`Updater::update`]. It remembers the tree applied last so each
//! update only pays for what changed, and it recovers from a failed pass by
//! wiping the output and rebuilding it from scratch.
//!
//! # Design
//!
//! [`Updater`] is a small state machine over [`UpdaterState`]:
//!
//! - `Empty` until the first successful update, and again after applying
//!   `None`.
//! - `Mirrored(tree)` after a successful update. The next update diffs
//!   against `tree`.
//! - `Errored` while an update is in flight and after one fails. The next
//!   update wipes the output before applying anything.
//!
//! [`UpdaterConfig`] selects the link mode (probed when unset), whether a
//! failure is retried as a full rebuild, and whether reports keep per-action
//! records.
//!
//! # Invariants
//!
//! - The output path is absent or an empty directory when the updater is
//!   created.
//! - Tree roots are directory indexes. Other roots are rejected before the
//!   filesystem is touched.
//! - Wiping never follows links, so link targets survive any failure.
//!
//! # Errors
//!
//! [`UpdaterError`] distinguishes construction failures, rejected roots, and
//! apply failures with or without a failed rebuild. A recovered failure is
//! not an error: it is logged at warning level and reported through
//! [`UpdateReport::recovered_from`].
//!
//! # Examples
//!
//! ```
//! use engine::LinkMode;
//! use std::fs;
//! use tree::{DirectoryIndex, Node, NodeCache};
//! use updater::{Updater, UpdaterConfig};
//!
//! # fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let temp = tempfile::tempdir()?;
//! let source = temp.path().join("a.txt");
//! fs::write(&source, b"alpha")?;
//!
//! let cache = NodeCache::new();
//! let config = UpdaterConfig::builder().link_mode(LinkMode::Copy).build();
//! let mut updater = Updater::new(temp.path().join("out"), config)?;
//!
//! let tree = Node::from(DirectoryIndex::new().with_entry("a.txt", cache.resolve(&source)?)?);
//! updater.update(Some(tree.clone()))?;
//! assert_eq!(fs::read(temp.path().join("out/a.txt"))?, b"alpha");
//!
//! let report = updater.update(Some(tree))?;
//! assert!(report.summary().is_noop());
//! # Ok(())
//! # }
//! # demo().unwrap();
//! ```

mod config;
mod error;
mod report;
mod state;
mod updater;

pub use config::{UpdaterConfig, UpdaterConfigBuilder};
pub use error::UpdaterError;
pub use report::UpdateReport;
pub use state::UpdaterState;
pub use updater::Updater;
