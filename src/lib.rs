#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `fs_mirror` publishes directory tree descriptions to a stable location on
//! disk, touching only what changed since the previous publication.
//!
//! A build describes its output as a tree of [`Node`]s: files and
//! directories resolved from disk through a [`NodeCache`], and
//! [`DirectoryIndex`]es that name children explicitly. An [`Updater`] bound
//! to an output directory diffs each new tree against the last one it applied
//! and runs the minimal set of operations through a [`TreeApplier`]: create
//! directory, create symlink or junction, copy file, remove subtree, remove
//! entry.
//!
//! # Design
//!
//! The workspace is split by concern and this crate re-exports the public
//! surface of each member:
//!
//! - `tree`: node model, node cache, directory scanner, path resolver seam.
//! - `engine`: reconciliation of one output path from an old node to a new
//!   one, plus symlink capability probing.
//! - `updater`: the `Empty`/`Mirrored`/`Errored` state machine with full
//!   rebuild recovery.
//! - `metadata`: stat snapshots and timestamp and permission stamping.
//! - `logging`: tracing targets and subscriber setup.
//!
//! # Invariants
//!
//! - Nothing outside the output directory is ever modified. Links in the
//!   output are unlinked, never followed, when removed.
//! - Two objects never need to share a name: an old entry is always removed
//!   before its replacement is created.
//! - After a failed update, the next successful one produces exactly the tree
//!   it was given.
//!
//! # Errors
//!
//! [`UpdaterError`] is what callers of [`Updater`] see. It wraps
//! [`ApplyError`] for filesystem failures during an update. Tree construction
//! reports [`TreeError`].
//!
//! # Examples
//!
//! ```
//! use fs_mirror::{DirectoryIndex, LinkMode, Node, NodeCache, Updater, UpdaterConfig};
//! use std::fs;
//!
//! # fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let temp = tempfile::tempdir()?;
//! let assets = temp.path().join("assets");
//! fs::create_dir(&assets)?;
//! fs::write(assets.join("logo.svg"), b"<svg/>")?;
//! fs::write(temp.path().join("index.html"), b"<html/>")?;
//!
//! let cache = NodeCache::new();
//! let site = DirectoryIndex::new()
//!     .with_entry("index.html", cache.resolve(temp.path().join("index.html"))?)?
//!     .with_entry("assets", cache.index_of(&assets)?)?;
//!
//! let config = UpdaterConfig::builder().link_mode(LinkMode::Copy).build();
//! let mut updater = Updater::new(temp.path().join("public"), config)?;
//! updater.update(Some(Node::from(site)))?;
//!
//! assert_eq!(fs::read(temp.path().join("public/assets/logo.svg"))?, b"<svg/>");
//! # Ok(())
//! # }
//! # demo().unwrap();
//! ```

pub use engine::{
    ApplyAction, ApplyError, ApplyRecord, ApplySummary, LinkMode, LinkModeParseError,
    TreeApplier, probe_symlink_support,
};
pub use logging::{Verbosity, VerbosityParseError, init_tracing, init_tracing_with_directives};
pub use metadata::{FileStat, MetadataError};
pub use tree::{
    CanonicalResolver, DEFAULT_INDEX_TTL, DirectoryIndex, DirectoryRef, FileRef,
    MAX_SYMLINK_HOPS, Node, NodeCache, NodeCacheBuilder, NodeId, NodeKind, PathResolver,
    TreeError, TreeErrorKind, is_normalized,
};
pub use updater::{
    UpdateReport, Updater, UpdaterConfig, UpdaterConfigBuilder, UpdaterError, UpdaterState,
};

/// Tracing target names, for building filter directives.
pub use logging::targets;
