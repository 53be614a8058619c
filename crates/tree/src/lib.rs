#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `tree` describes the directory trees fs-mirror publishes. A tree is built
//! from three kinds of [`Node`]: a [`FileRef`] naming a regular file, a
//! [`DirectoryRef`] naming an existing directory to be linked as a whole, and
//! a [`DirectoryIndex`] listing named children to be materialized one by one.
//!
//! # Design
//!
//! - [`NodeCache`] resolves paths on disk into nodes and hands out the same
//!   instance for the same canonical path, so unchanged subtrees compare equal
//!   by identity between two builds.
//! - [`DirectoryRef::index`] scans a directory into a [`DirectoryIndex`] and
//!   reuses the result for a configurable TTL.
//! - [`PathResolver`] is the seam through which non-canonical paths are
//!   normalized. [`CanonicalResolver`] uses the operating system.
//! - Every node carries a [`NodeId`]. Nodes live behind [`std::rc::Rc`], so
//!   cloning a [`Node`] shares identity and trees are confined to one thread.
//!
//! # Invariants
//!
//! - Nodes produced by resolution never denote a symlink. Links are followed
//!   until a file or directory is reached, up to [`MAX_SYMLINK_HOPS`].
//! - Index entry names are never empty, `.`, `..`, and never contain a path
//!   separator.
//! - Index entries iterate in lexicographic order.
//!
//! # Errors
//!
//! Failures are reported as [`TreeError`], whose [`TreeErrorKind`] carries
//! the offending path and, for I/O failures, the underlying
//! [`std::io::Error`].
//!
//! # Examples
//!
//! ```
//! use std::fs;
//! use tree::{DirectoryIndex, Node, NodeCache};
//!
//! # fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let temp = tempfile::tempdir()?;
//! let source = temp.path().join("src");
//! fs::create_dir(&source)?;
//! fs::write(source.join("file.txt"), b"data")?;
//!
//! let cache = NodeCache::new();
//! let file = cache.resolve(source.join("file.txt"))?;
//! assert!(file.is_same(&cache.resolve(source.join("file.txt"))?));
//!
//! let root = DirectoryIndex::new()
//!     .with_entry("copy.txt", file)?
//!     .with_entry("scanned", cache.index_of(&source)?)?;
//! let root = Node::from(root);
//! assert!(root.path().is_none());
//! # Ok(())
//! # }
//! # demo().unwrap();
//! ```

mod cache;
mod error;
mod id;
mod index;
mod node;
mod resolver;
mod scanner;

pub use cache::{DEFAULT_INDEX_TTL, MAX_SYMLINK_HOPS, NodeCache, NodeCacheBuilder};
pub use error::{TreeError, TreeErrorKind};
pub use id::NodeId;
pub use index::{DirectoryIndex, Iter};
pub use metadata::FileStat;
pub use node::{DirectoryRef, FileRef, Node, NodeKind};
pub use resolver::{CanonicalResolver, PathResolver, is_normalized};
