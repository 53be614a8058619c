//! File, directory reference and directory index nodes.

use std::cell::{OnceCell, RefCell};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::Instant;

use metadata::FileStat;

use crate::cache::NodeCache;
use crate::error::TreeError;
use crate::id::NodeId;
use crate::index::DirectoryIndex;
use crate::resolver::{is_normalized, lexical_key};
use crate::scanner;

fn normalized(path: PathBuf) -> Result<PathBuf, TreeError> {
    if is_normalized(&path) {
        Ok(lexical_key(&path))
    } else {
        Err(TreeError::not_normalized(path))
    }
}

/// A regular file referenced by absolute path.
///
/// The stat snapshot is captured at most once: either from the lstat record
/// read during resolution, or lazily the first time [`FileRef::stat`] is
/// called.
#[derive(Debug)]
pub struct FileRef {
    id: NodeId,
    path: PathBuf,
    stat: OnceCell<FileStat>,
}

impl FileRef {
    /// Creates a reference to the file at `path` without touching disk.
    ///
    /// # Errors
    ///
    /// Fails with [`crate::TreeErrorKind::NotNormalized`] when `path` is
    /// relative or contains `..`.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, TreeError> {
        Ok(Self::from_resolved(normalized(path.into())?, None))
    }

    pub(crate) fn from_resolved(path: PathBuf, stat: Option<FileStat>) -> Self {
        Self {
            id: NodeId::next(),
            path,
            stat: stat.map_or_else(OnceCell::new, OnceCell::from),
        }
    }

    /// Returns the identity token.
    #[must_use]
    pub const fn id(&self) -> NodeId {
        self.id
    }

    /// Returns the absolute path of the file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the stat snapshot if one has been captured.
    #[must_use]
    pub fn cached_stat(&self) -> Option<FileStat> {
        self.stat.get().copied()
    }

    /// Returns the stat snapshot, capturing and memoizing it on first use.
    ///
    /// # Errors
    ///
    /// Propagates the I/O error when the file cannot be stat'ed. Failures are
    /// not memoized.
    pub fn stat(&self) -> io::Result<FileStat> {
        if let Some(stat) = self.stat.get() {
            return Ok(*stat);
        }
        let captured = FileStat::capture(&self.path)?;
        Ok(*self.stat.get_or_init(|| captured))
    }

    /// Memoizes a snapshot taken from metadata the caller already read.
    ///
    /// An earlier snapshot wins; the returned value is the memoized one.
    pub fn record_stat(&self, metadata: &fs::Metadata) -> FileStat {
        *self
            .stat
            .get_or_init(|| FileStat::from_metadata(metadata))
    }
}

#[derive(Debug)]
struct ScannedIndex {
    index: Rc<DirectoryIndex>,
    scanned_at: Instant,
}

/// A real directory referenced by absolute path.
///
/// Its contents are only read when [`DirectoryRef::index`] is called. The
/// resulting index is cached for the TTL configured on the [`NodeCache`].
#[derive(Debug)]
pub struct DirectoryRef {
    id: NodeId,
    path: PathBuf,
    index: RefCell<Option<ScannedIndex>>,
}

impl DirectoryRef {
    /// Creates a reference to the directory at `path` without touching disk.
    ///
    /// # Errors
    ///
    /// Fails with [`crate::TreeErrorKind::NotNormalized`] when `path` is
    /// relative or contains `..`.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, TreeError> {
        Ok(Self::from_resolved(normalized(path.into())?))
    }

    pub(crate) fn from_resolved(path: PathBuf) -> Self {
        Self {
            id: NodeId::next(),
            path,
            index: RefCell::new(None),
        }
    }

    /// Returns the identity token.
    #[must_use]
    pub const fn id(&self) -> NodeId {
        self.id
    }

    /// Returns the absolute path of the directory.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Scans the directory into a [`DirectoryIndex`], resolving every entry
    /// through `cache`.
    ///
    /// Within the cache's index TTL the previously scanned index instance is
    /// returned without reading the directory again.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError`] when the directory or any entry cannot be read or
    /// resolved.
    pub fn index(&self, cache: &NodeCache) -> Result<Rc<DirectoryIndex>, TreeError> {
        let ttl = cache.index_ttl();
        if let Some(scanned) = self.index.borrow().as_ref()
            && scanned.scanned_at.elapsed() < ttl
        {
            return Ok(Rc::clone(&scanned.index));
        }

        let index = Rc::new(scanner::scan_directory(&self.path, cache)?);
        *self.index.borrow_mut() = Some(ScannedIndex {
            index: Rc::clone(&index),
            scanned_at: Instant::now(),
        });
        Ok(index)
    }

    /// Drops the cached index so the next [`DirectoryRef::index`] call rescans.
    pub fn invalidate_index(&self) {
        self.index.borrow_mut().take();
    }
}

/// Variant tag of a [`Node`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum NodeKind {
    /// [`Node::File`].
    File,
    /// [`Node::Directory`].
    Directory,
    /// [`Node::Index`].
    Index,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::File => "file",
            Self::Directory => "directory reference",
            Self::Index => "directory index",
        })
    }
}

/// A node of a tree description.
///
/// Cloning is cheap and preserves identity: the clone shares the allocation
/// and [`NodeId`] of the original.
#[derive(Clone, Debug)]
pub enum Node {
    /// A regular file to link or copy.
    File(Rc<FileRef>),
    /// An existing directory to link as a whole.
    Directory(Rc<DirectoryRef>),
    /// A directory to materialize entry by entry.
    Index(Rc<DirectoryIndex>),
}

impl Node {
    /// Returns the identity token of the underlying node.
    #[must_use]
    pub fn id(&self) -> NodeId {
        match self {
            Self::File(file) => file.id(),
            Self::Directory(dir) => dir.id(),
            Self::Index(index) => index.id(),
        }
    }

    /// Returns `true` when both handles refer to the same node instance.
    #[must_use]
    pub fn is_same(&self, other: &Self) -> bool {
        self.id() == other.id()
    }

    /// Returns the variant tag.
    #[must_use]
    pub const fn kind(&self) -> NodeKind {
        match self {
            Self::File(_) => NodeKind::File,
            Self::Directory(_) => NodeKind::Directory,
            Self::Index(_) => NodeKind::Index,
        }
    }

    /// Returns the referenced path, or `None` for a directory index.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::File(file) => Some(file.path()),
            Self::Directory(dir) => Some(dir.path()),
            Self::Index(_) => None,
        }
    }

    /// Returns the file reference if this is a [`Node::File`].
    #[must_use]
    pub const fn as_file(&self) -> Option<&Rc<FileRef>> {
        match self {
            Self::File(file) => Some(file),
            _ => None,
        }
    }

    /// Returns the directory reference if this is a [`Node::Directory`].
    #[must_use]
    pub const fn as_directory(&self) -> Option<&Rc<DirectoryRef>> {
        match self {
            Self::Directory(dir) => Some(dir),
            _ => None,
        }
    }

    /// Returns the index if this is a [`Node::Index`].
    #[must_use]
    pub const fn as_index(&self) -> Option<&Rc<DirectoryIndex>> {
        match self {
            Self::Index(index) => Some(index),
            _ => None,
        }
    }
}

impl From<FileRef> for Node {
    fn from(file: FileRef) -> Self {
        Self::File(Rc::new(file))
    }
}

impl From<DirectoryRef> for Node {
    fn from(dir: DirectoryRef) -> Self {
        Self::Directory(Rc::new(dir))
    }
}

impl From<DirectoryIndex> for Node {
    fn from(index: DirectoryIndex) -> Self {
        Self::Index(Rc::new(index))
    }
}

impl From<Rc<FileRef>> for Node {
    fn from(file: Rc<FileRef>) -> Self {
        Self::File(file)
    }
}

impl From<Rc<DirectoryRef>> for Node {
    fn from(dir: Rc<DirectoryRef>) -> Self {
        Self::Directory(dir)
    }
}

impl From<Rc<DirectoryIndex>> for Node {
    fn from(index: Rc<DirectoryIndex>) -> Self {
        Self::Index(index)
    }
}
