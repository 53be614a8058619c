use std::cell::RefCell;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use logging::trace_resolve;
use metadata::FileStat;
use rustc_hash::FxHashMap;

use crate::error::TreeError;
use crate::node::{DirectoryRef, FileRef, Node};
use crate::resolver::{CanonicalResolver, PathResolver, lexical_key};

/// Default lifetime of a scanned directory index.
pub const DEFAULT_INDEX_TTL: Duration = Duration::from_secs(5);

/// Maximum number of symlinks followed while resolving a single path.
pub const MAX_SYMLINK_HOPS: usize = 40;

/// Read-through cache from canonical path to node.
///
/// Resolving the same path twice returns the same node instance for the
/// lifetime of the cache. Entries are never evicted. Symlinks are followed
/// during resolution, so every [`Node::File`] and [`Node::Directory`] handed
/// out denotes a concrete file or directory; the link path is cached as an
/// alias of its target's node.
pub struct NodeCache {
    nodes: RefCell<FxHashMap<PathBuf, Node>>,
    resolver: Box<dyn PathResolver>,
    index_ttl: Duration,
}

impl NodeCache {
    /// Creates a cache using [`CanonicalResolver`] and [`DEFAULT_INDEX_TTL`].
    #[must_use]
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Returns a builder for a cache with a custom resolver or index TTL.
    #[must_use]
    pub fn builder() -> NodeCacheBuilder {
        NodeCacheBuilder::default()
    }

    /// Returns how long a scanned directory index stays valid.
    #[must_use]
    pub const fn index_ttl(&self) -> Duration {
        self.index_ttl
    }

    /// Returns the resolver used for non-canonical paths.
    #[must_use]
    pub fn resolver(&self) -> &dyn PathResolver {
        self.resolver.as_ref()
    }

    /// Returns the number of cached paths, symlink aliases included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.borrow().len()
    }

    /// Returns `true` when nothing has been resolved yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.borrow().is_empty()
    }

    /// Returns `true` when `path` has been resolved before.
    ///
    /// The lookup is lexical and does not consult the resolver.
    #[must_use]
    pub fn contains(&self, path: impl AsRef<Path>) -> bool {
        self.nodes
            .borrow()
            .contains_key(&lexical_key(path.as_ref()))
    }

    /// Resolves `path` to a file or directory node.
    ///
    /// Paths that are not already canonical are resolved through the cache's
    /// [`PathResolver`] first.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError`] when the path cannot be resolved or inspected,
    /// is neither a file, a directory nor a symlink, or sits behind more than
    /// [`MAX_SYMLINK_HOPS`] symlinks.
    pub fn resolve(&self, path: impl AsRef<Path>) -> Result<Node, TreeError> {
        let canonical = self.canonical(path.as_ref())?;
        self.resolve_canonical(canonical, 0)
    }

    /// Resolves `path`, which must be a directory, and returns its scanned
    /// index as a [`Node::Index`].
    ///
    /// # Errors
    ///
    /// Returns [`crate::TreeErrorKind::NotADirectory`] when `path` resolves
    /// to a file, and propagates resolution and scan failures.
    pub fn index_of(&self, path: impl AsRef<Path>) -> Result<Node, TreeError> {
        match self.resolve(path)? {
            Node::Directory(dir) => Ok(Node::Index(dir.index(self)?)),
            other => {
                let path = other.path().map(Path::to_path_buf).unwrap_or_default();
                Err(TreeError::not_a_directory(path))
            }
        }
    }

    fn canonical(&self, path: &Path) -> Result<PathBuf, TreeError> {
        if self.resolver.is_resolved(path) {
            Ok(lexical_key(path))
        } else {
            self.resolver
                .resolve(path)
                .map_err(|error| TreeError::canonicalize(path.to_path_buf(), error))
        }
    }

    fn resolve_canonical(&self, path: PathBuf, hops: usize) -> Result<Node, TreeError> {
        if let Some(node) = self.nodes.borrow().get(&path) {
            return Ok(node.clone());
        }

        let metadata =
            fs::symlink_metadata(&path).map_err(|error| TreeError::metadata(path.clone(), error))?;
        let file_type = metadata.file_type();

        let node = if file_type.is_dir() {
            Node::from(DirectoryRef::from_resolved(path.clone()))
        } else if file_type.is_file() {
            let stat = FileStat::from_metadata(&metadata);
            Node::from(FileRef::from_resolved(path.clone(), Some(stat)))
        } else if file_type.is_symlink() {
            if hops >= MAX_SYMLINK_HOPS {
                return Err(TreeError::symlink_loop(path));
            }
            let target =
                fs::read_link(&path).map_err(|error| TreeError::read_link(path.clone(), error))?;
            // Relative targets are never canonical, even once joined.
            let resolved = if self.resolver.is_resolved(&target) {
                lexical_key(&target)
            } else {
                let joined = path
                    .parent()
                    .map_or_else(|| target.clone(), |parent| parent.join(&target));
                self.resolver
                    .resolve(&joined)
                    .map_err(|error| TreeError::canonicalize(joined, error))?
            };
            trace_resolve!(
                link = %path.display(),
                target = %resolved.display(),
                hops,
                "followed symlink"
            );
            self.resolve_canonical(resolved, hops + 1)?
        } else {
            return Err(TreeError::unsupported_file_type(path));
        };

        self.nodes.borrow_mut().insert(path, node.clone());
        Ok(node)
    }
}

impl Default for NodeCache {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for NodeCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeCache")
            .field("len", &self.len())
            .field("index_ttl", &self.index_ttl)
            .finish_non_exhaustive()
    }
}

/// Builder for [`NodeCache`].
pub struct NodeCacheBuilder {
    resolver: Box<dyn PathResolver>,
    index_ttl: Duration,
}

impl NodeCacheBuilder {
    /// Replaces the default [`CanonicalResolver`].
    #[must_use]
    pub fn resolver(mut self, resolver: impl PathResolver + 'static) -> Self {
        self.resolver = Box::new(resolver);
        self
    }

    /// Sets how long scanned directory indexes are reused.
    #[must_use]
    pub const fn index_ttl(mut self, ttl: Duration) -> Self {
        self.index_ttl = ttl;
        self
    }

    /// Builds the cache.
    #[must_use]
    pub fn build(self) -> NodeCache {
        NodeCache {
            nodes: RefCell::new(FxHashMap::default()),
            resolver: self.resolver,
            index_ttl: self.index_ttl,
        }
    }
}

impl Default for NodeCacheBuilder {
    fn default() -> Self {
        Self {
            resolver: Box::new(CanonicalResolver),
            index_ttl: DEFAULT_INDEX_TTL,
        }
    }
}

impl fmt::Debug for NodeCacheBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeCacheBuilder")
            .field("index_ttl", &self.index_ttl)
            .finish_non_exhaustive()
    }
}
