use std::collections::BTreeMap;
use std::collections::btree_map;
use std::ffi::{OsStr, OsString};
use std::path::is_separator;

use crate::error::TreeError;
use crate::id::NodeId;
use crate::node::Node;

/// Ordered mapping from entry name to child node.
///
/// Entries iterate in lexicographic byte order of their names. An index is
/// built with [`DirectoryIndex::insert`] or [`DirectoryIndex::with_entry`] and
/// becomes immutable once wrapped in a [`Node`].
#[derive(Debug)]
pub struct DirectoryIndex {
    id: NodeId,
    entries: BTreeMap<OsString, Node>,
}

impl DirectoryIndex {
    /// Creates an empty index with a fresh identity.
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: NodeId::next(),
            entries: BTreeMap::new(),
        }
    }

    /// Returns the identity token.
    #[must_use]
    pub const fn id(&self) -> NodeId {
        self.id
    }

    /// Inserts `node` under `name`, returning the entry it replaced.
    ///
    /// # Errors
    ///
    /// Fails with [`crate::TreeErrorKind::InvalidEntryName`] when `name` is
    /// empty, `.`, `..` or contains a path separator.
    pub fn insert(
        &mut self,
        name: impl Into<OsString>,
        node: impl Into<Node>,
    ) -> Result<Option<Node>, TreeError> {
        let name = name.into();
        if !is_valid_entry_name(&name) {
            return Err(TreeError::invalid_entry_name(name));
        }
        Ok(self.entries.insert(name, node.into()))
    }

    /// Builder-style variant of [`DirectoryIndex::insert`].
    ///
    /// # Errors
    ///
    /// Same as [`DirectoryIndex::insert`].
    pub fn with_entry(
        mut self,
        name: impl Into<OsString>,
        node: impl Into<Node>,
    ) -> Result<Self, TreeError> {
        self.insert(name, node)?;
        Ok(self)
    }

    /// Returns the child stored under `name`.
    #[must_use]
    pub fn get(&self, name: impl AsRef<OsStr>) -> Option<&Node> {
        self.entries.get(name.as_ref())
    }

    /// Returns `true` when an entry named `name` exists.
    #[must_use]
    pub fn contains(&self, name: impl AsRef<OsStr>) -> bool {
        self.entries.contains_key(name.as_ref())
    }

    /// Iterates over entries in name order.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.entries.iter(),
        }
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when the index has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for DirectoryIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> IntoIterator for &'a DirectoryIndex {
    type Item = (&'a OsStr, &'a Node);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the entries of a [`DirectoryIndex`].
#[derive(Debug)]
pub struct Iter<'a> {
    inner: btree_map::Iter<'a, OsString, Node>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a OsStr, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next()
            .map(|(name, node)| (name.as_os_str(), node))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Iter<'_> {}

fn is_valid_entry_name(name: &OsStr) -> bool {
    if name.is_empty() || name == "." || name == ".." {
        return false;
    }
    !name
        .as_encoded_bytes()
        .iter()
        .any(|&byte| byte.is_ascii() && is_separator(char::from(byte)))
}
