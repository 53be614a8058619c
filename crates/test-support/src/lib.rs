#![deny(unsafe_code)]
#![deny(missing_docs)]

//! Shared helpers for fs-mirror tests.
//!
//! [`snapshot_tree`] captures a directory as a flat map from relative path to
//! [`Entry`] without following symlinks, so tests can compare an output tree
//! against an expectation and check that sources were left untouched.
//! [`Scratch`] owns a temporary directory with canonical source and output
//! locations.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// One entry of a [`Snapshot`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Entry {
    /// A real directory.
    Directory,
    /// A regular file and its contents.
    File(Vec<u8>),
    /// A symlink (or junction) and its raw target.
    Symlink(PathBuf),
}

impl Entry {
    /// Convenience constructor for a file entry.
    pub fn file(contents: impl AsRef<[u8]>) -> Self {
        Self::File(contents.as_ref().to_vec())
    }

    /// Convenience constructor for a symlink entry.
    pub fn symlink(target: impl Into<PathBuf>) -> Self {
        Self::Symlink(target.into())
    }
}

/// Flat view of a directory tree keyed by path relative to its root.
///
/// The root itself is not included.
pub type Snapshot = BTreeMap<PathBuf, Entry>;

/// Captures the tree rooted at `root` without following symlinks.
///
/// A missing root yields an empty snapshot.
///
/// # Errors
///
/// Propagates I/O errors other than a missing root.
pub fn snapshot_tree(root: &Path) -> io::Result<Snapshot> {
    let mut snapshot = Snapshot::new();
    match fs::symlink_metadata(root) {
        Ok(metadata) if metadata.is_dir() => {}
        Ok(_) => {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("'{}' is not a directory", root.display()),
            ));
        }
        Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(snapshot),
        Err(error) => return Err(error),
    }
    visit(root, Path::new(""), &mut snapshot)?;
    Ok(snapshot)
}

fn visit(dir: &Path, relative: &Path, snapshot: &mut Snapshot) -> io::Result<()> {
    let mut names = fs::read_dir(dir)?
        .map(|entry| entry.map(|entry| entry.file_name()))
        .collect::<io::Result<Vec<_>>>()?;
    names.sort();

    for name in names {
        let path = dir.join(&name);
        let relative = relative.join(&name);
        let file_type = fs::symlink_metadata(&path)?.file_type();
        if file_type.is_symlink() {
            snapshot.insert(relative, Entry::Symlink(fs::read_link(&path)?));
        } else if file_type.is_dir() {
            snapshot.insert(relative.clone(), Entry::Directory);
            visit(&path, &relative, snapshot)?;
        } else {
            snapshot.insert(relative, Entry::File(fs::read(&path)?));
        }
    }
    Ok(())
}

/// Temporary workspace with canonical `src` and `out` locations.
///
/// `src` is created eagerly; `out` is left absent so updaters can be
/// constructed against it directly.
#[derive(Debug)]
pub struct Scratch {
    _temp: TempDir,
    root: PathBuf,
}

impl Scratch {
    /// Creates a new scratch area.
    ///
    /// # Panics
    ///
    /// Panics when the temporary directory cannot be created.
    #[must_use]
    pub fn new() -> Self {
        let temp = tempfile::tempdir().expect("create scratch tempdir");
        let root = fs::canonicalize(temp.path()).expect("canonicalize scratch tempdir");
        fs::create_dir(root.join("src")).expect("create scratch src");
        Self { _temp: temp, root }
    }

    /// Returns the canonical scratch root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the source directory.
    #[must_use]
    pub fn src(&self) -> PathBuf {
        self.root.join("src")
    }

    /// Returns the output location.
    #[must_use]
    pub fn out(&self) -> PathBuf {
        self.root.join("out")
    }

    /// Writes `contents` to `relative` under the source directory, creating
    /// parent directories, and returns the absolute path.
    ///
    /// # Panics
    ///
    /// Panics when the file cannot be written.
    pub fn write(&self, relative: impl AsRef<Path>, contents: impl AsRef<[u8]>) -> PathBuf {
        let path = self.src().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent directories");
        }
        fs::write(&path, contents).expect("write scratch file");
        path
    }

    /// Creates `relative` as a directory under the source directory and
    /// returns the absolute path.
    ///
    /// # Panics
    ///
    /// Panics when the directory cannot be created.
    pub fn mkdir(&self, relative: impl AsRef<Path>) -> PathBuf {
        let path = self.src().join(relative);
        fs::create_dir_all(&path).expect("create scratch directory");
        path
    }
}

impl Default for Scratch {
    fn default() -> Self {
        Self::new()
    }
}
