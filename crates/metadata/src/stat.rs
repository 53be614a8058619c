//! Compact stat snapshots used to decide whether a copied file is current.

use std::fs;
use std::io;
use std::path::Path;

#[cfg(unix)]
use std::os::unix::fs::MetadataExt;

/// Identity fields captured from a file's metadata.
///
/// Two snapshots compare equal when inode, size and mode match. The
/// modification time is intentionally not part of the comparison: a copy is
/// only redone when the source was replaced, resized or had its mode changed.
/// Filesystems with coarse or unreliable mtime resolution would otherwise
/// trigger spurious copies. Content rewritten in place with an identical size
/// is therefore not detected.
///
/// On non-Unix targets the inode is always zero and the mode only reflects
/// the read-only flag.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct FileStat {
    inode: u64,
    size: u64,
    mode: u32,
}

impl FileStat {
    /// Creates a snapshot from explicit field values.
    #[must_use]
    pub const fn new(inode: u64, size: u64, mode: u32) -> Self {
        Self { inode, size, mode }
    }

    /// Extracts the identity fields from `metadata`.
    #[must_use]
    pub fn from_metadata(metadata: &fs::Metadata) -> Self {
        #[cfg(unix)]
        {
            Self::new(metadata.ino(), metadata.len(), metadata.mode())
        }

        #[cfg(not(unix))]
        {
            let mode = if metadata.permissions().readonly() { 0o444 } else { 0o644 };
            Self::new(0, metadata.len(), mode)
        }
    }

    /// Stats `path`, following symlinks.
    ///
    /// # Errors
    ///
    /// Propagates the error from [`fs::metadata`].
    pub fn capture(path: &Path) -> io::Result<Self> {
        fs::metadata(path).map(|metadata| Self::from_metadata(&metadata))
    }

    /// Returns the inode number.
    #[must_use]
    pub const fn inode(&self) -> u64 {
        self.inode
    }

    /// Returns the file size in bytes.
    #[must_use]
    pub const fn size(&self) -> u64 {
        self.size
    }

    /// Returns the raw mode, including file type bits on Unix.
    #[must_use]
    pub const fn mode(&self) -> u32 {
        self.mode
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use filetime::{FileTime, set_file_times};
    use tempfile::tempdir;

    #[test]
    fn capture_matches_metadata() {
        let temp = tempdir().expect("tempdir");
        let path = temp.path().join("file");
        fs::write(&path, b"12345").expect("write");

        let stat = FileStat::capture(&path).expect("capture");
        let metadata = fs::metadata(&path).expect("metadata");
        assert_eq!(stat, FileStat::from_metadata(&metadata));
        assert_eq!(stat.size(), 5);
    }

    #[test]
    fn mtime_changes_do_not_affect_equality() {
        let temp = tempdir().expect("tempdir");
        let path = temp.path().join("file");
        fs::write(&path, b"data").expect("write");
        let before = FileStat::capture(&path).expect("before");

        let mtime = FileTime::from_unix_time(1_600_000_000, 0);
        set_file_times(&path, mtime, mtime).expect("set times");

        assert_eq!(FileStat::capture(&path).expect("after"), before);
    }

    #[test]
    fn size_change_breaks_equality() {
        let temp = tempdir().expect("tempdir");
        let path = temp.path().join("file");
        fs::write(&path, b"data").expect("write");
        let before = FileStat::capture(&path).expect("before");

        fs::write(&path, b"longer data").expect("rewrite");

        assert_ne!(FileStat::capture(&path).expect("after"), before);
    }

    #[cfg(unix)]
    #[test]
    fn replaced_file_has_new_identity() {
        let temp = tempdir().expect("tempdir");
        let path = temp.path().join("file");
        let other = temp.path().join("other");
        fs::write(&path, b"same").expect("write");
        fs::write(&other, b"same").expect("write other");
        let before = FileStat::capture(&path).expect("before");

        fs::rename(&other, &path).expect("replace");

        let after = FileStat::capture(&path).expect("after");
        assert_eq!(after.size(), before.size());
        assert_ne!(after.inode(), before.inode());
        assert_ne!(after, before);
    }

    #[cfg(unix)]
    #[test]
    fn mode_change_breaks_equality() {
        use std::os::unix::fs::PermissionsExt;

        let temp = tempdir().expect("tempdir");
        let path = temp.path().join("file");
        fs::write(&path, b"data").expect("write");
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).expect("chmod");
        let before = FileStat::capture(&path).expect("before");

        fs::set_permissions(&path, fs::Permissions::from_mode(0o600)).expect("chmod");

        assert_ne!(FileStat::capture(&path).expect("after"), before);
    }
}
