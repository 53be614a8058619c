//! Filesystem primitives used by the apply pass.
//!
//! Removal helpers never follow links: a symlink or junction found where a
//! directory is expected is unlinked and its target left alone.

use std::fs;
use std::io;
use std::path::Path;

use logging::{trace_create, trace_delete};
use tree::FileRef;

use crate::error::{ApplyError, IoResultExt};

/// Creates a directory, failing if anything already exists at `path`.
pub(crate) fn create_directory(path: &Path) -> Result<(), ApplyError> {
    fs::create_dir(path).with_action("create directory", path)?;
    trace_create!(path = %path.display(), "created directory");
    Ok(())
}

/// Creates a symlink at `link` pointing at the file `target`.
pub(crate) fn symlink_file(target: &Path, link: &Path) -> Result<(), ApplyError> {
    #[cfg(unix)]
    {
        std::os::unix::fs::symlink(target, link).with_action("create symlink", link)?;
    }

    #[cfg(windows)]
    {
        std::os::windows::fs::symlink_file(target, link).with_action("create symlink", link)?;
    }

    #[cfg(not(any(unix, windows)))]
    {
        let _ = target;
        return Err(ApplyError::Unsupported {
            operation: "create symlink",
            path: link.to_path_buf(),
        });
    }

    #[cfg(any(unix, windows))]
    {
        trace_create!(path = %link.display(), target = %target.display(), "created file symlink");
        Ok(())
    }
}

/// Creates a symlink at `link` pointing at the directory `target`.
pub(crate) fn symlink_directory(target: &Path, link: &Path) -> Result<(), ApplyError> {
    #[cfg(unix)]
    {
        std::os::unix::fs::symlink(target, link).with_action("create symlink", link)?;
    }

    #[cfg(windows)]
    {
        std::os::windows::fs::symlink_dir(target, link).with_action("create symlink", link)?;
    }

    #[cfg(not(any(unix, windows)))]
    {
        let _ = target;
        return Err(ApplyError::Unsupported {
            operation: "create symlink",
            path: link.to_path_buf(),
        });
    }

    #[cfg(any(unix, windows))]
    {
        trace_create!(path = %link.display(), target = %target.display(), "created directory symlink");
        Ok(())
    }
}

/// Creates a junction-style directory link at `link` pointing at `target`.
///
/// Unix has no junctions; a plain directory symlink behaves the same way for
/// readers of the output.
pub(crate) fn junction(target: &Path, link: &Path) -> Result<(), ApplyError> {
    #[cfg(unix)]
    {
        std::os::unix::fs::symlink(target, link).with_action("create junction", link)?;
    }

    #[cfg(windows)]
    {
        junction::create(target, link).with_action("create junction", link)?;
    }

    #[cfg(not(any(unix, windows)))]
    {
        let _ = target;
        return Err(ApplyError::Unsupported {
            operation: "create junction",
            path: link.to_path_buf(),
        });
    }

    #[cfg(any(unix, windows))]
    {
        trace_create!(path = %link.display(), target = %target.display(), "created junction");
        Ok(())
    }
}

/// Copies `source` to `destination` with exclusive-create semantics, then
/// stamps permissions and timestamps from the source.
///
/// The source stat is memoized on `source`. Returns the number of bytes
/// written.
pub(crate) fn copy_file(source: &FileRef, destination: &Path) -> Result<u64, ApplyError> {
    let source_path = source.path();
    let metadata = fs::metadata(source_path).with_action("inspect source file", source_path)?;
    source.record_stat(&metadata);

    let mut reader = fs::File::open(source_path).with_action("open source file", source_path)?;

    let mut options = fs::OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};
        options.mode(metadata.permissions().mode() & 0o7777);
    }
    let mut writer = options
        .open(destination)
        .with_action("create destination file", destination)?;

    let bytes = io::copy(&mut reader, &mut writer).with_action("copy file data", destination)?;
    drop(writer);

    metadata::apply_file_metadata(destination, &metadata)?;
    trace_create!(
        path = %destination.display(),
        source = %source_path.display(),
        bytes,
        "copied file"
    );
    Ok(bytes)
}

/// Removes a single file, symlink or junction.
///
/// A missing entry is an error: the caller believed it existed.
pub(crate) fn remove_entry(path: &Path) -> Result<(), ApplyError> {
    #[cfg(windows)]
    {
        use std::os::windows::fs::FileTypeExt;

        let metadata = fs::symlink_metadata(path).with_action("inspect entry", path)?;
        if metadata.file_type().is_symlink_dir() {
            fs::remove_dir(path).with_action("remove entry", path)?;
            trace_delete!(path = %path.display(), "removed directory link");
            return Ok(());
        }
    }

    fs::remove_file(path).with_action("remove entry", path)?;
    trace_delete!(path = %path.display(), "removed entry");
    Ok(())
}

/// Removes `path` and everything below it without following links.
///
/// If `path` itself is a link or file only the entry is removed.
pub fn remove_tree(path: &Path) -> Result<(), ApplyError> {
    let metadata = fs::symlink_metadata(path).with_action("inspect entry", path)?;
    if !metadata.file_type().is_dir() {
        return remove_entry(path);
    }

    remove_children(path)?;
    fs::remove_dir(path).with_action("remove directory", path)?;
    trace_delete!(path = %path.display(), "removed directory tree");
    Ok(())
}

/// Removes every entry inside the real directory `dir`, leaving `dir` in
/// place. Links inside are unlinked, never followed.
pub fn remove_children(dir: &Path) -> Result<(), ApplyError> {
    let entries = fs::read_dir(dir).with_action("read directory", dir)?;
    for entry in entries {
        let entry = entry.with_action("read directory entry", dir)?;
        remove_tree(&entry.path())?;
    }
    Ok(())
}
