use std::fs;
use std::path::Path;

use logging::trace_scan;

use crate::cache::NodeCache;
use crate::error::TreeError;
use crate::index::DirectoryIndex;

/// Reads `path` and resolves every entry through `cache`.
///
/// Names are sorted before resolution so cache population order does not
/// depend on the filesystem's iteration order.
pub(crate) fn scan_directory(path: &Path, cache: &NodeCache) -> Result<DirectoryIndex, TreeError> {
    let read_dir =
        fs::read_dir(path).map_err(|error| TreeError::read_dir(path.to_path_buf(), error))?;

    let mut names = Vec::new();
    for entry in read_dir {
        let entry = entry.map_err(|error| TreeError::read_dir_entry(path.to_path_buf(), error))?;
        names.push(entry.file_name());
    }
    names.sort();

    let mut index = DirectoryIndex::new();
    for name in names {
        let node = cache.resolve(path.join(&name))?;
        index.insert(name, node)?;
    }

    trace_scan!(path = %path.display(), entries = index.len(), "scanned directory");
    Ok(index)
}
