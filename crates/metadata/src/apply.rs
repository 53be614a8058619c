use crate::error::MetadataError;
use filetime::{FileTime, set_file_times};
use std::fs;
use std::path::Path;

/// Applies permissions and timestamps from `metadata` to a copied file.
///
/// Permissions are stamped first so a read-only source does not prevent the
/// timestamp update on platforms where that matters.
///
/// # Errors
///
/// Returns [`MetadataError`] when either step fails.
pub fn apply_file_metadata(destination: &Path, metadata: &fs::Metadata) -> Result<(), MetadataError> {
    apply_permissions(destination, metadata)?;
    apply_file_times(destination, metadata)
}

/// Copies permission bits from `metadata` onto `destination`.
///
/// On non-Unix targets only the read-only flag is carried over.
///
/// # Errors
///
/// Returns [`MetadataError`] when the permissions cannot be changed.
pub fn apply_permissions(destination: &Path, metadata: &fs::Metadata) -> Result<(), MetadataError> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;

        let mode = metadata.permissions().mode() & 0o7777;
        fs::set_permissions(destination, fs::Permissions::from_mode(mode))
            .map_err(|error| MetadataError::new("preserve permissions", destination, error))?;
    }

    #[cfg(not(unix))]
    {
        let readonly = metadata.permissions().readonly();
        let mut permissions = fs::metadata(destination)
            .map_err(|error| MetadataError::new("inspect destination permissions", destination, error))?
            .permissions();
        permissions.set_readonly(readonly);
        fs::set_permissions(destination, permissions)
            .map_err(|error| MetadataError::new("preserve permissions", destination, error))?;
    }

    Ok(())
}

/// Copies access and modification times from `metadata` onto `destination`.
///
/// # Errors
///
/// Returns [`MetadataError`] when the timestamps cannot be set.
pub fn apply_file_times(destination: &Path, metadata: &fs::Metadata) -> Result<(), MetadataError> {
    let accessed = FileTime::from_last_access_time(metadata);
    let modified = FileTime::from_last_modification_time(metadata);

    set_file_times(destination, accessed, modified)
        .map_err(|error| MetadataError::new("preserve timestamps", destination, error))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use tempfile::tempdir;

    #[cfg(unix)]
    fn current_mode(path: &Path) -> u32 {
        use std::os::unix::fs::PermissionsExt;

        fs::metadata(path).expect("metadata").permissions().mode()
    }

    #[test]
    fn copied_file_takes_source_mode_and_times() {
        let temp = tempdir().expect("tempdir");
        let source = temp.path().join("report.csv");
        let copy = temp.path().join("mirror.csv");
        fs::write(&source, b"id,name\n1,alpha\n").expect("write source");

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&source, PermissionsExt::from_mode(0o750)).expect("chmod source");
        }
        let modified = FileTime::from_unix_time(1_234_567_890, 0);
        set_file_times(&source, FileTime::from_unix_time(1_300_000_000, 500), modified)
            .expect("stamp source");

        // Stat before reading, as a copy would; the read may bump atime.
        let stat = fs::metadata(&source).expect("source metadata");
        let mut reader = fs::File::open(&source).expect("open source");
        let mut writer = fs::File::create_new(&copy).expect("create copy");
        io::copy(&mut reader, &mut writer).expect("copy bytes");
        drop(writer);

        apply_file_metadata(&copy, &stat).expect("apply metadata");

        let copied = fs::metadata(&copy).expect("copy metadata");
        assert_eq!(FileTime::from_last_modification_time(&copied), modified);
        assert_eq!(
            FileTime::from_last_access_time(&copied),
            FileTime::from_last_access_time(&stat)
        );
        assert_eq!(fs::read(&copy).expect("read copy"), fs::read(&source).expect("read source"));
        #[cfg(unix)]
        assert_eq!(current_mode(&copy) & 0o7777, 0o750);
    }

    #[cfg(unix)]
    #[test]
    fn executable_bit_is_carried_over() {
        use std::os::unix::fs::PermissionsExt;

        let temp = tempdir().expect("tempdir");
        let source = temp.path().join("tool.sh");
        let dest = temp.path().join("copy.sh");
        fs::write(&source, b"#!/bin/sh\n").expect("write source");
        fs::write(&dest, b"#!/bin/sh\n").expect("write dest");
        fs::set_permissions(&source, PermissionsExt::from_mode(0o755)).expect("chmod source");
        fs::set_permissions(&dest, PermissionsExt::from_mode(0o600)).expect("chmod dest");

        let metadata = fs::metadata(&source).expect("metadata");
        apply_permissions(&dest, &metadata).expect("apply permissions");

        assert_eq!(current_mode(&dest) & 0o777, 0o755);
    }

    #[test]
    fn times_only_leave_permissions_alone() {
        let temp = tempdir().expect("tempdir");
        let source = temp.path().join("source");
        let dest = temp.path().join("dest");
        fs::write(&source, b"a").expect("write source");
        fs::write(&dest, b"b").expect("write dest");

        let mtime = FileTime::from_unix_time(1_700_060_000, 200_000_000);
        set_file_times(&source, mtime, mtime).expect("set source times");
        let before = fs::metadata(&dest).expect("dest metadata").permissions();

        let metadata = fs::metadata(&source).expect("metadata");
        apply_file_times(&dest, &metadata).expect("apply times");

        let dest_meta = fs::metadata(&dest).expect("dest metadata");
        assert_eq!(FileTime::from_last_modification_time(&dest_meta), mtime);
        assert_eq!(dest_meta.permissions(), before);
    }

    #[test]
    fn missing_destination_reports_action_and_path() {
        let temp = tempdir().expect("tempdir");
        let source = temp.path().join("source");
        fs::write(&source, b"a").expect("write source");
        let missing = temp.path().join("missing");

        let metadata = fs::metadata(&source).expect("metadata");
        let error = apply_file_times(&missing, &metadata).expect_err("missing destination");

        assert_eq!(error.context(), "preserve timestamps");
        assert_eq!(error.path(), missing.as_path());
        assert_eq!(error.io_error().kind(), io::ErrorKind::NotFound);
    }
}
