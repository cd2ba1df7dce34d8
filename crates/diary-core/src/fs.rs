//! Filesystem utilities for create-if-absent writes.

use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

/// Write `contents` to `destination`, failing if it already exists.
///
/// The bytes are first written and synced to a temp file next to the
/// destination, then hard-linked into place. Linking fails with
/// `ErrorKind::AlreadyExists` if the destination appeared in the meantime, so
/// two writers racing on the same name can never overwrite each other, and a
/// crash mid-write never leaves a truncated file under the final name.
///
/// The temp file is always removed.
///
/// # Errors
///
/// Returns `ErrorKind::AlreadyExists` if the destination exists, or any I/O
/// error from writing the temp file.
pub fn write_new_file(destination: &Path, contents: &[u8]) -> io::Result<()> {
    let parent = destination
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let temp_path = parent.join(temp_name(destination));

    let result = write_temp(&temp_path, contents).and_then(|()| {
        fs::hard_link(&temp_path, destination).map_err(|link_err| {
            if link_err.kind() == io::ErrorKind::AlreadyExists {
                link_err
            } else {
                io::Error::new(
                    link_err.kind(),
                    format!(
                        "Failed to link {} into place: {}",
                        destination.display(),
                        link_err
                    ),
                )
            }
        })
    });

    let _ = fs::remove_file(&temp_path);
    result
}

fn write_temp(path: &Path, contents: &[u8]) -> io::Result<()> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let mut file = options.open(path)?;
    file.write_all(contents)?;
    file.sync_all()
}

fn temp_name(destination: &Path) -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    let stem = destination
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    format!(".{}.{}_{}.tmp", stem, std::process::id(), nanos)
}
