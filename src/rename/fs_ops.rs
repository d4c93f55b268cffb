//! Rename primitives

use std::fs;
use std::io;
use std::path::Path;

/// True if anything, including a dangling symlink, occupies `path`.
pub fn occupied(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}

/// Rename `from` to `to`, refusing to replace an existing `to`.
///
/// Uses `renameat2(RENAME_NOREPLACE)` where available. Filesystems that
/// reject the flag, and other platforms, fall back to `fs::rename`, which
/// leaves a window between the caller's existence check and the rename.
pub fn rename_no_replace(from: &Path, to: &Path) -> io::Result<()> {
    #[cfg(all(target_os = "linux", target_env = "gnu"))]
    {
        match renameat2_no_replace(from, to) {
            Err(e) if matches!(e.raw_os_error(), Some(libc::EINVAL) | Some(libc::ENOSYS)) => {
                log::debug!("RENAME_NOREPLACE unsupported here, falling back: {}", e);
            }
            other => return other,
        }
    }

    if occupied(to) {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("{} appeared before rename", to.display()),
        ));
    }
    fs::rename(from, to)
}

#[cfg(all(target_os = "linux", target_env = "gnu"))]
fn renameat2_no_replace(from: &Path, to: &Path) -> io::Result<()> {
    use std::ffi::CString;
    use std::os::unix::ffi::OsStrExt;

    let c_from = CString::new(from.as_os_str().as_bytes())
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    let c_to = CString::new(to.as_os_str().as_bytes())
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

    // SAFETY: both pointers come from live CStrings.
    let rc = unsafe {
        libc::renameat2(
            libc::AT_FDCWD,
            c_from.as_ptr(),
            libc::AT_FDCWD,
            c_to.as_ptr(),
            libc::RENAME_NOREPLACE,
        )
    };
    if rc == 0 { Ok(()) } else { Err(io::Error::last_os_error()) }
}
