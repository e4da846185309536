//! Platform-specific file operations.

use log::debug;
use std::fs;
use std::io;
use std::path::Path;

#[cfg(target_os = "linux")]
use std::fs::File;

#[cfg(target_os = "linux")]
use std::os::fd::AsRawFd;

// _IOW(0x94, 9, int) from linux/fs.h
#[cfg(target_os = "linux")]
const FICLONE: u32 = 0x4004_9409;

/// Copy `src` to `dst`, sharing extents when the filesystem supports it.
///
/// Falls back to a byte copy when cloning is unsupported (different mounts,
/// filesystems without reflinks). `src` must be a regular file other than
/// `dst`; a failed copy leaves no partial `dst` behind.
#[cfg(target_os = "linux")]
pub fn clone_or_copy(src: &Path, dst: &Path) -> io::Result<()> {
    let source = File::open(src)?;
    let source_metadata = source.metadata()?;
    check_copy_source(src, &source_metadata, dst)?;
    let target = File::create(dst)?;

    // SAFETY: both descriptors stay open for the duration of the call and
    // FICLONE takes the source descriptor by value.
    let ret = unsafe { libc::ioctl(target.as_raw_fd(), FICLONE as _, source.as_raw_fd()) };
    if ret == 0 {
        target.set_permissions(source_metadata.permissions())?;
        debug!("Cloned {} to {}", src.display(), dst.display());
        return Ok(());
    }

    let clone_error = io::Error::last_os_error();
    debug!(
        "Cloning {} is not possible ({clone_error}), copying instead",
        src.display()
    );
    drop(target);
    copy_or_remove(src, dst)
}

/// Copy `src` to `dst`.
///
/// The standard library already clones on APFS, other platforms copy bytes.
#[cfg(not(target_os = "linux"))]
pub fn clone_or_copy(src: &Path, dst: &Path) -> io::Result<()> {
    check_copy_source(src, &fs::metadata(src)?, dst)?;
    copy_or_remove(src, dst)?;
    debug!("Copied {} to {}", src.display(), dst.display());
    Ok(())
}

fn check_copy_source(src: &Path, metadata: &fs::Metadata, dst: &Path) -> io::Result<()> {
    if !metadata.is_file() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{} is not a regular file", src.display()),
        ));
    }
    if same_file(metadata, dst) {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{} and {} are the same file", src.display(), dst.display()),
        ));
    }
    Ok(())
}

#[cfg(unix)]
fn same_file(src_metadata: &fs::Metadata, dst: &Path) -> bool {
    use std::os::unix::fs::MetadataExt;

    fs::metadata(dst).is_ok_and(|dst_metadata| {
        dst_metadata.dev() == src_metadata.dev() && dst_metadata.ino() == src_metadata.ino()
    })
}

#[cfg(not(unix))]
fn same_file(_src_metadata: &fs::Metadata, _dst: &Path) -> bool {
    false
}

fn copy_or_remove(src: &Path, dst: &Path) -> io::Result<()> {
    match fs::copy(src, dst) {
        Ok(_) => Ok(()),
        Err(e) => {
            if let Err(remove_error) = fs::remove_file(dst) {
                debug!("Nothing to clean up at {}: {remove_error}", dst.display());
            }
            Err(e)
        }
    }
}
