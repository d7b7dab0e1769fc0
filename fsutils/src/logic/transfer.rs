use std::fs::{self, File, FileTimes};
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, info};
use walkdir::WalkDir;

use super::path::expand_path;
use super::path_string;
use crate::error::{Action, FsError};
use crate::output::TransferPayload;

fn resolve_destination(source: &Path, dest: &Path) -> PathBuf {
    match source.file_name() {
        Some(name) if dest.is_dir() => dest.join(name),
        _ => dest.to_path_buf(),
    }
}

pub fn move_path(source: &str, dest: &str) -> Result<TransferPayload, FsError> {
    let from = expand_path(source)?;
    let to = expand_path(dest)?;
    let metadata = fs::symlink_metadata(&from)
        .map_err(|e| FsError::lookup(e, "Source path", Action::MovePath, source))?;
    let target = resolve_destination(&from, &to);

    match fs::rename(&from, &target) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::CrossesDevices => {
            info!(
                "{} and {} are on different devices, copying instead",
                from.display(),
                target.display()
            );
            relocate(&from, &target, &metadata)
                .map_err(|e| FsError::classify(e, Action::MovePath, source))?;
        }
        Err(e) => return Err(FsError::classify(e, Action::MovePath, source)),
    }
    debug!("moved {} to {}", from.display(), target.display());

    Ok(TransferPayload {
        source: path_string(&from),
        dest: path_string(&to),
    })
}

fn relocate(from: &Path, to: &Path, metadata: &fs::Metadata) -> io::Result<()> {
    if metadata.file_type().is_symlink() {
        copy_link(from, to)?;
        fs::remove_file(from)
    } else if metadata.is_dir() {
        copy_tree(from, to, false)?;
        fs::remove_dir_all(from)
    } else {
        copy_file(from, to)?;
        fs::remove_file(from)
    }
}

#[cfg(unix)]
fn copy_link(from: &Path, to: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(fs::read_link(from)?, to)
}

#[cfg(not(unix))]
fn copy_link(from: &Path, to: &Path) -> io::Result<()> {
    copy_file(from, to).map(|_| ())
}

pub fn copy_path(source: &str, dest: &str, recursive: bool) -> Result<TransferPayload, FsError> {
    let from = expand_path(source)?;
    let to = expand_path(dest)?;
    let metadata = fs::metadata(&from)
        .map_err(|e| FsError::lookup(e, "Source path", Action::CopyPath, source))?;

    let copied = if metadata.is_dir() {
        if !recursive {
            return Err(FsError::RequiresRecursive);
        }
        copy_tree(&from, &to, true)
    } else {
        copy_file(&from, &resolve_destination(&from, &to)).map(|_| ())
    };
    copied.map_err(|e| FsError::classify(e, Action::CopyPath, source))?;
    debug!("copied {} to {}", from.display(), to.display());

    Ok(TransferPayload {
        source: path_string(&from),
        dest: path_string(&to),
    })
}

#[cfg(unix)]
fn open_for_times(path: &Path) -> io::Result<File> {
    File::open(path)
}

#[cfg(not(unix))]
fn open_for_times(path: &Path) -> io::Result<File> {
    fs::OpenOptions::new().write(true).open(path)
}

fn same_file(a: &Path, b: &Path) -> io::Result<bool> {
    let (first, second) = match (fs::metadata(a), fs::metadata(b)) {
        (Ok(x), Ok(y)) => (x, y),
        (Err(e), _) => return Err(e),
        (_, Err(_)) => return Ok(false),
    };
    #[cfg(unix)]
    {
        use std::os::unix::fs::MetadataExt;
        Ok(first.dev() == second.dev() && first.ino() == second.ino())
    }
    #[cfg(not(unix))]
    {
        let _ = (first, second);
        Ok(fs::canonicalize(a)? == fs::canonicalize(b)?)
    }
}

#[cfg(unix)]
fn special_kind(file_type: &fs::FileType) -> &'static str {
    use std::os::unix::fs::FileTypeExt;
    if file_type.is_fifo() {
        "a named pipe"
    } else if file_type.is_socket() {
        "a socket"
    } else if file_type.is_char_device() || file_type.is_block_device() {
        "a device"
    } else {
        "not a regular file"
    }
}

#[cfg(not(unix))]
fn special_kind(_file_type: &fs::FileType) -> &'static str {
    "not a regular file"
}

// Permission bits come from fs::copy, access and modification times are set
// afterwards.
pub fn copy_file(from: &Path, to: &Path) -> io::Result<u64> {
    let metadata = fs::metadata(from)?;
    if !metadata.is_file() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!(
                "{} is {}",
                from.display(),
                special_kind(&metadata.file_type())
            ),
        ));
    }
    if same_file(from, to)? {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{} and {} are the same file", from.display(), to.display()),
        ));
    }

    let copied = fs::copy(from, to)?;
    let times = FileTimes::new()
        .set_accessed(metadata.accessed()?)
        .set_modified(metadata.modified()?);
    open_for_times(to)?.set_times(times)?;
    Ok(copied)
}

// Merges into `to`; files only present there are kept.
pub fn copy_tree(from: &Path, to: &Path, follow_links: bool) -> io::Result<()> {
    if to.starts_with(from) {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!(
                "cannot copy {} into itself ({})",
                from.display(),
                to.display()
            ),
        ));
    }

    // Directories are visited after their contents so that read-only
    // permissions are applied last.
    for entry in WalkDir::new(from)
        .follow_links(follow_links)
        .contents_first(true)
    {
        let entry = entry?;
        let relative = entry.path().strip_prefix(from).map_err(io::Error::other)?;
        let target = if relative.as_os_str().is_empty() {
            to.to_path_buf()
        } else {
            to.join(relative)
        };

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
            fs::set_permissions(&target, entry.metadata()?.permissions())?;
        } else if entry.file_type().is_symlink() {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            copy_link(entry.path(), &target)?;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            copy_file(entry.path(), &target)?;
        }
    }
    Ok(())
}
