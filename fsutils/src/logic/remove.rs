use std::fs;
use std::io;

use log::debug;

use super::path::expand_path;
use super::path_string;
use crate::error::{Action, FsError};
use crate::output::PathPayload;

pub fn remove(path: &str, recursive: bool) -> Result<PathPayload, FsError> {
    let target = expand_path(path)?;
    let metadata = fs::symlink_metadata(&target)
        .map_err(|e| FsError::lookup(e, "Path", Action::RemovePath, path))?;

    let removed = if metadata.is_dir() {
        if recursive {
            fs::remove_dir_all(&target)
        } else {
            fs::remove_dir(&target)
        }
    } else {
        fs::remove_file(&target)
    };

    match removed {
        Ok(()) => {}
        Err(e) if !recursive && e.kind() == io::ErrorKind::DirectoryNotEmpty => {
            return Err(FsError::NotEmpty {
                path: path.to_string(),
            })
        }
        Err(e) => return Err(FsError::classify(e, Action::RemovePath, path)),
    }
    debug!("removed {}", target.display());

    Ok(PathPayload {
        path: path_string(&target),
    })
}
