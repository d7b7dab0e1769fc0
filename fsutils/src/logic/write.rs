use std::fs;

use log::debug;

use super::path::expand_path;
use super::path_string;
use crate::error::{Action, FsError};
use crate::output::PathPayload;

pub fn write(path: &str, content: &str, create_dirs: bool) -> Result<PathPayload, FsError> {
    let target = expand_path(path)?;

    if create_dirs {
        if let Some(parent) = target.parent().filter(|x| !x.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .map_err(|e| FsError::classify(e, Action::CreateDirectory, path))?;
        }
    }

    fs::write(&target, content).map_err(|e| FsError::classify(e, Action::WriteFile, path))?;
    debug!("wrote {} bytes to {}", content.len(), target.display());

    Ok(PathPayload {
        path: path_string(&target),
    })
}
