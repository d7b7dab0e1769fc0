use std::fs;

use log::debug;

use super::path::expand_path;
use crate::error::{Action, FsError};
use crate::output::ReadPayload;

pub fn read_text(path: &str) -> Result<String, FsError> {
    let target = expand_path(path)?;
    let metadata =
        fs::metadata(&target).map_err(|e| FsError::lookup(e, "File", Action::ReadFile, path))?;
    if !metadata.is_file() {
        return Err(FsError::NotAFile {
            path: path.to_string(),
        });
    }

    let bytes = fs::read(&target).map_err(|e| FsError::classify(e, Action::ReadFile, path))?;
    debug!("read {} bytes from {}", bytes.len(), target.display());
    String::from_utf8(bytes).map_err(|_| FsError::InvalidUtf8 {
        path: path.to_string(),
    })
}

pub fn read(path: &str) -> Result<ReadPayload, FsError> {
    Ok(ReadPayload {
        content: read_text(path)?,
    })
}
