use std::fs;
use std::path::Path;

use log::debug;
use walkdir::WalkDir;

use super::path::expand_path;
use super::{file_name, path_string};
use crate::error::{Action, FsError};
use crate::output::{ItemType, ListEntry, ListPayload};

pub fn list(path: &str, recursive: bool) -> Result<ListPayload, FsError> {
    let root = expand_path(path)?;
    let metadata = fs::metadata(&root)
        .map_err(|e| FsError::lookup(e, "Directory", Action::ListDirectory, path))?;
    if !metadata.is_dir() {
        return Err(FsError::NotADirectory {
            path: path.to_string(),
        });
    }

    let items = if recursive {
        descendants(&root, path)?
    } else {
        children(&root, path)?
    };
    debug!("listed {} entries under {}", items.len(), root.display());

    Ok(ListPayload {
        count: items.len(),
        items,
    })
}

fn children(root: &Path, path: &str) -> Result<Vec<ListEntry>, FsError> {
    let mut paths = fs::read_dir(root)
        .and_then(|entries| {
            entries
                .map(|x| x.map(|entry| entry.path()))
                .collect::<Result<Vec<_>, _>>()
        })
        .map_err(|e| FsError::classify(e, Action::ListDirectory, path))?;
    paths.sort();

    Ok(paths
        .into_iter()
        .map(|x| ListEntry {
            name: file_name(&x),
            item_type: ItemType::of(&x),
            path: path_string(&x),
            relative: None,
        })
        .collect())
}

fn descendants(root: &Path, path: &str) -> Result<Vec<ListEntry>, FsError> {
    let mut items = Vec::new();
    for entry in WalkDir::new(root).min_depth(1) {
        let entry = entry.map_err(|e| FsError::from_walk(e, Action::ListDirectory, path))?;
        let name = entry.file_name().to_string_lossy().into_owned();
        let relative = entry
            .path()
            .strip_prefix(root)
            .map(path_string)
            .unwrap_or_else(|_| name.clone());
        items.push(ListEntry {
            path: path_string(entry.path()),
            name,
            item_type: ItemType::of(entry.path()),
            relative: Some(relative),
        });
    }
    Ok(items)
}
