use std::fs::{self, Metadata};
use std::time::{SystemTime, UNIX_EPOCH};

use super::path::expand_path;
use super::{file_name, path_string};
use crate::error::{is_missing, Action, FsError};
use crate::output::{ExistsPayload, ItemType, StatPayload};

pub fn exists(path: &str) -> Result<ExistsPayload, FsError> {
    let target = expand_path(path)?;
    match fs::metadata(&target) {
        Ok(metadata) => Ok(ExistsPayload {
            exists: true,
            path: path_string(&target),
            item_type: Some(ItemType::from_metadata(&metadata)),
            is_file: Some(metadata.is_file()),
            is_dir: Some(metadata.is_dir()),
        }),
        Err(e) if is_missing(&e) => Ok(ExistsPayload {
            exists: false,
            path: path_string(&target),
            item_type: None,
            is_file: None,
            is_dir: None,
        }),
        Err(e) => Err(FsError::classify(e, Action::CheckPath, path)),
    }
}

pub fn stat(path: &str) -> Result<StatPayload, FsError> {
    let target = expand_path(path)?;
    let metadata = fs::metadata(&target)
        .map_err(|e| FsError::lookup(e, "Path", Action::AccessPath, path))?;
    let is_symlink = fs::symlink_metadata(&target)
        .map(|x| x.file_type().is_symlink())
        .unwrap_or(false);

    Ok(StatPayload {
        path: path_string(&target),
        name: file_name(&target),
        item_type: ItemType::from_metadata(&metadata),
        size: metadata.len(),
        mode: permission_bits(&metadata),
        modified: metadata.modified().map(epoch_seconds).unwrap_or_default(),
        accessed: metadata.accessed().map(epoch_seconds).unwrap_or_default(),
        created: created_seconds(&metadata),
        is_file: metadata.is_file(),
        is_dir: metadata.is_dir(),
        is_symlink,
    })
}

fn epoch_seconds(time: SystemTime) -> f64 {
    match time.duration_since(UNIX_EPOCH) {
        Ok(x) => x.as_secs_f64(),
        Err(e) => -e.duration().as_secs_f64(),
    }
}

fn created_seconds(metadata: &Metadata) -> f64 {
    match metadata.created() {
        Ok(x) => epoch_seconds(x),
        Err(_) => changed_seconds(metadata),
    }
}

#[cfg(unix)]
fn changed_seconds(metadata: &Metadata) -> f64 {
    use std::os::unix::fs::MetadataExt;
    metadata.ctime() as f64 + metadata.ctime_nsec() as f64 / 1e9
}

#[cfg(not(unix))]
fn changed_seconds(metadata: &Metadata) -> f64 {
    metadata.modified().map(epoch_seconds).unwrap_or_default()
}

#[cfg(unix)]
fn permission_bits(metadata: &Metadata) -> String {
    use std::os::unix::fs::PermissionsExt;
    format!("{:03o}", metadata.permissions().mode() & 0o777)
}

#[cfg(not(unix))]
fn permission_bits(metadata: &Metadata) -> String {
    if metadata.permissions().readonly() {
        "444".to_string()
    } else {
        "666".to_string()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_exists() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let file = dir.path().join("present.txt");
        fs::write(&file, "x")?;

        let payload = exists(&file.to_string_lossy())?;
        assert!(payload.exists);
        assert_eq!(payload.item_type, Some(ItemType::File));
        assert_eq!(payload.is_file, Some(true));
        assert_eq!(payload.is_dir, Some(false));

        let payload = exists(&dir.path().to_string_lossy())?;
        assert_eq!(payload.item_type, Some(ItemType::Directory));

        let payload = exists(&dir.path().join("absent").to_string_lossy())?;
        assert!(!payload.exists);
        assert_eq!(payload.item_type, None);

        // below a regular file
        let payload = exists(&file.join("child").to_string_lossy())?;
        assert!(!payload.exists);
        Ok(())
    }

    #[test]
    fn test_stat_empty_file() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let file = dir.path().join("empty.txt");
        fs::File::create(&file)?;

        let payload = stat(&file.to_string_lossy())?;
        assert_eq!(payload.size, 0);
        assert!(payload.is_file);
        assert!(!payload.is_dir);
        assert!(!payload.is_symlink);
        assert_eq!(payload.name, "empty.txt");
        assert_eq!(payload.item_type, ItemType::File);
        assert_eq!(payload.mode.len(), 3);
        assert!(payload.modified > 0.0);
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn test_stat_mode_and_symlink() -> anyhow::Result<()> {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir()?;
        let file = dir.path().join("script.sh");
        fs::write(&file, "#!/bin/sh\n")?;
        fs::set_permissions(&file, fs::Permissions::from_mode(0o751))?;
        let link = dir.path().join("link.sh");
        std::os::unix::fs::symlink(&file, &link)?;

        let payload = stat(&link.to_string_lossy())?;
        assert_eq!(payload.mode, "751");
        assert_eq!(payload.size, 10);
        assert!(payload.is_symlink);
        assert!(payload.is_file);

        let payload = stat(&dir.path().to_string_lossy())?;
        assert!(payload.is_dir);
        assert_eq!(payload.item_type, ItemType::Directory);
        Ok(())
    }

    #[test]
    fn test_stat_missing() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let missing = dir.path().join("nope").to_string_lossy().to_string();
        assert_eq!(
            stat(&missing).unwrap_err().to_string(),
            format!("Path not found: {}", missing)
        );
        Ok(())
    }
}
