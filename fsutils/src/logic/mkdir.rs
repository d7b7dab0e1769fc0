use std::fs;

use log::{debug, info};

use super::path::expand_path;
use super::path_string;
use crate::error::{is_missing, Action, FsError};
use crate::output::MkdirPayload;

pub const ALREADY_EXISTS: &str = "Directory already exists";

pub fn mkdir(path: &str, parents: bool) -> Result<MkdirPayload, FsError> {
    let target = expand_path(path)?;

    match fs::metadata(&target) {
        Ok(metadata) if metadata.is_dir() => {
            info!("{} already exists", target.display());
            return Ok(MkdirPayload {
                path: path_string(&target),
                message: Some(ALREADY_EXISTS.to_string()),
            });
        }
        Ok(_) => {
            return Err(FsError::ExistsNotDirectory {
                path: path.to_string(),
            })
        }
        Err(e) if is_missing(&e) => {}
        Err(e) => return Err(FsError::classify(e, Action::CreateDirectory, path)),
    }

    let created = if parents {
        fs::create_dir_all(&target)
    } else {
        fs::create_dir(&target)
    };
    created.map_err(|e| FsError::classify(e, Action::CreateDirectory, path))?;
    debug!("created {}", target.display());

    Ok(MkdirPayload {
        path: path_string(&target),
        message: None,
    })
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_mkdir_twice() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let target = dir.path().join("fresh");
        let target_str = target.to_string_lossy();

        let first = mkdir(&target_str, false)?;
        assert_eq!(first.message, None);
        assert!(target.is_dir());

        let second = mkdir(&target_str, false)?;
        assert_eq!(second.message.as_deref(), Some(ALREADY_EXISTS));
        Ok(())
    }

    #[test]
    fn test_mkdir_missing_parent() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let target = dir.path().join("a").join("b").join("c");
        let target_str = target.to_string_lossy();

        let err = mkdir(&target_str, false).unwrap_err();
        assert!(matches!(
            err,
            FsError::Io {
                action: Action::CreateDirectory,
                ..
            }
        ));
        assert!(err.to_string().starts_with("Failed to create directory: "));
        assert!(!dir.path().join("a").exists());

        mkdir(&target_str, true)?;
        assert!(target.is_dir());
        Ok(())
    }

    #[test]
    fn test_mkdir_over_file() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let file = dir.path().join("occupied");
        fs::write(&file, "x")?;
        let file_str = file.to_string_lossy().to_string();

        assert_eq!(
            mkdir(&file_str, true).unwrap_err().to_string(),
            format!("Path exists but is not a directory: {}", file_str)
        );
        Ok(())
    }
}
