use std::fs::Metadata;
use std::io::Write;
use std::path::Path;

use anyhow::Context;
use serde::{Serialize, Serializer};

use crate::error::FsError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    File,
    Directory,
}

impl ItemType {
    pub fn from_metadata(metadata: &Metadata) -> Self {
        if metadata.is_dir() {
            ItemType::Directory
        } else {
            ItemType::File
        }
    }

    pub fn of(path: &Path) -> Self {
        if path.is_dir() {
            ItemType::Directory
        } else {
            ItemType::File
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReadPayload {
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathPayload {
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListEntry {
    pub path: String,
    pub name: String,
    #[serde(rename = "type")]
    pub item_type: ItemType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relative: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListPayload {
    pub items: Vec<ListEntry>,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExistsPayload {
    pub exists: bool,
    pub path: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub item_type: Option<ItemType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_file: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_dir: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatPayload {
    pub path: String,
    pub name: String,
    #[serde(rename = "type")]
    pub item_type: ItemType,
    pub size: u64,
    /// Permission bits as three octal digits, e.g. `"644"`.
    pub mode: String,
    pub modified: f64,
    pub accessed: f64,
    pub created: f64,
    pub is_file: bool,
    pub is_dir: bool,
    pub is_symlink: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MkdirPayload {
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransferPayload {
    pub source: String,
    pub dest: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Payload {
    Read(ReadPayload),
    Write(PathPayload),
    List(ListPayload),
    Exists(ExistsPayload),
    Stat(StatPayload),
    Mkdir(MkdirPayload),
    Remove(PathPayload),
    Move(TransferPayload),
    Copy(TransferPayload),
}

#[derive(Debug)]
pub enum OperationResult {
    Success(Payload),
    Failure(FsError),
}

impl OperationResult {
    pub fn is_success(&self) -> bool {
        matches!(self, OperationResult::Success(_))
    }
}

impl From<Result<Payload, FsError>> for OperationResult {
    fn from(result: Result<Payload, FsError>) -> Self {
        match result {
            Ok(payload) => OperationResult::Success(payload),
            Err(e) => OperationResult::Failure(e),
        }
    }
}

impl Serialize for OperationResult {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        #[derive(Serialize)]
        #[serde(untagged)]
        enum Wire<'a> {
            Success {
                success: bool,
                #[serde(flatten)]
                payload: &'a Payload,
            },
            Failure {
                success: bool,
                error: String,
            },
        }

        match self {
            OperationResult::Success(payload) => Wire::Success {
                success: true,
                payload,
            },
            OperationResult::Failure(e) => Wire::Failure {
                success: false,
                error: e.to_string(),
            },
        }
        .serialize(serializer)
    }
}

pub fn write_json<W: Write>(mut writer: W, result: &OperationResult) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut writer, result).context("Failed to serialize result")?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::logic::Operation;

    #[test]
    fn test_success_shape() -> anyhow::Result<()> {
        let result = OperationResult::Success(Payload::Move(TransferPayload {
            source: "a".to_string(),
            dest: "b".to_string(),
        }));
        let mut buffer = Vec::new();
        write_json(&mut buffer, &result)?;
        assert_eq!(
            String::from_utf8(buffer)?,
            "{\n  \"success\": true,\n  \"source\": \"a\",\n  \"dest\": \"b\"\n}\n"
        );
        Ok(())
    }

    #[test]
    fn test_failure_shape() -> anyhow::Result<()> {
        let result = OperationResult::Failure(FsError::MissingParameter {
            param: "path",
            operation: Operation::Read,
        });
        let value = serde_json::to_value(&result)?;
        assert_eq!(
            value,
            serde_json::json!({
                "success": false,
                "error": "path is required for read operation"
            })
        );
        Ok(())
    }

    #[test]
    fn test_optional_fields_skipped() -> anyhow::Result<()> {
        let result = OperationResult::Success(Payload::Exists(ExistsPayload {
            exists: false,
            path: "/nowhere".to_string(),
            item_type: None,
            is_file: None,
            is_dir: None,
        }));
        let value = serde_json::to_value(&result)?;
        assert_eq!(
            value,
            serde_json::json!({"success": true, "exists": false, "path": "/nowhere"})
        );

        let entry = ListEntry {
            path: "/d/a".to_string(),
            name: "a".to_string(),
            item_type: ItemType::Directory,
            relative: None,
        };
        assert_eq!(
            serde_json::to_value(&entry)?,
            serde_json::json!({"path": "/d/a", "name": "a", "type": "directory"})
        );
        Ok(())
    }
}
