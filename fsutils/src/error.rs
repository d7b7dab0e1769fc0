use std::io;

use thiserror::Error;

use crate::logic::Operation;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ReadFile,
    WriteFile,
    ListDirectory,
    CheckPath,
    AccessPath,
    CreateDirectory,
    RemovePath,
    MovePath,
    CopyPath,
}

impl Action {
    fn denied(&self) -> &'static str {
        match self {
            Action::ReadFile => "reading file",
            Action::WriteFile => "writing file",
            Action::ListDirectory => "reading directory",
            Action::CheckPath => "checking path",
            Action::AccessPath => "accessing path",
            Action::CreateDirectory => "creating directory",
            Action::RemovePath => "removing path",
            Action::MovePath => "moving path",
            Action::CopyPath => "copying path",
        }
    }

    fn failed(&self) -> &'static str {
        match self {
            Action::ReadFile => "Failed to read file",
            Action::WriteFile => "Failed to write file",
            Action::ListDirectory => "Failed to list directory",
            Action::CheckPath => "Failed to check path",
            Action::AccessPath => "Failed to get stat",
            Action::CreateDirectory => "Failed to create directory",
            Action::RemovePath => "Failed to remove path",
            Action::MovePath => "Failed to move path",
            Action::CopyPath => "Failed to copy path",
        }
    }
}

#[derive(Debug, Error)]
pub enum FsError {
    #[error("{param} is required for {operation} operation")]
    MissingParameter {
        param: &'static str,
        operation: Operation,
    },
    #[error("Unknown operation: {0}")]
    UnknownOperation(String),
    #[error("{subject} not found: {path}")]
    NotFound { subject: &'static str, path: String },
    #[error("Path is not a file: {path}")]
    NotAFile { path: String },
    #[error("Path is not a directory: {path}")]
    NotADirectory { path: String },
    #[error("Path exists but is not a directory: {path}")]
    ExistsNotDirectory { path: String },
    #[error("File contains binary data or invalid UTF-8: {path}")]
    InvalidUtf8 { path: String },
    #[error("Permission denied {}: {path}", .action.denied())]
    PermissionDenied { action: Action, path: String },
    #[error("Directory not empty: {path}. Use recursive=true to remove.")]
    NotEmpty { path: String },
    #[error("Source is a directory. Use recursive=true to copy.")]
    RequiresRecursive,
    #[error("Failed to get home directory")]
    HomeDirectory,
    #[error("{}: {source}", .action.failed())]
    Io { action: Action, source: io::Error },
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl FsError {
    pub fn classify(err: io::Error, action: Action, path: &str) -> Self {
        match err.kind() {
            io::ErrorKind::PermissionDenied => FsError::PermissionDenied {
                action,
                path: path.to_string(),
            },
            _ => FsError::Io { action, source: err },
        }
    }

    pub fn lookup(err: io::Error, subject: &'static str, action: Action, path: &str) -> Self {
        if is_missing(&err) {
            FsError::NotFound {
                subject,
                path: path.to_string(),
            }
        } else {
            FsError::classify(err, action, path)
        }
    }

    pub fn from_walk(err: walkdir::Error, action: Action, path: &str) -> Self {
        FsError::classify(io::Error::from(err), action, path)
    }
}

// A path component that is a regular file counts as missing.
pub fn is_missing(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::NotFound | io::ErrorKind::NotADirectory
    )
}
