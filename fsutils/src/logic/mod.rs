pub mod inspect;
pub mod list;
pub mod mkdir;
pub mod path;
pub mod read;
pub mod remove;
pub mod transfer;
pub mod write;

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use std::str::FromStr;

use log::{debug, info};

use crate::error::FsError;
use crate::output::{OperationResult, Payload};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Read,
    Write,
    List,
    Exists,
    Stat,
    Mkdir,
    Rm,
    Mv,
    Cp,
}

impl Operation {
    pub const ALL: [Operation; 9] = [
        Operation::Read,
        Operation::Write,
        Operation::List,
        Operation::Exists,
        Operation::Stat,
        Operation::Mkdir,
        Operation::Rm,
        Operation::Mv,
        Operation::Cp,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Operation::Read => "read",
            Operation::Write => "write",
            Operation::List => "list",
            Operation::Exists => "exists",
            Operation::Stat => "stat",
            Operation::Mkdir => "mkdir",
            Operation::Rm => "rm",
            Operation::Mv => "mv",
            Operation::Cp => "cp",
        }
    }

    pub fn parse_name(name: &str) -> Result<Self, FsError> {
        Operation::ALL
            .iter()
            .copied()
            .find(|x| x.name() == name)
            .ok_or_else(|| FsError::UnknownOperation(name.to_string()))
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operation {
    type Err = FsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operation::parse_name(s)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    pub path: Option<String>,
    pub source: Option<String>,
    pub dest: Option<String>,
    pub content: Option<String>,
    pub recursive: bool,
    pub parents: bool,
    pub create_dirs: bool,
}

fn require<'a>(
    value: &'a Option<String>,
    param: &'static str,
    operation: Operation,
) -> Result<&'a str, FsError> {
    match value.as_deref() {
        Some(x) if !x.is_empty() => Ok(x),
        _ => Err(FsError::MissingParameter { param, operation }),
    }
}

pub fn execute(operation: Operation, params: &Params) -> Result<Payload, FsError> {
    debug!("executing {} with {:?}", operation, params);
    let op = operation;
    let payload = match operation {
        Operation::Read => Payload::Read(read::read(require(&params.path, "path", op)?)?),
        Operation::Write => {
            let path = require(&params.path, "path", op)?;
            let content = require(&params.content, "content", op)?;
            Payload::Write(write::write(path, content, params.create_dirs)?)
        }
        Operation::List => Payload::List(list::list(
            require(&params.path, "path", op)?,
            params.recursive,
        )?),
        Operation::Exists => Payload::Exists(inspect::exists(require(&params.path, "path", op)?)?),
        Operation::Stat => Payload::Stat(inspect::stat(require(&params.path, "path", op)?)?),
        Operation::Mkdir => Payload::Mkdir(mkdir::mkdir(
            require(&params.path, "path", op)?,
            params.parents,
        )?),
        Operation::Rm => Payload::Remove(remove::remove(
            require(&params.path, "path", op)?,
            params.recursive,
        )?),
        Operation::Mv => {
            let source = require(&params.source, "source", op)?;
            let dest = require(&params.dest, "dest", op)?;
            Payload::Move(transfer::move_path(source, dest)?)
        }
        Operation::Cp => {
            let source = require(&params.source, "source", op)?;
            let dest = require(&params.dest, "dest", op)?;
            Payload::Copy(transfer::copy_path(source, dest, params.recursive)?)
        }
    };
    Ok(payload)
}

pub fn dispatch(operation: Operation, params: &Params) -> OperationResult {
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| execute(operation, params)));
    let result = match outcome {
        Ok(x) => OperationResult::from(x),
        Err(panic) => OperationResult::Failure(FsError::Unexpected(panic_message(panic))),
    };
    match &result {
        OperationResult::Success(_) => info!("{} succeeded", operation),
        OperationResult::Failure(e) => info!("{} failed: {}", operation, e),
    }
    result
}

fn panic_message(panic: Box<dyn Any + Send>) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "operation panicked".to_string()
    }
}

pub(crate) fn path_string(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

pub(crate) fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|x| x.to_string_lossy().into_owned())
        .unwrap_or_else(|| path_string(path))
}
