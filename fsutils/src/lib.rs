pub mod commands;
pub mod error;
pub mod logic;
pub mod output;

pub use error::FsError;
pub use logic::{dispatch, Operation, Params};
pub use output::{OperationResult, Payload};
