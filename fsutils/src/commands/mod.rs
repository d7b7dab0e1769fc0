pub mod dispatch;
pub mod readfile;

pub use dispatch::Dispatch;
pub use readfile::ReadFile;
