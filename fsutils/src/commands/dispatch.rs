use std::io::{self, Write};

use clap::builder::BoolishValueParser;
use clap::{ArgAction, Parser};

use crate::logic::{self, Operation, Params};
use crate::output;

#[derive(Parser, Debug, Clone, PartialEq)]
#[command(about = "File system operations tool", version, author)]
pub struct Dispatch {
    #[arg(
        long,
        value_parser = Operation::parse_name,
        help = "Operation: read, write, list, exists, stat, mkdir, rm, mv, cp"
    )]
    operation: Operation,
    #[arg(long, help = "Path to file or directory")]
    path: Option<String>,
    #[arg(long, help = "Source path (for mv, cp)")]
    source: Option<String>,
    #[arg(long, help = "Destination path (for mv, cp)")]
    dest: Option<String>,
    #[arg(long, allow_hyphen_values = true, help = "Content to write (for write)")]
    content: Option<String>,
    #[arg(
        long,
        action = ArgAction::Set,
        num_args = 0..=1,
        default_value = "false",
        default_missing_value = "true",
        value_parser = BoolishValueParser::new(),
        help = "Recursive operation (for list, rm, cp)"
    )]
    recursive: bool,
    #[arg(
        long,
        action = ArgAction::Set,
        num_args = 0..=1,
        default_value = "false",
        default_missing_value = "true",
        value_parser = BoolishValueParser::new(),
        help = "Create parent directories (for mkdir)"
    )]
    parents: bool,
    #[arg(
        long,
        action = ArgAction::Set,
        num_args = 0..=1,
        default_value = "false",
        default_missing_value = "true",
        value_parser = BoolishValueParser::new(),
        help = "Create parent directories (for write)"
    )]
    create_dirs: bool,
}

impl Dispatch {
    pub fn params(&self) -> Params {
        Params {
            path: self.path.clone(),
            source: self.source.clone(),
            dest: self.dest.clone(),
            content: self.content.clone(),
            recursive: self.recursive,
            parents: self.parents,
            create_dirs: self.create_dirs,
        }
    }

    pub fn run(&self) -> anyhow::Result<bool> {
        self.run_with(io::stdout().lock())
    }

    pub fn run_with<W: Write>(&self, writer: W) -> anyhow::Result<bool> {
        let result = logic::dispatch(self.operation, &self.params());
        output::write_json(writer, &result)?;
        Ok(result.is_success())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[derive(Debug, Parser)]
    struct Cli {
        #[command(flatten)]
        dispatch: Dispatch,
    }

    #[test]
    fn test_boolish_flags() {
        let cli = Cli::parse_from([
            "fs",
            "--operation",
            "rm",
            "--path",
            "x",
            "--recursive",
        ]);
        assert!(cli.dispatch.recursive);
        assert!(!cli.dispatch.parents);

        let cli = Cli::parse_from([
            "fs",
            "--operation",
            "mkdir",
            "--parents",
            "false",
            "--create-dirs=yes",
            "--path",
            "x",
        ]);
        assert_eq!(cli.dispatch.operation, Operation::Mkdir);
        assert!(!cli.dispatch.parents);
        assert!(cli.dispatch.create_dirs);
        assert_eq!(cli.dispatch.path.as_deref(), Some("x"));

        let cli = Cli::parse_from(["fs", "--operation", "list", "--recursive", "--path", "d"]);
        assert!(cli.dispatch.recursive);
        assert_eq!(cli.dispatch.path.as_deref(), Some("d"));
    }

    #[test]
    fn test_unknown_operation() {
        let err = Cli::try_parse_from(["fs", "--operation", "chmod", "--path", "x"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
        assert!(err.to_string().contains("Unknown operation: chmod"));

        let err = Cli::try_parse_from(["fs", "--path", "x"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_run_with() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let file = dir.path().join("written.txt");
        let file_str = file.to_string_lossy().to_string();

        let cli = Cli::parse_from([
            "fs",
            "--operation",
            "write",
            "--path",
            file_str.as_str(),
            "--content",
            "-- dashes first",
        ]);
        let mut buffer = Vec::new();
        assert!(cli.dispatch.run_with(&mut buffer)?);
        let value: serde_json::Value = serde_json::from_slice(&buffer)?;
        assert_eq!(value["success"], true);
        assert_eq!(value["path"], file_str.as_str());
        assert_eq!(std::fs::read_to_string(&file)?, "-- dashes first");

        let cli = Cli::parse_from(["fs", "--operation", "stat"]);
        let mut buffer = Vec::new();
        assert!(!cli.dispatch.run_with(&mut buffer)?);
        let value: serde_json::Value = serde_json::from_slice(&buffer)?;
        assert_eq!(value["error"], "path is required for stat operation");
        Ok(())
    }
}
