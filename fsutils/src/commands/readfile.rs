use std::io::{self, Write};

use anyhow::Context;
use clap::Parser;

use crate::logic::read;

#[derive(Parser, Debug, Clone, PartialEq)]
#[command(about = "Read file contents", version, author)]
pub struct ReadFile {
    #[arg(long, help = "Path to the file to read")]
    path: String,
}

impl ReadFile {
    pub fn run(&self) -> anyhow::Result<bool> {
        self.run_with(io::stdout().lock(), io::stderr().lock())
    }

    pub fn run_with<W: Write, E: Write>(&self, mut output: W, mut error: E) -> anyhow::Result<bool> {
        match read::read_text(&self.path) {
            Ok(content) => {
                output
                    .write_all(content.as_bytes())
                    .context("Failed to write to stdout")?;
                output.flush()?;
                Ok(true)
            }
            Err(e) => {
                writeln!(error, "Error: {}", e)?;
                Ok(false)
            }
        }
    }
}
