use std::process::ExitCode;

use clap::Parser;
use fsutils::commands::ReadFile;

#[derive(Debug, Parser)]
#[command(name = "readfile", version, about = "Read file contents")]
pub struct Cli {
    #[arg(short = 'v', long = "verbose", action= clap::ArgAction::Count, help="verbose level")]
    verbose: u8,
    #[command(flatten)]
    read_file: ReadFile,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(x) => x,
        Err(e) => return fstool::argument_error(e),
    };

    fstool::init_logger(cli.verbose);

    fstool::exit_code(cli.read_file.run())
}
