use std::process::ExitCode;

use clap::Parser;
use fsutils::commands::Dispatch;

#[derive(Debug, Parser)]
#[command(name = "fs", version, about = "File system operations tool")]
pub struct Cli {
    #[arg(short = 'v', long = "verbose", action= clap::ArgAction::Count, help="verbose level")]
    verbose: u8,
    #[command(flatten)]
    dispatch: Dispatch,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(x) => x,
        Err(e) => return fstool::argument_error(e),
    };

    fstool::init_logger(cli.verbose);

    fstool::exit_code(cli.dispatch.run())
}
