use std::process::ExitCode;

use clap::Parser;
use rvec::cli::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(cli.level())
        .with_writer(std::io::stderr)
        .init();

    match cli.run() {
        Ok(out) => {
            println!("{out}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
