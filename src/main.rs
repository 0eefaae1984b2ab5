use clap::Parser;
use dfatrader::cli::{run, Cli};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
