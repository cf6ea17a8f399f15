use std::process::ExitCode;

use clap::Parser;
use env_logger::{Builder, Env};
use fea_merge_cli::cli::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();
    Builder::from_env(Env::default().default_filter_or(cli.log_level())).init();
    cli.run()
}
