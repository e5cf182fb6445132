// src/bin/pvt.rs

use anyhow::Result;
use clap::Parser;
use pvt::{
    cli::{Cli, dispatcher, handlers::commons::ErrorReport},
    state::AppContext,
};

/// The main entry point of `pvt`.
/// Sets up logging, parses arguments, dispatches, and maps errors to exit codes.
fn main() {
    env_logger::init();

    match run_cli(Cli::parse()) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            // Expected, user-fixable conditions go to stdout; failures to stderr.
            let report = ErrorReport::for_error(&e);
            report.print();
            std::process::exit(ErrorReport::EXIT_CODE);
        }
    }
}

fn run_cli(cli: Cli) -> Result<i32> {
    log::debug!("CLI args parsed: {:?}", cli);

    // The configuration root is resolved once and shared by every command.
    let ctx = AppContext::from_env()?;
    log::debug!("Using {:?}", ctx);

    dispatcher::dispatch(cli.args, &ctx)
}
