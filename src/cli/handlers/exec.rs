// src/cli/handlers/exec.rs

use anyhow::Result;
use clap::Parser;

use super::commons::{self, SearchDirArg};
use crate::{core::actions, state::AppContext, system::executor};

#[derive(Parser, Debug, Default)]
#[command(
    no_binary_name = true,
    name = "pvt exec",
    about = "Execute command line in virtual environment context"
)]
struct ExecArgs {
    #[command(flatten)]
    search: SearchDirArg,

    /// Script from the environment's scripts directory, followed by its arguments
    #[arg(
        required = true,
        trailing_var_arg = true,
        allow_hyphen_values = true,
        value_name = "COMMAND"
    )]
    command: Vec<String>,
}

/// Runs `COMMAND[0]` from the environment with `COMMAND[1..]` and exits with its code.
pub fn handle(args: Vec<String>, ctx: &AppContext) -> Result<i32> {
    let exec_args: ExecArgs = commons::parse_args(&args);
    let project = commons::find_project(ctx, &exec_args.search)?;

    let Some((script_name, script_args)) = exec_args.command.split_first() else {
        // clap enforces `required`; an empty command line has nothing to run.
        return Ok(0);
    };

    let status = actions::run_script(&project, script_name, script_args)?;
    Ok(executor::exit_code(status))
}
