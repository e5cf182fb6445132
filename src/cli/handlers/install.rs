// src/cli/handlers/install.rs

use anyhow::Result;
use clap::Parser;

use super::commons::{self, SearchDirArg};
use crate::{core::actions, state::AppContext, system::executor};

#[derive(Parser, Debug, Default)]
#[command(
    no_binary_name = true,
    name = "pvt install",
    about = "Install or reinstall current package into virtual environment in editable mode"
)]
struct InstallArgs {
    #[command(flatten)]
    search: SearchDirArg,
}

pub fn handle(args: Vec<String>, ctx: &AppContext) -> Result<i32> {
    let install_args: InstallArgs = commons::parse_args(&args);
    let project = commons::find_project(ctx, &install_args.search)?;
    let status = actions::install(&project)?;
    Ok(executor::exit_code(status))
}
