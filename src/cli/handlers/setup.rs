// src/cli/handlers/setup.rs

use anyhow::Result;
use clap::{CommandFactory, FromArgMatches, Parser};

use super::commons::{self, SearchDirArg};
use crate::{
    core::actions::{self, SetupCommand},
    state::AppContext,
    system::executor,
};

#[derive(Parser, Debug, Default)]
#[command(no_binary_name = true)]
struct SetupArgs {
    #[command(flatten)]
    search: SearchDirArg,
}

/// Shared handler for `build`, `test`, `sdist` and `upload`: runs the setup
/// script once with the command's fixed action list.
pub fn handle(setup: &SetupCommand, args: Vec<String>, ctx: &AppContext) -> Result<i32> {
    let matches = SetupArgs::command()
        .name(setup.name)
        .about(setup.about)
        .try_get_matches_from(&args)
        .unwrap_or_else(|e| e.exit());
    let setup_args = SetupArgs::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    let project = commons::find_project(ctx, &setup_args.search)?;
    log::debug!(
        "Running setup actions {:?} for '{}'",
        setup.actions,
        project.project_dir().display()
    );
    let status = actions::execute_setup_actions(&project, setup.actions)?;
    Ok(executor::exit_code(status))
}
