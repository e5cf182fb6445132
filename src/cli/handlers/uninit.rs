// src/cli/handlers/uninit.rs

use anyhow::Result;
use clap::Parser;

use super::commons::{self, SearchDirArg};
use crate::{core::environment, state::AppContext};

#[derive(Parser, Debug, Default)]
#[command(
    no_binary_name = true,
    name = "pvt uninit",
    about = "Uninitialize virtual environment for current project"
)]
struct UninitArgs {
    #[command(flatten)]
    search: SearchDirArg,
}

/// Deletes the project's environment. Succeeds when there is nothing to delete.
pub fn handle(args: Vec<String>, ctx: &AppContext) -> Result<i32> {
    let uninit_args: UninitArgs = commons::parse_args(&args);
    let project = commons::find_project(ctx, &uninit_args.search)?;

    let removed = environment::uninitialize(&ctx.config, &project)?;
    log::debug!("uninit removed anything: {}", removed);

    println!(
        t!("uninit.success"),
        project_dir = project.project_dir().display(),
        env_dir = project.env_dir().display()
    );
    Ok(0)
}
