// src/cli/handlers/init.rs

use anyhow::Result;
use clap::Parser;
use colored::Colorize;

use super::commons::{self, SearchDirArg};
use crate::{core::environment, state::AppContext};

#[derive(Parser, Debug, Default)]
#[command(
    no_binary_name = true,
    name = "pvt init",
    about = "Initialize virtual environment for current project"
)]
struct InitArgs {
    #[command(flatten)]
    search: SearchDirArg,

    /// Force overwrite of virtual environment directory if it already exists
    #[arg(long, short)]
    force: bool,
}

/// The main handler for the `init` command.
pub fn handle(args: Vec<String>, ctx: &AppContext) -> Result<i32> {
    let init_args: InitArgs = commons::parse_args(&args);
    let project = commons::find_project(ctx, &init_args.search)?;

    environment::initialize(
        &ctx.config,
        &project,
        init_args.force,
        ctx.provisioner.as_ref(),
    )?;

    println!(
        "{}",
        format!(
            t!("init.success"),
            project_dir = project.project_dir().display(),
            env_dir = project.env_dir().display()
        )
        .green()
    );
    Ok(0)
}
