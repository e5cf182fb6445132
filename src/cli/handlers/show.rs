// src/cli/handlers/show.rs

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use std::fs;

use super::commons::{self, SearchDirArg};
use crate::state::AppContext;

#[derive(Parser, Debug, Default)]
#[command(
    no_binary_name = true,
    name = "pvt show",
    about = "Show information about current virtual environment"
)]
struct ShowArgs {
    #[command(flatten)]
    search: SearchDirArg,
}

/// Prints the project directory, the environment and its installed scripts.
pub fn handle(args: Vec<String>, ctx: &AppContext) -> Result<i32> {
    let show_args: ShowArgs = commons::parse_args(&args);
    let project = commons::find_project(ctx, &show_args.search)?;

    println!(
        t!("show.label.project_dir"),
        path = project.project_dir().display()
    );

    if project.env_dir().is_dir() {
        println!(
            t!("show.label.env_dir"),
            path = project.env_dir().display()
        );
    } else {
        println!("{}", t!("show.info.env_missing").yellow());
    }

    let bin_dir = project.bin_dir();
    if bin_dir.is_dir() {
        println!(t!("show.label.bin_dir"), path = bin_dir.display());

        let mut script_names: Vec<String> = fs::read_dir(bin_dir)
            .with_context(|| format!("Failed to list '{}'", bin_dir.display()))?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .collect();
        script_names.sort();

        if !script_names.is_empty() {
            println!("{}", t!("show.label.installed_scripts"));
            for script_name in script_names {
                println!("  {}", script_name.cyan());
            }
        }
    }
    Ok(0)
}
