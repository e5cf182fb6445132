// src/cli/handlers/vacuum.rs

use anyhow::Result;
use clap::Parser;
use colored::Colorize;

use super::commons;
use crate::{core::orphans, state::AppContext};

#[derive(Parser, Debug, Default)]
#[command(
    no_binary_name = true,
    name = "pvt vacuum",
    about = "Clean up unreferenced virtual environment directories"
)]
struct VacuumArgs {
    /// List the directories that would be removed without removing them
    #[arg(long)]
    dry_run: bool,
}

/// Removes every environment whose recorded project directory no longer exists.
/// Exits 1 if any of them could not be removed; the others are still removed.
pub fn handle(args: Vec<String>, ctx: &AppContext) -> Result<i32> {
    let vacuum_args: VacuumArgs = commons::parse_args(&args);
    let report = orphans::reclaim(&ctx.config, vacuum_args.dry_run)?;

    for env_dir in &report.removed {
        if vacuum_args.dry_run {
            println!(t!("vacuum.info.would_remove"), path = env_dir.display());
        } else {
            println!(t!("vacuum.info.removed"), path = env_dir.display());
        }
    }
    for env_dir in &report.skipped {
        log::info!("Left '{}' in place", env_dir.display());
    }
    for (_, err) in &report.failed {
        eprintln!("{}: {}", t!("common.error").red().bold(), err);
    }

    println!("{}", summary(report.count(), vacuum_args.dry_run).green());
    Ok(if report.failed.is_empty() { 0 } else { 1 })
}

/// The count-specific closing line: none, exactly one, or many.
fn summary(count: usize, dry_run: bool) -> String {
    match (count, dry_run) {
        (0, _) => t!("vacuum.summary.none").to_string(),
        (1, false) => t!("vacuum.summary.one").to_string(),
        (1, true) => t!("vacuum.summary.dry_run_one").to_string(),
        (n, false) => format!(t!("vacuum.summary.many"), count = n),
        (n, true) => format!(t!("vacuum.summary.dry_run_many"), count = n),
    }
}
