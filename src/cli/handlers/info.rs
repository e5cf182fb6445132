// src/cli/handlers/info.rs

use anyhow::Result;
use clap::Parser;
use colored::Colorize;

use super::commons;
use crate::{
    core::orphans,
    models::{EnvReport, EnvStatus},
    state::AppContext,
};

#[derive(Parser, Debug, Default)]
#[command(
    no_binary_name = true,
    name = "pvt info",
    about = "Show virtual environment directory information"
)]
struct InfoArgs {
    /// Print the inventory as JSON
    #[arg(long)]
    json: bool,
}

/// Lists every environment under the configuration root, marking orphaned ones.
pub fn handle(args: Vec<String>, ctx: &AppContext) -> Result<i32> {
    let info_args: InfoArgs = commons::parse_args(&args);
    let reports = orphans::scan(&ctx.config)?;

    if info_args.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
        return Ok(0);
    }

    print!("{}", render(&reports));
    Ok(0)
}

/// The human-readable inventory: one block per environment, then a hint when
/// anything can be vacuumed.
fn render(reports: &[EnvReport]) -> String {
    if reports.is_empty() {
        return format!("{}\n", t!("info.info.empty").dimmed());
    }

    let mut out: String = reports.iter().map(render_report).collect();
    if reports.iter().any(|r| r.status == EnvStatus::Orphaned) {
        out.push_str(&format!("{}\n", t!("info.hint.vacuum").yellow()));
    }
    out
}

fn render_report(report: &EnvReport) -> String {
    let heading = match (&report.project_dir, report.status) {
        (Some(project_dir), EnvStatus::Orphaned) => format!(
            "{} {}",
            format_args!(t!("info.label.project"), path = project_dir.display()),
            t!("info.marker.orphaned").red()
        ),
        (Some(project_dir), _) => format!(t!("info.label.project"), path = project_dir.display()),
        (None, _) => format!(
            "{} {}",
            t!("info.label.project_unknown"),
            t!("info.marker.unknown").dimmed()
        ),
    };
    format!("{}\n  {}\n\n", heading, report.env_dir.display())
}
