// src/cli/handlers/commons.rs

// Shared helpers for the command handlers.

use anyhow::{Context, Result};
use clap::{Args, Parser};
use colored::Colorize;
use std::env;
use std::path::PathBuf;

use crate::{
    core::{
        actions::ActionError,
        environment::EnvironmentError,
        lock::LockError,
        project::{LocateError, Project},
    },
    state::AppContext,
};

/// The `--search-dir|-d PATH` option shared by every project-scoped command.
#[derive(Args, Debug, Default)]
pub struct SearchDirArg {
    /// Location from which to search for project [default: current directory]
    #[arg(long = "search-dir", short = 'd', value_name = "PATH")]
    pub search_dir: Option<PathBuf>,
}

impl SearchDirArg {
    pub fn resolve(&self) -> Result<PathBuf> {
        match &self.search_dir {
            Some(dir) => Ok(dir.clone()),
            None => env::current_dir().context("Could not determine the current directory"),
        }
    }
}

/// Parses handler arguments. On `--help` or a usage error clap prints the
/// message and exits the process, as it would for top-level arguments.
pub fn parse_args<T: Parser>(args: &[String]) -> T {
    T::try_parse_from(args).unwrap_or_else(|e| e.exit())
}

/// Locates the project for the given search directory.
pub fn find_project(ctx: &AppContext, search: &SearchDirArg) -> Result<Project> {
    let search_dir = search.resolve()?;
    Ok(Project::find(&ctx.config, ctx.vcs.as_ref(), &search_dir)?)
}

/// Whether `err` is an expected, user-correctable condition: project not
/// found, environment missing or already present, or locked by another process.
pub fn is_informational(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        if let Some(e) = cause.downcast_ref::<LocateError>() {
            e.is_informational()
        } else if let Some(e) = cause.downcast_ref::<EnvironmentError>() {
            e.is_informational()
        } else if let Some(e) = cause.downcast_ref::<ActionError>() {
            e.is_informational()
        } else if let Some(e) = cause.downcast_ref::<LockError>() {
            e.is_informational()
        } else {
            false
        }
    })
}

/// How `main` reports a failed command. Both forms exit with status 1.
#[derive(Debug, PartialEq, Eq)]
pub enum ErrorReport {
    /// An informational condition, printed verbatim to stdout.
    Stdout(String),
    /// An external failure, printed to stderr with the error prefix.
    Stderr(String),
}

impl ErrorReport {
    pub fn for_error(err: &anyhow::Error) -> Self {
        if is_informational(err) {
            Self::Stdout(err.to_string())
        } else {
            Self::Stderr(format!("{}: {:#}", t!("common.error").red().bold(), err))
        }
    }

    pub const EXIT_CODE: i32 = 1;

    pub fn print(&self) {
        match self {
            Self::Stdout(message) => println!("{}", message),
            Self::Stderr(message) => eprintln!("{}", message),
        }
    }
}
