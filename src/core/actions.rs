// src/core/actions.rs

use crate::{
    constants::{INSTALLER_SCRIPT, PYTHON_SCRIPT, SETUP_SCRIPT_FILENAME},
    core::{
        environment::{self, EnvironmentError},
        project::Project,
    },
    system::executor::{self, ExecutionError},
};
use std::path::{Path, PathBuf};
use std::process::ExitStatus;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ActionError {
    #[error(transparent)]
    Environment(#[from] EnvironmentError),
    #[error(transparent)]
    Execution(#[from] ExecutionError),
}

impl ActionError {
    pub fn is_informational(&self) -> bool {
        matches!(self, Self::Environment(e) if e.is_informational())
    }
}

/// A command that drives the project's setup script with a fixed action list.
#[derive(Debug)]
pub struct SetupCommand {
    pub name: &'static str,
    pub about: &'static str,
    pub actions: &'static [&'static str],
}

/// Command name to ordered, immutable action list.
pub static SETUP_COMMANDS: &[SetupCommand] = &[
    SetupCommand {
        name: "build",
        about: "Build package using setup.py in virtual environment",
        actions: &["build"],
    },
    SetupCommand {
        name: "test",
        about: "Test package using setup.py in virtual environment",
        actions: &["test"],
    },
    SetupCommand {
        name: "sdist",
        about: "Create package distribution using setup.py in virtual environment",
        actions: &["sdist"],
    },
    SetupCommand {
        name: "upload",
        about: "Build, test, create and upload package using setup.py in virtual environment",
        actions: &["build", "test", "sdist", "upload"],
    },
];

pub fn find_setup_command(name: &str) -> Option<&'static SetupCommand> {
    SETUP_COMMANDS.iter().find(|cmd| cmd.name == name)
}

/// Path of `script_name` inside `bin_dir`. On Windows the executable suffix is
/// appended when the bare name does not exist.
pub fn resolve_script(bin_dir: &Path, script_name: &str) -> PathBuf {
    let bare = bin_dir.join(script_name);
    if cfg!(windows) && !bare.exists() {
        let with_suffix = bin_dir.join(format!("{}{}", script_name, std::env::consts::EXE_SUFFIX));
        if with_suffix.exists() {
            return with_suffix;
        }
    }
    bare
}

/// Runs a script from the environment's scripts directory with inherited streams.
/// Fails with `NotInitialized` before spawning anything if the environment is absent.
pub fn run_script(
    project: &Project,
    script_name: &str,
    args: &[String],
) -> Result<ExitStatus, ActionError> {
    environment::ensure_exists(project)?;
    let script = resolve_script(project.bin_dir(), script_name);
    Ok(executor::execute_program(&script, args)?)
}

/// Installs the project into its own environment in editable mode.
pub fn install(project: &Project) -> Result<ExitStatus, ActionError> {
    let args = vec![
        "install".to_string(),
        "--editable".to_string(),
        project.project_dir().display().to_string(),
    ];
    run_script(project, INSTALLER_SCRIPT, &args)
}

/// Runs `python setup.py <actions...>` once, from the project directory.
/// The previous working directory is restored afterwards, on every path.
pub fn execute_setup_actions(
    project: &Project,
    actions: &[&str],
) -> Result<ExitStatus, ActionError> {
    environment::ensure_exists(project)?;
    let mut args = vec![SETUP_SCRIPT_FILENAME.to_string()];
    args.extend(actions.iter().map(|a| a.to_string()));

    executor::with_working_dir(project.project_dir(), || {
        run_script(project, PYTHON_SCRIPT, &args)
    })
}
