// src/system/provisioner.rs

use crate::constants::PYTHON_ENV_VAR;
use std::io;
use std::path::Path;
use std::process::{Command as StdCommand, ExitStatus, Stdio};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProvisionError {
    #[error("Could not run '{program}' to create the virtual environment: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("'{program} -m venv' failed for '{env_dir}' ({status})")]
    Failed {
        program: String,
        env_dir: String,
        status: ExitStatus,
    },
}

/// Populates an empty target directory with an isolated runtime.
pub trait Provisioner {
    fn provision(&self, env_dir: &Path) -> Result<(), ProvisionError>;
}

/// Creates environments with the interpreter's built-in `venv` module.
#[derive(Debug, Clone)]
pub struct VenvProvisioner {
    python: String,
}

impl VenvProvisioner {
    pub fn new(python: impl Into<String>) -> Self {
        Self {
            python: python.into(),
        }
    }

    /// Uses `PVT_PYTHON` when set, otherwise the platform's usual interpreter name.
    pub fn from_env() -> Self {
        let python = std::env::var(PYTHON_ENV_VAR)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| {
                if cfg!(windows) {
                    "python".to_string()
                } else {
                    "python3".to_string()
                }
            });
        Self::new(python)
    }
}

impl Provisioner for VenvProvisioner {
    fn provision(&self, env_dir: &Path) -> Result<(), ProvisionError> {
        log::info!(
            "Creating virtual environment in '{}' with '{}'",
            env_dir.display(),
            self.python
        );
        let status = StdCommand::new(&self.python)
            .args(["-m", "venv"])
            .arg(dunce::simplified(env_dir))
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|source| ProvisionError::Spawn {
                program: self.python.clone(),
                source,
            })?;

        if !status.success() {
            return Err(ProvisionError::Failed {
                program: self.python.clone(),
                env_dir: env_dir.display().to_string(),
                status,
            });
        }
        Ok(())
    }
}
