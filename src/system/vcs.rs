// src/system/vcs.rs

use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command as StdCommand, Stdio};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum VcsError {
    #[error("Could not run '{program}' to discover the repository root: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("'{program}' produced a repository root that was not valid UTF-8")]
    InvalidUtf8Output { program: String },
}

/// Version-control root discovery.
pub trait RepoDiscovery {
    /// Returns the root of the repository enclosing `search_dir`, or `None`
    /// when `search_dir` is not inside a repository.
    fn repo_root(&self, search_dir: &Path) -> Result<Option<PathBuf>, VcsError>;
}

/// Discovers the repository root by asking the `git` executable.
#[derive(Debug, Clone)]
pub struct GitCli {
    program: String,
}

impl Default for GitCli {
    fn default() -> Self {
        Self {
            program: "git".to_string(),
        }
    }
}

impl RepoDiscovery for GitCli {
    fn repo_root(&self, search_dir: &Path) -> Result<Option<PathBuf>, VcsError> {
        let output = StdCommand::new(&self.program)
            .arg("-C")
            .arg(dunce::simplified(search_dir))
            .args(["rev-parse", "--show-toplevel"])
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .output()
            .map_err(|source| VcsError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            log::debug!(
                "'{} rev-parse' exited with {} for '{}'",
                self.program,
                output.status,
                search_dir.display()
            );
            return Ok(None);
        }

        let stdout = String::from_utf8(output.stdout).map_err(|_| VcsError::InvalidUtf8Output {
            program: self.program.clone(),
        })?;
        Ok(stdout
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .map(PathBuf::from))
    }
}
