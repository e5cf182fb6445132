// src/state.rs

use crate::core::paths::{ConfigRoot, PathError};
use crate::system::{
    provisioner::{Provisioner, VenvProvisioner},
    vcs::{GitCli, RepoDiscovery},
};
use std::fmt;

/// Everything a command handler needs: the configuration root, resolved once
/// per process, and the external collaborators.
pub struct AppContext {
    pub config: ConfigRoot,
    pub vcs: Box<dyn RepoDiscovery>,
    pub provisioner: Box<dyn Provisioner>,
}

impl AppContext {
    /// The production wiring: `PVT_DIR`, `git`, and `python -m venv`.
    pub fn from_env() -> Result<Self, PathError> {
        Ok(Self {
            config: ConfigRoot::from_env()?,
            vcs: Box::new(GitCli::default()),
            provisioner: Box::new(VenvProvisioner::from_env()),
        })
    }
}

impl fmt::Debug for AppContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppContext")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
