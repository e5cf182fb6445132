// src/core/environment.rs

//! Lifecycle of a project's environment directory.
//!
//! Per identity: `Absent --initialize--> Present --initialize(force)--> Present`
//! (replaced, never merged) `--uninitialize--> Absent`. Uninitializing an
//! absent environment is a no-op. Existence is always read from the
//! filesystem, never cached.

use crate::{
    constants::{IDENTITY_SCHEME_VERSION, METADATA_FILENAME},
    core::{
        lock::{EnvLock, LockError},
        paths::ConfigRoot,
        project::Project,
        registry::{self, RegistryError},
    },
    models::{EnvMetadata, RegistryEntry},
    system::provisioner::{ProvisionError, Provisioner},
};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EnvironmentError {
    #[error(
        "Virtual environment directory {} already exists: use \"--force\" to overwrite",
        env_dir.display()
    )]
    AlreadyExists { env_dir: PathBuf },
    #[error(
        "Virtual environment directory does not exist for project {}: create with \"init\" command",
        project_dir.display()
    )]
    NotInitialized { project_dir: PathBuf },
    #[error(transparent)]
    Lock(#[from] LockError),
    #[error(transparent)]
    Provision(#[from] ProvisionError),
    #[error("Failed to {action} '{}': {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to serialize environment metadata: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl EnvironmentError {
    /// Whether this is an expected, user-correctable condition rather than a fault.
    pub fn is_informational(&self) -> bool {
        match self {
            Self::AlreadyExists { .. } | Self::NotInitialized { .. } => true,
            Self::Lock(e) => e.is_informational(),
            _ => false,
        }
    }
}

type EnvResult<T> = Result<T, EnvironmentError>;

/// Creates the project's environment.
///
/// Fails with `AlreadyExists` when the directory is present and `force` is not
/// set. With `force`, the existing directory is deleted first, with no backup.
/// A provisioning failure propagates and may leave a partial directory behind.
pub fn initialize(
    config: &ConfigRoot,
    project: &Project,
    force: bool,
    provisioner: &dyn Provisioner,
) -> EnvResult<()> {
    let env_dir = project.env_dir();
    let _lock = EnvLock::acquire(config, project.identity())?;

    if env_dir.is_dir() {
        if !force {
            return Err(EnvironmentError::AlreadyExists {
                env_dir: env_dir.to_path_buf(),
            });
        }
        log::info!("Removing existing environment '{}'", env_dir.display());
        remove_dir(env_dir)?;
    }

    if let Some(parent) = env_dir.parent() {
        fs::create_dir_all(parent).map_err(|source| EnvironmentError::Io {
            action: "create directory",
            path: parent.to_path_buf(),
            source,
        })?;
    }

    provisioner.provision(env_dir)?;
    write_metadata(project)?;

    let entry = RegistryEntry {
        project_dir: project.project_dir().to_path_buf(),
        env_dir: env_dir.to_path_buf(),
    };
    if let Err(e) = registry::append(config, entry) {
        // The environment itself is usable; only the inventory is behind.
        log::warn!("Could not record environment in registry: {}", e);
    }

    log::info!(
        "Initialized '{}' for '{}'",
        env_dir.display(),
        project.project_dir().display()
    );
    Ok(())
}

/// Deletes the project's environment if present. Returns whether anything was removed.
pub fn uninitialize(config: &ConfigRoot, project: &Project) -> EnvResult<bool> {
    let env_dir = project.env_dir();
    let _lock = EnvLock::acquire(config, project.identity())?;

    if !env_dir.is_dir() {
        log::debug!("Nothing to remove at '{}'", env_dir.display());
        return Ok(false);
    }
    remove_dir(env_dir)?;
    Ok(true)
}

/// Precondition guard for anything that runs inside the environment.
pub fn ensure_exists(project: &Project) -> EnvResult<()> {
    if project.env_dir().is_dir() {
        Ok(())
    } else {
        Err(EnvironmentError::NotInitialized {
            project_dir: project.project_dir().to_path_buf(),
        })
    }
}

/// Reads `pvt.toml` from an environment directory.
///
/// Returns `None` if the file is missing or cannot be parsed; the latter is logged.
pub fn read_metadata(env_dir: &Path) -> Option<EnvMetadata> {
    let path = env_dir.join(METADATA_FILENAME);
    let content = fs::read_to_string(&path).ok()?;
    match toml::from_str::<EnvMetadata>(&content) {
        Ok(metadata) => Some(metadata),
        Err(e) => {
            log::warn!("Ignoring unreadable metadata '{}': {}", path.display(), e);
            None
        }
    }
}

fn write_metadata(project: &Project) -> EnvResult<()> {
    let metadata = EnvMetadata {
        project_dir: project.project_dir().to_path_buf(),
        env_dir: project.env_dir().to_path_buf(),
        identity_scheme: IDENTITY_SCHEME_VERSION,
    };
    let path = project.env_dir().join(METADATA_FILENAME);
    fs::write(&path, toml::to_string_pretty(&metadata)?).map_err(|source| {
        EnvironmentError::Io {
            action: "write metadata",
            path,
            source,
        }
    })
}

pub(crate) fn remove_dir(dir: &Path) -> EnvResult<()> {
    log::debug!("Removing directory '{}'", dir.display());
    fs::remove_dir_all(dir).map_err(|source| EnvironmentError::Io {
        action: "remove directory",
        path: dir.to_path_buf(),
        source,
    })
}
