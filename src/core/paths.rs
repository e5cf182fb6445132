// src/core/paths.rs

use crate::constants::{
    CONFIG_DIR_ENV_VAR, DEFAULT_CONFIG_DIR_NAME, ENVS_DIR, LOCKS_DIR, REGISTRY_FILENAME,
};
use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PathError {
    #[error("Could not find the home directory for the default configuration root.")]
    HomeDirNotFound,
    #[error("Could not expand {var} value '{value}': {message}")]
    Expansion {
        var: &'static str,
        value: String,
        message: String,
    },
    #[error("Could not determine the current directory: {0}")]
    CurrentDir(#[source] std::io::Error),
}

/// The process-wide base directory under which all environments and metadata live.
///
/// Resolved once in `main` and passed down. Nothing here touches the filesystem;
/// subdirectories are created lazily by the operations that write into them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigRoot {
    dir: PathBuf,
}

impl ConfigRoot {
    /// Wraps an already-resolved absolute directory.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Resolves the root from `PVT_DIR`, falling back to `~/.pvt`.
    pub fn from_env() -> Result<Self, PathError> {
        Self::resolve(env::var(CONFIG_DIR_ENV_VAR).ok().as_deref())
    }

    /// Resolves the root from an optional override value.
    ///
    /// The override may use `~` and `$VAR` syntax. A relative result is anchored
    /// at the current directory so the root stays absolute for the process lifetime.
    pub fn resolve(override_value: Option<&str>) -> Result<Self, PathError> {
        let dir = match override_value.map(str::trim).filter(|v| !v.is_empty()) {
            Some(value) => {
                let expanded = shellexpand::full(value).map_err(|e| PathError::Expansion {
                    var: CONFIG_DIR_ENV_VAR,
                    value: value.to_string(),
                    message: e.to_string(),
                })?;
                PathBuf::from(expanded.into_owned())
            }
            None => dirs::home_dir()
                .ok_or(PathError::HomeDirNotFound)?
                .join(DEFAULT_CONFIG_DIR_NAME),
        };

        let dir = if dir.is_absolute() {
            dir
        } else {
            env::current_dir().map_err(PathError::CurrentDir)?.join(dir)
        };

        log::debug!("Configuration root resolved to '{}'", dir.display());
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// `CONFIG_ROOT/envs`
    pub fn envs_dir(&self) -> PathBuf {
        self.dir.join(ENVS_DIR)
    }

    /// `CONFIG_ROOT/locks`
    pub fn locks_dir(&self) -> PathBuf {
        self.dir.join(LOCKS_DIR)
    }

    /// `CONFIG_ROOT/registry.bin`
    pub fn registry_path(&self) -> PathBuf {
        self.dir.join(REGISTRY_FILENAME)
    }
}
