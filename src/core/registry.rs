// src/core/registry.rs

//! The optional inventory of every (project, environment) pair ever created.
//!
//! The registry is a cache for display and for orphan detection when an
//! environment's own metadata is missing. It is never consulted to resolve a
//! project's identity. Entries that disagree with the re-derived identity are
//! discarded on load.

use crate::{
    core::{identity::ProjectIdentity, paths::ConfigRoot, project},
    models::{Registry, RegistryEntry},
};
use std::collections::HashSet;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("Registry I/O error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to encode registry: {0}")]
    BincodeEncode(#[from] bincode::error::EncodeError),
}

type RegistryResult<T> = Result<T, RegistryError>;

/// Reads the registry exactly as stored. A missing file is an empty registry;
/// an undecodable one is logged and treated as empty.
pub fn load(config: &ConfigRoot) -> RegistryResult<Registry> {
    let path = config.registry_path();
    if !path.exists() {
        return Ok(Registry::default());
    }
    let bytes = fs::read(&path).map_err(|source| RegistryError::Io {
        path: path.clone(),
        source,
    })?;
    match bincode::serde::decode_from_slice::<Registry, _>(&bytes, bincode::config::standard()) {
        Ok((registry, _)) => Ok(registry),
        Err(e) => {
            log::warn!(
                "Ignoring unreadable registry '{}': {}",
                path.display(),
                e
            );
            Ok(Registry::default())
        }
    }
}

/// Reads the registry and drops entries that do not survive [`reconcile`].
pub fn load_reconciled(config: &ConfigRoot) -> RegistryResult<Registry> {
    Ok(reconcile(config, load(config)?))
}

/// Discards entries whose environment directory is not the one re-derived from
/// their project directory, and collapses duplicates to the newest entry.
pub fn reconcile(config: &ConfigRoot, registry: Registry) -> Registry {
    let mut seen = HashSet::new();
    let mut kept: Vec<RegistryEntry> = registry
        .entries
        .into_iter()
        .rev()
        .filter(|entry| {
            let expected =
                project::env_dir(config, &ProjectIdentity::derive(&entry.project_dir));
            if expected != entry.env_dir {
                log::debug!(
                    "Discarding registry entry for '{}': expected '{}', recorded '{}'",
                    entry.project_dir.display(),
                    expected.display(),
                    entry.env_dir.display()
                );
                return false;
            }
            seen.insert(entry.env_dir.clone())
        })
        .collect();
    kept.reverse();
    Registry { entries: kept }
}

/// Records a newly created environment.
pub fn append(config: &ConfigRoot, entry: RegistryEntry) -> RegistryResult<()> {
    let mut registry = load_reconciled(config)?;
    registry.entries.retain(|e| e.env_dir != entry.env_dir);
    registry.entries.push(entry);
    save(config, &registry)
}

/// Drops entries whose environment directory no longer exists.
/// Returns the number of entries removed.
pub fn compact(config: &ConfigRoot) -> RegistryResult<usize> {
    let registry = load(config)?;
    let before = registry.entries.len();
    let mut compacted = reconcile(config, registry);
    compacted.entries.retain(|e| e.env_dir.is_dir());
    let removed = before - compacted.entries.len();
    if removed > 0 {
        log::debug!("Compacting registry: {} stale entries", removed);
        save(config, &compacted)?;
    }
    Ok(removed)
}

/// The newest recorded project directory for `env_dir`, if any.
pub fn project_dir_for<'a>(registry: &'a Registry, env_dir: &Path) -> Option<&'a Path> {
    registry
        .entries
        .iter()
        .rev()
        .find(|e| e.env_dir == env_dir)
        .map(|e| e.project_dir.as_path())
}

/// Writes the registry through a temporary file so readers never see a partial write.
pub fn save(config: &ConfigRoot, registry: &Registry) -> RegistryResult<()> {
    let path = config.registry_path();
    let io_err = |source| RegistryError::Io {
        path: path.clone(),
        source,
    };

    fs::create_dir_all(config.dir()).map_err(io_err)?;
    let bytes = bincode::serde::encode_to_vec(registry, bincode::config::standard())?;
    let mut tmp = NamedTempFile::new_in(config.dir()).map_err(io_err)?;
    tmp.write_all(&bytes).map_err(io_err)?;
    tmp.persist(&path).map_err(|e| io_err(e.error))?;
    Ok(())
}
