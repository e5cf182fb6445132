// src/models.rs

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// --- PER-ENVIRONMENT METADATA (pvt.toml inside the environment directory) ---

/// Record written into every environment directory once it has been populated.
/// It is the primary source for orphan detection.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct EnvMetadata {
    pub project_dir: PathBuf,
    pub env_dir: PathBuf,
    /// Version of the identity scheme that produced the directory name.
    #[serde(default = "default_identity_scheme")]
    pub identity_scheme: u32,
}

fn default_identity_scheme() -> u32 {
    crate::constants::IDENTITY_SCHEME_VERSION
}

// --- REGISTRY MODELS (registry.bin in the configuration root) ---

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct RegistryEntry {
    pub project_dir: PathBuf,
    pub env_dir: PathBuf,
}

/// Every (project, environment) pair ever created, oldest first.
/// Used for inventory only; identities are always re-derived, never looked up here.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Registry {
    #[serde(default)]
    pub entries: Vec<RegistryEntry>,
}

// --- SCAN MODELS ---

/// Classification of one environment directory.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EnvStatus {
    /// The recorded project directory exists.
    Live,
    /// The recorded project directory no longer exists.
    Orphaned,
    /// Neither metadata nor registry records a project for this directory.
    /// Treated as live: never reclaimed.
    Unknown,
}

/// One row of an orphan scan.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct EnvReport {
    pub env_dir: PathBuf,
    pub project_dir: Option<PathBuf>,
    pub status: EnvStatus,
}
