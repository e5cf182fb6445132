// src/core/identity.rs

//! Derivation of the stable key that names a project's environment directory.
//!
//! The identity is the sole sharding key under `CONFIG_ROOT/envs`. Any change to
//! [`canonicalize`] or [`ProjectIdentity::derive`] changes every key and orphans
//! every existing environment, so the scheme is versioned
//! (`IDENTITY_SCHEME_VERSION`) and the version is recorded in each environment's
//! metadata.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

const HASH_TRUNCATE_LENGTH: usize = 16; // 16 bytes = 32 hex characters

/// A fixed-length, lowercase hex key derived from a canonical project path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProjectIdentity(String);

impl ProjectIdentity {
    /// Hashes the path string of an already-canonical project directory.
    ///
    /// Pure: no filesystem access, no dependence on locale or time.
    pub fn derive(canonical_project_dir: &Path) -> Self {
        let path_string = canonical_project_dir.to_string_lossy();
        let hash = blake3::hash(path_string.as_bytes());
        let prefix = hash.as_bytes().get(..HASH_TRUNCATE_LENGTH).unwrap_or_default();
        Self(hex::encode(prefix))
    }

    /// Accepts a directory name found under `envs/` if it has the shape of an identity.
    pub fn parse(value: &str) -> Option<Self> {
        let well_formed = value.len() == HASH_TRUNCATE_LENGTH * 2
            && value.bytes().all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b));
        well_formed.then(|| Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Produces the canonical form of a project directory used for hashing.
///
/// Symlinks are resolved and trailing separators dropped. On Windows the verbatim
/// `\\?\` prefix is avoided and the result is lowercased, since the filesystem is
/// case-insensitive there.
pub fn canonicalize(dir: &Path) -> io::Result<PathBuf> {
    let canonical = dunce::canonicalize(dir)?;
    if cfg!(windows) {
        Ok(PathBuf::from(canonical.to_string_lossy().to_lowercase()))
    } else {
        Ok(canonical)
    }
}
