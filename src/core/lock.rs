// src/core/lock.rs

use crate::core::{identity::ProjectIdentity, paths::ConfigRoot};
use fs2::FileExt;
use std::fs::{self, File, OpenOptions};
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LockError {
    #[error(
        "Another pvt process is modifying this virtual environment (lock file {})",
        path.display()
    )]
    Held { path: PathBuf },
    #[error("Could not lock '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl LockError {
    pub fn is_informational(&self) -> bool {
        matches!(self, Self::Held { .. })
    }
}

/// Advisory, cross-process lock on one environment identity.
///
/// Held while an environment directory is created or deleted. The lock is an
/// OS file lock on `CONFIG_ROOT/locks/<identity>.lock`: it is released when
/// the guard is dropped or the process dies, however it dies. The lock file
/// itself stays behind and is reused. Readers (script execution, `show`,
/// `info`) never take the lock, so they can still observe a half-written
/// directory.
#[derive(Debug)]
pub struct EnvLock {
    path: PathBuf,
    file: File,
}

impl EnvLock {
    /// Takes the lock for `identity` without waiting.
    pub fn acquire(config: &ConfigRoot, identity: &ProjectIdentity) -> Result<Self, LockError> {
        let path = config.locks_dir().join(format!("{}.lock", identity));
        Self::acquire_at(path)
    }

    fn acquire_at(path: PathBuf) -> Result<Self, LockError> {
        let io_err = |source| LockError::Io {
            path: path.clone(),
            source,
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .truncate(false)
            .open(&path)
            .map_err(io_err)?;

        match file.try_lock_exclusive() {
            Ok(()) => {}
            Err(e) if is_contended(&e) => return Err(LockError::Held { path }),
            Err(source) => return Err(LockError::Io { path, source }),
        }

        // The pid is only a hint for whoever inspects the locks directory.
        if let Err(e) = file
            .set_len(0)
            .and_then(|()| writeln!(file, "{}", std::process::id()))
        {
            log::trace!("Could not record pid in '{}': {}", path.display(), e);
        }
        log::trace!("Acquired lock '{}'", path.display());
        Ok(Self { path, file })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn is_contended(err: &io::Error) -> bool {
    err.kind() == ErrorKind::WouldBlock
        || err.raw_os_error() == fs2::lock_contended_error().raw_os_error()
}

impl Drop for EnvLock {
    fn drop(&mut self) {
        // Closing the handle would release it as well.
        match FileExt::unlock(&self.file) {
            Ok(()) => log::trace!("Released lock '{}'", self.path.display()),
            Err(e) => log::warn!("Failed to release lock '{}': {}", self.path.display(), e),
        }
    }
}
