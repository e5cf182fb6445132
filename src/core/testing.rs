// src/core/testing.rs
//
// Fakes for the external collaborators, shared by the unit tests.

use crate::system::{
    provisioner::{ProvisionError, Provisioner},
    vcs::{RepoDiscovery, VcsError},
};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Finds the repository root by walking up to the nearest `.git` entry.
#[derive(Debug)]
pub(crate) struct DotGitDiscovery;

impl RepoDiscovery for DotGitDiscovery {
    fn repo_root(&self, search_dir: &Path) -> Result<Option<PathBuf>, VcsError> {
        Ok(search_dir
            .ancestors()
            .find(|dir| dir.join(".git").exists())
            .map(Path::to_path_buf))
    }
}

/// Creates `<parent>/<name>` with a `.git` directory, a `src` directory and,
/// optionally, the project marker file.
pub(crate) fn make_repo(parent: &Path, name: &str, with_marker: bool) -> PathBuf {
    let repo = parent.join(name);
    fs::create_dir_all(repo.join(".git")).unwrap();
    fs::create_dir_all(repo.join("src")).unwrap();
    if with_marker {
        fs::write(repo.join("setup.py"), "from setuptools import setup\nsetup()\n").unwrap();
    }
    repo
}

/// Populates an environment with a scripts directory holding the given stub scripts.
#[derive(Debug, Default)]
pub(crate) struct FakeProvisioner {
    pub(crate) scripts: Vec<(String, String)>,
    pub(crate) fail: bool,
    pub(crate) calls: AtomicUsize,
}

impl FakeProvisioner {
    pub(crate) fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub(crate) fn with_script(mut self, name: &str, body: &str) -> Self {
        self.scripts.push((name.to_string(), body.to_string()));
        self
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Provisioner for FakeProvisioner {
    fn provision(&self, env_dir: &Path) -> Result<(), ProvisionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(ProvisionError::Spawn {
                program: "fake-python".to_string(),
                source: io::Error::other("network unavailable"),
            });
        }
        let bin = crate::core::project::bin_dir(env_dir, crate::core::project::Platform::current());
        fs::create_dir_all(&bin).unwrap();
        for (name, body) in &self.scripts {
            write_script(&bin.join(name), body);
        }
        Ok(())
    }
}

/// Writes an executable shell script.
pub(crate) fn write_script(path: &Path, body: &str) {
    fs::write(path, format!("#!/bin/sh\n{body}\n")).unwrap();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
    }
}
