// src/core/project.rs

use crate::{
    constants::{ENVS_DIR, PROJECT_MARKER_FILENAME},
    core::{
        identity::{self, ProjectIdentity},
        paths::ConfigRoot,
    },
    system::vcs::{RepoDiscovery, VcsError},
};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LocateError {
    /// The search directory is not inside a repository, or the repository root
    /// carries no project marker file.
    #[error("Could not determine project directory from search location {}", search_dir.display())]
    NotFound { search_dir: PathBuf },
    #[error(transparent)]
    Vcs(#[from] VcsError),
    #[error("Could not resolve project directory '{}': {source}", path.display())]
    Canonicalize {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl LocateError {
    pub fn is_informational(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Platform flavour that decides the name of an environment's scripts directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    Unix,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(windows) { Self::Windows } else { Self::Unix }
    }

    fn scripts_dir_name(self) -> &'static str {
        match self {
            Self::Windows => "Scripts",
            Self::Unix => "bin",
        }
    }
}

/// `config_root/envs/<identity>`
pub fn env_dir(config: &ConfigRoot, identity: &ProjectIdentity) -> PathBuf {
    config.dir().join(ENVS_DIR).join(identity.as_str())
}

/// The executable-scripts subdirectory of an environment.
pub fn bin_dir(env_dir: &Path, platform: Platform) -> PathBuf {
    env_dir.join(platform.scripts_dir_name())
}

/// Finds the project that owns `search_dir`.
///
/// The project directory is the version-control repository root, provided it
/// contains the project marker file. The result is canonical, so every
/// subdirectory of one repository resolves to the identical path.
pub fn locate(vcs: &dyn RepoDiscovery, search_dir: &Path) -> Result<PathBuf, LocateError> {
    let not_found = || LocateError::NotFound {
        search_dir: search_dir.to_path_buf(),
    };

    // A search directory that does not exist cannot be inside a repository.
    let Ok(absolute_search_dir) = dunce::canonicalize(search_dir) else {
        return Err(not_found());
    };

    let Some(repo_root) = vcs.repo_root(&absolute_search_dir)? else {
        log::debug!("'{}' is not inside a repository", search_dir.display());
        return Err(not_found());
    };

    if !repo_root.join(PROJECT_MARKER_FILENAME).is_file() {
        log::debug!(
            "Repository root '{}' has no '{}'",
            repo_root.display(),
            PROJECT_MARKER_FILENAME
        );
        return Err(not_found());
    }

    identity::canonicalize(&repo_root).map_err(|source| LocateError::Canonicalize {
        path: repo_root,
        source,
    })
}

/// A located project together with the environment paths derived from it.
/// Recomputed on every invocation; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    project_dir: PathBuf,
    identity: ProjectIdentity,
    env_dir: PathBuf,
    bin_dir: PathBuf,
}

impl Project {
    /// Locates the project owning `search_dir` and maps it to its environment.
    pub fn find(
        config: &ConfigRoot,
        vcs: &dyn RepoDiscovery,
        search_dir: &Path,
    ) -> Result<Self, LocateError> {
        let project_dir = locate(vcs, search_dir)?;
        Ok(Self::from_project_dir(config, project_dir))
    }

    /// Builds the paths for an already-canonical project directory.
    pub fn from_project_dir(config: &ConfigRoot, project_dir: PathBuf) -> Self {
        let identity = ProjectIdentity::derive(&project_dir);
        let env_dir = env_dir(config, &identity);
        let bin_dir = bin_dir(&env_dir, Platform::current());
        log::debug!(
            "Project '{}' has identity {} and environment '{}'",
            project_dir.display(),
            identity,
            env_dir.display()
        );
        Self {
            project_dir,
            identity,
            env_dir,
            bin_dir,
        }
    }

    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }

    pub fn identity(&self) -> &ProjectIdentity {
        &self.identity
    }

    pub fn env_dir(&self) -> &Path {
        &self.env_dir
    }

    pub fn bin_dir(&self) -> &Path {
        &self.bin_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::testing::{DotGitDiscovery, make_repo};
    use std::fs;

    #[test]
    fn test_locate_is_stable_across_subdirectories() {
        let tmp = tempfile::tempdir().unwrap();
        let repo = make_repo(tmp.path(), "repo", true);
        let deep = repo.join("src").join("pkg");
        fs::create_dir_all(&deep).unwrap();

        let from_root = locate(&DotGitDiscovery, &repo).unwrap();
        let from_src = locate(&DotGitDiscovery, &repo.join("src")).unwrap();
        let from_pkg = locate(&DotGitDiscovery, &deep).unwrap();

        assert_eq!(from_root, dunce::canonicalize(&repo).unwrap());
        assert_eq!(from_root, from_src);
        assert_eq!(from_root, from_pkg);
    }

    #[test]
    fn test_locate_outside_repository_is_not_found() {
        let tmp = tempfile::tempdir().unwrap();
        let plain = tmp.path().join("plain");
        fs::create_dir_all(&plain).unwrap();

        let err = locate(&DotGitDiscovery, &plain).unwrap_err();
        assert!(err.is_informational());
        assert!(err.to_string().contains(&plain.display().to_string()));
    }

    #[test]
    fn test_locate_without_marker_is_not_found() {
        let tmp = tempfile::tempdir().unwrap();
        let repo = make_repo(tmp.path(), "repo", false);
        let sub = repo.join("docs");
        fs::create_dir_all(&sub).unwrap();
        // A marker below the root does not count.
        fs::write(sub.join("setup.py"), "").unwrap();

        let result = locate(&DotGitDiscovery, &sub);
        assert!(
            matches!(&result, Err(LocateError::NotFound { search_dir }) if search_dir == &sub),
            "expected NotFound, got {result:?}"
        );
    }

    #[test]
    fn test_locate_missing_search_dir_is_not_found() {
        let tmp = tempfile::tempdir().unwrap();
        let err = locate(&DotGitDiscovery, &tmp.path().join("missing")).unwrap_err();
        assert!(matches!(err, LocateError::NotFound { .. }));
    }

    #[test]
    fn test_env_and_bin_dir_mapping() {
        let config = ConfigRoot::new("/cfg");
        let identity = ProjectIdentity::derive(Path::new("/repo"));
        let env = env_dir(&config, &identity);
        assert_eq!(env, Path::new("/cfg/envs").join(identity.as_str()));
        assert_eq!(bin_dir(&env, Platform::Unix), env.join("bin"));
        assert_eq!(bin_dir(&env, Platform::Windows), env.join("Scripts"));
    }

    #[test]
    fn test_find_maps_project_to_identity_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let repo = make_repo(tmp.path(), "repo", true);
        let config = ConfigRoot::new(tmp.path().join("cfg"));

        let project = Project::find(&config, &DotGitDiscovery, &repo.join("src")).unwrap();
        let expected_identity = ProjectIdentity::derive(project.project_dir());
        assert_eq!(project.identity(), &expected_identity);
        assert_eq!(
            project.env_dir(),
            config.envs_dir().join(expected_identity.as_str())
        );
        assert!(project.bin_dir().starts_with(project.env_dir()));
    }
}
