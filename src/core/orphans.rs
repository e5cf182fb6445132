// src/core/orphans.rs

//! Inventory of environment directories and reclamation of orphaned ones.
//!
//! Each immediate subdirectory of `CONFIG_ROOT/envs` is classified from its
//! recorded originating project: the environment's own `pvt.toml` first, the
//! registry second. With neither, the environment is `Unknown` and is never
//! reclaimed.
//!
//! Classification and deletion are separate steps. Reclamation takes the
//! environment's lock and re-checks the project directory right before
//! deleting, which narrows but does not close the window in which a project
//! directory could reappear between the two.

use crate::{
    core::{
        environment::{self, EnvironmentError},
        identity::ProjectIdentity,
        lock::EnvLock,
        paths::ConfigRoot,
        registry::{self, RegistryError},
    },
    models::{EnvReport, EnvStatus},
};
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Failed to list '{}': {source}", path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Result of a reclamation pass.
#[derive(Debug, Default)]
pub struct ReclaimReport {
    /// Environment directories removed (or, in a dry run, that would be removed).
    pub removed: Vec<PathBuf>,
    /// Orphaned environments skipped because another process holds their lock
    /// or their project directory reappeared.
    pub skipped: Vec<PathBuf>,
    /// Orphaned environments whose deletion failed. Later orphans are still
    /// processed.
    pub failed: Vec<(PathBuf, EnvironmentError)>,
}

impl ReclaimReport {
    pub fn count(&self) -> usize {
        self.removed.len()
    }
}

/// Classifies every environment directory under `config`, sorted by path.
pub fn scan(config: &ConfigRoot) -> Result<Vec<EnvReport>, ScanError> {
    let envs_dir = config.envs_dir();
    if !envs_dir.is_dir() {
        return Ok(Vec::new());
    }

    let registry = registry::load_reconciled(config)?;
    let mut reports = Vec::new();

    let walker = WalkDir::new(&envs_dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name();
    for entry in walker {
        let entry = entry.map_err(|source| ScanError::Walk {
            path: envs_dir.clone(),
            source,
        })?;
        if !entry.file_type().is_dir() {
            continue;
        }

        let env_dir = entry.into_path();
        let project_dir = environment::read_metadata(&env_dir)
            .map(|metadata| metadata.project_dir)
            .or_else(|| registry::project_dir_for(&registry, &env_dir).map(Path::to_path_buf));

        let status = classify(project_dir.as_deref());
        log::debug!("'{}' classified as {:?}", env_dir.display(), status);
        reports.push(EnvReport {
            env_dir,
            project_dir,
            status,
        });
    }

    Ok(reports)
}

fn classify(project_dir: Option<&Path>) -> EnvStatus {
    match project_dir {
        None => EnvStatus::Unknown,
        Some(dir) if dir.is_dir() => EnvStatus::Live,
        Some(_) => EnvStatus::Orphaned,
    }
}

/// Deletes every orphaned environment. With `dry_run`, reports what would be
/// deleted and touches nothing.
///
/// Never deletes a `Live` or `Unknown` environment.
pub fn reclaim(config: &ConfigRoot, dry_run: bool) -> Result<ReclaimReport, ScanError> {
    reclaim_with(config, dry_run, environment::remove_dir)
}

fn reclaim_with<F>(
    config: &ConfigRoot,
    dry_run: bool,
    remove: F,
) -> Result<ReclaimReport, ScanError>
where
    F: Fn(&Path) -> Result<(), EnvironmentError>,
{
    let mut report = ReclaimReport::default();

    for env in scan(config)? {
        if env.status != EnvStatus::Orphaned {
            continue;
        }
        if dry_run {
            report.removed.push(env.env_dir);
            continue;
        }

        let lock = match env_identity(&env.env_dir) {
            Some(identity) => match EnvLock::acquire(config, &identity) {
                Ok(lock) => Some(lock),
                Err(e) if e.is_informational() => {
                    log::warn!("Skipping '{}': {}", env.env_dir.display(), e);
                    report.skipped.push(env.env_dir);
                    continue;
                }
                Err(e) => {
                    report.failed.push((env.env_dir, e.into()));
                    continue;
                }
            },
            None => None,
        };

        // Re-check under the lock: the project may have come back since the scan.
        if env.project_dir.as_deref().is_some_and(Path::is_dir) {
            log::warn!(
                "Skipping '{}': its project directory exists again",
                env.env_dir.display()
            );
            report.skipped.push(env.env_dir);
            continue;
        }

        let result = remove(&env.env_dir);
        drop(lock);
        match result {
            Ok(()) => report.removed.push(env.env_dir),
            Err(e) => {
                log::warn!("Failed to reclaim '{}': {}", env.env_dir.display(), e);
                report.failed.push((env.env_dir, e));
            }
        }
    }

    if !dry_run {
        registry::compact(config)?;
    }
    Ok(report)
}

fn env_identity(env_dir: &Path) -> Option<ProjectIdentity> {
    env_dir
        .file_name()
        .and_then(|name| name.to_str())
        .and_then(ProjectIdentity::parse)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::METADATA_FILENAME;
    use crate::core::{
        environment,
        project::Project,
        testing::{DotGitDiscovery, FakeProvisioner, make_repo},
    };
    use crate::models::{Registry, RegistryEntry};
    use std::fs;

    fn init_project(config: &ConfigRoot, parent: &Path, name: &str) -> Project {
        let repo = make_repo(parent, name, true);
        let project = Project::find(config, &DotGitDiscovery, &repo.join("src")).unwrap();
        environment::initialize(config, &project, false, &FakeProvisioner::default()).unwrap();
        project
    }

    #[test]
    fn test_scan_without_envs_dir_is_empty() {
        let tmp = tempfile::tempdir().unwrap();
        let config = ConfigRoot::new(tmp.path().join("cfg"));
        assert!(scan(&config).unwrap().is_empty());
    }

    #[test]
    fn test_deleted_project_is_orphaned_and_reclaimed() {
        let tmp = tempfile::tempdir().unwrap();
        let config = ConfigRoot::new(tmp.path().join("cfg"));
        let project = init_project(&config, tmp.path(), "repo");

        let reports = scan(&config).unwrap();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].status, EnvStatus::Live);
        assert_eq!(reports[0].env_dir, project.env_dir());

        fs::remove_dir_all(project.project_dir()).unwrap();

        let reports = scan(&config).unwrap();
        assert_eq!(reports[0].status, EnvStatus::Orphaned);
        assert_eq!(reports[0].project_dir.as_deref(), Some(project.project_dir()));

        let report = reclaim(&config, false).unwrap();
        assert_eq!(report.count(), 1);
        assert!(!project.env_dir().exists());
        assert!(scan(&config).unwrap().is_empty());
        assert!(registry::load(&config).unwrap().entries.is_empty());
    }

    #[test]
    fn test_reclaim_never_touches_live_environments() {
        let tmp = tempfile::tempdir().unwrap();
        let config = ConfigRoot::new(tmp.path().join("cfg"));
        let live = init_project(&config, tmp.path(), "live");
        let gone_a = init_project(&config, tmp.path(), "gone-a");
        let gone_b = init_project(&config, tmp.path(), "gone-b");
        fs::remove_dir_all(gone_a.project_dir()).unwrap();
        fs::remove_dir_all(gone_b.project_dir()).unwrap();

        let report = reclaim(&config, false).unwrap();

        assert_eq!(report.count(), 2);
        assert!(live.env_dir().is_dir());
        assert!(!gone_a.env_dir().exists());
        assert!(!gone_b.env_dir().exists());
        assert_eq!(registry::load(&config).unwrap().entries.len(), 1);
    }

    #[test]
    fn test_dry_run_deletes_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let config = ConfigRoot::new(tmp.path().join("cfg"));
        let project = init_project(&config, tmp.path(), "repo");
        fs::remove_dir_all(project.project_dir()).unwrap();

        let report = reclaim(&config, true).unwrap();

        assert_eq!(report.removed, vec![project.env_dir().to_path_buf()]);
        assert!(project.env_dir().is_dir());
    }

    #[test]
    fn test_environment_without_any_record_is_unknown_and_kept() {
        let tmp = tempfile::tempdir().unwrap();
        let config = ConfigRoot::new(tmp.path().join("cfg"));
        let mystery = config.envs_dir().join("mystery");
        fs::create_dir_all(&mystery).unwrap();
        // Plain files next to environments are ignored.
        fs::write(config.envs_dir().join("stray.txt"), "").unwrap();

        let reports = scan(&config).unwrap();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].status, EnvStatus::Unknown);
        assert_eq!(reports[0].project_dir, None);

        assert_eq!(reclaim(&config, false).unwrap().count(), 0);
        assert!(mystery.is_dir());
    }

    #[test]
    fn test_registry_backs_up_missing_metadata() {
        let tmp = tempfile::tempdir().unwrap();
        let config = ConfigRoot::new(tmp.path().join("cfg"));
        let project = init_project(&config, tmp.path(), "repo");
        fs::remove_file(project.env_dir().join(METADATA_FILENAME)).unwrap();

        let reports = scan(&config).unwrap();
        assert_eq!(reports[0].status, EnvStatus::Live);

        fs::remove_dir_all(project.project_dir()).unwrap();
        assert_eq!(scan(&config).unwrap()[0].status, EnvStatus::Orphaned);
    }

    #[test]
    fn test_locked_orphan_is_skipped() {
        let tmp = tempfile::tempdir().unwrap();
        let config = ConfigRoot::new(tmp.path().join("cfg"));
        let project = init_project(&config, tmp.path(), "repo");
        fs::remove_dir_all(project.project_dir()).unwrap();
        let _held = EnvLock::acquire(&config, project.identity()).unwrap();

        let report = reclaim(&config, false).unwrap();

        assert_eq!(report.count(), 0);
        assert_eq!(report.skipped, vec![project.env_dir().to_path_buf()]);
        assert!(project.env_dir().is_dir());
    }

    #[test]
    fn test_failed_deletion_does_not_stop_reclaim() {
        let tmp = tempfile::tempdir().unwrap();
        let config = ConfigRoot::new(tmp.path().join("cfg"));
        let projects: Vec<Project> = ["gone-a", "gone-b", "gone-c"]
            .iter()
            .map(|name| init_project(&config, tmp.path(), name))
            .collect();
        for project in &projects {
            fs::remove_dir_all(project.project_dir()).unwrap();
        }
        let stuck = projects[1].env_dir().to_path_buf();

        let report = reclaim_with(&config, false, |dir| {
            if dir == stuck {
                Err(EnvironmentError::Io {
                    action: "remove directory",
                    path: dir.to_path_buf(),
                    source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
                })
            } else {
                environment::remove_dir(dir)
            }
        })
        .unwrap();

        assert_eq!(report.count(), 2);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].0, stuck);
        assert!(stuck.is_dir());
        assert!(!projects[0].env_dir().exists());
        assert!(!projects[2].env_dir().exists());
        // Compaction still ran: only the environment left on disk is listed.
        let entries = registry::load(&config).unwrap().entries;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].env_dir, stuck);
    }

    #[test]
    fn test_stale_registry_entry_does_not_classify() {
        let tmp = tempfile::tempdir().unwrap();
        let config = ConfigRoot::new(tmp.path().join("cfg"));
        let env_dir = config.envs_dir().join("abcdef0123456789abcdef0123456789");
        fs::create_dir_all(&env_dir).unwrap();
        registry::save(
            &config,
            &Registry {
                entries: vec![RegistryEntry {
                    project_dir: tmp.path().join("nowhere"),
                    env_dir: env_dir.clone(),
                }],
            },
        )
        .unwrap();

        // The entry disagrees with the re-derived identity, so it is ignored.
        let reports = scan(&config).unwrap();
        assert_eq!(reports[0].status, EnvStatus::Unknown);
        assert!(reclaim(&config, false).is_ok());
        assert!(env_dir.is_dir());
    }
}
