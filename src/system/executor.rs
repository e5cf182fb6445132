// src/system/executor.rs

use std::env;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command as StdCommand, ExitStatus, Stdio};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExecutionError {
    #[error("Command '{0}' could not be executed: {1}")]
    CommandFailed(String, #[source] io::Error),
    #[error("Could not change the working directory to '{0}': {1}")]
    WorkingDir(String, #[source] io::Error),
}

/// Runs `program` with `args`, inheriting stdin, stdout and stderr, and blocks
/// until it exits. There is no timeout: a hung child hangs the caller.
pub fn execute_program(program: &Path, args: &[String]) -> Result<ExitStatus, ExecutionError> {
    log::debug!("Executing '{}' with args {:?}", program.display(), args);
    StdCommand::new(dunce::simplified(program))
        .args(args)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .map_err(|e| ExecutionError::CommandFailed(program.display().to_string(), e))
}

/// Maps a child's exit status to this process's exit code.
/// A child killed by a signal has no code and maps to 1.
pub fn exit_code(status: ExitStatus) -> i32 {
    status.code().unwrap_or(1)
}

/// Runs `f` with the process working directory switched to `dir`, restoring the
/// previous working directory afterwards whether `f` succeeds, fails or panics.
pub fn with_working_dir<T, E>(dir: &Path, f: impl FnOnce() -> Result<T, E>) -> Result<T, E>
where
    E: From<ExecutionError>,
{
    let previous: PathBuf = env::current_dir()
        .map_err(|e| ExecutionError::WorkingDir(dir.display().to_string(), e))?;
    env::set_current_dir(dir)
        .map_err(|e| ExecutionError::WorkingDir(dir.display().to_string(), e))?;
    log::debug!(
        "Working directory switched from '{}' to '{}'",
        previous.display(),
        dir.display()
    );

    let _restore = scopeguard::guard(previous, |previous| {
        if let Err(e) = env::set_current_dir(&previous) {
            log::warn!(
                "Failed to restore working directory '{}': {}",
                previous.display(),
                e
            );
        }
    });

    f()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::{Mutex, MutexGuard};

    /// Serializes tests that change the working directory or spawn child
    /// processes. A script still open for writing in one test is
    /// inherited by a child forked from another, and exec of it then fails
    /// with "text file busy".
    static PROCESS_LOCK: Mutex<()> = Mutex::new(());

    pub(crate) fn lock_process() -> MutexGuard<'static, ()> {
        PROCESS_LOCK
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    #[test]
    fn test_with_working_dir_restores_after_success() {
        let _guard = lock_process();
        let tmp = tempfile::tempdir().unwrap();
        let target = dunce::canonicalize(tmp.path()).unwrap();
        let before = env::current_dir().unwrap();

        let seen: Result<PathBuf, ExecutionError> =
            with_working_dir(&target, || Ok(env::current_dir().unwrap()));

        assert_eq!(dunce::canonicalize(seen.unwrap()).unwrap(), target);
        assert_eq!(env::current_dir().unwrap(), before);
    }

    #[test]
    fn test_with_working_dir_restores_after_failure() {
        let _guard = lock_process();
        let tmp = tempfile::tempdir().unwrap();
        let before = env::current_dir().unwrap();

        let result: Result<(), ExecutionError> = with_working_dir(tmp.path(), || {
            Err(ExecutionError::CommandFailed(
                "boom".to_string(),
                io::Error::other("simulated"),
            ))
        });

        assert!(result.is_err());
        assert_eq!(env::current_dir().unwrap(), before);
    }

    #[test]
    fn test_with_working_dir_missing_dir_is_an_error() {
        let _guard = lock_process();
        let tmp = tempfile::tempdir().unwrap();
        let before = env::current_dir().unwrap();

        let result: Result<(), ExecutionError> =
            with_working_dir(&tmp.path().join("missing"), || Ok(()));

        assert!(matches!(result, Err(ExecutionError::WorkingDir(..))));
        assert_eq!(env::current_dir().unwrap(), before);
    }

    #[test]
    fn test_execute_missing_program_fails() {
        let _guard = lock_process();
        let tmp = tempfile::tempdir().unwrap();
        let result = execute_program(&tmp.path().join("nope"), &[]);
        assert!(matches!(result, Err(ExecutionError::CommandFailed(..))));
    }

    #[cfg(unix)]
    #[test]
    fn test_exit_code_is_propagated() {
        let _guard = lock_process();
        let status = execute_program(Path::new("/bin/sh"), &["-c".to_string(), "exit 3".to_string()])
            .unwrap();
        assert_eq!(exit_code(status), 3);
    }
}
