//! # System Interaction Layer
//!
//! The boundary between the environment manager and the outside world. Each
//! collaborator here is a thin, blocking wrapper with no retries and no timeout.
//!
//! ## Modules
//!
//! - **`executor`**: Spawns scripts with inherited standard streams and provides the
//!   scoped working-directory switch used by the setup commands.
//! - **`provisioner`**: The `Provisioner` trait and its `python -m venv` implementation,
//!   which populates a fresh environment directory.
//! - **`vcs`**: The `RepoDiscovery` trait and its `git rev-parse --show-toplevel`
//!   implementation.

pub mod executor;
pub mod provisioner;
pub mod vcs;
