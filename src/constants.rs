// src/constants.rs

/// Environment variable that overrides the configuration root.
pub const CONFIG_DIR_ENV_VAR: &str = "PVT_DIR";

/// The configuration root used when `PVT_DIR` is unset, relative to the home directory.
pub const DEFAULT_CONFIG_DIR_NAME: &str = ".pvt";

/// Environment variable naming the interpreter used to populate new environments.
pub const PYTHON_ENV_VAR: &str = "PVT_PYTHON";

/// The subdirectory of the configuration root holding one directory per environment.
pub const ENVS_DIR: &str = "envs";

/// The subdirectory of the configuration root holding advisory lock files.
pub const LOCKS_DIR: &str = "locks";

/// The name of the metadata file written inside each environment directory.
pub const METADATA_FILENAME: &str = "pvt.toml";

/// The name of the registry file (in the configuration root).
pub const REGISTRY_FILENAME: &str = "registry.bin";

/// The file whose presence at the repository root marks a project.
pub const PROJECT_MARKER_FILENAME: &str = "setup.py";

/// The entry-point script driven by the `build`/`test`/`sdist`/`upload` commands.
pub const SETUP_SCRIPT_FILENAME: &str = "setup.py";

/// The interpreter inside an environment's scripts directory.
pub const PYTHON_SCRIPT: &str = "python";

/// The package installer inside an environment's scripts directory.
pub const INSTALLER_SCRIPT: &str = "pip";

/// Current version of the path-to-identity hashing scheme.
/// Changing it orphans every environment created under the previous version.
pub const IDENTITY_SCHEME_VERSION: u32 = 1;
