// src/cli/handlers/mod.rs

// One module per command. `setup` serves build, test, sdist and upload.

pub mod commons;
pub mod exec;
pub mod info;
pub mod init;
pub mod install;
pub mod setup;
pub mod show;
pub mod uninit;
pub mod vacuum;
