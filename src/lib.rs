//! Locates the project that owns a working directory and manages the isolated
//! Python environment kept for it under the configuration root.

include!(concat!(env!("OUT_DIR"), "/translations.rs"));

pub mod cli;
pub mod constants;
pub mod core;
pub mod models;
pub mod state;
pub mod system;
