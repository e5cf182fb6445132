// src/core/mod.rs

pub mod actions;
pub mod environment;
pub mod identity;
pub mod lock;
pub mod orphans;
pub mod paths;
pub mod project;
pub mod registry;

#[cfg(test)]
pub(crate) mod testing;
