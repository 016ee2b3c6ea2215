//! # Sitewright Config
//!
//! Configuration management for sitewright: TOML files with `${VAR}`
//! environment expansion, defaults for every field, and validation of the
//! handful of values the workflow depends on.

mod error;
mod loader;
mod schema;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use schema::*;
