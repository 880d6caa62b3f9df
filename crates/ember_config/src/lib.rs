//! Parsing and validation of `ember.toml` configuration files.
//!
//! This crate reads the optional project configuration file and produces a
//! strongly-typed [`EmberConfig`] holding the cache location, the preferred
//! digest algorithm, and the mirror host table.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config, load_config_from_str, load_config_or_default, CONFIG_FILE};
pub use types::*;
