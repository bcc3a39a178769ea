//! Configuration loading
//!
//! Precedence: CLI flags > environment > config file > defaults.

pub mod loader;

pub use loader::{load_config, merge_overrides, ENV_PREFIX};
