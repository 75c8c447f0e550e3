//! Application configuration module.
//!
//! Locates and loads the TOML config file holding TMDB connection settings and
//! browse tuning, plus the environment overrides layered on top of it.

#[allow(clippy::module_inception)]
mod config;
mod paths;

#[allow(clippy::module_name_repetitions)]
pub use config::{AppConfig, TmdbSettings};
pub use paths::resolve_config_path;
