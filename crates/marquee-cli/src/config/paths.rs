//! Config file location.
//!
//! Lookup order: the `--dir` flag, `MARQUEE_CONFIG_DIR`, then
//! `$XDG_CONFIG_HOME/marquee`, then `$HOME/.config/marquee`.

use std::path::{Path, PathBuf};

use anyhow::{Result, bail};

/// Config directory override.
const ENV_CONFIG_DIR: &str = "MARQUEE_CONFIG_DIR";
/// File name inside the config directory.
const CONFIG_FILE: &str = "config.toml";

/// Resolves the config file path from `dir` and the process environment.
///
/// # Errors
///
/// Returns an error if neither `dir` nor any of the environment variables
/// yields a directory.
pub fn resolve_config_path(dir: Option<&PathBuf>) -> Result<PathBuf> {
    resolve_config_path_with(dir.map(PathBuf::as_path), |name| std::env::var(name).ok())
}

/// Resolves the config file path, reading variables through `lookup`.
///
/// Blank variables are treated as unset.
///
/// # Errors
///
/// Returns an error if no candidate directory is available.
pub fn resolve_config_path_with(
    dir: Option<&Path>,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<PathBuf> {
    if let Some(d) = dir {
        return Ok(d.join(CONFIG_FILE));
    }

    let lookup = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

    let config_dir = if let Some(d) = lookup(ENV_CONFIG_DIR) {
        PathBuf::from(d)
    } else if let Some(xdg) = lookup("XDG_CONFIG_HOME") {
        PathBuf::from(xdg).join("marquee")
    } else if let Some(home) = lookup("HOME") {
        PathBuf::from(home).join(".config").join("marquee")
    } else {
        bail!("cannot locate config directory: set --dir, {ENV_CONFIG_DIR} or HOME");
    };

    tracing::debug!(dir = %config_dir.display(), "config directory resolved");
    Ok(config_dir.join(CONFIG_FILE))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use std::collections::HashMap;

    use super::*;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (String::from(*k), String::from(*v)))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_dir_flag_wins_over_environment() {
        // Arrange
        let lookup = env(&[("MARQUEE_CONFIG_DIR", "/srv/marquee"), ("HOME", "/home/u")]);

        // Act
        let path = resolve_config_path_with(Some(Path::new("/tmp/cfg")), lookup).unwrap();

        // Assert
        assert_eq!(path, PathBuf::from("/tmp/cfg/config.toml"));
    }

    #[test]
    fn test_config_dir_variable_wins_over_xdg() {
        // Arrange
        let lookup = env(&[
            ("MARQUEE_CONFIG_DIR", "/srv/marquee"),
            ("XDG_CONFIG_HOME", "/home/u/.xdg"),
            ("HOME", "/home/u"),
        ]);

        // Act
        let path = resolve_config_path_with(None, lookup).unwrap();

        // Assert
        assert_eq!(path, PathBuf::from("/srv/marquee/config.toml"));
    }

    #[test]
    fn test_xdg_config_home_wins_over_home() {
        // Arrange
        let lookup = env(&[("XDG_CONFIG_HOME", "/home/u/.xdg"), ("HOME", "/home/u")]);

        // Act
        let path = resolve_config_path_with(None, lookup).unwrap();

        // Assert
        assert_eq!(path, PathBuf::from("/home/u/.xdg/marquee/config.toml"));
    }

    #[test]
    fn test_home_fallback_skips_blank_variables() {
        // Arrange
        let lookup = env(&[
            ("MARQUEE_CONFIG_DIR", ""),
            ("XDG_CONFIG_HOME", "  "),
            ("HOME", "/home/u"),
        ]);

        // Act
        let path = resolve_config_path_with(None, lookup).unwrap();

        // Assert
        assert_eq!(path, PathBuf::from("/home/u/.config/marquee/config.toml"));
    }

    #[test]
    fn test_no_candidate_is_an_error() {
        // Arrange & Act
        let result = resolve_config_path_with(None, env(&[]));

        // Assert
        assert!(result.is_err());
    }
}
