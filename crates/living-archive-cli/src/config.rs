//! Configuration file loading for the CLI
//!
//! This module handles finding and loading TOML configuration files
//! from various locations (explicit path, local directory, system directory).

use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use living_archive::{ArchiveError, config::AppConfig};

/// Configuration-related errors for CLI
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML configuration: {0}")]
    Parse(String),

    #[error("Missing configuration file: {0}")]
    MissingFile(PathBuf),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<ConfigError> for ArchiveError {
    fn from(err: ConfigError) -> Self {
        ArchiveError::Config(err.to_string())
    }
}

/// Find and load configuration from various locations
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Local project directory (living-archive/config.toml)
/// 3. Platform-specific config directory
/// 4. Default config if none found
///
/// # Errors
///
/// Returns error if:
/// - Explicit path is provided but file doesn't exist
/// - Config file exists but cannot be parsed or names an invalid color
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, ArchiveError> {
    if let Some(path) = explicit_path {
        let path = path.as_ref();
        info!(path = path.display().to_string(); "Loading configuration from explicit path");
        return load_config_file(path);
    }

    let local_config = Path::new("living-archive/config.toml");
    if local_config.exists() {
        info!(path = local_config.display().to_string(); "Loading configuration from local path");
        return load_config_file(local_config);
    }

    if let Some(proj_dirs) = ProjectDirs::from("com", "living-archive", "living-archive") {
        let system_config = proj_dirs.config_dir().join("config.toml");

        if system_config.exists() {
            info!(path = system_config.display().to_string(); "Loading configuration from system path");
            return load_config_file(system_config);
        }

        debug!(path = system_config.display().to_string(); "System configuration file not found");
    } else {
        debug!("Could not determine platform-specific config directory");
    }

    debug!("No configuration file found, using default configuration");
    Ok(AppConfig::default())
}

fn load_config_file(path: impl AsRef<Path>) -> Result<AppConfig, ArchiveError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ConfigError::MissingFile(path.to_path_buf()).into());
    }

    let content = fs::read_to_string(path)?;
    let config: AppConfig =
        toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;
    validate(&config)?;

    Ok(config)
}

/// Checks every configured color up front, so a bad value is reported
/// before any work is done.
fn validate(config: &AppConfig) -> Result<(), ConfigError> {
    let style = config.style();
    for color in [
        style.background_color(),
        style.line_color(),
        style.text_color(),
        style.muted_color(),
        style.accent_color(),
    ] {
        color.map_err(ConfigError::Validation)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn test_explicit_path_is_loaded() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[lineage]\ncolumn_width = 120.0").unwrap();

        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.lineage().column_width(), 120.0);
    }

    #[test]
    fn test_missing_explicit_path() {
        let err = load_config(Some("/nonexistent/living-archive.toml")).unwrap_err();
        assert!(matches!(err, ArchiveError::Config(ref msg) if msg.contains("Missing")));
    }

    #[test]
    fn test_invalid_toml() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[lineage\ncolumn_width = ").unwrap();

        let err = load_config(Some(file.path())).unwrap_err();
        assert!(matches!(err, ArchiveError::Config(ref msg) if msg.contains("parse")));
    }

    #[test]
    fn test_invalid_color_is_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[style]\naccent_color = \"not-a-color\"").unwrap();

        let err = load_config(Some(file.path())).unwrap_err();
        assert!(matches!(err, ArchiveError::Config(ref msg) if msg.contains("Validation")));
    }
}
