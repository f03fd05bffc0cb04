//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Global application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory overlay and template assets are resolved under.
    pub assets_dir: PathBuf,

    /// Directory finished captures are written to.
    pub captures_dir: PathBuf,

    /// Default export settings.
    pub export: ExportDefaults,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Default export parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportDefaults {
    /// Default output format name ("jpeg" or "png").
    pub format: String,

    /// JPEG quality in [1, 100].
    pub jpeg_quality: u8,

    /// Named preset passed through to the upload target.
    pub upload_preset: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "snapbooth=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,

    /// Optional log file path.
    pub file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        let data = snapbooth_data_dir();
        Self {
            assets_dir: data.join("assets"),
            captures_dir: data.join("captures"),
            export: ExportDefaults::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for ExportDefaults {
    fn default() -> Self {
        Self {
            format: "jpeg".to_string(),
            jpeg_quality: 90,
            upload_preset: "default".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}

impl AppConfig {
    /// Load config from the standard location, falling back to defaults.
    ///
    /// A missing file is normal on first run; an unreadable or
    /// unparsable one is reported and ignored.
    pub fn load() -> Self {
        let path = config_file_path();
        match std::fs::read(&path) {
            Ok(bytes) => match serde_json::from_slice(&bytes) {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "Ignoring unparsable config"
                    );
                    Self::default()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Self::default(),
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "Ignoring unreadable config"
                );
                Self::default()
            }
        }
    }

    /// Save config to the standard location.
    pub fn save(&self) -> Result<(), std::io::Error> {
        let path = config_file_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_vec_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(path, json)
    }
}

/// Standard config file location.
pub fn config_file_path() -> PathBuf {
    xdg_base("XDG_CONFIG_HOME", &[".config"])
        .join("snapbooth")
        .join("config.json")
}

fn snapbooth_data_dir() -> PathBuf {
    xdg_base("XDG_DATA_HOME", &[".local", "share"]).join("snapbooth")
}

/// Resolve an XDG base directory, falling back to `$HOME/<segments>`.
fn xdg_base(var: &str, fallback: &[&str]) -> PathBuf {
    if let Ok(dir) = std::env::var(var) {
        return PathBuf::from(dir);
    }
    let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
    fallback
        .iter()
        .fold(PathBuf::from(home), |path, segment| path.join(segment))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_round_trip_through_json() {
        let config = AppConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: AppConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.assets_dir, config.assets_dir);
        assert_eq!(back.export.jpeg_quality, config.export.jpeg_quality);
        assert_eq!(back.logging.level, config.logging.level);
    }

    #[test]
    fn test_default_dirs_are_distinct() {
        let config = AppConfig::default();
        assert_ne!(config.assets_dir, config.captures_dir);
        assert!(config.assets_dir.ends_with("snapbooth/assets"));
    }
}
