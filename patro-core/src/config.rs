//! Global patro configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_DATA_DIR, DEFAULT_ENDPOINT, DEFAULT_REQUEST_TIMEOUT_SECS};
use crate::error::{PatroError, PatroResult};

fn default_data_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_DIR)
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

/// Global configuration at ~/.config/patro/config.toml
///
/// Every key can also be set through a `PATRO_` environment variable
/// (`PATRO_DATA_DIR`, `PATRO_ENDPOINT`, `PATRO_REQUEST_TIMEOUT_SECS`),
/// which wins over the file.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct PatroConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for PatroConfig {
    fn default() -> Self {
        PatroConfig {
            data_dir: default_data_dir(),
            endpoint: default_endpoint(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl PatroConfig {
    pub fn config_path() -> PatroResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| PatroError::Config("Could not determine config directory".into()))?
            .join("patro");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the user's config, writing a commented template on first run.
    pub fn load() -> PatroResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    /// Load from an explicit file (which may be missing) plus the environment.
    pub fn load_from(path: &Path) -> PatroResult<Self> {
        Config::builder()
            .add_source(File::from(path.to_path_buf()).required(false))
            .add_source(Environment::with_prefix("PATRO").try_parsing(true))
            .build()
            .map_err(|e| PatroError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| PatroError::Config(e.to_string()))
    }

    /// Data root with `~` expanded.
    pub fn data_path(&self) -> PathBuf {
        let full_path_str = shellexpand::tilde(&self.data_dir.to_string_lossy()).into_owned();

        PathBuf::from(full_path_str)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> PatroResult<()> {
        let contents = format!(
            "\
# patro configuration

# Where scraped calendar JSON is written and served from:
# data_dir = \"{}\"

# Calendar page the scraper posts to:
# endpoint = \"{}\"

# Seconds to wait for each month's page:
# request_timeout_secs = {}
",
            DEFAULT_DATA_DIR, DEFAULT_ENDPOINT, DEFAULT_REQUEST_TIMEOUT_SECS
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                PatroError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| PatroError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = PatroConfig::load_from(&dir.path().join("absent.toml")).unwrap();

        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.request_timeout(), Duration::from_secs(15));
    }

    #[test]
    fn commented_template_parses_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        PatroConfig::create_default_config(&path).unwrap();

        let config = PatroConfig::load_from(&path).unwrap();
        assert_eq!(config.request_timeout_secs, DEFAULT_REQUEST_TIMEOUT_SECS);
    }

    #[test]
    fn file_values_override_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "endpoint = \"http://localhost:9999/cal.php\"\nrequest_timeout_secs = 30\n",
        )
        .unwrap();

        let config = PatroConfig::load_from(&path).unwrap();
        assert_eq!(config.endpoint, "http://localhost:9999/cal.php");
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn data_path_expands_tilde() {
        let config = PatroConfig {
            data_dir: PathBuf::from("~/patro-data"),
            ..PatroConfig::default()
        };

        assert!(config.data_path().ends_with("patro-data"));
    }
}
