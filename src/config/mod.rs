use crate::constants::{
    DEFAULT_DATA_DIR, DEFAULT_HTTP_TIMEOUT_SECONDS, DEFAULT_LOG_FILE_NAME, env_vars,
};
use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

pub mod paths;
pub mod region;
pub mod validation;

pub use region::Region;
use validation::validate_config;

/// A tracked character, identified by realm slug and character name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterConfig {
    pub realm: String,
    pub name: String,
}

impl CharacterConfig {
    pub fn new(realm: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            realm: realm.into(),
            name: name.into(),
        }
    }
}

/// Configuration structure for the application.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Battle.net region all characters live in.
    pub region: Region,
    /// OAuth client id.
    pub client_id: String,
    /// OAuth client secret.
    pub client_secret: String,
    /// Characters to archive, processed in order.
    #[serde(default)]
    pub characters: Vec<CharacterConfig>,
    /// Root directory of the archive.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    /// Path to the log file. If not specified, logs will be written to a default location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file_path: Option<String>,
    /// HTTP timeout in seconds for API requests.
    #[serde(default = "default_http_timeout")]
    pub http_timeout_seconds: u64,
    /// Overrides the regional game-data API host.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_base_url: Option<String>,
    /// Overrides the regional OAuth token endpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oauth_url: Option<String>,
}

/// Default HTTP timeout in seconds
fn default_http_timeout() -> u64 {
    DEFAULT_HTTP_TIMEOUT_SECONDS
}

fn default_data_dir() -> String {
    DEFAULT_DATA_DIR.to_string()
}

/// On-disk formats accepted for the config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Toml,
}

impl ConfigFormat {
    /// Picks the format from the file extension; anything but `.toml` is read as YAML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => ConfigFormat::Toml,
            _ => ConfigFormat::Yaml,
        }
    }
}

impl Config {
    /// Loads configuration from `path`, or from the default location when `None`.
    /// Environment variables override config file values.
    ///
    /// # Environment Variables
    /// - `KEYSTONE_CLIENT_ID` / `KEYSTONE_CLIENT_SECRET` - Override credentials
    /// - `KEYSTONE_REGION` - Override region
    /// - `KEYSTONE_DATA_DIR` - Override archive directory
    /// - `KEYSTONE_LOG_FILE` - Override log file path
    /// - `KEYSTONE_HTTP_TIMEOUT` - Override HTTP timeout in seconds (default: 5)
    ///
    /// # Returns
    /// * `Ok(Config)` - Successfully loaded and validated configuration
    /// * `Err(AppError)` - Missing file, parse error or failed validation
    pub async fn load(path: Option<&Path>) -> Result<Self, AppError> {
        let config_path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(paths::get_config_path);

        if !config_path.exists() {
            return Err(AppError::config_error(format!(
                "No configuration file found at {}",
                config_path.display()
            )));
        }

        let mut config = Self::load_from_path(&config_path).await?;
        config.apply_env_overrides()?;
        config.validate()?;

        Ok(config)
    }

    /// Loads configuration from a file path without env overrides or validation.
    pub async fn load_from_path(path: &Path) -> Result<Self, AppError> {
        let content = fs::read_to_string(path).await?;
        Self::parse(&content, ConfigFormat::from_path(path))
    }

    /// Parses config text in the given format.
    pub fn parse(content: &str, format: ConfigFormat) -> Result<Self, AppError> {
        let config = match format {
            ConfigFormat::Yaml => serde_yaml::from_str(content)?,
            ConfigFormat::Toml => toml::from_str(content)?,
        };
        Ok(config)
    }

    /// Applies `KEYSTONE_*` environment variables on top of file values.
    pub fn apply_env_overrides(&mut self) -> Result<(), AppError> {
        if let Ok(client_id) = std::env::var(env_vars::CLIENT_ID) {
            self.client_id = client_id;
        }

        if let Ok(client_secret) = std::env::var(env_vars::CLIENT_SECRET) {
            self.client_secret = client_secret;
        }

        if let Ok(region) = std::env::var(env_vars::REGION) {
            self.region = region.parse()?;
        }

        if let Ok(data_dir) = std::env::var(env_vars::DATA_DIR) {
            self.data_dir = data_dir;
        }

        if let Ok(log_file_path) = std::env::var(env_vars::LOG_FILE) {
            self.log_file_path = Some(log_file_path);
        }

        if let Some(timeout) = std::env::var(env_vars::HTTP_TIMEOUT)
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
        {
            self.http_timeout_seconds = timeout;
        }

        Ok(())
    }

    /// Validates the configuration settings
    pub fn validate(&self) -> Result<(), AppError> {
        validate_config(self)
    }

    /// Game-data API host, honoring the override.
    pub fn api_base_url(&self) -> String {
        self.api_base_url
            .as_deref()
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| self.region.api_base_url())
    }

    /// OAuth token endpoint, honoring the override.
    pub fn oauth_url(&self) -> String {
        self.oauth_url
            .clone()
            .unwrap_or_else(|| self.region.oauth_url())
    }

    /// Archive root as a path.
    pub fn data_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir)
    }

    /// Client secret with all but the last four characters hidden.
    pub fn masked_secret(&self) -> String {
        let count = self.client_secret.chars().count();
        if count <= 4 {
            return "*".repeat(count);
        }
        let visible: String = self.client_secret.chars().skip(count - 4).collect();
        format!("{}{visible}", "*".repeat(count - 4))
    }

    /// Prints the effective configuration to stdout with the secret masked.
    pub fn display(&self, config_path: &Path) {
        println!("\nCurrent Configuration");
        println!("────────────────────────────────────");
        println!("Config Location:");
        println!("{}", config_path.display());
        println!("────────────────────────────────────");
        println!("Region:");
        println!("{} ({})", self.region, self.region.locale());
        println!("────────────────────────────────────");
        println!("Client:");
        println!("{} / {}", self.client_id, self.masked_secret());
        println!("────────────────────────────────────");
        println!("API Host:");
        println!("{}", self.api_base_url());
        println!("────────────────────────────────────");
        println!("HTTP Timeout:");
        println!("{} seconds", self.http_timeout_seconds);
        println!("────────────────────────────────────");
        println!("Data Directory:");
        println!("{}", self.data_dir);
        println!("────────────────────────────────────");
        println!("Characters:");
        for character in &self.characters {
            println!("{}/{}", character.realm, character.name);
        }
        println!("────────────────────────────────────");
        println!("Log File Location:");
        if let Some(custom_path) = &self.log_file_path {
            println!("{custom_path}");
        } else {
            println!("{}/{DEFAULT_LOG_FILE_NAME}", paths::get_log_dir_path());
            println!("(Default location)");
        }
    }
}
