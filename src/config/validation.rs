use super::{CharacterConfig, Config};
use crate::error::AppError;
use std::path::Path;

/// Validates the configuration settings
///
/// # Validation Rules
/// - Client credentials cannot be empty
/// - At least one character must be configured
/// - Realm and name must be usable as single path components
/// - HTTP timeout must be positive
/// - URL overrides must carry an http(s) scheme
/// - If log file path is provided, it cannot be empty and its parent must be creatable
pub fn validate_config(config: &Config) -> Result<(), AppError> {
    if config.client_id.trim().is_empty() {
        return Err(AppError::config_error("client_id cannot be empty"));
    }
    if config.client_secret.trim().is_empty() {
        return Err(AppError::config_error("client_secret cannot be empty"));
    }

    if config.characters.is_empty() {
        return Err(AppError::config_error(
            "At least one character must be configured",
        ));
    }
    for character in &config.characters {
        validate_character(character)?;
    }

    if config.http_timeout_seconds == 0 {
        return Err(AppError::config_error(
            "http_timeout_seconds must be greater than zero",
        ));
    }

    if config.data_dir.trim().is_empty() {
        return Err(AppError::config_error("data_dir cannot be empty"));
    }

    for (key, url) in [
        ("api_base_url", &config.api_base_url),
        ("oauth_url", &config.oauth_url),
    ] {
        if let Some(url) = url
            && !url.starts_with("http://")
            && !url.starts_with("https://")
        {
            return Err(AppError::config_error(format!(
                "{key} must start with http:// or https://"
            )));
        }
    }

    if let Some(log_path) = &config.log_file_path {
        if log_path.is_empty() {
            return Err(AppError::config_error("Log file path cannot be empty"));
        }

        if let Some(parent) = Path::new(log_path).parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            let dir = parent.display();
            std::fs::create_dir_all(parent).map_err(|e| {
                AppError::config_error(format!("Cannot create log directory '{dir}': {e}"))
            })?;
        }
    }

    Ok(())
}

fn validate_character(character: &CharacterConfig) -> Result<(), AppError> {
    for (field, value) in [("realm", &character.realm), ("name", &character.name)] {
        if value.trim().is_empty() {
            return Err(AppError::config_error(format!(
                "Character {field} cannot be empty"
            )));
        }
        if value.contains('/') || value.contains('\\') || value == "." || value == ".." {
            return Err(AppError::config_error(format!(
                "Character {field} '{value}' is not a valid path component"
            )));
        }
    }
    Ok(())
}
