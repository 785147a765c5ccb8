use crate::constants::{APP_DIR_NAME, DEFAULT_CONFIG_FILE_NAME};
use std::path::{Path, PathBuf};

/// Returns the path of the config file to use when none is given on the
/// command line.
///
/// # Notes
/// - A `config.yml` in the working directory wins
/// - Otherwise the platform-specific config directory is used (e.g. ~/.config on Linux)
/// - Falls back to current directory if config directory is unavailable
pub fn get_config_path() -> PathBuf {
    let local = Path::new(DEFAULT_CONFIG_FILE_NAME);
    if local.exists() {
        return local.to_path_buf();
    }
    get_user_config_path()
}

/// Returns the config file path inside the platform config directory.
pub fn get_user_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| Path::new(".").to_path_buf())
        .join(APP_DIR_NAME)
        .join(DEFAULT_CONFIG_FILE_NAME)
}

/// Returns the platform-specific path for the log directory.
///
/// # Notes
/// - Uses platform-specific config directory (e.g., ~/.config on Linux)
/// - Falls back to current directory if config directory is unavailable
pub fn get_log_dir_path() -> String {
    dirs::config_dir()
        .unwrap_or_else(|| Path::new(".").to_path_buf())
        .join(APP_DIR_NAME)
        .join("logs")
        .to_string_lossy()
        .to_string()
}
