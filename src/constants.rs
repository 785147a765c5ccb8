//! Application-wide constants and configuration values
//!
//! This module centralizes the magic numbers used across the fetcher,
//! the orchestrator and the on-disk layout.

/// Default timeout for HTTP requests in seconds
pub const DEFAULT_HTTP_TIMEOUT_SECONDS: u64 = 5;

/// Maximum number of connections per host in the HTTP client pool
pub const HTTP_POOL_MAX_IDLE_PER_HOST: usize = 16;

/// Default directory (relative to the working directory) for archived data
pub const DEFAULT_DATA_DIR: &str = "data";

/// Default config file name looked up in the working directory
pub const DEFAULT_CONFIG_FILE_NAME: &str = "config.yml";

/// Application directory name under the platform config dir
pub const APP_DIR_NAME: &str = "keystone_archive";

/// Default log file name
pub const DEFAULT_LOG_FILE_NAME: &str = "keystone_archive.log";

/// Request budget enforced against the Battle.net API
pub mod rate_limit {
    /// Maximum number of calls admitted per window
    pub const MAX_CALLS: usize = 600;

    /// Window length in milliseconds
    pub const PERIOD_MS: u64 = 1000;
}

/// Retry bounds for the orchestrator
pub mod retry {
    /// Attempts made at fetching a keystone profile before the character is skipped
    pub const PROFILE_MAX_ATTEMPTS: u32 = 10;
}

/// File and directory names of the on-disk archive
pub mod layout {
    pub const CHARACTER_FILE: &str = "character.yml";
    pub const CURRENT_RATING_FILE: &str = "current_mythic_rating.yml";
    pub const EQUIPPED_ITEMS_FILE: &str = "equipped_items.yml";
    pub const RUNS_DIR: &str = "runs";
    pub const SEASONS_DIR: &str = "seasons";
    pub const LEADERBOARD_DIR: &str = "leaderboard";
    pub const LEADERBOARD_PAGE_FILE: &str = "data.yml";
    pub const ITEM_ICON_DIR: &str = "item";
    pub const CONNECTED_REALM_FILE: &str = "connected_realm_id";
}

/// Environment variables that override config file values
pub mod env_vars {
    pub const CLIENT_ID: &str = "KEYSTONE_CLIENT_ID";
    pub const CLIENT_SECRET: &str = "KEYSTONE_CLIENT_SECRET";
    pub const REGION: &str = "KEYSTONE_REGION";
    pub const DATA_DIR: &str = "KEYSTONE_DATA_DIR";
    pub const LOG_FILE: &str = "KEYSTONE_LOG_FILE";
    pub const HTTP_TIMEOUT: &str = "KEYSTONE_HTTP_TIMEOUT";
}
