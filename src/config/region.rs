//! Battle.net regions and their derived hosts and locales

use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A Battle.net API region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    Us,
    Eu,
    Kr,
    Tw,
}

impl Region {
    pub const ALL: [Region; 4] = [Region::Us, Region::Eu, Region::Kr, Region::Tw];

    /// Lowercase region code as used in hosts and query parameters.
    pub fn as_str(&self) -> &'static str {
        match self {
            Region::Us => "us",
            Region::Eu => "eu",
            Region::Kr => "kr",
            Region::Tw => "tw",
        }
    }

    /// Locale sent with namespaced requests.
    pub fn locale(&self) -> &'static str {
        locale(self.as_str())
    }

    /// Default game-data API host, e.g. `https://eu.api.blizzard.com`.
    pub fn api_base_url(&self) -> String {
        format!("https://{}.api.blizzard.com", self.as_str())
    }

    /// Default OAuth token endpoint, e.g. `https://eu.battle.net/oauth/token`.
    pub fn oauth_url(&self) -> String {
        format!("https://{}.battle.net/oauth/token", self.as_str())
    }
}

/// Maps a region code to the locale the API expects. Unknown regions map to
/// an empty string.
///
/// # Example
/// ```
/// use keystone_archive::config::region::locale;
///
/// assert_eq!(locale("eu"), "en_GB");
/// assert_eq!(locale("cn"), "");
/// ```
pub fn locale(region: &str) -> &'static str {
    match region {
        "us" => "en_US",
        "eu" => "en_GB",
        "kr" => "ko_KR",
        "tw" => "zh_TW",
        _ => "",
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Region {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "us" => Ok(Region::Us),
            "eu" => Ok(Region::Eu),
            "kr" => Ok(Region::Kr),
            "tw" => Ok(Region::Tw),
            other => Err(AppError::config_error(format!(
                "Unsupported region '{other}', expected one of us, eu, kr, tw"
            ))),
        }
    }
}
