//! URL building utilities for Battle.net API endpoints

use crate::config::region::locale;
use std::fmt;

/// Data slice selector required by the game-data and profile APIs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Namespace {
    Static,
    Dynamic,
    Profile,
}

impl Namespace {
    pub fn as_str(&self) -> &'static str {
        match self {
            Namespace::Static => "static",
            Namespace::Dynamic => "dynamic",
            Namespace::Profile => "profile",
        }
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Builds a request URL for the regional API.
///
/// Relative paths get `base_url` prepended; absolute hrefs returned by the
/// API are used as-is. With a namespace, the region, the namespace tag and
/// the region's locale are appended as query parameters.
///
/// # Example
/// ```
/// use keystone_archive::data_fetcher::api::{Namespace, build_api_url};
///
/// let url = build_api_url(
///     "https://eu.api.blizzard.com",
///     "eu",
///     "/data/wow/realm/kazzak",
///     Some(Namespace::Dynamic),
/// );
/// assert_eq!(
///     url,
///     "https://eu.api.blizzard.com/data/wow/realm/kazzak?region=eu&namespace=dynamic-eu&locale=en_GB"
/// );
///
/// let href = "https://eu.api.blizzard.com/data/wow/connected-realm/1305?namespace=dynamic-eu";
/// assert_eq!(build_api_url("ignored", "eu", href, None), href);
/// ```
pub fn build_api_url(
    base_url: &str,
    region: &str,
    path_or_url: &str,
    namespace: Option<Namespace>,
) -> String {
    let mut url = if path_or_url.starts_with("http") {
        path_or_url.to_string()
    } else {
        format!("{base_url}{path_or_url}")
    };

    if let Some(namespace) = namespace {
        url.push(if url.contains('?') { '&' } else { '?' });
        url.push_str(&format!(
            "region={region}&namespace={namespace}-{region}&locale={}",
            locale(region)
        ));
    }

    url
}

/// Path of a character's mythic keystone profile.
///
/// # Example
/// ```
/// use keystone_archive::data_fetcher::api::keystone_profile_path;
///
/// assert_eq!(
///     keystone_profile_path("kazzak", "thrall"),
///     "/profile/wow/character/kazzak/thrall/mythic-keystone-profile"
/// );
/// ```
pub fn keystone_profile_path(realm: &str, name: &str) -> String {
    format!("/profile/wow/character/{realm}/{name}/mythic-keystone-profile")
}

pub fn equipment_path(realm: &str, name: &str) -> String {
    format!("/profile/wow/character/{realm}/{name}/equipment")
}

pub fn item_media_path(item_id: u64) -> String {
    format!("/data/wow/media/item/{item_id}")
}

pub fn realm_path(realm: &str) -> String {
    format!("/data/wow/realm/{realm}")
}

pub fn leaderboard_index_path(connected_realm_id: u64) -> String {
    format!("/data/wow/connected-realm/{connected_realm_id}/mythic-leaderboard/index")
}

/// Path of one dungeon's leaderboard for a weekly period.
///
/// # Example
/// ```
/// use keystone_archive::data_fetcher::api::leaderboard_page_path;
///
/// assert_eq!(
///     leaderboard_page_path(1305, 402, 930),
///     "/data/wow/connected-realm/1305/mythic-leaderboard/402/period/930"
/// );
/// ```
pub fn leaderboard_page_path(connected_realm_id: u64, dungeon_id: u64, period_id: u64) -> String {
    format!(
        "/data/wow/connected-realm/{connected_realm_id}/mythic-leaderboard/{dungeon_id}/period/{period_id}"
    )
}
