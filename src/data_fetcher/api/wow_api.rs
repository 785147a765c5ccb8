//! Typed wrappers for the Battle.net endpoints the archive reads.

use super::auth::AccessToken;
use super::client::BattleNetClient;
use super::urls::{
    Namespace, equipment_path, item_media_path, keystone_profile_path, leaderboard_index_path,
    leaderboard_page_path, realm_path,
};
use crate::data_fetcher::models::{
    ConnectedRealm, EquipmentResponse, ItemMedia, KeystoneProfile, LeaderboardIndex, RealmResponse,
    SeasonDetails,
};
use crate::error::AppError;
use serde_json::Value;

// Profile endpoints expect lowercase realm slugs and character names.

pub async fn fetch_keystone_profile(
    client: &BattleNetClient,
    token: &AccessToken,
    realm: &str,
    name: &str,
) -> Result<KeystoneProfile, AppError> {
    let path = keystone_profile_path(&realm.to_lowercase(), &name.to_lowercase());
    client
        .get_json(&path, token, Some(Namespace::Profile))
        .await
}

pub async fn fetch_equipment(
    client: &BattleNetClient,
    token: &AccessToken,
    realm: &str,
    name: &str,
) -> Result<EquipmentResponse, AppError> {
    let path = equipment_path(&realm.to_lowercase(), &name.to_lowercase());
    client
        .get_json(&path, token, Some(Namespace::Profile))
        .await
}

pub async fn fetch_item_media(
    client: &BattleNetClient,
    token: &AccessToken,
    item_id: u64,
) -> Result<ItemMedia, AppError> {
    client
        .get_json(&item_media_path(item_id), token, Some(Namespace::Static))
        .await
}

/// Season hrefs already carry their namespace.
pub async fn fetch_season(
    client: &BattleNetClient,
    token: &AccessToken,
    href: &str,
) -> Result<SeasonDetails, AppError> {
    client.get_json(href, token, None).await
}

pub async fn fetch_realm(
    client: &BattleNetClient,
    token: &AccessToken,
    realm: &str,
) -> Result<RealmResponse, AppError> {
    let path = realm_path(&realm.to_lowercase());
    client
        .get_json(&path, token, Some(Namespace::Dynamic))
        .await
}

pub async fn fetch_connected_realm(
    client: &BattleNetClient,
    token: &AccessToken,
    href: &str,
) -> Result<ConnectedRealm, AppError> {
    client.get_json(href, token, None).await
}

pub async fn fetch_leaderboard_index(
    client: &BattleNetClient,
    token: &AccessToken,
    connected_realm_id: u64,
) -> Result<LeaderboardIndex, AppError> {
    client
        .get_json(
            &leaderboard_index_path(connected_realm_id),
            token,
            Some(Namespace::Dynamic),
        )
        .await
}

/// The page is returned untyped so it can be archived byte-for-byte.
pub async fn fetch_leaderboard_page(
    client: &BattleNetClient,
    token: &AccessToken,
    connected_realm_id: u64,
    dungeon_id: u64,
    period_id: u64,
) -> Result<Value, AppError> {
    client
        .get_json(
            &leaderboard_page_path(connected_realm_id, dungeon_id, period_id),
            token,
            Some(Namespace::Dynamic),
        )
        .await
}
