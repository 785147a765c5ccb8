//! On-disk layout of the archive.
//!
//! ```text
//! {data}/{realm}/{name}/character.yml
//! {data}/{realm}/{name}/current_mythic_rating.yml
//! {data}/{realm}/{name}/equipped_items.yml
//! {data}/{realm}/{name}/runs/{completed_timestamp}.yml
//! {data}/{realm}/{name}/seasons/{season_id}.yml
//! {data}/{realm}/connected_realm_id
//! {data}/leaderboard/{connected_realm_id}/{period_id}/{dungeon_id}/data.yml
//! {data}/item/{item_id}.jpg
//! ```
//!
//! Paths are a compatibility surface for tooling that reads the archive.

use crate::constants::layout;
use crate::data_fetcher::cache::LeaderboardKey;
use crate::data_fetcher::models::{EquippedItem, Run, SeasonDetails};
use crate::error::AppError;
use serde::Serialize;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, warn};

#[derive(Debug, Clone)]
pub struct Storage {
    root: PathBuf,
}

impl Storage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn realm_dir(&self, realm: &str) -> PathBuf {
        self.root.join(realm)
    }

    pub fn character_dir(&self, realm: &str, name: &str) -> PathBuf {
        self.realm_dir(realm).join(name)
    }

    pub fn character_file(&self, realm: &str, name: &str) -> PathBuf {
        self.character_dir(realm, name).join(layout::CHARACTER_FILE)
    }

    pub fn current_rating_file(&self, realm: &str, name: &str) -> PathBuf {
        self.character_dir(realm, name)
            .join(layout::CURRENT_RATING_FILE)
    }

    pub fn equipped_items_file(&self, realm: &str, name: &str) -> PathBuf {
        self.character_dir(realm, name)
            .join(layout::EQUIPPED_ITEMS_FILE)
    }

    pub fn run_file(&self, realm: &str, name: &str, completed_timestamp: u64) -> PathBuf {
        self.character_dir(realm, name)
            .join(layout::RUNS_DIR)
            .join(format!("{completed_timestamp}.yml"))
    }

    pub fn season_file(&self, realm: &str, name: &str, season_id: u64) -> PathBuf {
        self.character_dir(realm, name)
            .join(layout::SEASONS_DIR)
            .join(format!("{season_id}.yml"))
    }

    pub fn leaderboard_page_file(&self, key: &LeaderboardKey) -> PathBuf {
        self.root
            .join(layout::LEADERBOARD_DIR)
            .join(key.connected_realm_id.to_string())
            .join(key.period_id.to_string())
            .join(key.dungeon_id.to_string())
            .join(layout::LEADERBOARD_PAGE_FILE)
    }

    pub fn item_icon_file(&self, item_id: u64) -> PathBuf {
        self.root
            .join(layout::ITEM_ICON_DIR)
            .join(format!("{item_id}.jpg"))
    }

    pub fn connected_realm_file(&self, realm: &str) -> PathBuf {
        self.realm_dir(realm).join(layout::CONNECTED_REALM_FILE)
    }

    pub async fn save_character(
        &self,
        realm: &str,
        name: &str,
        character: &Value,
    ) -> Result<PathBuf, AppError> {
        let path = self.character_file(realm, name);
        write_yaml(&path, character).await?;
        Ok(path)
    }

    pub async fn save_current_rating(
        &self,
        realm: &str,
        name: &str,
        rating: &Value,
    ) -> Result<PathBuf, AppError> {
        let path = self.current_rating_file(realm, name);
        write_yaml(&path, rating).await?;
        Ok(path)
    }

    pub async fn save_equipped_items(
        &self,
        realm: &str,
        name: &str,
        items: &[EquippedItem],
    ) -> Result<PathBuf, AppError> {
        let path = self.equipped_items_file(realm, name);
        write_yaml(&path, items).await?;
        Ok(path)
    }

    /// Writes `runs/{completed_timestamp}.yml`; the same run always lands on
    /// the same path.
    pub async fn save_run(&self, realm: &str, name: &str, run: &Run) -> Result<PathBuf, AppError> {
        let path = self.run_file(realm, name, run.completed_timestamp);
        write_yaml(&path, run).await?;
        Ok(path)
    }

    pub async fn save_season(
        &self,
        realm: &str,
        name: &str,
        season_id: u64,
        season: &SeasonDetails,
    ) -> Result<PathBuf, AppError> {
        let path = self.season_file(realm, name, season_id);
        write_yaml(&path, season).await?;
        Ok(path)
    }

    pub async fn save_leaderboard_page(
        &self,
        key: &LeaderboardKey,
        page: &Value,
    ) -> Result<PathBuf, AppError> {
        let path = self.leaderboard_page_file(key);
        write_yaml(&path, page).await?;
        Ok(path)
    }

    pub async fn has_item_icon(&self, item_id: u64) -> bool {
        fs::try_exists(self.item_icon_file(item_id))
            .await
            .unwrap_or(false)
    }

    pub async fn save_item_icon(&self, item_id: u64, bytes: &[u8]) -> Result<PathBuf, AppError> {
        let path = self.item_icon_file(item_id);
        write_bytes(&path, bytes).await?;
        Ok(path)
    }

    /// Cached connected-realm id of `realm`. An unreadable marker is treated
    /// as missing so it gets resolved and rewritten.
    pub async fn read_connected_realm_id(&self, realm: &str) -> Result<Option<u64>, AppError> {
        let path = self.connected_realm_file(realm);
        if !fs::try_exists(&path).await? {
            return Ok(None);
        }

        let content = fs::read_to_string(&path).await?;
        match content.trim().parse::<u64>() {
            Ok(id) => Ok(Some(id)),
            Err(e) => {
                warn!(
                    "Ignoring unreadable connected realm id in {}: {}",
                    path.display(),
                    e
                );
                Ok(None)
            }
        }
    }

    pub async fn save_connected_realm_id(&self, realm: &str, id: u64) -> Result<PathBuf, AppError> {
        let path = self.connected_realm_file(realm);
        write_bytes(&path, id.to_string().as_bytes()).await?;
        Ok(path)
    }
}

async fn ensure_parent(path: &Path) -> Result<(), AppError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }
    Ok(())
}

async fn write_yaml<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), AppError> {
    let content = serde_yaml::to_string(value)?;
    write_bytes(path, content.as_bytes()).await
}

async fn write_bytes(path: &Path, bytes: &[u8]) -> Result<(), AppError> {
    ensure_parent(path).await?;
    fs::write(path, bytes).await?;
    debug!("Wrote {} ({} bytes)", path.display(), bytes.len());
    Ok(())
}
