//! Drives the fetch, transform and persist pipeline for every configured
//! character.

use super::auth::AccessToken;
use super::client::BattleNetClient;
use super::wow_api::{
    fetch_connected_realm, fetch_equipment, fetch_item_media, fetch_keystone_profile,
    fetch_leaderboard_index, fetch_leaderboard_page, fetch_realm, fetch_season,
};
use crate::config::{CharacterConfig, Config};
use crate::constants::retry::PROFILE_MAX_ATTEMPTS;
use crate::data_fetcher::cache::{LeaderboardKey, LeaderboardLedger};
use crate::data_fetcher::models::{
    DungeonRef, EquippedItem, KeystoneProfile, LeaderboardPage, Run, SeasonRef,
};
use crate::data_fetcher::processors::{
    filter_run_for_character, format_completed_at, normalize_best_runs, normalize_leaderboard_run,
    strip_durability, strip_ranking,
};
use crate::error::AppError;
use crate::storage::Storage;
use tracing::{debug, info, instrument, warn};

/// Counters reported at the end of a run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ArchiveSummary {
    pub characters_archived: usize,
    pub characters_skipped: usize,
    pub runs_written: usize,
    pub seasons_written: usize,
    pub leaderboard_pages_written: usize,
    pub item_icons_downloaded: usize,
}

/// Archives every configured character, in config order.
///
/// Only fatal errors (authentication failure) are returned; anything else
/// skips the affected unit of work with a warning.
pub async fn archive_characters(config: &Config) -> Result<ArchiveSummary, AppError> {
    let storage = Storage::new(config.data_path());
    info!("Writing archive to {}", storage.root().display());
    let client = BattleNetClient::from_config(config)?;
    let mut session = Session::start(client, config, storage).await?;

    for character in &config.characters {
        session.archive_character(character).await?;
    }

    let summary = session.summary();
    let tracked = session.ledger().len();
    debug!("{tracked} leaderboard pages tracked this run");
    info!(
        "Archive complete: {} characters archived, {} skipped, {} runs, {} seasons, {} leaderboard pages, {} item icons",
        summary.characters_archived,
        summary.characters_skipped,
        summary.runs_written,
        summary.seasons_written,
        summary.leaderboard_pages_written,
        summary.item_icons_downloaded
    );
    Ok(summary)
}

/// Turns a skippable failure into `None` after logging it.
fn recover<T>(context: &str, result: Result<T, AppError>) -> Result<Option<T>, AppError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.is_skippable() => {
            warn!("Skipping {context}: {e}");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// State of one archive run: the API client, the current token, the
/// leaderboard ledger and the output location.
pub struct Session {
    client: BattleNetClient,
    client_id: String,
    client_secret: String,
    token: AccessToken,
    ledger: LeaderboardLedger,
    storage: Storage,
    summary: ArchiveSummary,
}

impl Session {
    /// Authenticates once. Failing here aborts the run.
    pub async fn start(
        client: BattleNetClient,
        config: &Config,
        storage: Storage,
    ) -> Result<Self, AppError> {
        let token = client
            .authenticate(&config.client_id, &config.client_secret)
            .await?;
        info!("Authenticated against region {}", client.region());

        Ok(Self {
            client,
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            token,
            ledger: LeaderboardLedger::new(),
            storage,
            summary: ArchiveSummary::default(),
        })
    }

    pub fn summary(&self) -> ArchiveSummary {
        self.summary
    }

    pub fn ledger(&self) -> &LeaderboardLedger {
        &self.ledger
    }

    async fn reauthenticate(&mut self) -> Result<(), AppError> {
        info!("Access token expired, re-authenticating");
        self.token = self
            .client
            .authenticate(&self.client_id, &self.client_secret)
            .await?;
        Ok(())
    }

    #[instrument(skip(self, character), fields(realm = %character.realm, name = %character.name))]
    pub async fn archive_character(&mut self, character: &CharacterConfig) -> Result<(), AppError> {
        let (realm, name) = (character.realm.as_str(), character.name.as_str());

        let Some(profile) = self.fetch_profile_with_retry(realm, name).await? else {
            warn!(
                "Giving up on {realm}/{name} after {PROFILE_MAX_ATTEMPTS} attempts at the keystone profile"
            );
            self.summary.characters_skipped += 1;
            return Ok(());
        };
        let period_id = profile.current_period.period.id;

        recover("equipment", self.archive_equipment(realm, name).await)?;
        recover(
            "character summary",
            self.archive_profile_summary(realm, name, &profile).await,
        )?;

        for season in &profile.seasons {
            let context = format!("season {}", season.id);
            recover(&context, self.archive_season(realm, name, season).await)?;
        }

        let current = profile.current_period.best_runs.clone();
        let current_runs = normalize_best_runs(current.unwrap_or_default());
        self.persist_runs(realm, name, current_runs).await?;

        if let Some(connected_realm_id) = recover(
            "connected realm lookup",
            self.resolve_connected_realm_id(realm).await,
        )? {
            recover(
                "leaderboard index",
                self.archive_leaderboards(realm, name, connected_realm_id, period_id)
                    .await,
            )?;
        }

        self.summary.characters_archived += 1;
        Ok(())
    }

    /// Up to `PROFILE_MAX_ATTEMPTS` tries. A 401 re-authenticates before the
    /// next try; other failures simply retry. `None` means every try failed.
    async fn fetch_profile_with_retry(
        &mut self,
        realm: &str,
        name: &str,
    ) -> Result<Option<KeystoneProfile>, AppError> {
        for attempt in 1..=PROFILE_MAX_ATTEMPTS {
            match fetch_keystone_profile(&self.client, &self.token, realm, name).await {
                Ok(profile) => return Ok(Some(profile)),
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => {
                    warn!(
                        "Keystone profile attempt {}/{} failed: {}",
                        attempt, PROFILE_MAX_ATTEMPTS, e
                    );
                    if e.is_auth_expired() && attempt < PROFILE_MAX_ATTEMPTS {
                        self.reauthenticate().await?;
                    }
                }
            }
        }
        Ok(None)
    }

    async fn archive_equipment(&mut self, realm: &str, name: &str) -> Result<(), AppError> {
        let equipment = fetch_equipment(&self.client, &self.token, realm, name).await?;
        let Some(items) = equipment.equipped_items else {
            debug!("No equipped items for {realm}/{name}");
            return Ok(());
        };

        let items = strip_durability(items);
        self.storage
            .save_equipped_items(realm, name, &items)
            .await?;
        self.archive_item_icons(&items).await
    }

    async fn archive_item_icons(&mut self, items: &[EquippedItem]) -> Result<(), AppError> {
        for item in items {
            let item_id = item.item.id;
            if self.storage.has_item_icon(item_id).await {
                continue;
            }
            let context = format!("icon of item {item_id}");
            if recover(&context, self.download_item_icon(item_id).await)?.is_some() {
                self.summary.item_icons_downloaded += 1;
            }
        }
        Ok(())
    }

    async fn download_item_icon(&self, item_id: u64) -> Result<(), AppError> {
        let media = fetch_item_media(&self.client, &self.token, item_id).await?;
        let url = media
            .icon_url()
            .ok_or_else(|| AppError::missing_field("assets", format!("media of item {item_id}")))?;
        let bytes = self.client.get_bytes(url).await?;
        self.storage.save_item_icon(item_id, &bytes).await?;
        Ok(())
    }

    async fn archive_profile_summary(
        &self,
        realm: &str,
        name: &str,
        profile: &KeystoneProfile,
    ) -> Result<(), AppError> {
        self.storage
            .save_character(realm, name, &profile.character)
            .await?;
        if let Some(rating) = &profile.current_mythic_rating {
            self.storage
                .save_current_rating(realm, name, rating)
                .await?;
        }
        Ok(())
    }

    async fn archive_season(
        &mut self,
        realm: &str,
        name: &str,
        season_ref: &SeasonRef,
    ) -> Result<(), AppError> {
        let mut season = fetch_season(&self.client, &self.token, &season_ref.key.href).await?;
        season.best_runs = season.best_runs.map(normalize_best_runs);

        if season.is_played() {
            self.storage
                .save_season(realm, name, season_ref.id, &season)
                .await?;
            self.summary.seasons_written += 1;
        } else {
            debug!("Season {} has no rating, not storing it", season_ref.id);
        }

        match season.best_runs {
            Some(runs) => self.persist_runs(realm, name, runs).await,
            None => Ok(()),
        }
    }

    async fn persist_runs(
        &mut self,
        realm: &str,
        name: &str,
        runs: Vec<Run>,
    ) -> Result<(), AppError> {
        for run in runs {
            let run = strip_ranking(run);
            let context = format!("run {}", run.completed_timestamp);
            if recover(&context, self.storage.save_run(realm, name, &run).await)?.is_some() {
                debug!(
                    "Stored run completed at {}",
                    format_completed_at(run.completed_timestamp)
                );
                self.summary.runs_written += 1;
            }
        }
        Ok(())
    }

    /// Reads the on-disk marker, resolving and writing it on first use.
    async fn resolve_connected_realm_id(&self, realm: &str) -> Result<u64, AppError> {
        if let Some(id) = self.storage.read_connected_realm_id(realm).await? {
            return Ok(id);
        }

        let realm_info = fetch_realm(&self.client, &self.token, realm).await?;
        let href = &realm_info.connected_realm.href;
        let connected = fetch_connected_realm(&self.client, &self.token, href).await?;
        self.storage
            .save_connected_realm_id(realm, connected.id)
            .await?;
        info!("Realm {realm} belongs to connected realm {}", connected.id);
        Ok(connected.id)
    }

    async fn archive_leaderboards(
        &mut self,
        realm: &str,
        name: &str,
        connected_realm_id: u64,
        period_id: u64,
    ) -> Result<(), AppError> {
        let index = fetch_leaderboard_index(&self.client, &self.token, connected_realm_id).await?;

        for dungeon in &index.current_leaderboards {
            let key = LeaderboardKey::new(connected_realm_id, period_id, dungeon.id);
            if self.ledger.seen(&key) {
                debug!("Leaderboard {key} already fetched this run");
                continue;
            }
            let context = format!("leaderboard {key}");
            recover(
                &context,
                self.archive_leaderboard(realm, name, key, dungeon).await,
            )?;
        }
        Ok(())
    }

    async fn archive_leaderboard(
        &mut self,
        realm: &str,
        name: &str,
        key: LeaderboardKey,
        dungeon: &DungeonRef,
    ) -> Result<(), AppError> {
        let raw = fetch_leaderboard_page(
            &self.client,
            &self.token,
            key.connected_realm_id,
            key.dungeon_id,
            key.period_id,
        )
        .await?;
        self.storage.save_leaderboard_page(&key, &raw).await?;
        self.ledger.mark(key);
        self.summary.leaderboard_pages_written += 1;

        let page: LeaderboardPage = serde_json::from_value(raw)?;
        let affixes = page.affixes();
        let runs: Vec<Run> = page
            .leading_groups
            .unwrap_or_default()
            .into_iter()
            .filter_map(|run| filter_run_for_character(run, realm, name))
            .map(|run| normalize_leaderboard_run(run, dungeon, &affixes))
            .collect();

        if !runs.is_empty() {
            info!("{} leaderboard runs of {realm}/{name} in {key}", runs.len());
        }
        self.persist_runs(realm, name, runs).await
    }
}
