use super::common::Link;
use super::runs::Run;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Response of `/data/wow/connected-realm/{id}/mythic-leaderboard/index`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardIndex {
    #[serde(default)]
    pub current_leaderboards: Vec<DungeonRef>,
}

/// Dungeon entry of the leaderboard index; denormalized onto stored runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DungeonRef {
    pub id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Leaderboard of one dungeon for one period.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardPage {
    #[serde(default)]
    pub leading_groups: Option<Vec<Run>>,
    #[serde(default)]
    pub keystone_affixes: Vec<AffixEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AffixEntry {
    pub keystone_affix: Value,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl LeaderboardPage {
    /// The affixes active for the period, unwrapped from their entries.
    pub fn affixes(&self) -> Vec<Value> {
        self.keystone_affixes
            .iter()
            .map(|entry| entry.keystone_affix.clone())
            .collect()
    }
}

/// Response of `/data/wow/realm/{realm}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RealmResponse {
    pub connected_realm: Link,
}

/// Response of a connected realm href.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectedRealm {
    pub id: u64,
}
