use super::common::Link;
use super::runs::Run;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Response of `/profile/wow/character/{realm}/{name}/mythic-keystone-profile`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeystoneProfile {
    /// Character summary, persisted verbatim.
    pub character: Value,
    pub current_period: CurrentPeriod,
    #[serde(default)]
    pub current_mythic_rating: Option<Value>,
    #[serde(default)]
    pub seasons: Vec<SeasonRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentPeriod {
    pub period: PeriodRef,
    #[serde(default)]
    pub best_runs: Option<Vec<Run>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodRef {
    pub id: u64,
}

/// A season the character has data for; `key.href` points at its details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonRef {
    pub id: u64,
    pub key: Link,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MythicRating {
    #[serde(default)]
    pub rating: f64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Per-season details of a character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mythic_rating: Option<MythicRating>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub best_runs: Option<Vec<Run>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SeasonDetails {
    /// Season rating; a missing rating counts as zero.
    pub fn rating(&self) -> f64 {
        self.mythic_rating.as_ref().map_or(0.0, |r| r.rating)
    }

    /// Only seasons with a positive rating are worth persisting.
    pub fn is_played(&self) -> bool {
        self.rating() > 0.0
    }
}
