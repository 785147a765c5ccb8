use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Hypermedia link as returned in `key` / `connected_realm` fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub href: String,
}

/// Realm reference embedded in character identities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RealmRef {
    pub id: u64,
    #[serde(default)]
    pub slug: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Character identity as it appears in run rosters, either under
/// `character` (profile API) or `profile` (leaderboard API).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterRef {
    pub id: u64,
    pub name: String,
    pub realm: RealmRef,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CharacterRef {
    /// Whether this identity is the tracked character `(realm, name)`.
    /// Realm slugs and names are compared case-insensitively since the
    /// API capitalizes names while request paths use lowercase.
    pub fn is(&self, realm: &str, name: &str) -> bool {
        self.realm.slug.eq_ignore_ascii_case(realm)
            && self.name.to_lowercase() == name.to_lowercase()
    }

    /// Sort key used for deterministic member ordering.
    pub fn sort_key(&self) -> (u64, u64) {
        (self.realm.id, self.id)
    }
}
