use super::common::CharacterRef;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single roster entry of a keystone run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub character: Option<CharacterRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<CharacterRef>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Member {
    /// The member's identity, wherever the API put it.
    pub fn identity(&self) -> Option<&CharacterRef> {
        self.character.as_ref().or(self.profile.as_ref())
    }

    /// Members without an identity sort first.
    pub fn sort_key(&self) -> (u64, u64) {
        self.identity()
            .map(CharacterRef::sort_key)
            .unwrap_or_default()
    }

    pub fn is(&self, realm: &str, name: &str) -> bool {
        self.identity()
            .is_some_and(|identity| identity.is(realm, name))
    }
}

/// A completed mythic keystone run. Fields the archive does not inspect are
/// carried through `extra` so the persisted file keeps the full payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Run {
    pub completed_timestamp: u64,
    #[serde(default)]
    pub members: Vec<Member>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ranking: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dungeon: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keystone_affixes: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Run {
    pub fn has_member(&self, realm: &str, name: &str) -> bool {
        self.members.iter().any(|member| member.is(realm, name))
    }
}
