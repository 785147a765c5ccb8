use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Response of `/profile/wow/character/{realm}/{name}/equipment`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EquipmentResponse {
    #[serde(default)]
    pub equipped_items: Option<Vec<EquippedItem>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquippedItem {
    pub item: ItemRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub durability: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemRef {
    pub id: u64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Response of `/data/wow/media/item/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemMedia {
    #[serde(default)]
    pub assets: Vec<MediaAsset>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaAsset {
    #[serde(default)]
    pub key: Option<String>,
    pub value: String,
}

impl ItemMedia {
    /// URL of the icon asset, falling back to the first asset listed.
    pub fn icon_url(&self) -> Option<&str> {
        self.assets
            .iter()
            .find(|asset| asset.key.as_deref() == Some("icon"))
            .or_else(|| self.assets.first())
            .map(|asset| asset.value.as_str())
    }
}
