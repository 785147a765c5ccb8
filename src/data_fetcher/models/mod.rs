pub mod common;
pub mod equipment;
pub mod leaderboard;
pub mod profile;
pub mod runs;

pub use common::{CharacterRef, Link, RealmRef};
pub use equipment::{EquipmentResponse, EquippedItem, ItemMedia, ItemRef, MediaAsset};
pub use leaderboard::{
    AffixEntry, ConnectedRealm, DungeonRef, LeaderboardIndex, LeaderboardPage, RealmResponse,
};
pub use profile::{
    CurrentPeriod, KeystoneProfile, MythicRating, PeriodRef, SeasonDetails, SeasonRef,
};
pub use runs::{Member, Run};
