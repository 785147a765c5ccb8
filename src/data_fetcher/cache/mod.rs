pub mod ledger;

pub use ledger::{LeaderboardKey, LeaderboardLedger};
