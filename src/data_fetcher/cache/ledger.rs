//! Per-run record of leaderboard pages that were already downloaded.

use std::collections::HashSet;
use std::fmt;

/// Identifies one leaderboard page: a dungeon's ranking for one weekly
/// period within one connected-realm group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LeaderboardKey {
    pub connected_realm_id: u64,
    pub period_id: u64,
    pub dungeon_id: u64,
}

impl LeaderboardKey {
    pub fn new(connected_realm_id: u64, period_id: u64, dungeon_id: u64) -> Self {
        Self {
            connected_realm_id,
            period_id,
            dungeon_id,
        }
    }
}

impl fmt::Display for LeaderboardKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}",
            self.connected_realm_id, self.period_id, self.dungeon_id
        )
    }
}

/// In-memory set of leaderboard keys fetched during this process.
///
/// Entries are never removed and nothing is persisted, so a new process
/// starts from an empty ledger.
#[derive(Debug, Default)]
pub struct LeaderboardLedger {
    seen: HashSet<LeaderboardKey>,
}

impl LeaderboardLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seen(&self, key: &LeaderboardKey) -> bool {
        self.seen.contains(key)
    }

    pub fn mark(&mut self, key: LeaderboardKey) {
        self.seen.insert(key);
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mark_then_seen() {
        let mut ledger = LeaderboardLedger::new();
        let key = LeaderboardKey::new(1305, 930, 402);

        assert!(!ledger.seen(&key));
        ledger.mark(key);
        assert!(ledger.seen(&key));
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_fresh_ledger_is_empty() {
        let mut first = LeaderboardLedger::new();
        let key = LeaderboardKey::new(1305, 930, 402);
        first.mark(key);

        let fresh = LeaderboardLedger::new();
        assert!(fresh.is_empty());
        assert!(!fresh.seen(&key));
    }

    #[test]
    fn test_keys_differ_by_every_component() {
        let mut ledger = LeaderboardLedger::new();
        ledger.mark(LeaderboardKey::new(1305, 930, 402));

        assert!(!ledger.seen(&LeaderboardKey::new(1306, 930, 402)));
        assert!(!ledger.seen(&LeaderboardKey::new(1305, 931, 402)));
        assert!(!ledger.seen(&LeaderboardKey::new(1305, 930, 403)));
    }

    #[test]
    fn test_marking_twice_keeps_one_entry() {
        let mut ledger = LeaderboardLedger::new();
        ledger.mark(LeaderboardKey::new(1, 2, 3));
        ledger.mark(LeaderboardKey::new(1, 2, 3));
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_key_display() {
        let key = LeaderboardKey::new(1305, 930, 402);
        assert_eq!(key.to_string(), "1305/930/402");
    }
}
