//! Reshaping of keystone runs before they are written to disk.
//!
//! Every function takes its input by value and returns a new value, so a
//! parsed response can be fanned out into several records without one
//! transform leaking into another.

use crate::data_fetcher::models::{DungeonRef, Member, Run};
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

/// Removes the volatile `ranking` field from a run.
pub fn strip_ranking(run: Run) -> Run {
    Run {
        ranking: None,
        ..run
    }
}

/// Stable sort by `completed_timestamp`, ascending.
///
/// # Examples
///
/// ```
/// use keystone_archive::data_fetcher::models::Run;
/// use keystone_archive::data_fetcher::processors::sort_runs;
///
/// let runs: Vec<Run> = serde_json::from_str(
///     r#"[{"completed_timestamp": 20}, {"completed_timestamp": 10}]"#,
/// ).unwrap();
/// let sorted = sort_runs(runs);
/// assert_eq!(sorted[0].completed_timestamp, 10);
/// ```
pub fn sort_runs(mut runs: Vec<Run>) -> Vec<Run> {
    runs.sort_by_key(|run| run.completed_timestamp);
    runs
}

/// Stable sort by `(realm id, character id)`, ascending.
pub fn sort_members(mut members: Vec<Member>) -> Vec<Member> {
    members.sort_by_key(Member::sort_key);
    members
}

/// Leaderboard rosters name the identity `profile`; profile rosters call it
/// `character`. Stored runs always use `character`.
pub fn promote_profile_to_character(member: Member) -> Member {
    match member.profile {
        Some(profile) => Member {
            character: Some(profile),
            profile: None,
            ..member
        },
        None => member,
    }
}

/// Returns the run untouched when the tracked character is in its roster,
/// `None` otherwise.
pub fn filter_run_for_character(run: Run, realm: &str, name: &str) -> Option<Run> {
    run.has_member(realm, name).then_some(run)
}

/// Copies dungeon metadata and the period's affixes onto the run so the
/// stored file is self-contained.
pub fn attach_dungeon_and_affixes(run: Run, dungeon: &DungeonRef, affixes: &[Value]) -> Run {
    Run {
        dungeon: Some(dungeon_value(dungeon)),
        keystone_affixes: Some(Value::Array(affixes.to_vec())),
        ..run
    }
}

/// Full reshaping of a `leading_groups` entry.
pub fn normalize_leaderboard_run(run: Run, dungeon: &DungeonRef, affixes: &[Value]) -> Run {
    let members = run
        .members
        .into_iter()
        .map(promote_profile_to_character)
        .collect();
    let run = Run {
        members: sort_members(members),
        ..run
    };
    attach_dungeon_and_affixes(run, dungeon, affixes)
}

/// Orders `best_runs` and the roster of each run.
pub fn normalize_best_runs(runs: Vec<Run>) -> Vec<Run> {
    sort_runs(runs)
        .into_iter()
        .map(|run| Run {
            members: sort_members(run.members),
            ..run
        })
        .collect()
}

/// Human readable completion time for log output. Timestamps are epoch
/// milliseconds.
pub fn format_completed_at(completed_timestamp: u64) -> String {
    i64::try_from(completed_timestamp)
        .ok()
        .and_then(DateTime::<Utc>::from_timestamp_millis)
        .map(|at| at.format("%Y-%m-%d %H:%M UTC").to_string())
        .unwrap_or_else(|| completed_timestamp.to_string())
}

fn dungeon_value(dungeon: &DungeonRef) -> Value {
    let mut map: Map<String, Value> = dungeon.extra.clone();
    map.insert("id".to_string(), Value::from(dungeon.id));
    if let Some(name) = &dungeon.name {
        map.insert("name".to_string(), Value::from(name.clone()));
    }
    Value::Object(map)
}
