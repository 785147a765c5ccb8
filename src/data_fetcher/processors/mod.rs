pub mod equipment;
pub mod runs;

pub use equipment::strip_durability;
pub use runs::{
    attach_dungeon_and_affixes, filter_run_for_character, format_completed_at,
    normalize_best_runs, normalize_leaderboard_run, promote_profile_to_character, sort_members,
    sort_runs, strip_ranking,
};
