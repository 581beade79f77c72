use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Point-in-time stats row for a clan member (PostgreSQL `member_snapshots`).
///
/// Population: one row per member per extraction run, keyed by
/// `(player_tag, snapshot_date)`. Append-only; rows are never updated or
/// deleted. Re-running the job on the same day appends a second set of rows
/// for that date.
///
/// Query patterns:
///   - "Trophy/donation history for player X"
///   - "Clan ranking on date D"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberSnapshot {
    pub player_tag: String,
    pub snapshot_date: NaiveDate,
    pub role: String,
    pub trophies: i32,
    // Absent when the player is unranked
    pub league_name: Option<String>,
    pub league_id: Option<i64>,
    pub town_hall_level: i32,
    pub donations_given: i32,
    pub donations_received: i32,
    pub clan_rank: i32,
}

impl MemberSnapshot {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        player_tag: String,
        snapshot_date: NaiveDate,
        role: String,
        trophies: i32,
        league_name: Option<String>,
        league_id: Option<i64>,
        town_hall_level: i32,
        donations_given: i32,
        donations_received: i32,
        clan_rank: i32,
    ) -> Self {
        Self {
            player_tag,
            snapshot_date,
            role,
            trophies,
            league_name,
            league_id,
            town_hall_level,
            donations_given,
            donations_received,
            clan_rank,
        }
    }
}
