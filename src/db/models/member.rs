use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Current-state roster row for a clan member (PostgreSQL `members`).
///
/// One row per `player_tag`. Created on first sighting and never deleted
/// by the extraction job; `join_date` and `is_active` are write-once here
/// (`is_active` is flipped by departure detection, outside this job).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub player_tag: String,
    pub player_name: String,
    pub join_date: NaiveDate,
    pub is_active: bool,
}

impl Member {
    pub fn new(player_tag: String, player_name: String, join_date: NaiveDate) -> Self {
        Self {
            player_tag,
            player_name,
            join_date,
            is_active: true,
        }
    }
}
