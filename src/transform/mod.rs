//! Pure mapping from raw API member records to database row shapes.
//!
//! No I/O here. Each raw member produces exactly one roster row and one
//! snapshot row; both collections preserve the input order (the API's
//! current clan ranking).

use chrono::NaiveDate;

use crate::api::RawMember;
use crate::db::models::{Member, MemberSnapshot};

/// Roster row for the `members` table. `join_date` is stamped with the run
/// date; the upsert keeps the original value for already-known tags, so it
/// only sticks on first sighting. `is_active` starts true and is managed by
/// departure detection outside this job.
pub fn member_row(raw: &RawMember, today: NaiveDate) -> Member {
    Member::new(raw.tag.clone(), raw.name.clone(), today)
}

/// Snapshot row for the `member_snapshots` table. Stats are passed through
/// unchanged; an unranked player (no league object) maps to null league
/// columns.
pub fn snapshot_row(raw: &RawMember, snapshot_date: NaiveDate) -> MemberSnapshot {
    MemberSnapshot::new(
        raw.tag.clone(),
        snapshot_date,
        raw.role.clone(),
        raw.trophies,
        raw.league.as_ref().map(|l| l.name.clone()),
        raw.league.as_ref().map(|l| l.id),
        raw.town_hall_level,
        raw.donations,
        raw.donations_received,
        raw.clan_rank,
    )
}

/// Map a whole roster fetch into both row collections in one pass.
pub fn transform_members(
    raw: &[RawMember],
    snapshot_date: NaiveDate,
) -> (Vec<Member>, Vec<MemberSnapshot>) {
    let mut members = Vec::with_capacity(raw.len());
    let mut snapshots = Vec::with_capacity(raw.len());

    for record in raw {
        members.push(member_row(record, snapshot_date));
        snapshots.push(snapshot_row(record, snapshot_date));
    }

    (members, snapshots)
}
