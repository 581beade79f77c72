//! Loader tests against a live PostgreSQL instance.
//!
//! These pin the write semantics of the two load operations: the member
//! upsert is idempotent on identity, the snapshot append deliberately is
//! not. They need the same CLANTRACK_* environment as the binary and are
//! ignored by default; run with `cargo test -- --ignored`.

use chrono::NaiveDate;
use clantrack::db::models::{Member, MemberSnapshot};
use clantrack::{PostgresClient, Settings};

async fn connect() -> PostgresClient {
    let settings = Settings::new().expect("CLANTRACK_* environment variables must be set");
    let db = PostgresClient::new(&settings.postgres)
        .await
        .expect("database must be reachable");
    db.ensure_schema().await.expect("schema must apply");
    db
}

fn unique_tag(prefix: &str) -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    format!("#{}{}", prefix, nanos)
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn snapshot(tag: &str, snapshot_date: NaiveDate) -> MemberSnapshot {
    MemberSnapshot::new(
        tag.to_string(),
        snapshot_date,
        "member".to_string(),
        2500,
        None,
        None,
        13,
        100,
        50,
        5,
    )
}

#[tokio::test]
#[ignore]
async fn upsert_preserves_join_date_and_is_active() {
    let db = connect().await;
    let tag = unique_tag("UPSERT");

    let first_seen = date(2026, 8, 1);
    let inserted = db
        .upsert_members(&[Member::new(tag.clone(), "Ash".to_string(), first_seen)])
        .await
        .unwrap();
    assert_eq!(inserted, 1);

    // Departure detection (outside this job) may deactivate the member
    let client = db.pool.get().await.unwrap();
    client
        .execute(
            "UPDATE members SET is_active = FALSE WHERE player_tag = $1",
            &[&tag],
        )
        .await
        .unwrap();

    // Re-observing the tag later, with a renamed player, must not touch
    // join_date or is_active
    let inserted = db
        .upsert_members(&[Member::new(
            tag.clone(),
            "Ash the Renamed".to_string(),
            date(2026, 8, 29),
        )])
        .await
        .unwrap();
    assert_eq!(inserted, 0);

    let row = client
        .query_one(
            "SELECT player_name, join_date, is_active FROM members WHERE player_tag = $1",
            &[&tag],
        )
        .await
        .unwrap();
    assert_eq!(row.get::<_, String>("player_name"), "Ash");
    assert_eq!(row.get::<_, NaiveDate>("join_date"), first_seen);
    assert!(!row.get::<_, bool>("is_active"));

    client
        .execute("DELETE FROM members WHERE player_tag = $1", &[&tag])
        .await
        .unwrap();
}

#[tokio::test]
#[ignore]
async fn append_snapshots_does_not_deduplicate() {
    let db = connect().await;
    let tag = unique_tag("APPEND");
    let day = date(2026, 8, 29);

    let rows = vec![snapshot(&tag, day)];
    assert_eq!(db.append_snapshots(&rows).await.unwrap(), 1);
    // Same-day re-run: a second identical set of rows is appended
    assert_eq!(db.append_snapshots(&rows).await.unwrap(), 1);

    let client = db.pool.get().await.unwrap();
    let count: i64 = client
        .query_one(
            "SELECT COUNT(*) FROM member_snapshots WHERE player_tag = $1 AND snapshot_date = $2",
            &[&tag, &day],
        )
        .await
        .unwrap()
        .get(0);
    assert_eq!(count, 2);

    client
        .execute("DELETE FROM member_snapshots WHERE player_tag = $1", &[&tag])
        .await
        .unwrap();
}
