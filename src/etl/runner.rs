use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use log::{error, info};

use crate::api::RosterClient;
use crate::config::Settings;
use crate::db::PostgresClient;
use crate::transform::transform_members;

/// Outcome of one extraction run.
///
/// The two load phases are independent: `None` marks a phase that failed
/// (and was rolled back), while the other phase's committed result stands.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub snapshot_date: NaiveDate,
    pub total_members: usize,
    pub members_inserted: Option<u64>,
    pub snapshots_appended: Option<u64>,
}

impl RunSummary {
    pub fn succeeded(&self) -> bool {
        self.members_inserted.is_some() && self.snapshots_appended.is_some()
    }
}

/// One full extract-and-load cycle: fetch -> transform -> load, strictly in
/// sequence, short-circuiting on failure.
///
/// A fetch or connection failure returns `Err` before anything is written.
/// Load failures do not return `Err`: each phase's outcome is recorded in
/// the summary and the caller decides the exit code.
pub async fn run_once(settings: &Settings) -> Result<RunSummary> {
    let start = std::time::Instant::now();

    let roster = RosterClient::new(&settings.api)?;

    // Preflight read confirms the token and clan tag before the member fetch
    let clan = roster
        .fetch_clan()
        .await
        .context("Failed to reach the roster API")?;
    info!(
        "Connected to clan '{}' (level {}, {} members)",
        clan.name, clan.clan_level, clan.members
    );

    info!("Fetching clan members...");
    let raw = roster
        .fetch_members()
        .await
        .context("Failed to fetch clan members")?;
    info!("Found {} members", raw.len());

    let snapshot_date = Utc::now().date_naive();
    let (members, snapshots) = transform_members(&raw, snapshot_date);

    let db = PostgresClient::new(&settings.postgres)
        .await
        .context("Failed to connect to the database")?;
    db.ensure_schema().await?;

    let members_inserted = match db.upsert_members(&members).await {
        Ok(inserted) => {
            info!(
                "Loaded {} members into database ({} newly inserted)",
                members.len(),
                inserted
            );
            Some(inserted)
        },
        Err(e) => {
            error!("Members load rolled back: {}", e);
            None
        },
    };

    let snapshots_appended = match db.append_snapshots(&snapshots).await {
        Ok(appended) => {
            info!("Loaded {} snapshots into database", appended);
            Some(appended)
        },
        Err(e) => {
            error!("Snapshots load rolled back: {}", e);
            None
        },
    };

    info!("Extraction run finished in {:?}", start.elapsed());

    Ok(RunSummary {
        snapshot_date,
        total_members: raw.len(),
        members_inserted,
        snapshots_appended,
    })
}
