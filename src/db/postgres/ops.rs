use log::error;
use tokio_postgres::types::ToSql;

use crate::db::models::{Member, MemberSnapshot};
use crate::db::postgres::PostgresClient;

/// Rows per multi-row VALUES statement. Both tables stay well under the
/// 65535 bind-parameter limit at this size.
const BATCH_SIZE: usize = 500;

const MEMBER_COLS: usize = 4;
const SNAPSHOT_COLS: usize = 10;

/// Failure of a batch load. Each load operation runs in its own
/// transaction, so a failure rolls back every row of that batch; the other
/// batch's outcome is independent.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to acquire database connection: {0}")]
    Acquire(#[from] deadpool_postgres::PoolError),

    #[error("failed to write {table}: {source}")]
    Write {
        table: &'static str,
        #[source]
        source: tokio_postgres::Error,
    },
}

/// Build VALUES placeholders: ($1,$2,...), ($5,$6,...), ...
fn values_clauses(rows: usize, cols: usize) -> String {
    (0..rows)
        .map(|i| {
            let start = i * cols + 1;
            let placeholders: Vec<String> =
                (start..start + cols).map(|n| format!("${}", n)).collect();
            format!("({})", placeholders.join(", "))
        })
        .collect::<Vec<String>>()
        .join(", ")
}

impl PostgresClient {
    /// Insert roster rows, ignoring tags that already exist.
    ///
    /// `ON CONFLICT (player_tag) DO NOTHING` keeps the stored `join_date`
    /// and `is_active` untouched for known members, so re-running the job is
    /// safe for this table. All rows share one transaction; any failure
    /// rolls the whole batch back. Returns the number of newly inserted
    /// rows (conflicting rows do not count).
    pub async fn upsert_members(&self, members: &[Member]) -> Result<u64, LoadError> {
        const TABLE: &str = "members";

        if members.is_empty() {
            return Ok(0);
        }

        let mut client = self.pool.get().await?;
        let tx = client.transaction().await.map_err(|e| LoadError::Write {
            table: TABLE,
            source: e,
        })?;

        let mut inserted = 0u64;

        for chunk in members.chunks(BATCH_SIZE) {
            let query = format!(
                r#"
                INSERT INTO members (player_tag, player_name, join_date, is_active)
                VALUES {}
                ON CONFLICT (player_tag) DO NOTHING
                "#,
                values_clauses(chunk.len(), MEMBER_COLS)
            );

            let mut params: Vec<&(dyn ToSql + Sync)> =
                Vec::with_capacity(chunk.len() * MEMBER_COLS);
            for member in chunk {
                params.push(&member.player_tag);
                params.push(&member.player_name);
                params.push(&member.join_date);
                params.push(&member.is_active);
            }

            inserted += tx.execute(&query, &params).await.map_err(|e| {
                error!("Failed to upsert members batch: {:?}", e);
                LoadError::Write {
                    table: TABLE,
                    source: e,
                }
            })?;
        }

        tx.commit().await.map_err(|e| LoadError::Write {
            table: TABLE,
            source: e,
        })?;

        Ok(inserted)
    }

    /// Append snapshot rows unconditionally.
    ///
    /// No conflict handling: every run appends a fresh set of rows, and a
    /// same-day re-run duplicates that day's rows. All rows share one
    /// transaction; any failure rolls the whole batch back. Returns the
    /// number of rows appended.
    pub async fn append_snapshots(&self, snapshots: &[MemberSnapshot]) -> Result<u64, LoadError> {
        const TABLE: &str = "member_snapshots";

        if snapshots.is_empty() {
            return Ok(0);
        }

        let mut client = self.pool.get().await?;
        let tx = client.transaction().await.map_err(|e| LoadError::Write {
            table: TABLE,
            source: e,
        })?;

        let mut appended = 0u64;

        for chunk in snapshots.chunks(BATCH_SIZE) {
            let query = format!(
                r#"
                INSERT INTO member_snapshots (
                    player_tag, snapshot_date, role, trophies,
                    league_name, league_id, town_hall_level,
                    donations_given, donations_received, clan_rank
                )
                VALUES {}
                "#,
                values_clauses(chunk.len(), SNAPSHOT_COLS)
            );

            let mut params: Vec<&(dyn ToSql + Sync)> =
                Vec::with_capacity(chunk.len() * SNAPSHOT_COLS);
            for snapshot in chunk {
                params.push(&snapshot.player_tag);
                params.push(&snapshot.snapshot_date);
                params.push(&snapshot.role);
                params.push(&snapshot.trophies);
                params.push(&snapshot.league_name);
                params.push(&snapshot.league_id);
                params.push(&snapshot.town_hall_level);
                params.push(&snapshot.donations_given);
                params.push(&snapshot.donations_received);
                params.push(&snapshot.clan_rank);
            }

            appended += tx.execute(&query, &params).await.map_err(|e| {
                error!("Failed to append snapshots batch: {:?}", e);
                LoadError::Write {
                    table: TABLE,
                    source: e,
                }
            })?;
        }

        tx.commit().await.map_err(|e| LoadError::Write {
            table: TABLE,
            source: e,
        })?;

        Ok(appended)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholders_number_across_rows() {
        assert_eq!(values_clauses(1, 4), "($1, $2, $3, $4)");
        assert_eq!(values_clauses(2, 2), "($1, $2), ($3, $4)");
    }
}
