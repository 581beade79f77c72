use anyhow::Context;
use deadpool_postgres::{Manager, ManagerConfig, Pool, RecyclingMethod};
use log::info;
use tokio_postgres::NoTls;

use crate::config::PostgresSettings;

/// PostgreSQL client with connection pooling.
///
/// Provides the two load operations of the extraction job (member upsert and
/// snapshot append, see `ops.rs`). Uses `deadpool-postgres` for connection
/// management. Construction makes a single connection attempt; an unreachable
/// database fails the run before anything is written.
#[derive(Clone)]
pub struct PostgresClient {
    pub pool: Pool,
}

impl PostgresClient {
    pub async fn new(settings: &PostgresSettings) -> anyhow::Result<Self> {
        info!("Connecting to PostgreSQL");

        let mut pg_config = tokio_postgres::Config::new();
        pg_config
            .host(&settings.host)
            .port(settings.port)
            .user(&settings.user)
            .password(&settings.password)
            .dbname(&settings.database);

        let mgr_config = ManagerConfig {
            recycling_method: RecyclingMethod::Fast,
        };

        let mgr = Manager::from_config(pg_config, NoTls, mgr_config);
        let pool = Pool::builder(mgr)
            .max_size(settings.pool_size)
            .build()
            .context("Failed to create PostgreSQL connection pool")?;

        // Test the connection
        pool.get()
            .await
            .context("Failed to connect to PostgreSQL")?;

        info!("Successfully connected to PostgreSQL");
        Ok(Self { pool })
    }

    /// Apply `schema/postgres.sql`. The DDL is idempotent
    /// (CREATE TABLE IF NOT EXISTS), so this runs on every invocation.
    pub async fn ensure_schema(&self) -> anyhow::Result<()> {
        info!("Ensuring PostgreSQL schema");
        let client = self.pool.get().await?;

        let schema = tokio::fs::read_to_string("schema/postgres.sql")
            .await
            .context("Failed to read schema/postgres.sql")?;

        for stmt in schema.split(';') {
            let stmt = stmt.trim();
            if stmt.is_empty() {
                continue;
            }
            client
                .execute(stmt, &[])
                .await
                .with_context(|| format!("Failed to execute schema statement: {}", stmt))?;
        }

        info!("PostgreSQL schema applied successfully");
        Ok(())
    }
}
