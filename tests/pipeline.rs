//! End-to-end short-circuit behavior of the extraction run.
//!
//! Needs no live services: the roster API endpoint points at a port nothing
//! listens on, so the run must abort at the fetch stage without ever touching
//! the database.

use clantrack::config::{ApiSettings, PostgresSettings};
use clantrack::{etl, Settings};

#[tokio::test]
async fn failed_fetch_aborts_before_any_database_work() {
    // Port 9 (discard) is not listening. The database settings are equally
    // unreachable; if the run ever got that far, the error would come from
    // the connection attempt instead of the fetch.
    let settings = Settings {
        api: ApiSettings {
            token: "test-token".to_string(),
            clan_tag: "#2PP".to_string(),
            base_url: "http://127.0.0.1:9/v1".to_string(),
        },
        postgres: PostgresSettings {
            host: "127.0.0.1".to_string(),
            port: 9,
            user: "nobody".to_string(),
            password: "unused".to_string(),
            database: "unused".to_string(),
            pool_size: 1,
        },
    };

    let err = etl::run_once(&settings)
        .await
        .expect_err("run must fail when the roster API is unreachable");

    let chain = format!("{:#}", err);
    assert!(
        chain.contains("Failed to reach the roster API"),
        "run should abort at the fetch stage, got: {chain}"
    );
    assert!(
        !chain.contains("database"),
        "database must never be touched after a failed fetch, got: {chain}"
    );
}
