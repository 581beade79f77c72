use anyhow::Context;
use log::{error, info, LevelFilter};
use simple_logger::SimpleLogger;

use clantrack::{etl, Settings};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    SimpleLogger::new()
        .with_level(LevelFilter::Info)
        .init()
        .unwrap();

    // Load configuration
    let settings = Settings::new()
        .context("Failed to load configuration. Please ensure the CLANTRACK_* environment variables are set")?;

    let summary = etl::run_once(&settings).await?;

    info!("Extraction summary:");
    info!("  Date: {}", summary.snapshot_date);
    info!("  Total members: {}", summary.total_members);
    match summary.members_inserted {
        Some(inserted) => info!("  Members: loaded ({} new)", inserted),
        None => info!("  Members: FAILED"),
    }
    match summary.snapshots_appended {
        Some(appended) => info!("  Snapshots: loaded ({} rows)", appended),
        None => info!("  Snapshots: FAILED"),
    }

    if !summary.succeeded() {
        error!("Run finished with failures");
        std::process::exit(1);
    }

    info!("Data load complete");
    Ok(())
}
