pub mod api;
pub mod config;
pub mod db;
pub mod etl;
pub mod transform;

pub use api::{FetchError, RosterClient};
pub use config::Settings;
pub use db::{LoadError, PostgresClient};
pub use etl::RunSummary;
