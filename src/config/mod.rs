mod config;

pub use self::config::{ApiSettings, PostgresSettings, Settings};
