use config::{Config, ConfigError, Environment};
use serde::Deserialize;

/// Clash of Clans API configuration.
///
/// The token is tied to the caller's IP on the developer portal; the clan
/// tag may be given with or without the leading '#'.
#[derive(Debug, Deserialize, Clone)]
pub struct ApiSettings {
    pub token: String,
    pub clan_tag: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    "https://api.clashofclans.com/v1".to_string()
}

/// PostgreSQL database connection configuration.
///
/// Used for storing:
/// - Member roster rows (upserted)
/// - Member snapshot history (append-only)
#[derive(Debug, Deserialize, Clone)]
pub struct PostgresSettings {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
    #[serde(default = "default_pool_size")]
    pub pool_size: usize,
}

fn default_pool_size() -> usize {
    4
}

/// Root application configuration.
///
/// Loaded once at process entry from `CLANTRACK_`-prefixed environment
/// variables and passed by parameter into each component; nothing reads the
/// environment after startup. Required variables have no defaults, so a
/// missing one fails here, before any network or database call.
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub api: ApiSettings,
    pub postgres: PostgresSettings,
}

impl Settings {
    /// Expected variables: `CLANTRACK_API__TOKEN`, `CLANTRACK_API__CLAN_TAG`,
    /// `CLANTRACK_POSTGRES__HOST`, `CLANTRACK_POSTGRES__PORT`,
    /// `CLANTRACK_POSTGRES__USER`, `CLANTRACK_POSTGRES__PASSWORD`,
    /// `CLANTRACK_POSTGRES__DATABASE` (and optionally
    /// `CLANTRACK_POSTGRES__POOL_SIZE`, `CLANTRACK_API__BASE_URL`).
    pub fn new() -> Result<Self, ConfigError> {
        let s = Config::builder()
            .add_source(Environment::with_prefix("CLANTRACK").separator("__"))
            .build()?;

        let settings: Settings = s.try_deserialize()?;

        Ok(settings)
    }
}
