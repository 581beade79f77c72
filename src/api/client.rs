use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

use crate::api::types::{ClanInfo, MembersResponse, RawMember};
use crate::config::ApiSettings;

/// Fixed request deadline. No retries on top of it.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Failure of a roster API read. Nothing is written to the database after
/// any of these; the run aborts with a non-zero exit.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request to roster API failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("roster API returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("failed to decode roster API payload: {0}")]
    Payload(#[source] reqwest::Error),
}

/// Authenticated client for the Clash of Clans clan endpoints.
///
/// Holds a reqwest client with the bearer token installed as a default
/// header, so every request is authenticated the same way.
#[derive(Clone)]
pub struct RosterClient {
    client: Client,
    base_url: String,
    clan_tag: String,
}

impl RosterClient {
    pub fn new(settings: &ApiSettings) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .default_headers({
                let mut headers = reqwest::header::HeaderMap::new();
                headers.insert(
                    reqwest::header::AUTHORIZATION,
                    format!("Bearer {}", settings.token)
                        .parse()
                        .context("Invalid roster API token")?,
                );
                headers
            })
            .build()
            .context("Failed to build roster API client")?;

        Ok(Self {
            client,
            base_url: settings.base_url.clone(),
            clan_tag: settings.clan_tag.clone(),
        })
    }

    /// Path for a clan-scoped endpoint. Tags start with '#', which must be
    /// percent-encoded in the URL path; a leading '#' in the configured tag
    /// is accepted and normalized.
    fn clan_url(&self, suffix: &str) -> String {
        let tag = self.clan_tag.trim_start_matches('#');
        format!("{}/clans/%23{}{}", self.base_url, tag, suffix)
    }

    /// Fetch clan metadata. Used as a preflight to confirm the token and
    /// clan tag before the member fetch.
    pub async fn fetch_clan(&self) -> Result<ClanInfo, FetchError> {
        self.get_json(&self.clan_url("")).await
    }

    /// Fetch the full member list, in the order the API returns it
    /// (current clan ranking).
    pub async fn fetch_members(&self) -> Result<Vec<RawMember>, FetchError> {
        let resp: MembersResponse = self.get_json(&self.clan_url("/members")).await?;
        Ok(resp.items)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(FetchError::Transport)?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(FetchError::Status { status, body });
        }

        resp.json::<T>().await.map_err(FetchError::Payload)
    }
}
