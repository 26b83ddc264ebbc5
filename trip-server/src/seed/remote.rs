//! HTTP client for a remote trip catalogue.
//!
//! Fetches the base trip table as a JSON array from `{base_url}/trips`.

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use super::table::{SeedTable, SeedTrip, convert_table};
use super::{SeedSource, SourceError};

/// Configuration for the remote catalogue client.
#[derive(Debug, Clone)]
pub struct RemoteSeedConfig {
    /// Base URL of the catalogue service
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl RemoteSeedConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_secs: 10,
        }
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Remote catalogue client.
#[derive(Debug, Clone)]
pub struct RemoteSeed {
    http: reqwest::Client,
    base_url: String,
}

impl RemoteSeed {
    pub fn new(config: RemoteSeedConfig) -> Result<Self, SourceError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch and validate the trip table.
    pub async fn fetch_table(&self) -> Result<SeedTable, SourceError> {
        let url = format!("{}/trips", self.base_url);
        debug!(%url, "fetching seed table");

        let response = self.http.get(&url).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(SourceError::Unauthorized);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(SourceError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SourceError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        let rows: Vec<SeedTrip> = serde_json::from_str(&body).map_err(|e| SourceError::Json {
            message: e.to_string(),
            body: Some(body.chars().take(500).collect()),
        })?;

        convert_table(rows)
    }
}

impl SeedSource for RemoteSeed {
    async fn base_records(&self) -> Result<Arc<SeedTable>, SourceError> {
        self.fetch_table().await.map(Arc::new)
    }
}
