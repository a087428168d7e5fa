//! REST Countries HTTP client

use crate::record::parse_response;
use crate::{CountryDetail, CountryInfoSource, CountryLookup, FetchError, Result, DEFAULT_BASE_URL};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// Client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetcherConfig {
    /// API root, without trailing slash (default: REST Countries v3.1)
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_sec: u64,
    pub user_agent: String,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_sec: 10,
            user_agent: concat!("world-map-dashboard/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// One-shot lookups against the `/alpha/{code}` endpoint. No caching, no retry.
pub struct RestCountriesClient {
    config: FetcherConfig,
    client: reqwest::Client,
}

impl RestCountriesClient {
    pub fn new(config: FetcherConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_sec))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(FetchError::Client)?;

        Ok(Self { config, client })
    }

    /// Client against the public endpoint with default settings
    pub fn public() -> Result<Self> {
        Self::new(FetcherConfig::default())
    }

    pub fn config(&self) -> &FetcherConfig {
        &self.config
    }

    fn endpoint(&self, iso_code: &str) -> String {
        format!(
            "{}/alpha/{}",
            self.config.base_url.trim_end_matches('/'),
            iso_code
        )
    }

    /// Fetch the record, keeping the failure reason
    pub async fn try_fetch(&self, iso_code: &str) -> Result<CountryDetail> {
        let code = normalize_iso_code(iso_code)
            .ok_or_else(|| FetchError::InvalidCode(iso_code.to_string()))?;
        let url = self.endpoint(&code);
        debug!(%url, "fetching country record");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(FetchError::RequestFailed)?;

        if response.status() != reqwest::StatusCode::OK {
            return Err(FetchError::Status(response.status()));
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| FetchError::Parse(e.to_string()))?;

        parse_response(&body)
    }
}

#[async_trait]
impl CountryInfoSource for RestCountriesClient {
    async fn fetch(&self, iso_code: &str) -> CountryLookup {
        match self.try_fetch(iso_code).await {
            Ok(detail) => CountryLookup::Found(detail),
            Err(error) => {
                warn!(iso_code, %error, "country record unavailable");
                CountryLookup::Unavailable
            }
        }
    }
}

/// Three ASCII letters, uppercased. Same rule as `country_data::loader::normalize_iso_code`.
fn normalize_iso_code(code: &str) -> Option<String> {
    let code = code.trim();
    (code.len() == 3 && code.chars().all(|c| c.is_ascii_alphabetic()))
        .then(|| code.to_ascii_uppercase())
}
