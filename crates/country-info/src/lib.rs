//! Country Directory Lookup
//!
//! Best-effort enrichment of a country with data from the REST Countries
//! directory (free, no API key). Every failure mode collapses into a single
//! [`CountryLookup::Unavailable`] outcome: callers are expected to render
//! something useful without the remote record, never to recover from a
//! specific error.
//!
//! # Usage
//!
//! ```rust,ignore
//! let client = RestCountriesClient::new(FetcherConfig::default())?;
//! match client.fetch("BRA").await {
//!     CountryLookup::Found(detail) => println!("{:?}", detail.capital),
//!     CountryLookup::Unavailable => println!("no data"),
//! }
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod client;
pub mod record;

pub use client::{FetcherConfig, RestCountriesClient};

/// Public REST Countries endpoint
pub const DEFAULT_BASE_URL: &str = "https://restcountries.com/v3.1";

/// Currency as published by the directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Currency {
    pub name: Option<String>,
    pub symbol: Option<String>,
}

/// Remote country record. Any sub-field may be absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CountryDetail {
    pub common_name: Option<String>,
    pub capital: Option<String>,
    pub population: Option<u64>,
    /// Language names in directory order, deduplicated
    pub languages: Vec<String>,
    pub currencies: Vec<Currency>,
    pub region: Option<String>,
    pub subregion: Option<String>,
    /// Square kilometres
    pub area: Option<f64>,
    /// Flag emoji
    pub flag: Option<String>,
}

/// Outcome of a directory lookup
#[derive(Debug, Clone, PartialEq)]
pub enum CountryLookup {
    Found(CountryDetail),
    Unavailable,
}

impl CountryLookup {
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    pub fn detail(&self) -> Option<&CountryDetail> {
        match self {
            Self::Found(detail) => Some(detail),
            Self::Unavailable => None,
        }
    }
}

impl From<Option<CountryDetail>> for CountryLookup {
    fn from(value: Option<CountryDetail>) -> Self {
        value.map_or(Self::Unavailable, Self::Found)
    }
}

/// Reasons a lookup came back empty. Logged, then collapsed to `Unavailable`.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Invalid ISO alpha-3 code: {0:?}")]
    InvalidCode(String),
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("Request failed: {0}")]
    RequestFailed(#[source] reqwest::Error),
    #[error("Directory returned status: {0}")]
    Status(reqwest::StatusCode),
    #[error("Parse error: {0}")]
    Parse(String),
}

pub type Result<T> = std::result::Result<T, FetchError>;

/// Anything that can enrich a country by ISO alpha-3 code
#[async_trait]
pub trait CountryInfoSource: Send + Sync {
    async fn fetch(&self, iso_code: &str) -> CountryLookup;
}

/// Source that never has data, for offline runs and tests
#[derive(Debug, Clone, Copy, Default)]
pub struct Offline;

#[async_trait]
impl CountryInfoSource for Offline {
    async fn fetch(&self, _iso_code: &str) -> CountryLookup {
        CountryLookup::Unavailable
    }
}
