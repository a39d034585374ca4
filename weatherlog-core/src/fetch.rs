use async_trait::async_trait;
use reqwest::Client;
use std::{fmt::Debug, time::Duration};
use thiserror::Error;

const BASE_URL: &str = "http://api.weatherapi.com/v1/current.json";

/// Transport-level failure (DNS, connection, timeout, body read).
///
/// A non-2xx status is not a fetch error: the body is returned as-is and the
/// extraction step decides what to make of it.
#[derive(Debug, Error)]
#[error("Failed to retrieve data from WeatherAPI: {0}")]
pub struct FetchError(#[from] reqwest::Error);

/// Retrieves the raw current-conditions body for a location query.
#[async_trait]
pub trait Fetch: Send + Sync + Debug {
    async fn fetch_current(&self, location: &str) -> Result<Vec<u8>, FetchError>;
}

/// `Fetch` implementation over the WeatherAPI.com HTTP endpoint.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    api_key: String,
    http: Client,
}

impl HttpFetcher {
    /// The upstream enforces no deadline of its own, so the client caps each
    /// request at 30 seconds rather than blocking forever.
    pub fn new(api_key: String) -> Self {
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { api_key, http }
    }
}

#[async_trait]
impl Fetch for HttpFetcher {
    async fn fetch_current(&self, location: &str) -> Result<Vec<u8>, FetchError> {
        let res = self
            .http
            .get(BASE_URL)
            .query(&[("key", self.api_key.as_str()), ("q", location)])
            .send()
            .await?;

        let body = res.bytes().await?;

        Ok(body.to_vec())
    }
}
