//! The catalog HTTP client.

use crate::config::ClientConfig;
use crate::error::{FetchError, FetchResult};
use crate::model::Toilet;
use crate::parse::{parse_records, ParseReport, RawToiletRecord};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE, USER_AGENT};
use reqwest::Client;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

/// Request correlation ID header
const X_REQUEST_ID: &str = "X-Request-ID";

/// Collection path for the toilet catalog
const TOILETS_PATH: &str = "toilets";

/// HTTP client for the WCLook toilet catalog
///
/// Wraps `reqwest` and adds request correlation IDs and the
/// `Network`/`Data`/`Unknown` error classification. Deliberately no
/// retry or caching layer: every call is a single round trip, and the
/// caller's refresh is the retry mechanism.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Client,
    config: Arc<ClientConfig>,
}

impl CatalogClient {
    /// Create a new client with configuration from the environment
    pub fn new() -> FetchResult<Self> {
        let config = ClientConfig::from_env()?;
        Self::with_config(config)
    }

    /// Create a new client with specific configuration
    pub fn with_config(config: ClientConfig) -> FetchResult<Self> {
        config.validate()?;

        let mut default_headers = HeaderMap::new();
        default_headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        default_headers.insert(USER_AGENT, HeaderValue::from_static("wclook-catalog/0.3"));

        let inner = Client::builder()
            .timeout(config.timeout)
            .default_headers(default_headers)
            .build()
            .map_err(|e| FetchError::Unknown(e.to_string()))?;

        Ok(Self {
            inner,
            config: Arc::new(config),
        })
    }

    /// Get the current configuration
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Fetch the full catalog as typed records.
    ///
    /// A snapshot that yields no usable records at all maps to
    /// [`FetchError::no_results`], matching the backend's "no toilets
    /// found" classification; parse diagnostics for the rest are logged
    /// at debug level.
    pub async fn fetch_all(&self) -> FetchResult<Vec<Toilet>> {
        let (toilets, _report) = self.fetch_all_with_report().await?;
        Ok(toilets)
    }

    /// Fetch the full catalog, returning the parse report alongside.
    #[instrument(skip(self), fields(request_id))]
    pub async fn fetch_all_with_report(&self) -> FetchResult<(Vec<Toilet>, ParseReport)> {
        let raw = self.fetch_raw().await?;
        let fetched = raw.len();
        let (toilets, report) = parse_records(raw);

        if report.skipped_records > 0 {
            warn!(
                skipped = report.skipped_records,
                fetched,
                "Dropped records without a stable identifier"
            );
        }

        if toilets.is_empty() {
            return Err(FetchError::no_results());
        }

        Ok((toilets, report))
    }

    /// Fetch the raw record bags without parsing.
    pub async fn fetch_raw(&self) -> FetchResult<Vec<RawToiletRecord>> {
        let url = format!("{}/{}", self.config.base_url.trim_end_matches('/'), TOILETS_PATH);
        let request_id = Uuid::new_v4().to_string();

        debug!(request_id = %request_id, url = %url, "Fetching toilet catalog");
        let start = Instant::now();

        let response = self
            .inner
            .get(&url)
            .header(X_REQUEST_ID, &request_id)
            .send()
            .await
            .map_err(|e| FetchError::from_request(&e))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "no response body".to_string());
            warn!(
                request_id = %request_id,
                status = status.as_u16(),
                "Catalog fetch failed"
            );
            return Err(FetchError::Network(format!("HTTP {status}: {message}")));
        }

        let records: Vec<RawToiletRecord> = response
            .json()
            .await
            .map_err(|e| FetchError::Data(format!("malformed catalog response: {e}")))?;

        debug!(
            request_id = %request_id,
            records = records.len(),
            elapsed_ms = start.elapsed().as_millis(),
            "Catalog fetch succeeded"
        );

        Ok(records)
    }
}
