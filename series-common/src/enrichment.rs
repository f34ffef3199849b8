//! Work metadata enrichment gateway
//!
//! The gateway maps work identifiers to an opaque descriptive string. It is
//! consulted once at startup for every known work; identifiers it does not
//! return simply have no metadata.

use std::collections::HashMap;
use std::time::Duration;

use serde::Serialize;
use tracing::{info, warn};

use crate::{Error, Result};

const USER_AGENT: &str = concat!("series-service/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Maximum identifiers sent in one gateway request
pub const BATCH_SIZE: usize = 100;

/// Batch lookup of work metadata
#[allow(async_fn_in_trait)]
pub trait MetadataLookup {
    /// Resolve as many of `work_ids` as possible
    async fn lookup(&self, work_ids: &[String]) -> Result<HashMap<String, String>>;
}

/// Gateway that knows nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoMetadata;

impl MetadataLookup for NoMetadata {
    async fn lookup(&self, _work_ids: &[String]) -> Result<HashMap<String, String>> {
        Ok(HashMap::new())
    }
}

/// Gateway backed by a fixed in-memory map
#[derive(Debug, Clone, Default)]
pub struct StaticMetadata {
    entries: HashMap<String, String>,
}

impl StaticMetadata {
    pub fn new(entries: HashMap<String, String>) -> Self {
        Self { entries }
    }
}

impl MetadataLookup for StaticMetadata {
    async fn lookup(&self, work_ids: &[String]) -> Result<HashMap<String, String>> {
        Ok(work_ids
            .iter()
            .filter_map(|id| self.entries.get(id).map(|m| (id.clone(), m.clone())))
            .collect())
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BatchRequest<'a> {
    work_ids: &'a [String],
}

/// HTTP gateway client
///
/// POSTs `{"workIds": [...]}` to the configured URL in batches of
/// [`BATCH_SIZE`] and expects a JSON object mapping identifier to metadata.
#[derive(Debug, Clone)]
pub struct HttpMetadataClient {
    client: reqwest::Client,
    url: String,
}

impl HttpMetadataClient {
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| Error::Enrichment(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn lookup_batch(&self, work_ids: &[String]) -> Result<HashMap<String, String>> {
        let response = self
            .client
            .post(&self.url)
            .json(&BatchRequest { work_ids })
            .send()
            .await
            .map_err(|e| Error::Enrichment(format!("Request to {} failed: {}", self.url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Enrichment(format!(
                "Gateway {} returned HTTP {}",
                self.url,
                status.as_u16()
            )));
        }

        response
            .json::<HashMap<String, String>>()
            .await
            .map_err(|e| Error::Enrichment(format!("Invalid gateway response: {}", e)))
    }
}

impl MetadataLookup for HttpMetadataClient {
    async fn lookup(&self, work_ids: &[String]) -> Result<HashMap<String, String>> {
        let mut metadata = HashMap::with_capacity(work_ids.len());
        for batch in work_ids.chunks(BATCH_SIZE) {
            metadata.extend(self.lookup_batch(batch).await?);
        }
        Ok(metadata)
    }
}

/// Fetch metadata for all `work_ids`, degrading to an empty map on failure
pub async fn fetch_metadata<L: MetadataLookup>(
    gateway: &L,
    work_ids: &[String],
) -> HashMap<String, String> {
    if work_ids.is_empty() {
        return HashMap::new();
    }

    match gateway.lookup(work_ids).await {
        Ok(metadata) => {
            info!(
                "Resolved metadata for {} of {} work(s)",
                metadata.len(),
                work_ids.len()
            );
            metadata
        }
        Err(e) => {
            warn!("Metadata enrichment unavailable, continuing without it: {}", e);
            HashMap::new()
        }
    }
}
