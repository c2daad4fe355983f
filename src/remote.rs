//! Remote tier: the manseryeok HTTP API.

use crate::{DateKey, Error, RawCalendarRecord, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// The remote lookup capability consumed by the client.
///
/// The endpoint is passed per call so a runtime configuration update takes
/// effect without rebuilding the fetcher. Implementations must be safe to
/// cancel: the client drops the in-flight future when its deadline expires.
#[async_trait]
pub trait RemoteFetcher: Send + Sync {
    async fn fetch(&self, endpoint: &str, key: &DateKey) -> Result<RawCalendarRecord>;

    fn name(&self) -> &'static str {
        "remote"
    }
}

/// Request body of the doha.kr manseryeok endpoint.
#[derive(Debug, Serialize)]
struct ApiRequest<'a> {
    action: &'a str,
    year: i32,
    month: u32,
    day: u32,
}

/// Response envelope: `{"success": bool, "data": {...}, "error": "..."}`.
#[derive(Debug, Deserialize)]
struct ApiEnvelope {
    success: bool,
    data: Option<RawCalendarRecord>,
    error: Option<String>,
}

/// [`RemoteFetcher`] over HTTP, POSTing a JSON body and decoding the
/// standard envelope. Uses one shared connection pool for the lifetime of
/// the fetcher.
pub struct HttpRemoteFetcher {
    client: reqwest::Client,
}

impl HttpRemoteFetcher {
    pub fn new() -> Result<Self> {
        // The outer deadline lives in the client; this one only bounds a
        // stuck connection when the fetcher is used standalone.
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .pool_max_idle_per_host(8)
            .build()?;
        Ok(Self { client })
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl RemoteFetcher for HttpRemoteFetcher {
    async fn fetch(&self, endpoint: &str, key: &DateKey) -> Result<RawCalendarRecord> {
        let body = ApiRequest {
            action: "getManseryeok",
            year: key.year,
            month: key.month,
            day: key.day,
        };

        let response = self.client.post(endpoint).json(&body).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::remote_unavailable(format!(
                "HTTP {} from {endpoint}",
                status.as_u16()
            )));
        }

        let envelope: ApiEnvelope = response
            .json()
            .await
            .map_err(|e| Error::MalformedResponse {
                reason: e.to_string(),
            })?;

        match envelope {
            ApiEnvelope {
                success: true,
                data: Some(record),
                ..
            } => Ok(record),
            ApiEnvelope { error, .. } => Err(Error::remote_unavailable(
                error.unwrap_or_else(|| "empty response envelope".to_string()),
            )),
        }
    }

    fn name(&self) -> &'static str {
        "http"
    }
}
