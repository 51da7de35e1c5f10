//! Doctor directory client
//!
//! `GET {base}/api/doctors/{key}` with a hard timeout and a single attempt.
//! - 2xx with `{"info": ...}` → Found
//! - 404 → NotFound
//! - everything else (timeout, transport, other status, bad body) → Unavailable

use std::time::Duration;

use reqwest::{StatusCode, Url};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::types::DoctorLookup;

/// Failures inside the client. Never returned from [`DirectoryClient::lookup`].
#[derive(Error, Debug)]
pub enum LookupError {
    #[error("invalid directory base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("lookup timed out after {0} ms")]
    Timeout(u128),

    #[error("directory returned status {0}")]
    UnexpectedStatus(u16),

    #[error("malformed directory response: {0}")]
    Malformed(String),
}

/// Response body on a hit
#[derive(Deserialize)]
struct DoctorInfoResponse {
    info: Option<String>,
}

/// HTTP client for the doctor directory
#[derive(Debug, Clone)]
pub struct DirectoryClient {
    base_url: Url,
    client: reqwest::Client,
    timeout: Duration,
}

impl DirectoryClient {
    /// Create a client for `base_url` with a per-lookup timeout
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, LookupError> {
        let parsed = Url::parse(base_url)
            .map_err(|e| LookupError::InvalidBaseUrl(format!("{base_url}: {e}")))?;
        if parsed.cannot_be_a_base() {
            return Err(LookupError::InvalidBaseUrl(base_url.to_string()));
        }

        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url: parsed,
            client,
            timeout,
        })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// URL for one doctor; the key is percent-encoded as a single path segment
    pub fn doctor_url(&self, doctor_key: &str) -> Result<Url, LookupError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| LookupError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(["api", "doctors", doctor_key]);
        Ok(url)
    }

    /// Look a doctor up. Always resolves within the timeout; never errors.
    pub async fn lookup(&self, doctor_key: &str) -> DoctorLookup {
        let attempt = tokio::time::timeout(self.timeout, self.fetch(doctor_key)).await;
        let result = match attempt {
            Ok(result) => result,
            Err(_) => Err(LookupError::Timeout(self.timeout.as_millis())),
        };

        match result {
            Ok(Some(info)) => {
                debug!(doctor = doctor_key, "directory hit");
                DoctorLookup::Found { info }
            }
            Ok(None) => {
                debug!(doctor = doctor_key, "directory miss");
                DoctorLookup::NotFound
            }
            Err(e) => {
                warn!(doctor = doctor_key, error = %e, "doctor directory unavailable");
                DoctorLookup::Unavailable {
                    reason: e.to_string(),
                }
            }
        }
    }

    /// One request: `Some(info)` on hit, `None` on 404
    async fn fetch(&self, doctor_key: &str) -> Result<Option<String>, LookupError> {
        let url = self.doctor_url(doctor_key)?;
        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                LookupError::Timeout(self.timeout.as_millis())
            } else {
                LookupError::Transport(e)
            }
        })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(LookupError::UnexpectedStatus(status.as_u16()));
        }

        let body: DoctorInfoResponse = response
            .json()
            .await
            .map_err(|e| LookupError::Malformed(e.to_string()))?;

        body.info
            .map(Some)
            .ok_or_else(|| LookupError::Malformed("missing \"info\" field".to_string()))
    }
}
