//! Ranking sources.
//!
//! A [`Fetcher`] produces one raw payload per call and never retries;
//! retry policy belongs to whoever drives it.

use rankwatch_core::errors::{ExError, ExErrorKind};
use rankwatch_core::payload::KEY_FETCHED_AT;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Default voting API endpoint.
pub const DEFAULT_API_URL: &str = "https://api.mnetplus.world/vote/v1/public/guest/votes/690020de20a9a4058b351522/options?sort=RANKED";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {reason}")]
    Transport { url: String, reason: String },
    #[error("request to {url} timed out after {timeout:?}")]
    Timeout { url: String, timeout: Duration },
    #[error("{url} answered with HTTP {status}")]
    Status { url: String, status: u16 },
    #[error("response from {source_name} is not valid JSON: {reason}")]
    Decode { source_name: String, reason: String },
    #[error("payload from {source_name} is not a JSON object")]
    NotAnObject { source_name: String },
    #[error("cannot read {path}: {reason}")]
    Io { path: PathBuf, reason: String },
}

impl From<FetchError> for ExError {
    fn from(err: FetchError) -> Self {
        let kind = match err {
            FetchError::Timeout { .. } => ExErrorKind::Timeout,
            FetchError::Io { .. } => ExErrorKind::Io,
            _ => ExErrorKind::ExternalService,
        };
        ExError::new(kind).with_op("fetch").with_message(err.to_string())
    }
}

/// A source of ranking payloads.
pub trait Fetcher: Send + Sync {
    /// Fetch the current payload.
    ///
    /// # Errors
    ///
    /// Any [`FetchError`]; nothing is retried.
    fn fetch(&self) -> Result<Value, FetchError>;
}

/// Stamp `fetchedAt` with the current UTC time, keeping one the source already set.
fn stamp_fetched_at(payload: &mut serde_json::Map<String, Value>) {
    if !payload.contains_key(KEY_FETCHED_AT) {
        let now = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);
        payload.insert(KEY_FETCHED_AT.to_string(), Value::String(now));
    }
}

fn require_object(value: Value, source_name: &str) -> Result<Value, FetchError> {
    match value {
        Value::Object(mut map) => {
            stamp_fetched_at(&mut map);
            Ok(Value::Object(map))
        }
        _ => Err(FetchError::NotAnObject {
            source_name: source_name.to_string(),
        }),
    }
}

/// Fetches the live rankings over HTTPS.
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
    url: String,
    timeout: Duration,
}

impl HttpFetcher {
    /// Build a fetcher for `url` whose requests give up after `timeout`.
    ///
    /// # Errors
    ///
    /// `Transport` when the TLS backend cannot be initialised.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let url = url.into();
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("rankwatch/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FetchError::Transport {
                url: url.clone(),
                reason: e.to_string(),
            })?;
        Ok(Self {
            client,
            url,
            timeout,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn classify(&self, err: reqwest::Error) -> FetchError {
        if err.is_timeout() {
            FetchError::Timeout {
                url: self.url.clone(),
                timeout: self.timeout,
            }
        } else if let Some(status) = err.status() {
            FetchError::Status {
                url: self.url.clone(),
                status: status.as_u16(),
            }
        } else if err.is_decode() {
            FetchError::Decode {
                source_name: self.url.clone(),
                reason: err.to_string(),
            }
        } else {
            FetchError::Transport {
                url: self.url.clone(),
                reason: err.to_string(),
            }
        }
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self) -> Result<Value, FetchError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| self.classify(e))?;

        let body: Value = response.json().map_err(|e| self.classify(e))?;
        require_object(body, &self.url)
    }
}

impl std::fmt::Debug for HttpFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpFetcher")
            .field("url", &self.url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Reads a saved payload from disk, e.g. for imports and replays.
#[derive(Debug, Clone)]
pub struct FileFetcher {
    path: PathBuf,
}

impl FileFetcher {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Fetcher for FileFetcher {
    fn fetch(&self) -> Result<Value, FetchError> {
        let text = std::fs::read_to_string(&self.path).map_err(|e| FetchError::Io {
            path: self.path.clone(),
            reason: e.to_string(),
        })?;
        let source_name = self.path.display().to_string();
        let value: Value = serde_json::from_str(&text).map_err(|e| FetchError::Decode {
            source_name: source_name.clone(),
            reason: e.to_string(),
        })?;
        require_object(value, &source_name)
    }
}
