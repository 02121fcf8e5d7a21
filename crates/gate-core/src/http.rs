//! HTTP probes used to inspect published releases
//!
//! Both operations are infallible by contract: a transport error, a
//! non-success status, or an unparsable body all read as "absent". Nothing
//! is retried.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use gate_meta::config::HttpConfig;

use crate::{Error, Result};

/// Read-only access to release assets.
#[async_trait]
pub trait HttpProbe: Send + Sync {
    /// Whether `url` resolves, after redirects, to a success status.
    async fn exists(&self, url: &str) -> bool;

    /// GET `url` and parse the body as JSON.
    async fn fetch_json(&self, url: &str) -> Option<Value>;
}

/// [`HttpProbe`] backed by a shared `reqwest` client.
pub struct ReqwestProbe {
    client: reqwest::Client,
}

impl ReqwestProbe {
    pub fn new(config: &HttpConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .redirect(reqwest::redirect::Policy::limited(10));

        if let Some(secs) = config.connect_timeout_secs {
            builder = builder.connect_timeout(Duration::from_secs(secs));
        }

        let client = builder.build().map_err(|e| Error::Http {
            message: e.to_string(),
        })?;

        Ok(Self { client })
    }
}

#[async_trait]
impl HttpProbe for ReqwestProbe {
    async fn exists(&self, url: &str) -> bool {
        match self.client.head(url).send().await {
            Ok(response) => {
                let status = response.status();
                tracing::debug!(url = %url, status = %status, "HEAD");
                status.is_success()
            }
            Err(e) => {
                tracing::debug!(url = %url, error = %e, "HEAD failed");
                false
            }
        }
    }

    async fn fetch_json(&self, url: &str) -> Option<Value> {
        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::debug!(url = %url, error = %e, "GET failed");
                return None;
            }
        };

        let status = response.status();
        tracing::debug!(url = %url, status = %status, "GET");
        if !status.is_success() {
            return None;
        }

        match response.json::<Value>().await {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::debug!(url = %url, error = %e, "Response is not JSON");
                None
            }
        }
    }
}

/// [`HttpProbe`] over a fixed set of URLs.
///
/// Records every request so callers can assert what was (or was not)
/// touched.
#[derive(Debug, Default)]
pub struct MemoryProbe {
    assets: HashSet<String>,
    documents: HashMap<String, Value>,
    requests: Mutex<Vec<String>>,
}

impl MemoryProbe {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `url` answer `exists`.
    pub fn with_asset(mut self, url: impl Into<String>) -> Self {
        self.assets.insert(url.into());
        self
    }

    /// Serve `document` at `url`; the URL also answers `exists`.
    pub fn with_json(mut self, url: impl Into<String>, document: Value) -> Self {
        let url = url.into();
        self.assets.insert(url.clone());
        self.documents.insert(url, document);
        self
    }

    /// Every URL requested so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    fn record(&self, url: &str) {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(url.to_string());
        }
    }
}

#[async_trait]
impl HttpProbe for MemoryProbe {
    async fn exists(&self, url: &str) -> bool {
        self.record(url);
        self.assets.contains(url)
    }

    async fn fetch_json(&self, url: &str) -> Option<Value> {
        self.record(url);
        self.documents.get(url).cloned()
    }
}
