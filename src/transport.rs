// src/transport.rs

//! HTTP transport boundary
//!
//! Loaders fetch index documents through the [`Transport`] trait so the
//! network edge stays swappable in tests. [`HttpTransport`] is the real
//! implementation: a blocking reqwest client with a fixed request timeout.

use crate::error::{Error, Result};
use reqwest::blocking::Client;
use std::time::Duration;
use tracing::debug;

/// Default timeout for HTTP requests (30 seconds)
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Fetches a URL into an in-memory buffer.
pub trait Transport {
    /// GET `url` and return the response body.
    ///
    /// Timeout and redirect policy are the implementation's concern;
    /// callers only observe success or failure.
    fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

/// Blocking HTTP client
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Create a new transport with the default timeout.
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .map_err(|e| Error::Init(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        debug!("Fetching {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| Error::Download(format!("Failed to fetch {url}: {e}")))?;

        if !response.status().is_success() {
            return Err(Error::Download(format!(
                "HTTP {} from {}",
                response.status(),
                url
            )));
        }

        let bytes = response
            .bytes()
            .map_err(|e| Error::Download(format!("Failed to read response: {e}")))?;

        Ok(bytes.to_vec())
    }
}
