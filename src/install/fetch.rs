//! Archive fetching.
//!
//! Provides the [`ArchiveFetcher`] seam and an HTTP implementation that
//! streams the response body straight to the extractor.

use anyhow::{bail, Result};
use reqwest::blocking::Client;
use std::io::Read;
use std::time::Duration;

/// Opens a readable stream for an archive URL.
pub trait ArchiveFetcher {
    /// Start fetching `url`, returning the body as a stream.
    fn open(&self, url: &str) -> Result<Box<dyn Read>>;
}

/// Fetches archives over HTTP/HTTPS.
pub struct HttpFetcher {
    client: Client,
    timeout: Option<Duration>,
}

impl HttpFetcher {
    /// Create a fetcher with no timeout of its own.
    pub fn new() -> Result<Self> {
        Self::with_timeout(None)
    }

    /// Create a fetcher with an optional overall request timeout.
    pub fn with_timeout(timeout: Option<Duration>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("native-deps/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;

        Ok(Self { client, timeout })
    }

    /// Get the configured timeout.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

impl ArchiveFetcher for HttpFetcher {
    fn open(&self, url: &str) -> Result<Box<dyn Read>> {
        let response = self.client.get(url).send()?;

        if !response.status().is_success() {
            bail!("HTTP {} fetching {}", response.status(), url);
        }

        tracing::debug!(
            "Streaming {} ({} bytes)",
            url,
            response
                .content_length()
                .map(|len| len.to_string())
                .unwrap_or_else(|| "unknown".to_string())
        );

        Ok(Box::new(response))
    }
}
