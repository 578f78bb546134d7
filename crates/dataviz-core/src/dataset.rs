// File: crates/dataviz-core/src/dataset.rs
// Summary: Dataset loader; fetches a JSON document over HTTP or from disk and parses it into typed records.

use std::path::PathBuf;
use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::error::{ChartError, Result};

/// Source of raw JSON documents, addressed by URL.
pub trait DataSource {
    fn fetch(&self, url: &str) -> Result<String>;
}

/// Fetches `http(s)://` URLs with a blocking reqwest client; anything else is read from disk.
pub struct DefaultSource {
    client: reqwest::blocking::Client,
}

impl DefaultSource {
    pub fn new() -> Result<Self> {
        Self::with_timeout(Duration::from_secs(30))
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ChartError::Config(format!("http client: {e}")))?;
        Ok(Self { client })
    }

    fn fetch_http(&self, url: &str) -> Result<String> {
        let resp = self.client.get(url).send().map_err(|e| ChartError::network(url, e))?;
        let resp = resp.error_for_status().map_err(|e| ChartError::network(url, e))?;
        resp.text().map_err(|e| ChartError::network(url, e))
    }
}

impl DataSource for DefaultSource {
    fn fetch(&self, url: &str) -> Result<String> {
        info!(%url, "fetching dataset");
        let body = if is_http(url) { self.fetch_http(url)? } else { FileSource.fetch(url)? };
        debug!(%url, bytes = body.len(), "fetched dataset");
        Ok(body)
    }
}

/// Reads local files; `file://` prefixes are stripped.
#[derive(Clone, Copy, Debug, Default)]
pub struct FileSource;

impl DataSource for FileSource {
    fn fetch(&self, url: &str) -> Result<String> {
        let path = PathBuf::from(url.strip_prefix("file://").unwrap_or(url));
        std::fs::read_to_string(&path).map_err(|e| ChartError::network(path.display().to_string(), e))
    }
}

pub fn is_http(url: &str) -> bool {
    let lower = url.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Parse a JSON body into `T`; mismatches with the schema are parse errors.
pub fn parse_json<T: DeserializeOwned>(what: &str, body: &str) -> Result<T> {
    serde_json::from_str(body).map_err(|e| ChartError::parse(what, e))
}

/// Fetch `url` from `source` and parse the body as `T`.
pub fn load_json<T: DeserializeOwned>(source: &dyn DataSource, url: &str, what: &str) -> Result<T> {
    let body = source.fetch(url)?;
    parse_json(what, &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_detection() {
        assert!(is_http("https://example.com/a.json"));
        assert!(is_http("HTTP://example.com"));
        assert!(!is_http("file:///tmp/a.json"));
        assert!(!is_http("data/a.json"));
    }

    #[test]
    fn missing_file_is_network_error() {
        let err = FileSource.fetch("file:///definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ChartError::Network { .. }));
    }
}
