//! Loading input bytes from a local path or an HTTP(S) URL.

mod basic;
mod client;

pub use basic::BasicClient;
pub use client::HttpClient;

use anyhow::{Context, Result};
use std::time::Duration;
use tracing::debug;

/// GETs `url` and returns the response body.
///
/// # Errors
///
/// Fails on an unparseable URL, a transport error, or a non-2xx status.
pub async fn fetch_bytes<C: HttpClient>(client: &C, url: &str) -> Result<Vec<u8>> {
    let req = reqwest::Request::new(reqwest::Method::GET, url.parse()?);

    let resp = client.execute(req).await?.error_for_status()?;
    Ok(resp.bytes().await?.to_vec())
}

/// True for `http://` and `https://` sources.
pub fn is_remote(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

/// True when the source path (ignoring any URL query) ends in `.gz`.
pub fn is_gzipped(source: &str) -> bool {
    let path = source.split(['?', '#']).next().unwrap_or(source);
    path.to_ascii_lowercase().ends_with(".gz")
}

/// Reads the raw bytes of `source`, fetching it over HTTP when remote.
#[tracing::instrument(skip(timeout), fields(source = %source))]
pub async fn load_source(source: &str, timeout: Duration) -> Result<Vec<u8>> {
    let bytes = if is_remote(source) {
        let client = BasicClient::with_timeout(timeout)?;
        fetch_bytes(&client, source)
            .await
            .with_context(|| format!("failed to fetch '{source}'"))?
    } else {
        tokio::fs::read(source)
            .await
            .with_context(|| format!("failed to read '{source}'"))?
    };
    debug!(bytes = bytes.len(), "Source loaded");
    Ok(bytes)
}
