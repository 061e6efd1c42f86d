//! Remote trip-record sources.
//!
//! [`HttpClient`] is the seam the fetcher talks through; [`BasicClient`] is
//! the plain `reqwest` implementation and [`ApiKey`] decorates any client
//! with an auth header.

mod basic;
mod client;
pub mod auth;

pub use auth::ApiKey;
pub use basic::BasicClient;
pub use client::HttpClient;

use anyhow::{Context, Result, bail};

/// Returns true when `source` should be downloaded rather than opened.
pub fn is_remote(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

/// Downloads the full body at `url`.
///
/// # Errors
///
/// Returns an error if the URL is invalid, the request fails, or the server
/// answers with a non-success status.
#[tracing::instrument(skip(client))]
pub async fn fetch_bytes<C: HttpClient + ?Sized>(client: &C, url: &str) -> Result<Vec<u8>> {
    let req = reqwest::Request::new(
        reqwest::Method::GET,
        url.parse().with_context(|| format!("invalid URL {url}"))?,
    );

    let resp = client.execute(req).await?;
    let status = resp.status();
    if !status.is_success() {
        bail!("{url} answered with HTTP {status}");
    }
    Ok(resp.bytes().await?.to_vec())
}
