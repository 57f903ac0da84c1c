// src/fetch.rs
use std::time::Duration;

use reqwest::{header, Client, StatusCode};
use tracing::debug;

use crate::cache::FeedCache;
use crate::error::{Error, Result};

pub const USER_AGENT: &str = "status-page-checker/1.0";

pub const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// 1 MiB cap; status feeds are typically well under 100 KiB.
pub const MAX_FEED_SIZE_BYTES: u64 = 1024 * 1024;

/// Build the HTTP client used for feed fetches: fixed identifying
/// user-agent, fixed timeout, no retries.
pub fn build_client() -> Result<Client> {
    Ok(Client::builder()
        .user_agent(USER_AGENT)
        .timeout(FETCH_TIMEOUT)
        .build()?)
}

/// Fetch feed content from `url`, using the cache when one is supplied.
///
/// A fresh cache hit short-circuits the network entirely. Otherwise the
/// request carries `If-None-Match` when a cached ETag is known; a 304 reply
/// re-stores the cached body (refreshing its timestamp) and returns it.
/// The body is size-guarded twice: once against the declared Content-Length
/// and again while reading, so a server that lies about or omits the length
/// still cannot exceed `max_size_bytes`.
pub async fn fetch_feed(
    client: &Client,
    url: &str,
    cache: Option<&FeedCache>,
    cache_key: Option<&str>,
    max_age_secs: i64,
    max_size_bytes: u64,
) -> Result<String> {
    let key = cache_key.unwrap_or(url);

    if let Some(cache) = cache {
        if let Some(fresh) = cache.get_if_fresh(key, max_age_secs) {
            debug!(key, "serving feed from fresh cache");
            return Ok(fresh.content);
        }
    }

    let cached_etag = cache.and_then(|c| c.get(key)).and_then(|e| e.etag);

    let mut request = client.get(url);
    if let Some(etag) = &cached_etag {
        request = request.header(header::IF_NONE_MATCH, etag.as_str());
    }

    let response = request.send().await?;

    if response.status() == StatusCode::NOT_MODIFIED {
        if let Some(cache) = cache {
            if let Some(entry) = cache.get(key) {
                debug!(key, "not modified, refreshing cached copy");
                cache.store(key, &entry.content, cached_etag.as_deref())?;
                return Ok(entry.content);
            }
        }
        return Err(Error::NotModifiedWithoutCache);
    }

    let mut response = response.error_for_status()?;

    if let Some(declared) = response.content_length() {
        if declared > max_size_bytes {
            return Err(Error::FeedTooLarge {
                size: declared,
                limit: max_size_bytes,
            });
        }
    }

    let etag = response
        .headers()
        .get(header::ETAG)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    // Capped read regardless of what Content-Length claimed.
    let mut body: Vec<u8> = Vec::new();
    while let Some(chunk) = response.chunk().await? {
        if body.len() as u64 + chunk.len() as u64 > max_size_bytes {
            return Err(Error::FeedTooLarge {
                size: body.len() as u64 + chunk.len() as u64,
                limit: max_size_bytes,
            });
        }
        body.extend_from_slice(&chunk);
    }

    let content = String::from_utf8(body)?;

    if let Some(cache) = cache {
        cache.store(key, &content, etag.as_deref())?;
    }

    Ok(content)
}
