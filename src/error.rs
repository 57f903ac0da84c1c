// src/error.rs
use std::string::FromUtf8Error;

/// Errors surfaced by the feed pipeline.
///
/// Missing optional fields inside a well-formed feed entry are never errors;
/// they degrade to empty text or the "Unknown" status sentinel. Only
/// structural and resource violations end up here.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid XML: {0}")]
    MalformedFeed(String),

    #[error("feed size {size} exceeds limit of {limit} bytes")]
    FeedTooLarge { size: u64, limit: u64 },

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server replied 304 Not Modified but no cached copy exists")]
    NotModifiedWithoutCache,

    #[error("feed body is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] FromUtf8Error),

    #[error("invalid service catalog: {0}")]
    Catalog(#[from] toml::de::Error),

    #[error("cache record error: {0}")]
    CacheRecord(#[from] serde_json::Error),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
