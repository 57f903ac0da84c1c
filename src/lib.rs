// src/lib.rs
// Public library surface for integration tests (and potential reuse).
//
// Pipeline: service lookup → cache-aware fetch → feed parse → per-incident
// classification → text report. Strictly sequential, one service per run.

pub mod cache;
pub mod classify;
pub mod error;
pub mod feed;
pub mod fetch;
pub mod report;
pub mod services;
pub mod timestamp;

// ---- Re-exports for stable public API ----
pub use cache::{CacheEntry, FeedCache};
pub use classify::{
    is_likely_active, is_likely_resolved, is_recent_incident, DEFAULT_RECENT_HOURS,
};
pub use error::{Error, Result};
pub use feed::{
    extract_status_from_html, parse_atom_feed, parse_feed, parse_rss_feed, FeedType, Incident,
    MAX_FEED_ENTRIES,
};
pub use fetch::{build_client, fetch_feed, MAX_FEED_SIZE_BYTES, USER_AGENT};
pub use report::{format_incidents, DEFAULT_REPORT_LIMIT};
pub use services::{default_services_path, CatalogLoader, Service, ServiceCatalog};
pub use timestamp::parse_timestamp;
