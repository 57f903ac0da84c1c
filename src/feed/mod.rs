// src/feed/mod.rs
pub mod atom;
pub mod rss;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub use atom::parse_atom_feed;
pub use rss::parse_rss_feed;

/// Hard cap on entries read from a single feed, defending against
/// adversarially large documents. Entries past the cap are not visited.
pub const MAX_FEED_ENTRIES: usize = 100;

/// Status sentinel for entries without a recognizable status marker.
pub const UNKNOWN_STATUS: &str = "Unknown";

/// One status-page incident as represented by a single feed entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Incident {
    pub title: String,
    pub link: String,
    pub status: String,
    pub published: String,
}

/// Feed dialect of a service's status page. Flat two-case dispatch between
/// two parse functions with the same signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedType {
    Atom,
    Rss,
}

impl Default for FeedType {
    fn default() -> Self {
        FeedType::Atom
    }
}

/// Parse raw feed text into incidents according to the feed dialect.
pub fn parse_feed(feed_type: FeedType, content: &str, max_entries: usize) -> Result<Vec<Incident>> {
    match feed_type {
        FeedType::Atom => parse_atom_feed(content, max_entries),
        FeedType::Rss => parse_rss_feed(content, max_entries),
    }
}

static STATUS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<strong>(\w+)</strong>").expect("valid status regex")
});

/// Extract the most recent status keyword from an entry's HTML body.
///
/// Status markers appear as `<strong>Status</strong>`; providers prepend the
/// newest update, so only the first match matters. The input is already
/// XML-unescaped by the feed parser, hence literal `<strong>` tags here.
///
/// A single feed entry collapses an incident's whole lifecycle into its most
/// recent observed state; earlier states ("Investigating") become
/// unobservable once a later one ("Resolved") is prepended. Known limitation.
pub fn extract_status_from_html(html: &str) -> String {
    match STATUS_RE.captures(html) {
        Some(caps) => caps[1].to_string(),
        None => UNKNOWN_STATUS.to_string(),
    }
}

pub(crate) fn malformed(e: impl std::fmt::Display) -> Error {
    Error::MalformedFeed(e.to_string())
}
