// src/timestamp.rs
use chrono::{DateTime, FixedOffset, Utc};

/// Parse a feed timestamp into a timezone-aware UTC instant.
///
/// Atom feeds use RFC 3339 (`2026-02-04T17:06:50Z`), RSS feeds use RFC 2822
/// (`Wed, 04 Feb 2026 17:06:50 +0000`). RFC 3339 is tried first. Anything
/// unparseable, including empty input, yields `None`.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::<FixedOffset>::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    DateTime::<FixedOffset>::parse_from_rfc2822(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
