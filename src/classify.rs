// src/classify.rs
use chrono::Utc;

use crate::feed::Incident;
use crate::timestamp::parse_timestamp;

/// Default window for "was this incident updated recently".
pub const DEFAULT_RECENT_HOURS: i64 = 4;

/// Status fragments that suggest an incident is over, across the common
/// status-page providers. Matched case-insensitively as substrings.
const RESOLVED_PATTERNS: [&str; 8] = [
    "resolved",
    "fixed",
    "closed",
    "completed",
    "recovered",
    "restored",
    "back to normal",
    "fully operational",
];

/// Whether the incident was published within the last `hours` hours.
/// An unparseable or missing timestamp is conservatively not recent.
pub fn is_recent_incident(incident: &Incident, hours: i64) -> bool {
    let Some(published) = parse_timestamp(&incident.published) else {
        return false;
    };
    let age = Utc::now().signed_duration_since(published);
    age.num_seconds() < hours * 3600
}

/// Whether the status text suggests the incident is resolved.
pub fn is_likely_resolved(incident: &Incident) -> bool {
    let status = incident.status.to_lowercase();
    RESOLVED_PATTERNS.iter().any(|p| status.contains(p))
}

/// Heuristic: an incident is likely active when it is recent and its status
/// does not read as resolved.
///
/// This cannot distinguish "still ongoing" from "resolved, but the feed entry
/// predates the resolution text": the feed only ever shows the latest state
/// of an entry.
pub fn is_likely_active(incident: &Incident, recent_hours: i64) -> bool {
    is_recent_incident(incident, recent_hours) && !is_likely_resolved(incident)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn incident(status: &str, published: String) -> Incident {
        Incident {
            title: "Test".into(),
            link: String::new(),
            status: status.into(),
            published,
        }
    }

    fn hours_ago(h: i64) -> String {
        (Utc::now() - Duration::hours(h)).to_rfc3339()
    }

    #[test]
    fn resolved_vocabulary_matches_case_insensitively() {
        for status in ["Resolved", "RESOLVED", "resolved", "Fixed", "Completed", "Back to normal", "Fully operational"] {
            assert!(
                is_likely_resolved(&incident(status, String::new())),
                "{status} should read as resolved"
            );
        }
    }

    #[test]
    fn in_progress_statuses_are_not_resolved() {
        for status in ["Investigating", "Identified", "Monitoring", "Unknown"] {
            assert!(
                !is_likely_resolved(&incident(status, String::new())),
                "{status} should not read as resolved"
            );
        }
    }

    #[test]
    fn recent_investigating_is_active() {
        assert!(is_likely_active(
            &incident("Investigating", hours_ago(1)),
            DEFAULT_RECENT_HOURS
        ));
    }

    #[test]
    fn old_investigating_is_not_active() {
        assert!(!is_likely_active(
            &incident("Investigating", hours_ago(48)),
            DEFAULT_RECENT_HOURS
        ));
    }

    #[test]
    fn recent_resolved_is_not_active() {
        assert!(!is_likely_active(
            &incident("Resolved", hours_ago(1)),
            DEFAULT_RECENT_HOURS
        ));
    }

    #[test]
    fn empty_published_is_neither_recent_nor_active() {
        let i = incident("Investigating", String::new());
        assert!(!is_recent_incident(&i, DEFAULT_RECENT_HOURS));
        assert!(!is_likely_active(&i, DEFAULT_RECENT_HOURS));
    }

    #[test]
    fn unparseable_published_is_not_recent() {
        let i = incident("Investigating", "yesterday-ish".into());
        assert!(!is_recent_incident(&i, DEFAULT_RECENT_HOURS));
    }

    #[test]
    fn rfc2822_published_is_recognized() {
        let ts = (Utc::now() - Duration::hours(1)).to_rfc2822();
        assert!(is_recent_incident(&incident("Investigating", ts), DEFAULT_RECENT_HOURS));
    }
}
