// src/report.rs
use chrono::Local;

use crate::classify::{is_likely_active, DEFAULT_RECENT_HOURS};
use crate::feed::Incident;
use crate::timestamp::parse_timestamp;

/// How many incidents the history section shows by default.
pub const DEFAULT_REPORT_LIMIT: usize = 5;

/// Render a service's incident list as a human-readable report.
///
/// Incidents are assumed to arrive newest-first, as feeds list them; the
/// formatter does not reorder.
pub fn format_incidents(service_name: &str, incidents: &[Incident], limit: usize) -> String {
    let mut lines: Vec<String> = vec![format!("# {service_name} Status"), String::new()];

    if incidents.is_empty() {
        lines.push("No recent incidents.".to_string());
        return lines.join("\n");
    }

    let active: Vec<&Incident> = incidents
        .iter()
        .filter(|i| is_likely_active(i, DEFAULT_RECENT_HOURS))
        .collect();

    if !active.is_empty() {
        lines.push("## ACTIVE INCIDENTS".to_string());
        lines.push(String::new());
        for incident in &active {
            lines.push(format!(">>> [{}] {}", incident.status, incident.title));
            if !incident.link.is_empty() {
                lines.push(format!("    {}", incident.link));
            }
        }
        lines.push(String::new());
        lines.push("## Recent History".to_string());
        lines.push(String::new());
    } else {
        lines.push("No active incidents.".to_string());
        // Show when the last incident was.
        if let Some(last_time) = parse_timestamp(&incidents[0].published) {
            let utc_str = last_time.format("%Y-%m-%d %H:%M UTC");
            let local = last_time.with_timezone(&Local);
            lines.push(format!(
                "The last incident: {} ({})",
                utc_str,
                local.format("%H:%M %Z")
            ));
        }
        lines.push(String::new());
        lines.push("## Recent History".to_string());
        lines.push(String::new());
    }

    for incident in incidents.iter().take(limit) {
        lines.push(format!("- [{}] {}", incident.status, incident.title));
        if !incident.link.is_empty() {
            lines.push(format!("  {}", incident.link));
        }
    }

    lines.join("\n")
}
