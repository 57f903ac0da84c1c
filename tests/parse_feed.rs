// tests/parse_feed.rs
use status_page_checker::{parse_atom_feed, parse_rss_feed, Error, MAX_FEED_ENTRIES};

const CLAUDE_ATOM: &str = include_str!("fixtures/claude/2026-02-04-history.atom");
const CLAUDE_RSS: &str = include_str!("fixtures/claude/2026-02-04-history.rss");

#[test]
fn atom_extracts_all_incident_fields() {
    let incidents = parse_atom_feed(CLAUDE_ATOM, MAX_FEED_ENTRIES).unwrap();
    assert!(incidents.len() >= 2);

    let first = &incidents[0];
    assert_eq!(first.title, "Elevated errors on Claude models");
    assert_eq!(first.link, "https://status.claude.com/incidents/pvbysfjjrf8m");
    assert_eq!(first.status, "Resolved");
    assert_eq!(first.published, "2026-02-04T17:06:50Z");
}

#[test]
fn atom_preserves_document_order() {
    let incidents = parse_atom_feed(CLAUDE_ATOM, MAX_FEED_ENTRIES).unwrap();
    assert_eq!(incidents[1].title, "Degraded performance on claude.ai");
    assert_eq!(incidents[1].published, "2026-01-28T09:14:02Z");
}

#[test]
fn rss_extracts_all_incident_fields() {
    let incidents = parse_rss_feed(CLAUDE_RSS, MAX_FEED_ENTRIES).unwrap();
    assert!(incidents.len() >= 2);

    let first = &incidents[0];
    assert_eq!(first.title, "Elevated errors on Claude models");
    assert_eq!(first.link, "https://status.claude.com/incidents/pvbysfjjrf8m");
    assert_eq!(first.status, "Resolved");
    assert_eq!(first.published, "Wed, 04 Feb 2026 17:06:50 +0000");
}

#[test]
fn empty_input_is_malformed() {
    assert!(matches!(
        parse_atom_feed("", MAX_FEED_ENTRIES),
        Err(Error::MalformedFeed(_))
    ));
    assert!(matches!(
        parse_rss_feed("", MAX_FEED_ENTRIES),
        Err(Error::MalformedFeed(_))
    ));
}

#[test]
fn non_xml_input_is_malformed() {
    assert!(matches!(
        parse_atom_feed("this is not a feed", MAX_FEED_ENTRIES),
        Err(Error::MalformedFeed(_))
    ));
    assert!(matches!(
        parse_rss_feed("this is not a feed", MAX_FEED_ENTRIES),
        Err(Error::MalformedFeed(_))
    ));
}

#[test]
fn truncated_document_is_malformed() {
    let truncated = "<feed xmlns=\"http://www.w3.org/2005/Atom\"><entry><title>Oops";
    assert!(parse_atom_feed(truncated, MAX_FEED_ENTRIES).is_err());
}

#[test]
fn mismatched_tags_are_malformed() {
    let bad = "<rss><channel><item><title>x</wrong></item></channel></rss>";
    assert!(parse_rss_feed(bad, MAX_FEED_ENTRIES).is_err());
}

#[test]
fn well_formed_feed_with_zero_entries_is_empty_not_error() {
    let atom = r#"<feed xmlns="http://www.w3.org/2005/Atom"><title>Quiet</title></feed>"#;
    assert_eq!(parse_atom_feed(atom, MAX_FEED_ENTRIES).unwrap(), vec![]);

    let rss = "<rss><channel><title>Quiet</title></channel></rss>";
    assert_eq!(parse_rss_feed(rss, MAX_FEED_ENTRIES).unwrap(), vec![]);
}

#[test]
fn missing_optional_fields_degrade_to_defaults() {
    let atom = r#"<feed xmlns="http://www.w3.org/2005/Atom"><entry></entry></feed>"#;
    let incidents = parse_atom_feed(atom, MAX_FEED_ENTRIES).unwrap();
    assert_eq!(incidents.len(), 1);
    assert_eq!(incidents[0].title, "");
    assert_eq!(incidents[0].link, "");
    assert_eq!(incidents[0].published, "");
    assert_eq!(incidents[0].status, "Unknown");

    let rss = "<rss><channel><item><title>Only a title</title></item></channel></rss>";
    let incidents = parse_rss_feed(rss, MAX_FEED_ENTRIES).unwrap();
    assert_eq!(incidents[0].title, "Only a title");
    assert_eq!(incidents[0].status, "Unknown");
}

#[test]
fn atom_ignores_non_alternate_links() {
    let atom = r#"<feed xmlns="http://www.w3.org/2005/Atom">
      <entry>
        <link rel="self" href="https://example.com/self"/>
        <link rel="alternate" href="https://example.com/incident"/>
      </entry>
    </feed>"#;
    let incidents = parse_atom_feed(atom, MAX_FEED_ENTRIES).unwrap();
    assert_eq!(incidents[0].link, "https://example.com/incident");
}

#[test]
fn entry_cap_is_enforced_for_atom() {
    let mut feed = String::from(r#"<feed xmlns="http://www.w3.org/2005/Atom">"#);
    for i in 0..150 {
        feed.push_str(&format!("<entry><title>Incident {i}</title></entry>"));
    }
    feed.push_str("</feed>");

    let incidents = parse_atom_feed(&feed, MAX_FEED_ENTRIES).unwrap();
    assert_eq!(incidents.len(), MAX_FEED_ENTRIES);
    assert_eq!(incidents[0].title, "Incident 0");

    let few = parse_atom_feed(&feed, 3).unwrap();
    assert_eq!(few.len(), 3);
}

#[test]
fn entry_cap_is_enforced_for_rss() {
    let mut feed = String::from("<rss><channel>");
    for i in 0..150 {
        feed.push_str(&format!("<item><title>Incident {i}</title></item>"));
    }
    feed.push_str("</channel></rss>");

    let incidents = parse_rss_feed(&feed, MAX_FEED_ENTRIES).unwrap();
    assert_eq!(incidents.len(), MAX_FEED_ENTRIES);
}

#[test]
fn rss_description_status_markers_are_unescaped_before_matching() {
    let rss = "<rss><channel><item>\
               <description>&lt;strong&gt;Investigating&lt;/strong&gt; - looking into it</description>\
               </item></channel></rss>";
    let incidents = parse_rss_feed(rss, MAX_FEED_ENTRIES).unwrap();
    assert_eq!(incidents[0].status, "Investigating");
}
