// src/feed/atom.rs
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::{Error, Result};

use super::{extract_status_from_html, malformed, Incident, UNKNOWN_STATUS};

/// Parse an Atom incident feed: `entry` elements directly under the feed root.
///
/// Structural invalidity (including empty input) fails with a malformed-feed
/// error; missing optional sub-elements degrade to per-field defaults.
pub fn parse_atom_feed(content: &str, max_entries: usize) -> Result<Vec<Incident>> {
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);

    let mut incidents = Vec::new();
    let mut depth = 0usize;
    let mut saw_root = false;

    loop {
        match reader.read_event().map_err(malformed)? {
            Event::Start(e) => {
                saw_root = true;
                if depth == 1 && e.local_name().as_ref() == b"entry" {
                    if incidents.len() >= max_entries {
                        break;
                    }
                    incidents.push(read_entry(&mut reader)?);
                } else {
                    depth += 1;
                }
            }
            Event::Empty(_) => saw_root = true,
            Event::End(_) => depth = depth.saturating_sub(1),
            Event::Eof => {
                if depth > 0 {
                    return Err(Error::MalformedFeed("unexpected end of document".into()));
                }
                break;
            }
            _ => {}
        }
    }

    if !saw_root {
        return Err(Error::MalformedFeed("no root element found".into()));
    }
    Ok(incidents)
}

/// Read one `entry` subtree; the reader is positioned just past its start tag.
fn read_entry(reader: &mut Reader<&[u8]>) -> Result<Incident> {
    let mut title = String::new();
    let mut link = String::new();
    let mut published = String::new();
    let mut status = UNKNOWN_STATUS.to_string();
    let mut depth = 0usize;

    loop {
        match reader.read_event().map_err(malformed)? {
            Event::Start(e) => {
                if depth == 0 {
                    match e.local_name().as_ref() {
                        b"title" => title = read_text(reader, &e)?,
                        b"published" => published = read_text(reader, &e)?,
                        b"content" => {
                            status = extract_status_from_html(&read_text(reader, &e)?);
                        }
                        b"link" => {
                            if link.is_empty() {
                                if let Some(href) = alternate_href(&e)? {
                                    link = href;
                                }
                            }
                            depth += 1;
                        }
                        _ => depth += 1,
                    }
                } else {
                    depth += 1;
                }
            }
            Event::Empty(e) => {
                if depth == 0 && e.local_name().as_ref() == b"link" && link.is_empty() {
                    if let Some(href) = alternate_href(&e)? {
                        link = href;
                    }
                }
            }
            Event::End(_) => {
                if depth == 0 {
                    break;
                }
                depth -= 1;
            }
            Event::Eof => return Err(Error::MalformedFeed("unexpected end of entry".into())),
            _ => {}
        }
    }

    Ok(Incident {
        title,
        link,
        status,
        published,
    })
}

fn read_text(reader: &mut Reader<&[u8]>, e: &BytesStart) -> Result<String> {
    let text = reader.read_text(e.name()).map_err(malformed)?;
    quick_xml::escape::unescape(&text)
        .map(|t| t.into_owned())
        .map_err(malformed)
}

/// `href` of a link carrying `rel="alternate"`, if this element is one.
fn alternate_href(e: &BytesStart) -> Result<Option<String>> {
    let mut rel = None;
    let mut href = None;
    for attr in e.attributes() {
        let attr = attr.map_err(malformed)?;
        match attr.key.local_name().as_ref() {
            b"rel" => rel = Some(attr.unescape_value().map_err(malformed)?.into_owned()),
            b"href" => href = Some(attr.unescape_value().map_err(malformed)?.into_owned()),
            _ => {}
        }
    }
    Ok(if rel.as_deref() == Some("alternate") {
        href
    } else {
        None
    })
}
