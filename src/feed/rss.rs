// src/feed/rss.rs
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::{Error, Result};

use super::{extract_status_from_html, malformed, Incident, UNKNOWN_STATUS};

/// Parse an RSS incident feed: `item` elements anywhere under the document.
///
/// Same contract shape as [`parse_atom_feed`](super::parse_atom_feed):
/// structural invalidity fails, missing optional sub-elements degrade.
pub fn parse_rss_feed(content: &str, max_entries: usize) -> Result<Vec<Incident>> {
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);

    let mut incidents = Vec::new();
    let mut depth = 0usize;
    let mut saw_root = false;

    loop {
        match reader.read_event().map_err(malformed)? {
            Event::Start(e) => {
                saw_root = true;
                if e.local_name().as_ref() == b"item" {
                    if incidents.len() >= max_entries {
                        break;
                    }
                    incidents.push(read_item(&mut reader)?);
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

/// Read one `item` subtree; the reader is positioned just past its start tag.
fn read_item(reader: &mut Reader<&[u8]>) -> Result<Incident> {
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
                        b"link" => link = read_text(reader, &e)?,
                        b"pubDate" => published = read_text(reader, &e)?,
                        b"description" => {
                            status = extract_status_from_html(&read_text(reader, &e)?);
                        }
                        _ => depth += 1,
                    }
                } else {
                    depth += 1;
                }
            }
            Event::End(_) => {
                if depth == 0 {
                    break;
                }
                depth -= 1;
            }
            Event::Eof => return Err(Error::MalformedFeed("unexpected end of item".into())),
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
