//! Namespaced-XML payload parsing.
//!
//! Legistar responses are WCF data-contract XML: every element lives in the
//! `LegistarWebAPI.Models.v1` namespace, and null fields appear as empty
//! elements with `i:nil="true"`. Field keys are the element's local name
//! with the namespace prefix stripped.

use std::collections::HashMap;

use quick_xml::events::Event;
use quick_xml::Reader;

/// Extract every record element with the given local name from `xml`.
///
/// Each record becomes a field-name → value map: one entry per child
/// element, keyed by local name, valued by text content (empty string for
/// nil/empty elements).
pub(crate) fn parse_records(
    xml: &str,
    record_local_name: &str,
) -> Result<Vec<HashMap<String, String>>, String> {
    // No trim_text here: entity references split a value into several text
    // fragments, and trimming each fragment would eat interior whitespace
    // ("Health &amp; Safety" must not become "Health& Safety"). Values are
    // trimmed once, at field end.
    let mut reader = Reader::from_str(xml);
    let mut buf = Vec::new();

    let mut records = Vec::new();
    let mut current: Option<HashMap<String, String>> = None;
    let mut field: Option<String> = None;
    let mut text = String::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let local = String::from_utf8_lossy(e.local_name().as_ref()).to_string();
                if local == record_local_name {
                    current = Some(HashMap::new());
                } else if current.is_some() && field.is_none() {
                    field = Some(local);
                    text.clear();
                }
            }
            Ok(Event::Empty(ref e)) => {
                let local = String::from_utf8_lossy(e.local_name().as_ref()).to_string();
                if local == record_local_name {
                    records.push(HashMap::new());
                } else if let Some(ref mut record) = current {
                    if field.is_none() {
                        record.insert(local, String::new());
                    }
                }
            }
            Ok(Event::Text(ref e)) => {
                if field.is_some() {
                    text.push_str(&String::from_utf8_lossy(e.as_ref()));
                }
            }
            // `&amp;` and friends arrive as their own events, between the
            // surrounding text fragments.
            Ok(Event::GeneralRef(ref e)) => {
                if field.is_some() {
                    let name = String::from_utf8_lossy(e.as_ref()).to_string();
                    match resolve_reference(&name) {
                        Some(ch) => text.push(ch),
                        None => return Err(format!("unknown entity reference '&{};'", name)),
                    }
                }
            }
            Ok(Event::End(ref e)) => {
                let local = String::from_utf8_lossy(e.local_name().as_ref()).to_string();
                if field.as_deref() == Some(local.as_str()) {
                    if let Some(ref mut record) = current {
                        record.insert(local, std::mem::take(&mut text).trim().to_string());
                    }
                    field = None;
                } else if local == record_local_name {
                    if let Some(record) = current.take() {
                        records.push(record);
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(format!("XML error at byte {}: {}", reader.buffer_position(), e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(records)
}

/// Resolve a predefined entity or a numeric character reference by its name
/// (the part between `&` and `;`).
fn resolve_reference(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => {
            let digits = name.strip_prefix('#')?;
            let code = match digits.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => digits.parse().ok()?,
            };
            char::from_u32(code)
        }
    }
}
