//! vCard 3.0 record codec.
//!
//! Converts one raw record block (the text between `BEGIN:VCARD` and
//! `END:VCARD`, inclusive) into a [`Contact`] and back. The pipeline
//! treats this as an opaque pair: `parse(text) -> Contact`,
//! `serialize(&Contact) -> text`.
//!
//! Only version 3.0 is supported. Properties other than `FN`, `N`, `TEL`,
//! `EMAIL`, and `VERSION` pass through verbatim, parameters included.

use std::sync::OnceLock;

use regex::Regex;

use crate::contact::{Contact, Property};
use crate::error::CodecError;

/// The single interchange version this codec accepts.
pub const SUPPORTED_VERSION: &str = "3.0";

/// Block delimiter lines (case-sensitive).
pub const BEGIN_MARKER: &str = "BEGIN:VCARD";
/// See [`BEGIN_MARKER`].
pub const END_MARKER: &str = "END:VCARD";

static PROPERTY_RE: OnceLock<Regex> = OnceLock::new();

/// Content-line grammar: `NAME[;PARAMS]:VALUE`, with an optional group
/// prefix (`item1.EMAIL:...`).
fn property_re() -> &'static Regex {
    PROPERTY_RE.get_or_init(|| {
        Regex::new(r"^(?P<name>[A-Za-z0-9-]+(?:\.[A-Za-z0-9-]+)*)(?:;(?P<params>[^:]*))?:(?P<value>.*)$")
            .expect("property grammar regex is valid")
    })
}

/// Undoes RFC 2425 line folding: a line starting with a space or tab
/// continues the previous line.
fn unfold(block: &str) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    for raw in block.lines() {
        if let Some(rest) = raw.strip_prefix(' ').or_else(|| raw.strip_prefix('\t')) {
            if let Some(last) = lines.last_mut() {
                last.push_str(rest);
                continue;
            }
        }
        if !raw.is_empty() {
            lines.push(raw.to_string());
        }
    }
    lines
}

/// Parses one record block into a [`Contact`].
///
/// # Errors
///
/// Returns a [`CodecError`] if the block is missing its markers or
/// `VERSION` property, declares an unsupported version, or contains a
/// line that is not a property.
pub fn parse(block: &str) -> Result<Contact, CodecError> {
    let lines = unfold(block);

    if lines.first().map(String::as_str) != Some(BEGIN_MARKER) {
        return Err(CodecError::MissingBeginMarker);
    }
    if lines.last().map(String::as_str) != Some(END_MARKER) {
        return Err(CodecError::MissingEndMarker);
    }

    let mut contact = Contact::default();
    let mut version: Option<String> = None;

    for line in &lines[1..lines.len() - 1] {
        let caps = property_re()
            .captures(line)
            .ok_or_else(|| CodecError::MalformedProperty { line: line.clone() })?;

        let prop_name = caps.name("name").map_or("", |m| m.as_str());
        let params = caps.name("params").map(|m| m.as_str().to_string());
        let value = caps.name("value").map_or("", |m| m.as_str());

        // Grouped properties (item1.EMAIL) classify by their base name.
        let base = prop_name.rsplit('.').next().unwrap_or(prop_name);

        match base.to_ascii_uppercase().as_str() {
            "VERSION" => version = Some(value.to_string()),
            // First FN/N wins; the merge engine only ever reads one.
            "FN" => {
                if contact.full_name.is_none() {
                    contact.full_name = Some(value.to_string());
                }
            }
            "N" => {
                if contact.structured_name.is_none() {
                    contact.structured_name = Some(value.to_string());
                }
            }
            "TEL" => contact.phones.push(value.to_string()),
            "EMAIL" => contact.emails.push(value.to_string()),
            _ => {
                let name = prop_name.to_ascii_uppercase();
                contact.extras.push(match params {
                    Some(p) => Property::with_params(name, p, value),
                    None => Property::new(name, value),
                });
            }
        }
    }

    match version {
        None => Err(CodecError::MissingVersion),
        Some(v) if v != SUPPORTED_VERSION => Err(CodecError::UnsupportedVersion { found: v }),
        Some(_) => Ok(contact),
    }
}

/// Serializes a [`Contact`] back into one record block, CRLF-terminated.
#[must_use]
pub fn serialize(contact: &Contact) -> String {
    let mut out = String::new();
    out.push_str(BEGIN_MARKER);
    out.push_str("\r\n");
    out.push_str("VERSION:");
    out.push_str(SUPPORTED_VERSION);
    out.push_str("\r\n");

    if let Some(name) = &contact.structured_name {
        out.push_str("N:");
        out.push_str(name);
        out.push_str("\r\n");
    }
    if let Some(name) = &contact.full_name {
        out.push_str("FN:");
        out.push_str(name);
        out.push_str("\r\n");
    }
    for phone in &contact.phones {
        out.push_str("TEL:");
        out.push_str(phone);
        out.push_str("\r\n");
    }
    for email in &contact.emails {
        out.push_str("EMAIL:");
        out.push_str(email);
        out.push_str("\r\n");
    }
    for extra in &contact.extras {
        out.push_str(&extra.to_string());
        out.push_str("\r\n");
    }

    out.push_str(END_MARKER);
    out.push_str("\r\n");
    out
}
