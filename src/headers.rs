//! Top-level header extraction: envelope fields and address scanning.

use mail_parser::Message;

/// The top-level header fields of one message.
///
/// `from`/`subject`/`date` are the raw header values, trimmed, defaulting
/// to the empty string when absent. `to`/`cc` are always lists of bare
/// addresses, possibly empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Envelope {
    pub from: String,
    pub to: Vec<String>,
    pub cc: Vec<String>,
    pub subject: String,
    pub date: String,
}

/// Extract the envelope from a parsed message's top-level headers.
pub fn extract_envelope(message: &Message<'_>) -> Envelope {
    Envelope {
        from: raw_header(message, "From"),
        to: address_list(message, "To"),
        cc: address_list(message, "Cc"),
        subject: raw_header(message, "Subject"),
        date: raw_header(message, "Date"),
    }
}

fn raw_header(message: &Message<'_>, name: &str) -> String {
    message
        .header_raw(name)
        .map(str::trim)
        .unwrap_or_default()
        .to_string()
}

fn address_list(message: &Message<'_>, name: &str) -> Vec<String> {
    message
        .header_raw(name)
        .map(extract_addresses)
        .unwrap_or_default()
}

/// Scan every email-address-like substring out of a header value.
///
/// Matches runs of `[A-Za-z0-9_.-]` around a single `@`, left to right,
/// non-overlapping — display names, angle brackets and commas around the
/// addresses are ignored. Match order is preserved.
pub fn extract_addresses(value: &str) -> Vec<String> {
    let bytes = value.as_bytes();
    let mut found = Vec::new();
    let mut floor = 0; // left boundary: matches never overlap
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'@' {
            let mut start = i;
            while start > floor && is_address_byte(bytes[start - 1]) {
                start -= 1;
            }
            let mut end = i + 1;
            while end < bytes.len() && is_address_byte(bytes[end]) {
                end += 1;
            }
            if start < i && end > i + 1 {
                found.push(value[start..end].to_string());
                floor = end;
                i = end;
                continue;
            }
        }
        i += 1;
    }

    found
}

fn is_address_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'.' || b == b'-'
}
