//! Leaf part classification: plain text, HTML, named attachment,
//! unnamed-but-typed object, or unrecognized.

use std::path::PathBuf;

use mail_parser::{MessagePart, MimeHeaders, PartType};
use tracing::{debug, warn};

use crate::model::ExtractedFile;
use crate::sanitize;
use crate::store::PartStore;

/// What a leaf part turned out to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartKind {
    PlainText,
    Html,
    /// A part with a `Content-Disposition` filename.
    NamedAttachment,
    /// No disposition filename, but a `name` parameter on the content type.
    UnnamedTypedObject,
    /// Nothing to extract; the part is still counted.
    Unrecognized,
}

/// The contribution of one classified leaf to the decomposed message.
#[derive(Debug, Clone)]
pub struct ClassifiedPart {
    pub kind: PartKind,
    pub text: String,
    pub html: String,
    pub file: Option<ExtractedFile>,
    /// Set only when the file is materialized at the destination.
    pub attachment_path: Option<PathBuf>,
}

impl ClassifiedPart {
    fn unrecognized() -> Self {
        Self {
            kind: PartKind::Unrecognized,
            text: String::new(),
            html: String::new(),
            file: None,
            attachment_path: None,
        }
    }

    fn body(kind: PartKind, text: String, html: String) -> Self {
        Self {
            kind,
            text,
            html,
            file: None,
            attachment_path: None,
        }
    }
}

/// Classify one non-multipart part, extracting its bytes when it names a
/// file. First match wins:
///
/// 1. a disposition filename makes the part a named attachment, even when
///    its content type is `text/*`;
/// 2. `text/plain` contributes body text (a missing content type defaults
///    to `text/plain`);
/// 3. `text/html` contributes HTML;
/// 4. otherwise a `name` parameter on the content type recovers the part
///    as an unnamed-but-typed object; without one the part is unrecognized
///    and its payload is discarded.
pub fn classify_leaf(
    part: &MessagePart<'_>,
    message_key: &str,
    store: &mut dyn PartStore,
) -> ClassifiedPart {
    if let Some(filename) = part
        .content_disposition()
        .and_then(|cd| cd.attribute("filename"))
    {
        return extract_file(part, message_key, filename, PartKind::NamedAttachment, store);
    }

    let (ctype, subtype) = declared_content_type(part);
    if ctype.eq_ignore_ascii_case("text") && subtype.eq_ignore_ascii_case("plain") {
        return ClassifiedPart::body(PartKind::PlainText, decoded_text(part), String::new());
    }
    if ctype.eq_ignore_ascii_case("text") && subtype.eq_ignore_ascii_case("html") {
        return ClassifiedPart::body(PartKind::Html, String::new(), decoded_text(part));
    }

    if let Some(name) = part.content_type().and_then(|ct| ct.attribute("name")) {
        return extract_file(part, message_key, name, PartKind::UnnamedTypedObject, store);
    }

    debug!(
        content_type = %format!("{ctype}/{subtype}"),
        "part has no filename, text type, or name parameter; payload discarded"
    );
    ClassifiedPart::unrecognized()
}

/// Derive the storage name for a file-bearing part and persist its bytes,
/// unless that exact name was already materialized (dedup). A failed write
/// is absorbed: the entry is kept without bytes and the walk continues.
fn extract_file(
    part: &MessagePart<'_>,
    message_key: &str,
    declared_name: &str,
    kind: PartKind,
    store: &mut dyn PartStore,
) -> ClassifiedPart {
    let original_name = sanitize::strip_quotes(declared_name).to_string();
    let storage_name = sanitize::storage_name(message_key, &original_name);
    let content_id = part
        .content_id()
        .map(|id| sanitize::strip_angle_brackets(id).to_string());

    let mut materialized = true;
    if store.exists(&storage_name) {
        debug!(name = %storage_name, "already materialized, skipping write");
    } else if let Err(e) = store.save(&storage_name, part.contents()) {
        warn!(name = %storage_name, error = %e, "failed to write extracted part");
        materialized = false;
    }

    let attachment_path = materialized.then(|| store.path_of(&storage_name));
    ClassifiedPart {
        kind,
        text: String::new(),
        html: String::new(),
        file: Some(ExtractedFile {
            original_name,
            storage_name,
            content_id,
            materialized,
        }),
        attachment_path,
    }
}

/// Content type of a leaf, defaulting to `text/plain` when the part
/// declares none (the RFC 2045 default for message bodies).
fn declared_content_type<'a>(part: &'a MessagePart<'_>) -> (&'a str, &'a str) {
    match part.content_type() {
        Some(ct) => (ct.ctype(), ct.subtype().unwrap_or("")),
        None => ("text", "plain"),
    }
}

/// Decode a text payload. mail-parser hands known charsets over already
/// decoded; raw byte payloads are decoded via their declared charset label,
/// falling back to lossy UTF-8.
fn decoded_text(part: &MessagePart<'_>) -> String {
    match &part.body {
        PartType::Text(text) | PartType::Html(text) => text.as_ref().to_string(),
        PartType::Binary(bytes) | PartType::InlineBinary(bytes) => {
            let charset = part.content_type().and_then(|ct| ct.attribute("charset"));
            decode_text_bytes(bytes.as_ref(), charset)
        }
        PartType::Message(_) | PartType::Multipart(_) => String::new(),
    }
}

fn decode_text_bytes(bytes: &[u8], charset: Option<&str>) -> String {
    if let Some(label) = charset {
        if let Some(encoding) = encoding_rs::Encoding::for_label(label.as_bytes()) {
            let (decoded, _, _) = encoding.decode(bytes);
            return decoded.into_owned();
        }
        warn!(charset = label, "unknown charset, decoding as lossy UTF-8");
    }
    String::from_utf8_lossy(bytes).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use mail_parser::MessageParser;

    fn leaf<'a>(message: &'a mail_parser::Message<'a>) -> &'a MessagePart<'a> {
        message.part(0).unwrap()
    }

    #[test]
    fn test_classify_plain_text() {
        let raw = b"Content-Type: text/plain\r\n\r\nhello\r\n";
        let message = MessageParser::default().parse(&raw[..]).unwrap();
        let mut store = MemoryStore::new();

        let got = classify_leaf(leaf(&message), "1-a.eml", &mut store);
        assert_eq!(got.kind, PartKind::PlainText);
        assert_eq!(got.text.trim(), "hello");
        assert!(got.html.is_empty());
        assert!(got.file.is_none());
        assert_eq!(store.write_count(), 0);
    }

    #[test]
    fn test_classify_missing_content_type_defaults_to_text() {
        let raw = b"Subject: x\r\n\r\nimplicit plain body\r\n";
        let message = MessageParser::default().parse(&raw[..]).unwrap();
        let mut store = MemoryStore::new();

        let got = classify_leaf(leaf(&message), "1-a.eml", &mut store);
        assert_eq!(got.kind, PartKind::PlainText);
        assert_eq!(got.text.trim(), "implicit plain body");
    }

    #[test]
    fn test_classify_html() {
        let raw = b"Content-Type: text/html\r\n\r\n<b>B</b>\r\n";
        let message = MessageParser::default().parse(&raw[..]).unwrap();
        let mut store = MemoryStore::new();

        let got = classify_leaf(leaf(&message), "1-a.eml", &mut store);
        assert_eq!(got.kind, PartKind::Html);
        assert_eq!(got.html.trim(), "<b>B</b>");
        assert!(got.text.is_empty());
    }

    #[test]
    fn test_disposition_filename_wins_over_text_type() {
        // A text/plain part with a disposition filename is a named
        // attachment; its bytes must not leak into the text body.
        let raw = b"Content-Type: text/plain\r\n\
                    Content-Disposition: attachment; filename=\"notes.txt\"\r\n\
                    \r\n\
                    attached text\r\n";
        let message = MessageParser::default().parse(&raw[..]).unwrap();
        let mut store = MemoryStore::new();

        let got = classify_leaf(leaf(&message), "9-box.eml", &mut store);
        assert_eq!(got.kind, PartKind::NamedAttachment);
        assert!(got.text.is_empty());

        let file = got.file.unwrap();
        assert_eq!(file.original_name, "notes.txt");
        assert_eq!(file.storage_name, "9-boxeml.notes.txt");
        assert!(file.materialized);
        assert_eq!(store.write_count(), 1);
    }

    #[test]
    fn test_unnamed_typed_object_from_name_parameter() {
        let raw = b"Content-Type: image/png; name=\"chart.png\"\r\n\
                    Content-ID: <img001@local>\r\n\
                    Content-Transfer-Encoding: base64\r\n\
                    \r\n\
                    aGVsbG8=\r\n";
        let message = MessageParser::default().parse(&raw[..]).unwrap();
        let mut store = MemoryStore::new();

        let got = classify_leaf(leaf(&message), "5-img.eml", &mut store);
        assert_eq!(got.kind, PartKind::UnnamedTypedObject);

        let file = got.file.unwrap();
        assert_eq!(file.original_name, "chart.png");
        assert_eq!(file.content_id.as_deref(), Some("img001@local"));
        assert_eq!(store.get("5-imgeml.chart.png"), Some(&b"hello"[..]));
    }

    #[test]
    fn test_typed_part_without_name_is_unrecognized() {
        let raw = b"Content-Type: application/pdf\r\n\
                    Content-Transfer-Encoding: base64\r\n\
                    \r\n\
                    aGVsbG8=\r\n";
        let message = MessageParser::default().parse(&raw[..]).unwrap();
        let mut store = MemoryStore::new();

        let got = classify_leaf(leaf(&message), "5-img.eml", &mut store);
        assert_eq!(got.kind, PartKind::Unrecognized);
        assert!(got.file.is_none());
        assert_eq!(store.write_count(), 0);
    }

    #[test]
    fn test_dedup_skips_write_but_keeps_entry() {
        let raw = b"Content-Type: application/octet-stream; name=data.bin\r\n\
                    Content-Transfer-Encoding: base64\r\n\
                    \r\n\
                    AAEC\r\n";
        let message = MessageParser::default().parse(&raw[..]).unwrap();
        let mut store = MemoryStore::new();

        let first = classify_leaf(leaf(&message), "3-x.eml", &mut store);
        let second = classify_leaf(leaf(&message), "3-x.eml", &mut store);

        assert_eq!(store.write_count(), 1);
        assert_eq!(first.file, second.file);
        assert!(second.attachment_path.is_some());
    }

    #[test]
    fn test_decode_text_bytes_known_charset() {
        // "café" in ISO-8859-1
        let bytes = [0x63, 0x61, 0x66, 0xE9];
        assert_eq!(decode_text_bytes(&bytes, Some("iso-8859-1")), "café");
    }

    #[test]
    fn test_decode_text_bytes_unknown_charset_falls_back() {
        let got = decode_text_bytes(b"plain", Some("x-no-such-charset"));
        assert_eq!(got, "plain");
    }
}
