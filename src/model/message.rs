//! The decomposed-message record.

use std::collections::BTreeMap;
use std::path::PathBuf;

use super::file::ExtractedFile;

/// Everything decomposed from one raw message.
///
/// Created once per input message and immutable thereafter; the caller
/// persists it into its own record schema. Header fields are read
/// literally from the top-level headers — in particular `date` is the raw
/// header value, not a normalized timestamp (normalization is the host
/// system's concern).
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DecomposedMessage {
    /// Raw `From` header value, trimmed. Empty when absent.
    pub from: String,

    /// Email addresses scanned from the `To` header, in match order.
    ///
    /// Always a list; empty when the header is absent.
    pub to: Vec<String>,

    /// Email addresses scanned from the `Cc` header, in match order.
    /// Same shape as `to`.
    pub cc: Vec<String>,

    /// Raw `Subject` header value, trimmed. Empty when absent.
    pub subject: String,

    /// Raw, unnormalized `Date` header value, trimmed. Empty when absent.
    pub date: String,

    /// Concatenated `text/plain` bodies, depth-first left-to-right,
    /// trimmed once after aggregation.
    pub text: String,

    /// Concatenated `text/html` bodies, same ordering and trimming.
    pub html: String,

    /// Extracted file parts, keyed by original file name. A later part
    /// declaring the same name overwrites the earlier entry.
    pub files: BTreeMap<String, ExtractedFile>,

    /// Storage paths of every file materialized at the destination, in
    /// walk order. Parts whose write failed do not appear here.
    pub attachment_paths: Vec<PathBuf>,

    /// Number of leaf MIME parts visited. Multipart containers are never
    /// counted.
    pub part_count: usize,
}
