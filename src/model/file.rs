//! Extracted file part metadata.

/// One file part extracted from a message.
///
/// Created during the tree walk; lives until the caller deletes the staged
/// output it refers to.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ExtractedFile {
    /// The file name the part declared (disposition `filename` or
    /// content-type `name` parameter, quotes stripped).
    pub original_name: String,

    /// The derived, deduplicated on-disk name. A pure function of the
    /// message key and `original_name`.
    pub storage_name: String,

    /// `Content-ID` the part declared, angle brackets stripped.
    ///
    /// A back-reference other parts may use (e.g. images embedded in
    /// HTML) — never an ownership relation, never used for naming.
    pub content_id: Option<String>,

    /// `false` only when the storage write failed and was absorbed: the
    /// entry is kept so the caller can surface the gap to an operator.
    pub materialized: bool,
}
