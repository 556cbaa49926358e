//! `mailcarve` — a MIME decomposition engine for raw email messages.
//!
//! Given a raw RFC 5322 message (an arbitrarily nested multipart MIME tree)
//! and a caller-supplied message key, this crate produces the top-level
//! header fields, the concatenated plain-text and HTML bodies, and the set
//! of extracted file parts, each written to storage exactly once per
//! derived name. Malformed individual parts degrade locally; only an
//! unparsable top-level message fails the whole decomposition.

pub mod classify;
pub mod decompose;
pub mod error;
pub mod headers;
pub mod model;
pub mod sanitize;
pub mod store;
pub mod walk;
