//! Top-level entry point: one raw message in, one decomposed record out.

use mail_parser::MessageParser;

use crate::error::{CarveError, Result};
use crate::headers::extract_envelope;
use crate::model::DecomposedMessage;
use crate::store::PartStore;
use crate::walk::{walk_message, MAX_WALK_DEPTH};

/// Decomposes raw messages into [`DecomposedMessage`] records.
///
/// Stateless across messages apart from the reusable parser; decompositions
/// of distinct messages are independent except for the shared destination
/// observed through the [`PartStore`].
pub struct Decomposer {
    parser: MessageParser,
    max_depth: usize,
}

impl Default for Decomposer {
    fn default() -> Self {
        Self {
            parser: MessageParser::default(),
            max_depth: MAX_WALK_DEPTH,
        }
    }
}

impl Decomposer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the multipart nesting bound.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Decompose one raw message.
    ///
    /// `message_key` scopes storage-name derivation; any stable,
    /// unique-per-message string works (the host system conventionally
    /// passes `<id>-<original-file-name>`).
    ///
    /// An unparsable top-level message fails with [`CarveError::Format`].
    /// Every per-part condition (undecodable payload, missing name
    /// parameter, failed storage write) degrades locally and is reflected
    /// only in the shape of the returned record.
    pub fn decompose(
        &self,
        raw: &[u8],
        message_key: &str,
        store: &mut dyn PartStore,
    ) -> Result<DecomposedMessage> {
        let message = self
            .parser
            .parse(raw)
            .ok_or_else(|| CarveError::Format(message_key.to_string()))?;

        let envelope = extract_envelope(&message);
        let outcome = walk_message(&message, message_key, store, self.max_depth);

        Ok(DecomposedMessage {
            from: envelope.from,
            to: envelope.to,
            cc: envelope.cc,
            subject: envelope.subject,
            date: envelope.date,
            text: outcome.text.trim().to_string(),
            html: outcome.html.trim().to_string(),
            files: outcome.files,
            attachment_paths: outcome.attachment_paths,
            part_count: outcome.part_count,
        })
    }
}
