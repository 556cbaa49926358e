//! Recursive walk over the MIME part tree, aggregating the contributions
//! of every leaf.

use std::collections::BTreeMap;
use std::path::PathBuf;

use mail_parser::{Message, MessagePartId, PartType};
use tracing::warn;

use crate::classify::classify_leaf;
use crate::model::ExtractedFile;
use crate::store::PartStore;

/// Default bound on multipart nesting. Input nested deeper than this is
/// treated as a single unrecognized leaf instead of recursing further, so
/// adversarial nesting cannot exhaust the stack.
pub const MAX_WALK_DEPTH: usize = 100;

/// Everything a subtree contributed: concatenated bodies, extracted files,
/// leaf count, and the storage paths of materialized files.
#[derive(Debug, Default)]
pub struct WalkOutcome {
    pub text: String,
    pub html: String,
    pub files: BTreeMap<String, ExtractedFile>,
    pub part_count: usize,
    pub attachment_paths: Vec<PathBuf>,
}

/// Walk the whole message tree depth-first, left to right.
///
/// Containers — multipart parts and attached `message/rfc822` parts —
/// recurse over their children in declared order; leaves are classified
/// and their contributions accumulated. Every leaf increments
/// `part_count`, containers never do.
pub fn walk_message(
    message: &Message<'_>,
    message_key: &str,
    store: &mut dyn PartStore,
    max_depth: usize,
) -> WalkOutcome {
    let mut outcome = WalkOutcome::default();
    walk_part(message, 0, message_key, store, 0, max_depth, &mut outcome);
    outcome
}

fn walk_part(
    message: &Message<'_>,
    part_id: MessagePartId,
    message_key: &str,
    store: &mut dyn PartStore,
    depth: usize,
    max_depth: usize,
    outcome: &mut WalkOutcome,
) {
    let Some(part) = message.part(part_id) else {
        return;
    };

    match &part.body {
        PartType::Multipart(children) => {
            if depth >= max_depth {
                warn!(depth, "multipart nesting exceeds depth bound, failing closed");
                outcome.part_count += 1;
                return;
            }
            for child_id in children {
                walk_part(
                    message,
                    *child_id,
                    message_key,
                    store,
                    depth + 1,
                    max_depth,
                    outcome,
                );
            }
        }
        // An attached message/rfc822 is a container too: its body is a
        // full message whose own tree contributes like any other subtree.
        PartType::Message(nested) => {
            if depth >= max_depth {
                warn!(depth, "multipart nesting exceeds depth bound, failing closed");
                outcome.part_count += 1;
                return;
            }
            walk_part(nested, 0, message_key, store, depth + 1, max_depth, outcome);
        }
        _ => {
            let classified = classify_leaf(part, message_key, store);
            outcome.part_count += 1;
            outcome.text.push_str(&classified.text);
            outcome.html.push_str(&classified.html);
            if let Some(file) = classified.file {
                outcome.files.insert(file.original_name.clone(), file);
            }
            if let Some(path) = classified.attachment_path {
                outcome.attachment_paths.push(path);
            }
        }
    }
}
