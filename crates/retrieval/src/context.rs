//! Context block rendering.

use crate::types::Document;

/// Label used when the caller does not supply one.
pub const DEFAULT_LABEL: &str = "Document";

/// Render documents as one numbered, labeled block of grounding text.
///
/// Each document becomes `"{label} {i}\n---\n{content}\n\n"` with `i`
/// counting from 1, in input order.
pub fn build_context(docs: &[Document], label: &str) -> String {
    let mut context = String::new();
    for (i, doc) in docs.iter().enumerate() {
        context.push_str(&format!("{} {}\n---\n{}\n\n", label, i + 1, doc.content()));
    }
    context
}
