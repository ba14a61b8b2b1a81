#![forbid(unsafe_code)]

//! Accessibility rules for the modal-window widget.
//!
//! Two concerns live here: the allow-list deciding which elements
//! participate in tab order inside a dialog, and the derivation of a
//! dialog's accessible name from its content.
//!
//! # Invariants
//!
//! - [`focus_candidates`] returns elements in document order (pre-order
//!   traversal), excluding the queried root itself.
//! - [`dialog_label`] never returns an empty string; when no heading with
//!   text exists it falls back to [`DIALOG_LABEL_FALLBACK`].

use modal_dom::{Document, ElementKind, NodeId};

/// Accessible-name attribute.
pub const ARIA_LABEL: &str = "aria-label";
/// Accessible-description linkage attribute.
pub const ARIA_DESCRIBEDBY: &str = "aria-describedby";
/// Modal semantics attribute.
pub const ARIA_MODAL: &str = "aria-modal";

/// Fallback accessible name for a dialog with no heading.
pub const DIALOG_LABEL_FALLBACK: &str = "modal";

/// Whether an element belongs to the tab-order allow-list: editable
/// regions, explicit zero-tabindex elements, links with a destination,
/// enabled media controls, frames, enabled form controls, and disclosure
/// summaries.
pub fn is_focus_candidate(doc: &Document, node: NodeId) -> bool {
    let Some(el) = doc.element(node) else {
        return false;
    };
    let disabled = doc.has_attr(node, "disabled");
    if el.tab_index() == Some(0) && !disabled {
        return true;
    }
    match el.kind() {
        ElementKind::Editable => true,
        ElementKind::Link => doc.has_attr(node, "href"),
        ElementKind::Audio | ElementKind::Video => doc.has_attr(node, "controls"),
        ElementKind::Button | ElementKind::Select | ElementKind::TextArea => !disabled,
        ElementKind::Input => {
            !disabled && doc.attr(node, "type") != Some("hidden")
        }
        ElementKind::Frame | ElementKind::Summary => true,
        _ => doc.has_attr(node, "contenteditable"),
    }
}

/// All focus candidates under `root` in document order, excluding `root`.
pub fn focus_candidates(doc: &Document, root: NodeId) -> Vec<NodeId> {
    let mut out = Vec::new();
    collect(doc, root, root, &mut out);
    out
}

fn collect(doc: &Document, root: NodeId, node: NodeId, out: &mut Vec<NodeId>) {
    if node != root && is_focus_candidate(doc, node) {
        out.push(node);
    }
    for &child in doc.children(node) {
        collect(doc, root, child, out);
    }
}

/// First heading under `root` in document order, if any.
pub fn first_heading(doc: &Document, root: NodeId) -> Option<NodeId> {
    let is_heading = doc
        .element(root)
        .is_some_and(|el| matches!(el.kind(), ElementKind::Heading(_)));
    if is_heading {
        return Some(root);
    }
    doc.children(root)
        .iter()
        .find_map(|&child| first_heading(doc, child))
}

/// Accessible name for a dialog: the first heading's text with whitespace
/// collapsed, else [`DIALOG_LABEL_FALLBACK`].
pub fn dialog_label(doc: &Document, root: NodeId) -> String {
    let label = first_heading(doc, root)
        .map(|heading| collapse_whitespace(&doc.text_content(heading)))
        .unwrap_or_default();
    if label.is_empty() {
        DIALOG_LABEL_FALLBACK.to_owned()
    } else {
        label
    }
}

/// Trim and collapse runs of whitespace to single spaces.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
