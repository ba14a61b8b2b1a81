#![forbid(unsafe_code)]

//! One-time structural assembly of the modal subtree.
//!
//! The host element's existing children become the dialog content; around
//! them the builder creates a scroll container, a backdrop overlay, the
//! dialog surface, an optional close button, and the two focus-trap
//! sentinels. Build runs exactly once per instance lifetime; re-activation
//! and re-attachment never rebuild.
//!
//! Resulting shape under the host element:
//!
//! ```text
//! host
//! └── scroll            (.modal-scroll)
//!     ├── trap_head     (.modal-focus-trap, tabindex 0)
//!     ├── overlay       (.modal-overlay)
//!     │   └── dialog    (.modal-dialog, aria-modal, tabindex -1)
//!     │       ├── close button?  (.modal-close)
//!     │       └── content        (.modal-content, original children)
//!     └── trap_tail     (.modal-focus-trap, tabindex 0)
//! ```

use modal_a11y::ARIA_MODAL;
use modal_dom::{Document, ElementKind, NodeId};

/// Class on the scroll container.
pub const CLASS_SCROLL: &str = "modal-scroll";
/// Class on the backdrop overlay.
pub const CLASS_OVERLAY: &str = "modal-overlay";
/// Class on the dialog surface.
pub const CLASS_DIALOG: &str = "modal-dialog";
/// Class on the content wrapper.
pub const CLASS_CONTENT: &str = "modal-content";
/// Class on the close-icon button.
pub const CLASS_CLOSE: &str = "modal-close";
/// Class on both focus-trap sentinels.
pub const CLASS_FOCUS_TRAP: &str = "modal-focus-trap";

/// Element references created by the one-time build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModalParts {
    /// Scrollable outermost container.
    pub scroll: NodeId,
    /// Backdrop overlay.
    pub overlay: NodeId,
    /// Dialog surface.
    pub dialog: NodeId,
    /// Wrapper holding the relocated content nodes.
    pub content: NodeId,
    /// Close-icon button, unless suppressed by configuration.
    pub button_close: Option<NodeId>,
    /// Sentinel before the overlay in tab order.
    pub trap_head: NodeId,
    /// Sentinel after the overlay in tab order.
    pub trap_tail: NodeId,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct BuildOptions {
    pub closable: bool,
    pub show_icon: bool,
}

pub(crate) fn build(doc: &mut Document, host: NodeId, opts: BuildOptions) -> ModalParts {
    let content_nodes: Vec<NodeId> = doc.children(host).to_vec();

    let scroll = doc.create_element(ElementKind::Container);
    doc.add_class(scroll, CLASS_SCROLL);

    let overlay = doc.create_element(ElementKind::Container);
    doc.add_class(overlay, CLASS_OVERLAY);

    let dialog = doc.create_element(ElementKind::Dialog);
    doc.set_attr(dialog, ARIA_MODAL, "true");
    doc.add_class(dialog, CLASS_DIALOG);
    doc.set_tab_index(dialog, Some(-1));

    let button_close = if opts.closable && opts.show_icon {
        let button = doc.create_element(ElementKind::Button);
        doc.add_class(button, CLASS_CLOSE);
        doc.set_attr(button, "type", "button");
        doc.set_text(button, "\u{00d7}");
        doc.append_child(dialog, button);
        Some(button)
    } else {
        None
    };

    let content = doc.create_element(ElementKind::Container);
    doc.add_class(content, CLASS_CONTENT);
    for node in content_nodes {
        doc.append_child(content, node);
    }
    doc.append_child(dialog, content);

    let trap_head = create_focus_trap(doc);
    let trap_tail = create_focus_trap(doc);

    doc.append_child(overlay, dialog);
    doc.append_child(scroll, trap_head);
    doc.append_child(scroll, overlay);
    doc.append_child(scroll, trap_tail);
    doc.append_child(host, scroll);

    ModalParts {
        scroll,
        overlay,
        dialog,
        content,
        button_close,
        trap_head,
        trap_tail,
    }
}

fn create_focus_trap(doc: &mut Document) -> NodeId {
    let trap = doc.create_element(ElementKind::Span);
    doc.add_class(trap, CLASS_FOCUS_TRAP);
    doc.set_tab_index(trap, Some(0));
    trap
}
