#![forbid(unsafe_code)]

//! Focus capture, containment, and restoration.
//!
//! All focus moves are frame-deferred: the manager only queues
//! [`FrameTask::Focus`] requests and the document applies them at the next
//! paint opportunity, re-checking that the target can still receive focus.
//! A restore target that has been detached in the meantime is therefore
//! skipped silently.

use modal_dom::{Document, FrameTask, NodeId};
use tracing::trace;

use crate::modal::structure::ModalParts;

/// Captures the pre-open focus target, keeps tab order inside the dialog
/// while active, and restores focus on deactivation.
#[derive(Debug, Default)]
pub struct FocusManager {
    last_focused: Option<NodeId>,
}

impl FocusManager {
    /// Manager with no captured target.
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember the element currently holding focus, if any. Called on a
    /// genuine activation edge; later activations overwrite the capture.
    pub fn capture(&mut self, doc: &Document) {
        self.last_focused = doc.focused();
        trace!(target = ?self.last_focused, "captured focus origin");
    }

    /// The captured restore target.
    pub fn last_focused(&self) -> Option<NodeId> {
        self.last_focused
    }

    /// Queue focus onto the dialog surface and reset its scroll container
    /// to the origin.
    pub fn focus_dialog(&self, doc: &mut Document, parts: &ModalParts) {
        doc.request_frame(FrameTask::Focus(parts.dialog));
        doc.request_frame(FrameTask::ScrollTo {
            node: parts.scroll,
            x: 0,
            y: 0,
        });
    }

    /// Queue focus restoration to the captured target. Validity (still
    /// attached, still focusable) is re-checked when the frame runs.
    pub fn restore(&self, doc: &mut Document) {
        if let Some(target) = self.last_focused {
            doc.request_frame(FrameTask::Focus(target));
        }
    }

    /// React to a focus change anywhere in the document while active.
    ///
    /// Landing on the leading sentinel wraps to the last focusable element
    /// inside the dialog; the trailing sentinel wraps to the first; any
    /// focus outside both the component subtree and the dialog subtree is
    /// pulled back onto the dialog itself.
    pub fn handle_focus_in(
        &self,
        doc: &mut Document,
        host: NodeId,
        parts: &ModalParts,
        active: bool,
    ) {
        if !active {
            return;
        }
        let Some(target) = doc.focused() else {
            return;
        };

        let candidates = modal_a11y::focus_candidates(doc, parts.dialog);

        if target == parts.trap_head {
            if let Some(&last) = candidates.last() {
                trace!(?last, "wrapping to last focusable");
                doc.request_frame(FrameTask::Focus(last));
            }
        } else if target == parts.trap_tail {
            if let Some(&first) = candidates.first() {
                trace!(?first, "wrapping to first focusable");
                doc.request_frame(FrameTask::Focus(first));
            }
        } else if is_outside(doc, host, parts.dialog, target) {
            trace!(?target, "focus escaped, pulling back to dialog");
            self.focus_dialog(doc, parts);
        }
    }
}

fn is_outside(doc: &Document, host: NodeId, dialog: NodeId, node: NodeId) -> bool {
    !(doc.contains(host, node) || doc.contains(dialog, node))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modal::structure::{build, BuildOptions};
    use modal_dom::ElementKind;

    fn setup() -> (Document, NodeId, ModalParts) {
        let mut doc = Document::new();
        let host = doc.create_element(ElementKind::Container);
        doc.append_child(doc.body(), host);
        let button = doc.create_element(ElementKind::Button);
        doc.set_text(button, "inside");
        doc.append_child(host, button);
        let parts = build(
            &mut doc,
            host,
            BuildOptions {
                closable: true,
                show_icon: true,
            },
        );
        (doc, host, parts)
    }

    #[test]
    fn capture_and_restore_roundtrip() {
        let (mut doc, _host, parts) = setup();
        let outside = doc.create_element(ElementKind::Button);
        doc.append_child(doc.body(), outside);
        doc.focus(outside);

        let mut manager = FocusManager::new();
        manager.capture(&doc);
        assert_eq!(manager.last_focused(), Some(outside));

        manager.focus_dialog(&mut doc, &parts);
        doc.run_frame();
        assert_eq!(doc.focused(), Some(parts.dialog));

        manager.restore(&mut doc);
        doc.run_frame();
        assert_eq!(doc.focused(), Some(outside));
    }

    #[test]
    fn restore_skips_detached_target() {
        let (mut doc, _host, _parts) = setup();
        let outside = doc.create_element(ElementKind::Button);
        doc.append_child(doc.body(), outside);
        doc.focus(outside);

        let mut manager = FocusManager::new();
        manager.capture(&doc);

        doc.remove(outside);
        manager.restore(&mut doc);
        doc.run_frame();
        assert_eq!(doc.focused(), None);
    }

    #[test]
    fn head_sentinel_wraps_to_last() {
        let (mut doc, host, parts) = setup();
        doc.focus(parts.trap_head);
        doc.take_events();

        let manager = FocusManager::new();
        manager.handle_focus_in(&mut doc, host, &parts, true);
        doc.run_frame();

        let candidates = modal_a11y::focus_candidates(&doc, parts.dialog);
        assert_eq!(doc.focused(), candidates.last().copied());
    }

    #[test]
    fn tail_sentinel_wraps_to_first() {
        let (mut doc, host, parts) = setup();
        doc.focus(parts.trap_tail);
        doc.take_events();

        let manager = FocusManager::new();
        manager.handle_focus_in(&mut doc, host, &parts, true);
        doc.run_frame();

        // First focusable inside the dialog is the close button.
        assert_eq!(doc.focused(), parts.button_close);
    }

    #[test]
    fn outside_focus_pulled_back_to_dialog() {
        let (mut doc, host, parts) = setup();
        let outside = doc.create_element(ElementKind::Button);
        doc.append_child(doc.body(), outside);
        doc.focus(outside);
        doc.take_events();

        let manager = FocusManager::new();
        manager.handle_focus_in(&mut doc, host, &parts, true);
        doc.run_frame();
        assert_eq!(doc.focused(), Some(parts.dialog));
    }

    #[test]
    fn inactive_modal_leaves_focus_alone() {
        let (mut doc, host, parts) = setup();
        let outside = doc.create_element(ElementKind::Button);
        doc.append_child(doc.body(), outside);
        doc.focus(outside);

        let manager = FocusManager::new();
        manager.handle_focus_in(&mut doc, host, &parts, false);
        doc.run_frame();
        assert_eq!(doc.focused(), Some(outside));
    }

    #[test]
    fn focus_inside_dialog_is_untouched() {
        let (mut doc, host, parts) = setup();
        let button = parts.button_close.expect("built with icon");
        doc.focus(button);
        doc.take_events();

        let manager = FocusManager::new();
        manager.handle_focus_in(&mut doc, host, &parts, true);
        doc.run_frame();
        assert_eq!(doc.focused(), Some(button));
    }

    #[test]
    fn sentinel_with_empty_dialog_is_noop() {
        let mut doc = Document::new();
        let host = doc.create_element(ElementKind::Container);
        doc.append_child(doc.body(), host);
        let parts = build(
            &mut doc,
            host,
            BuildOptions {
                closable: false,
                show_icon: false,
            },
        );
        doc.focus(parts.trap_head);
        doc.take_events();

        let manager = FocusManager::new();
        manager.handle_focus_in(&mut doc, host, &parts, true);
        doc.run_frame();
        assert_eq!(doc.focused(), Some(parts.trap_head));
    }
}
