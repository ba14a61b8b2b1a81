#![forbid(unsafe_code)]

//! The modal window widget.
//!
//! `ModalWindow` owns one host element in a [`Document`]. On first attach
//! it reads its build-time flags, assembles the modal subtree around the
//! host's content, and subscribes its document-level listeners; afterwards
//! every stimulus — method calls, observed attribute mutation, user input,
//! timer completions — funnels through the `set_active` reconciler.
//!
//! # Invariants
//!
//! - The `active` attribute mirror always reflects the most recent
//!   `set_active` value, however redundant the call.
//! - `close()` pushes exactly one close notification per call, even when
//!   the modal was already closed.
//! - The structure is built once; re-activation and detach/re-attach never
//!   rebuild.
//!
//! # Failure Modes
//!
//! - Calls before the first attach (no structure yet) update flags but
//!   skip presentation work.
//! - Events arriving while detached are ignored; timers still complete so
//!   an interrupted transition can finish its cleanup.

use std::time::Duration;

use modal_dom::{Document, Event, EventType, Key, ListenerId, NodeId, TimerId};
use tracing::debug;

use crate::modal::focus::FocusManager;
use crate::modal::policy::{DismissPolicy, DismissRequest};
use crate::modal::structure::{build, BuildOptions, ModalParts};
use crate::modal::transition::{Phase, TransitionController};

const ACTIVE: &str = "active";
const ANIMATED: &str = "animated";
const CLOSE: &str = "close";
const CLOSE_TITLE: &str = "Close";
const NO_ICON: &str = "no-icon";
const NOCLICK: &str = "noclick";
const STATIC: &str = "static";
const CLOSABLE: &str = "closable";
const TRUE: &str = "true";
const FALSE: &str = "false";

/// Notification emitted by the widget, drained via
/// [`ModalWindow::take_events`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalEvent {
    /// `close()` was invoked (programmatically or by a user gesture).
    Close,
}

/// Attribute-driven modal dialog widget.
#[derive(Debug)]
pub struct ModalWindow {
    host: NodeId,
    parts: Option<ModalParts>,
    transition: TransitionController,
    focus: FocusManager,
    is_active: bool,
    is_animated: bool,
    is_static: bool,
    closable: bool,
    show_icon: bool,
    no_click: bool,
    connected: bool,
    focusin_listener: Option<ListenerId>,
    keydown_listener: Option<ListenerId>,
    emitted: Vec<ModalEvent>,
}

impl ModalWindow {
    /// Create a widget for `host`. Nothing happens until
    /// [`attach`](Self::attach).
    pub fn new(host: NodeId) -> Self {
        Self {
            host,
            parts: None,
            transition: TransitionController::new(),
            focus: FocusManager::new(),
            is_active: false,
            is_animated: true,
            is_static: false,
            closable: true,
            show_icon: true,
            no_click: false,
            connected: false,
            focusin_listener: None,
            keydown_listener: None,
            emitted: Vec::new(),
        }
    }

    /// Override the animation duration (default 250 ms).
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.transition = TransitionController::with_duration(duration);
        self
    }

    // --- Lifecycle ---

    /// Attach to the document: build the structure once (reading the
    /// build-time flags), apply the observed attributes, and subscribe the
    /// document-level listeners.
    pub fn attach(&mut self, doc: &mut Document) {
        if self.parts.is_none() {
            self.closable = doc.attr(self.host, CLOSABLE) != Some(FALSE);
            self.show_icon = !doc.has_attr(self.host, NO_ICON);
            self.no_click = doc.has_attr(self.host, NOCLICK);

            let parts = build(
                doc,
                self.host,
                BuildOptions {
                    closable: self.closable,
                    show_icon: self.show_icon,
                },
            );
            self.parts = Some(parts);

            self.apply_animated(doc);
            self.apply_close_title(doc);
            self.apply_label(doc);
            self.apply_description(doc);
            self.apply_static(doc);
            self.apply_active(doc);
        }

        self.add_listeners(doc);
        self.connected = true;
    }

    /// Detach: unsubscribe listeners. The structure and state are kept, so
    /// a later [`attach`](Self::attach) resumes without rebuilding.
    pub fn detach(&mut self, doc: &mut Document) {
        self.remove_listeners(doc);
        self.connected = false;
    }

    fn add_listeners(&mut self, doc: &mut Document) {
        // Prevent doubles on repeated attach.
        self.remove_listeners(doc);
        self.focusin_listener = Some(doc.add_listener(EventType::FocusIn));
        self.keydown_listener = Some(doc.add_listener(EventType::KeyDown));
    }

    fn remove_listeners(&mut self, doc: &mut Document) {
        if let Some(id) = self.focusin_listener.take() {
            doc.remove_listener(id);
        }
        if let Some(id) = self.keydown_listener.take() {
            doc.remove_listener(id);
        }
    }

    // --- Public API ---

    /// Open the modal.
    pub fn open(&mut self, doc: &mut Document) {
        debug!("open requested");
        self.set_active(doc, true);
    }

    /// Close the modal. Emits one [`ModalEvent::Close`] per call, even when
    /// already closed.
    pub fn close(&mut self, doc: &mut Document) {
        debug!("close requested");
        self.set_active(doc, false);
        self.emitted.push(ModalEvent::Close);
    }

    /// Drain emitted notifications.
    pub fn take_events(&mut self) -> Vec<ModalEvent> {
        std::mem::take(&mut self.emitted)
    }

    // --- Accessors ---

    /// The host element.
    pub fn host(&self) -> NodeId {
        self.host
    }

    /// Built structure, if attached at least once.
    pub fn parts(&self) -> Option<&ModalParts> {
        self.parts.as_ref()
    }

    /// Canonical open/closed state.
    pub fn is_active(&self) -> bool {
        self.is_active
    }

    /// Current transition phase.
    pub fn phase(&self) -> Phase {
        self.transition.phase()
    }

    /// True strictly during the animation window.
    pub fn is_transitioning(&self) -> bool {
        self.transition.is_transitioning()
    }

    /// The dismissal policy in force.
    pub fn policy(&self) -> DismissPolicy {
        DismissPolicy {
            closable: self.closable,
            is_static: self.is_static,
            no_click: self.no_click,
        }
    }

    // --- Attribute observation ---

    /// Set an attribute on the host element, running the observer when the
    /// value actually changes.
    pub fn set_attribute(&mut self, doc: &mut Document, name: &str, value: &str) {
        let old = doc.attr(self.host, name).map(str::to_owned);
        if old.as_deref() == Some(value) {
            return;
        }
        doc.set_attr(self.host, name, value);
        self.attribute_changed(doc, name);
    }

    /// Remove an attribute from the host element, running the observer if
    /// it was present.
    pub fn remove_attribute(&mut self, doc: &mut Document, name: &str) {
        if !doc.has_attr(self.host, name) {
            return;
        }
        doc.remove_attr(self.host, name);
        self.attribute_changed(doc, name);
    }

    /// Re-read one observed attribute from the host element. Build-time
    /// attributes and unknown names are ignored.
    pub fn attribute_changed(&mut self, doc: &mut Document, name: &str) {
        match name {
            ACTIVE => self.apply_active(doc),
            ANIMATED => self.apply_animated(doc),
            CLOSE => self.apply_close_title(doc),
            STATIC => self.apply_static(doc),
            modal_a11y::ARIA_DESCRIBEDBY => self.apply_description(doc),
            _ => {}
        }
    }

    fn apply_animated(&mut self, doc: &Document) {
        self.is_animated = doc.attr(self.host, ANIMATED) != Some(FALSE);
    }

    fn apply_static(&mut self, doc: &Document) {
        self.is_static = doc.attr(self.host, STATIC) == Some(TRUE);
    }

    fn apply_close_title(&mut self, doc: &mut Document) {
        let title = doc
            .attr(self.host, CLOSE)
            .unwrap_or(CLOSE_TITLE)
            .to_owned();
        if let Some(button) = self.parts.and_then(|parts| parts.button_close) {
            doc.set_attr(button, "title", &title);
            doc.set_attr(button, modal_a11y::ARIA_LABEL, &title);
        }
    }

    fn apply_label(&mut self, doc: &mut Document) {
        let Some(parts) = self.parts else { return };
        let label = modal_a11y::dialog_label(doc, self.host);
        doc.set_attr(parts.dialog, modal_a11y::ARIA_LABEL, &label);
    }

    fn apply_description(&mut self, doc: &mut Document) {
        let Some(parts) = self.parts else { return };
        match doc.attr(self.host, modal_a11y::ARIA_DESCRIBEDBY).map(str::to_owned) {
            Some(value) => doc.set_attr(parts.dialog, modal_a11y::ARIA_DESCRIBEDBY, &value),
            None => doc.remove_attr(parts.dialog, modal_a11y::ARIA_DESCRIBEDBY),
        }
    }

    fn apply_active(&mut self, doc: &mut Document) {
        let active = doc.attr(self.host, ACTIVE) == Some(TRUE);
        self.set_active(doc, active);
    }

    // --- Reconciler ---

    /// Reconcile to the target state. Idempotent: a redundant call
    /// refreshes the attribute mirror but never restarts an identical
    /// transition.
    fn set_active(&mut self, doc: &mut Document, active: bool) {
        self.is_active = active;
        let Some(parts) = self.parts else { return };

        doc.set_attr(self.host, ACTIVE, if active { TRUE } else { FALSE });

        let motion = self.is_motion_enabled(doc);
        let root = doc.body();
        match (active, self.transition.phase()) {
            // Same direction already in force: timer no-op, mirror updated.
            (true, Phase::Opening | Phase::Open) => {}
            (false, Phase::Closing | Phase::Closed) => {}
            (true, Phase::Closed | Phase::Closing) => {
                self.focus.capture(doc);
                self.transition.begin_open(doc, parts.scroll, root, motion);
                self.focus.focus_dialog(doc, &parts);
            }
            (false, Phase::Open | Phase::Opening) => {
                self.transition.begin_close(doc, parts.scroll, root, motion);
                self.focus.restore(doc);
            }
        }
    }

    /// Motion preference, sampled fresh at each transition.
    fn is_motion_enabled(&self, doc: &Document) -> bool {
        self.is_animated && !doc.prefers_reduced_motion()
    }

    // --- Dispatch ---

    /// Handle a document event. The host delivers every drained event; the
    /// widget gates on its own subscriptions and connectedness.
    pub fn handle_event(&mut self, doc: &mut Document, event: &Event) {
        match event {
            Event::FocusIn { .. } => {
                if !self.is_subscribed(doc, self.focusin_listener) {
                    return;
                }
                self.handle_focus_in(doc);
            }
            Event::Key(key) => {
                if !self.is_subscribed(doc, self.keydown_listener) {
                    return;
                }
                if !self.is_active {
                    return;
                }
                match key {
                    Key::Escape => {
                        self.try_dismiss(doc, DismissRequest::Escape);
                    }
                    // Safety net for hosts with unreliable focus-change
                    // ordering relative to key handling.
                    Key::Tab => self.handle_focus_in(doc),
                    _ => {}
                }
            }
            Event::Click { target } => {
                if !self.connected {
                    return;
                }
                let Some(parts) = self.parts else { return };
                if Some(*target) == parts.button_close {
                    self.try_dismiss(doc, DismissRequest::CloseButton);
                } else if *target == parts.overlay {
                    self.try_dismiss(doc, DismissRequest::Backdrop);
                }
            }
        }
    }

    fn handle_focus_in(&mut self, doc: &mut Document) {
        let Some(parts) = self.parts else { return };
        self.focus
            .handle_focus_in(doc, self.host, &parts, self.is_active);
    }

    /// Route a fired timer to the transition controller. Returns whether
    /// the timer belonged to this widget.
    pub fn handle_timer(&mut self, doc: &mut Document, id: TimerId) -> bool {
        let Some(parts) = self.parts else { return false };
        let root = doc.body();
        self.transition.handle_timer(doc, parts.scroll, root, id)
    }

    /// Attempt a user-initiated dismissal. All paths are ignored while a
    /// transition is in flight; otherwise the policy decides.
    fn try_dismiss(&mut self, doc: &mut Document, request: DismissRequest) -> bool {
        if !self.is_active || self.transition.is_transitioning() {
            return false;
        }
        if !self.policy().permits(request) {
            return false;
        }
        debug!(?request, "user dismissal");
        self.close(doc);
        true
    }

    fn is_subscribed(&self, doc: &Document, listener: Option<ListenerId>) -> bool {
        listener.is_some_and(|id| doc.has_listener(id))
    }
}
