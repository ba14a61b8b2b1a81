#![forbid(unsafe_code)]

//! The host document: element tree, focus, timers, frames, and events.
//!
//! # Invariants
//!
//! - Every element except the body has at most one parent; reparenting
//!   detaches from the old parent first.
//! - The focused element, when set, is always attached and focusable at the
//!   moment focus was granted; it is cleared if the element is removed.
//! - Frame tasks run in submission order; a focus task whose target has
//!   become unfocusable is skipped silently.
//!
//! # Failure Modes
//!
//! - Operations on an id the document does not know are no-ops (queries
//!   return `None`/`false`/empty).
//! - `append_child` refuses to create a cycle and leaves the tree
//!   unchanged.

use std::collections::VecDeque;
use std::time::Duration;

use crate::event::{Event, EventType, ListenerId, ListenerRegistry};
use crate::node::{Element, ElementKind, NodeId};
use crate::scroll_lock::ScrollLock;
use crate::timer::{TimerId, TimerQueue};

/// A deferred document mutation applied at the next paint opportunity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameTask {
    /// Move focus to the element if it can still receive focus.
    Focus(NodeId),
    /// Set an element's scroll offsets.
    ScrollTo {
        /// Scrollable element.
        node: NodeId,
        /// Horizontal offset.
        x: u32,
        /// Vertical offset.
        y: u32,
    },
}

/// A headless document: arena of elements plus the host services widgets
/// consume (focus slot, timer queue, frame queue, event queue, listener
/// registry, scroll lock, motion preference).
#[derive(Debug)]
pub struct Document {
    nodes: Vec<Element>,
    body: NodeId,
    focused: Option<NodeId>,
    timers: TimerQueue,
    frames: Vec<FrameTask>,
    events: VecDeque<Event>,
    listeners: ListenerRegistry,
    scroll_lock: ScrollLock,
    reduced_motion: bool,
}

impl Document {
    /// Create a document with an empty body.
    pub fn new() -> Self {
        let body = Element::new(ElementKind::Container);
        Self {
            nodes: vec![body],
            body: NodeId(0),
            focused: None,
            timers: TimerQueue::new(),
            frames: Vec::new(),
            events: VecDeque::new(),
            listeners: ListenerRegistry::default(),
            scroll_lock: ScrollLock::new(),
            reduced_motion: false,
        }
    }

    /// The root element every attached node descends from.
    #[inline]
    pub fn body(&self) -> NodeId {
        self.body
    }

    fn get(&self, node: NodeId) -> Option<&Element> {
        self.nodes.get(node.index())
    }

    fn get_mut(&mut self, node: NodeId) -> Option<&mut Element> {
        self.nodes.get_mut(node.index())
    }

    // --- Tree ---

    /// Create a detached element.
    pub fn create_element(&mut self, kind: ElementKind) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Element::new(kind));
        id
    }

    /// Element data, if the id is known.
    pub fn element(&self, node: NodeId) -> Option<&Element> {
        self.get(node)
    }

    /// Append `child` as the last child of `parent`, detaching it from any
    /// previous parent. Refuses cycles and self-parenting.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if parent == child || self.contains(child, parent) {
            return;
        }
        if self.get(parent).is_none() || self.get(child).is_none() {
            return;
        }
        self.detach(child);
        if let Some(el) = self.get_mut(child) {
            el.parent = Some(parent);
        }
        if let Some(el) = self.get_mut(parent) {
            el.children.push(child);
        }
    }

    /// Detach `node` from its parent, leaving its subtree intact. Focus is
    /// cleared if it was inside the removed subtree.
    pub fn remove(&mut self, node: NodeId) {
        self.detach(node);
        if let Some(focused) = self.focused
            && self.contains(node, focused)
        {
            self.focused = None;
        }
    }

    fn detach(&mut self, node: NodeId) {
        let Some(parent) = self.get(node).and_then(|el| el.parent) else {
            return;
        };
        if let Some(el) = self.get_mut(parent) {
            el.children.retain(|&c| c != node);
        }
        if let Some(el) = self.get_mut(node) {
            el.parent = None;
        }
    }

    /// Children of `node` in document order.
    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.get(node).map(|el| el.children.as_slice()).unwrap_or(&[])
    }

    /// Parent of `node`, if attached to one.
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.get(node).and_then(|el| el.parent)
    }

    /// Whether `node` is `ancestor` or lies in its subtree.
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    /// Whether `node` is reachable from the body.
    pub fn is_attached(&self, node: NodeId) -> bool {
        self.contains(self.body, node)
    }

    // --- Attributes, classes, text ---

    /// Attribute value, if present.
    pub fn attr(&self, node: NodeId, name: &str) -> Option<&str> {
        self.get(node).and_then(|el| el.attrs.get(name)).map(String::as_str)
    }

    /// Whether the attribute is present, regardless of value.
    pub fn has_attr(&self, node: NodeId, name: &str) -> bool {
        self.get(node).is_some_and(|el| el.attrs.contains_key(name))
    }

    /// Set an attribute.
    pub fn set_attr(&mut self, node: NodeId, name: &str, value: &str) {
        if let Some(el) = self.get_mut(node) {
            el.attrs.insert(name.to_owned(), value.to_owned());
        }
    }

    /// Remove an attribute.
    pub fn remove_attr(&mut self, node: NodeId, name: &str) {
        if let Some(el) = self.get_mut(node) {
            el.attrs.remove(name);
        }
    }

    /// Add a class if not already present.
    pub fn add_class(&mut self, node: NodeId, class: &str) {
        if let Some(el) = self.get_mut(node)
            && !el.classes.iter().any(|c| c == class)
        {
            el.classes.push(class.to_owned());
        }
    }

    /// Remove a class if present.
    pub fn remove_class(&mut self, node: NodeId, class: &str) {
        if let Some(el) = self.get_mut(node) {
            el.classes.retain(|c| c != class);
        }
    }

    /// Whether the class is present.
    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.get(node).is_some_and(|el| el.classes.iter().any(|c| c == class))
    }

    /// Set the element's own text.
    pub fn set_text(&mut self, node: NodeId, text: &str) {
        if let Some(el) = self.get_mut(node) {
            el.text = text.to_owned();
        }
    }

    /// Concatenated text of the element and its subtree, document order.
    pub fn text_content(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(node, &mut out);
        out
    }

    fn collect_text(&self, node: NodeId, out: &mut String) {
        let Some(el) = self.get(node) else { return };
        out.push_str(&el.text);
        for &child in &el.children {
            self.collect_text(child, out);
        }
    }

    /// Assign or clear an explicit tab index.
    pub fn set_tab_index(&mut self, node: NodeId, tab_index: Option<i32>) {
        if let Some(el) = self.get_mut(node) {
            el.tab_index = tab_index;
        }
    }

    /// Current scroll offsets.
    pub fn scroll(&self, node: NodeId) -> (u32, u32) {
        self.get(node).map(|el| el.scroll).unwrap_or((0, 0))
    }

    /// Set scroll offsets.
    pub fn set_scroll(&mut self, node: NodeId, x: u32, y: u32) {
        if let Some(el) = self.get_mut(node) {
            el.scroll = (x, y);
        }
    }

    // --- Focus ---

    /// Whether the element can currently receive focus: attached, and
    /// either carries an explicit tab index or is natively focusable.
    pub fn is_focusable(&self, node: NodeId) -> bool {
        if !self.is_attached(node) {
            return false;
        }
        self.get(node)
            .is_some_and(|el| el.tab_index.is_some() || el.is_natively_focusable())
    }

    /// Move focus to `node` if it is focusable. Emits a focus-in event
    /// unless the element already holds focus. Returns whether focus moved
    /// or was already there.
    pub fn focus(&mut self, node: NodeId) -> bool {
        if !self.is_focusable(node) {
            return false;
        }
        if self.focused == Some(node) {
            return true;
        }
        self.focused = Some(node);
        self.events.push_back(Event::FocusIn { target: node });
        true
    }

    /// Clear focus.
    pub fn blur(&mut self) {
        self.focused = None;
    }

    /// The currently focused element.
    #[inline]
    pub fn focused(&self) -> Option<NodeId> {
        self.focused
    }

    // --- Frames ---

    /// Queue a task for the next paint opportunity.
    pub fn request_frame(&mut self, task: FrameTask) {
        self.frames.push(task);
    }

    /// Apply all queued frame tasks in submission order. Tasks whose target
    /// is gone or unfocusable are skipped silently.
    pub fn run_frame(&mut self) {
        let tasks = std::mem::take(&mut self.frames);
        for task in tasks {
            match task {
                FrameTask::Focus(node) => {
                    self.focus(node);
                }
                FrameTask::ScrollTo { node, x, y } => {
                    self.set_scroll(node, x, y);
                }
            }
        }
    }

    /// Number of tasks waiting for the next frame.
    pub fn pending_frames(&self) -> usize {
        self.frames.len()
    }

    // --- Timers ---

    /// Arm a one-shot timer.
    pub fn set_timeout(&mut self, after: Duration) -> TimerId {
        self.timers.set(after)
    }

    /// Cancel a pending timer.
    pub fn clear_timeout(&mut self, id: TimerId) -> bool {
        self.timers.clear(id)
    }

    /// Advance document time, returning due timers for the host to route.
    pub fn advance(&mut self, delta: Duration) -> Vec<TimerId> {
        self.timers.advance(delta)
    }

    /// Current document time.
    pub fn now(&self) -> Duration {
        self.timers.now()
    }

    // --- Events ---

    /// Inject a key press.
    pub fn key_down(&mut self, key: crate::event::Key) {
        self.events.push_back(Event::Key(key));
    }

    /// Inject a click on `target`.
    pub fn click(&mut self, target: NodeId) {
        self.events.push_back(Event::Click { target });
    }

    /// Drain all queued events for dispatch.
    pub fn take_events(&mut self) -> Vec<Event> {
        self.events.drain(..).collect()
    }

    // --- Listeners ---

    /// Subscribe a document-level listener.
    pub fn add_listener(&mut self, ty: EventType) -> ListenerId {
        self.listeners.register(ty)
    }

    /// Unsubscribe. Returns whether the listener was registered.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    /// Whether the listener is still registered.
    pub fn has_listener(&self, id: ListenerId) -> bool {
        self.listeners.contains(id)
    }

    /// Number of listeners subscribed for an event type.
    pub fn listener_count(&self, ty: EventType) -> usize {
        self.listeners.count(ty)
    }

    // --- Collaborators ---

    /// Acquire a scroll-lock hold on `root`.
    pub fn lock_scroll(&mut self, root: NodeId) {
        self.scroll_lock.lock(root);
    }

    /// Release a scroll-lock hold on `root`.
    pub fn unlock_scroll(&mut self, root: NodeId) {
        self.scroll_lock.unlock(root);
    }

    /// The scroll-lock collaborator.
    pub fn scroll_lock(&self) -> &ScrollLock {
        &self.scroll_lock
    }

    /// System-level reduced-motion preference.
    pub fn prefers_reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    /// Set the reduced-motion preference.
    pub fn set_reduced_motion(&mut self, reduced: bool) {
        self.reduced_motion = reduced;
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
