#![forbid(unsafe_code)]

//! Headless host document for the modal-window widget.
//!
//! The widget is specified against a live document; this crate provides a
//! deterministic stand-in: an arena-backed element tree with string
//! attributes and class lists, a single focus slot with focus-in event
//! emission, a timer queue the host advances explicitly, a frame-task queue
//! for paint-aligned deferred mutations, and a reference-counted scroll
//! lock shared across widget instances.
//!
//! Nothing here runs on its own. The host drives the loop:
//!
//! ```
//! use modal_dom::{Document, ElementKind};
//! use std::time::Duration;
//!
//! let mut doc = Document::new();
//! let button = doc.create_element(ElementKind::Button);
//! doc.append_child(doc.body(), button);
//! doc.focus(button);
//!
//! doc.run_frame();
//! for _timer in doc.advance(Duration::from_millis(16)) {
//!     // route to whichever widget armed it
//! }
//! for _event in doc.take_events() {
//!     // dispatch to subscribed widgets
//! }
//! ```

pub mod clock;
pub mod document;
pub mod event;
pub mod node;
pub mod scroll_lock;
pub mod timer;

pub use clock::MonotonicClock;
pub use document::{Document, FrameTask};
pub use event::{Event, EventType, Key, ListenerId};
pub use node::{Element, ElementKind, NodeId};
pub use scroll_lock::ScrollLock;
pub use timer::{TimerId, TimerQueue};
