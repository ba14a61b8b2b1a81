#![forbid(unsafe_code)]

//! Modal window widget: structure builder, state reconciler, transition
//! controller, focus manager, and dismissal policy.
//!
//! # State Model
//!
//! One canonical `active` flag, mirrored to the host element's `active`
//! attribute, is reconciled from three stimulus sources: direct
//! [`ModalWindow::open`]/[`ModalWindow::close`] calls, observed attribute
//! mutation, and user dismissal gestures. A four-phase transition
//! controller (`Closed → Opening → Open → Closing`) drives the timed
//! enter/exit window; a focus manager captures the pre-open focus target,
//! traps tab order between two sentinels while open, and restores focus on
//! close.
//!
//! # Dismissal Policy
//!
//! Three flags layer over each other: `closable` gates every user path,
//! `static` additionally gates backdrop and Escape, `noclick` gates only
//! the backdrop. While a transition is in flight all user dismissal is
//! ignored. Programmatic `close()` is never blocked.
//!
//! # Example
//!
//! ```
//! use modal_dom::{Document, ElementKind};
//! use modal_window::ModalWindow;
//!
//! let mut doc = Document::new();
//! let host = doc.create_element(ElementKind::Container);
//! doc.append_child(doc.body(), host);
//!
//! let mut modal = ModalWindow::new(host);
//! modal.attach(&mut doc);
//! modal.open(&mut doc);
//! assert_eq!(doc.attr(host, "active"), Some("true"));
//! ```

mod focus;
mod policy;
mod structure;
mod transition;
mod widget;

pub use focus::FocusManager;
pub use policy::{DismissPaths, DismissPolicy, DismissRequest};
pub use structure::ModalParts;
pub use transition::{Phase, TransitionController, ANIMATION_DURATION, CLASS_HIDE, CLASS_SHOW, CLASS_VISIBLE};
pub use widget::{ModalEvent, ModalWindow};
