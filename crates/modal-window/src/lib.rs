#![forbid(unsafe_code)]

//! Modal dialog widget for headless host documents.
//!
//! See the [`modal`] module for the widget and its sub-mechanisms.

pub mod modal;

pub use modal::{
    DismissPaths, DismissPolicy, DismissRequest, FocusManager, ModalEvent, ModalParts,
    ModalWindow, Phase, TransitionController, ANIMATION_DURATION,
};
