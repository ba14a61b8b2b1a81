#![forbid(unsafe_code)]

//! Dismissal policy: which user gestures may close the modal.
//!
//! The three suppression flags are evaluated together per attempt instead
//! of being consulted piecemeal at each call site, so the precedence stays
//! auditable: `closable` gates everything, `static` gates backdrop and
//! Escape, `noclick` gates the backdrop only.

use bitflags::bitflags;

bitflags! {
    /// The set of user-initiated dismissal paths.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct DismissPaths: u8 {
        /// Click on the backdrop overlay.
        const BACKDROP = 1 << 0;
        /// Escape key press.
        const ESCAPE = 1 << 1;
        /// Click on the close-icon button.
        const CLOSE_BUTTON = 1 << 2;
    }
}

/// A single user dismissal gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissRequest {
    /// Click landed on the backdrop overlay.
    Backdrop,
    /// Escape key pressed.
    Escape,
    /// Close-icon button clicked.
    CloseButton,
}

impl DismissRequest {
    fn path(self) -> DismissPaths {
        match self {
            DismissRequest::Backdrop => DismissPaths::BACKDROP,
            DismissRequest::Escape => DismissPaths::ESCAPE,
            DismissRequest::CloseButton => DismissPaths::CLOSE_BUTTON,
        }
    }
}

/// Dismissal-suppression flags, evaluated once per attempt.
///
/// Does not cover the transition guard: while a transition is in flight the
/// widget ignores every user path before the policy is even consulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DismissPolicy {
    /// Master switch; when false no user path is permitted.
    pub closable: bool,
    /// Disables backdrop and Escape dismissal.
    pub is_static: bool,
    /// Disables only backdrop dismissal.
    pub no_click: bool,
}

impl Default for DismissPolicy {
    fn default() -> Self {
        Self {
            closable: true,
            is_static: false,
            no_click: false,
        }
    }
}

impl DismissPolicy {
    /// The paths this policy currently permits.
    pub fn permitted(&self) -> DismissPaths {
        if !self.closable {
            return DismissPaths::empty();
        }
        let mut paths = DismissPaths::all();
        if self.is_static {
            paths -= DismissPaths::BACKDROP | DismissPaths::ESCAPE;
        }
        if self.no_click {
            paths -= DismissPaths::BACKDROP;
        }
        paths
    }

    /// Whether a specific gesture is permitted.
    pub fn permits(&self, request: DismissRequest) -> bool {
        self.permitted().contains(request.path())
    }
}
