#![forbid(unsafe_code)]

//! Timer-driven transition controller for the show/hide crossfade.
//!
//! Four phases: `Closed → Opening → Open → Closing → Closed`. The visible
//! presentation class is applied synchronously when opening begins (the
//! dialog must occupy space before the entrance animation), while the
//! entering/exiting classes bound the animation window and are cleared by
//! per-direction timers.
//!
//! # Invariants
//!
//! - At most one phase at a time; the entering and exiting classes are
//!   never both present (the eager swap in `begin_*` removes the opposite
//!   marker when the direction flips).
//! - Arming a direction's timer always clears that direction's previous
//!   timer first, so one direction can never fire two completions.
//! - An opposite-direction interruption does NOT abort the pending timer;
//!   its delayed cleanup runs to completion. The scroll lock refcounts per
//!   root, so a stale unlock releases only the hold its own open acquired.

use std::time::Duration;

use modal_dom::{Document, NodeId, TimerId};
use tracing::{debug, trace};

/// Steady "occupies space" presentation class on the scroll container.
pub const CLASS_VISIBLE: &str = "modal-visible";
/// Entrance-animation marker class.
pub const CLASS_SHOW: &str = "modal-show";
/// Exit-animation marker class.
pub const CLASS_HIDE: &str = "modal-hide";

/// Default animation duration.
pub const ANIMATION_DURATION: Duration = Duration::from_millis(250);

/// Transition phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Hidden, no transition pending.
    #[default]
    Closed,
    /// Entrance animation in flight.
    Opening,
    /// Fully visible, no transition pending.
    Open,
    /// Exit animation in flight.
    Closing,
}

/// Drives the visible/entering/exiting presentation classes and the
/// per-direction completion timers.
#[derive(Debug)]
pub struct TransitionController {
    phase: Phase,
    duration: Duration,
    show_timer: Option<TimerId>,
    hide_timer: Option<TimerId>,
}

impl Default for TransitionController {
    fn default() -> Self {
        Self::new()
    }
}

impl TransitionController {
    /// Controller with the default animation duration.
    pub fn new() -> Self {
        Self::with_duration(ANIMATION_DURATION)
    }

    /// Controller with a custom animation duration.
    pub fn with_duration(duration: Duration) -> Self {
        Self {
            phase: Phase::Closed,
            duration,
            show_timer: None,
            hide_timer: None,
        }
    }

    /// Current phase.
    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Configured animation duration.
    #[inline]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// True strictly during the animation window.
    #[inline]
    pub fn is_transitioning(&self) -> bool {
        matches!(self.phase, Phase::Opening | Phase::Closing)
    }

    /// Begin the opening sequence: mark visible synchronously, lock page
    /// scrolling, then either animate in (arming the show timer) or settle
    /// straight into `Open` when motion is disabled.
    ///
    /// The caller guards against same-direction re-entry; this method
    /// assumes the phase is `Closed` or `Closing`.
    pub fn begin_open(&mut self, doc: &mut Document, scroll: NodeId, root: NodeId, motion: bool) {
        doc.remove_class(scroll, CLASS_HIDE);
        doc.add_class(scroll, CLASS_VISIBLE);
        doc.lock_scroll(root);

        if motion {
            doc.add_class(scroll, CLASS_SHOW);
            if let Some(stale) = self.show_timer.take() {
                doc.clear_timeout(stale);
                trace!(timer = stale.id(), "cleared stale show timer");
            }
            let timer = doc.set_timeout(self.duration);
            trace!(timer = timer.id(), "armed show timer");
            self.show_timer = Some(timer);
            self.phase = Phase::Opening;
        } else {
            self.phase = Phase::Open;
        }
        debug!(phase = ?self.phase, "opening");
    }

    /// Begin the closing sequence: either animate out (arming the hide
    /// timer) or tear down immediately when motion is disabled.
    ///
    /// The caller guards against same-direction re-entry; this method
    /// assumes the phase is `Open` or `Opening`.
    pub fn begin_close(&mut self, doc: &mut Document, scroll: NodeId, root: NodeId, motion: bool) {
        doc.remove_class(scroll, CLASS_SHOW);

        if motion {
            doc.add_class(scroll, CLASS_HIDE);
            if let Some(stale) = self.hide_timer.take() {
                doc.clear_timeout(stale);
                trace!(timer = stale.id(), "cleared stale hide timer");
            }
            let timer = doc.set_timeout(self.duration);
            trace!(timer = timer.id(), "armed hide timer");
            self.hide_timer = Some(timer);
            self.phase = Phase::Closing;
        } else {
            doc.remove_class(scroll, CLASS_VISIBLE);
            doc.unlock_scroll(root);
            self.phase = Phase::Closed;
        }
        debug!(phase = ?self.phase, "closing");
    }

    /// Handle a fired timer. Returns whether the timer belonged to this
    /// controller. A timer made stale by an opposite-direction interruption
    /// still runs its cleanup; only the phase settle is conditional.
    pub fn handle_timer(
        &mut self,
        doc: &mut Document,
        scroll: NodeId,
        root: NodeId,
        id: TimerId,
    ) -> bool {
        if self.show_timer == Some(id) {
            self.show_timer = None;
            doc.remove_class(scroll, CLASS_SHOW);
            if self.phase == Phase::Opening {
                self.phase = Phase::Open;
                debug!("open settled");
            }
            true
        } else if self.hide_timer == Some(id) {
            self.hide_timer = None;
            doc.remove_class(scroll, CLASS_HIDE);
            doc.remove_class(scroll, CLASS_VISIBLE);
            doc.unlock_scroll(root);
            if self.phase == Phase::Closing {
                self.phase = Phase::Closed;
                debug!("close settled");
            }
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use modal_dom::ElementKind;

    fn setup() -> (Document, NodeId, NodeId) {
        let mut doc = Document::new();
        let scroll = doc.create_element(ElementKind::Container);
        doc.append_child(doc.body(), scroll);
        let root = doc.body();
        (doc, scroll, root)
    }

    fn settle(
        doc: &mut Document,
        ctl: &mut TransitionController,
        scroll: NodeId,
        root: NodeId,
        ms: u64,
    ) {
        for id in doc.advance(Duration::from_millis(ms)) {
            ctl.handle_timer(doc, scroll, root, id);
        }
    }

    #[test]
    fn animated_open_runs_through_opening() {
        let (mut doc, scroll, root) = setup();
        let mut ctl = TransitionController::new();

        ctl.begin_open(&mut doc, scroll, root, true);
        assert_eq!(ctl.phase(), Phase::Opening);
        assert!(ctl.is_transitioning());
        assert!(doc.has_class(scroll, CLASS_VISIBLE));
        assert!(doc.has_class(scroll, CLASS_SHOW));
        assert!(doc.scroll_lock().is_locked(root));

        settle(&mut doc, &mut ctl, scroll, root, 249);
        assert_eq!(ctl.phase(), Phase::Opening, "must not settle early");

        settle(&mut doc, &mut ctl, scroll, root, 1);
        assert_eq!(ctl.phase(), Phase::Open);
        assert!(!doc.has_class(scroll, CLASS_SHOW));
        assert!(doc.has_class(scroll, CLASS_VISIBLE));
    }

    #[test]
    fn animated_close_unlocks_after_duration() {
        let (mut doc, scroll, root) = setup();
        let mut ctl = TransitionController::new();
        ctl.begin_open(&mut doc, scroll, root, false);

        ctl.begin_close(&mut doc, scroll, root, true);
        assert_eq!(ctl.phase(), Phase::Closing);
        assert!(doc.has_class(scroll, CLASS_HIDE));
        assert!(doc.scroll_lock().is_locked(root), "locked until settled");

        settle(&mut doc, &mut ctl, scroll, root, 250);
        assert_eq!(ctl.phase(), Phase::Closed);
        assert!(!doc.has_class(scroll, CLASS_HIDE));
        assert!(!doc.has_class(scroll, CLASS_VISIBLE));
        assert!(!doc.scroll_lock().is_locked(root));
    }

    #[test]
    fn motion_disabled_settles_synchronously() {
        let (mut doc, scroll, root) = setup();
        let mut ctl = TransitionController::new();

        ctl.begin_open(&mut doc, scroll, root, false);
        assert_eq!(ctl.phase(), Phase::Open);
        assert!(!ctl.is_transitioning());
        assert!(!doc.has_class(scroll, CLASS_SHOW));
        assert!(doc.scroll_lock().is_locked(root));

        ctl.begin_close(&mut doc, scroll, root, false);
        assert_eq!(ctl.phase(), Phase::Closed);
        assert!(!doc.has_class(scroll, CLASS_VISIBLE));
        assert!(!doc.scroll_lock().is_locked(root));
    }

    #[test]
    fn entering_and_exiting_never_coexist() {
        let (mut doc, scroll, root) = setup();
        let mut ctl = TransitionController::new();

        ctl.begin_open(&mut doc, scroll, root, true);
        ctl.begin_close(&mut doc, scroll, root, true);
        assert!(!doc.has_class(scroll, CLASS_SHOW));
        assert!(doc.has_class(scroll, CLASS_HIDE));

        ctl.begin_open(&mut doc, scroll, root, true);
        assert!(doc.has_class(scroll, CLASS_SHOW));
        assert!(!doc.has_class(scroll, CLASS_HIDE));
    }

    #[test]
    fn interrupted_close_timer_still_runs_cleanup() {
        let (mut doc, scroll, root) = setup();
        let mut ctl = TransitionController::new();
        ctl.begin_open(&mut doc, scroll, root, false);

        // Close with motion, then reopen before the hide timer fires.
        ctl.begin_close(&mut doc, scroll, root, true);
        ctl.begin_open(&mut doc, scroll, root, true);
        assert_eq!(ctl.phase(), Phase::Opening);
        assert_eq!(doc.scroll_lock().holders(root), 2);

        // The stale hide timer and the live show timer share a deadline.
        settle(&mut doc, &mut ctl, scroll, root, 250);

        // Stale cleanup ran: visible class dropped, one hold released.
        assert!(!doc.has_class(scroll, CLASS_VISIBLE));
        assert_eq!(doc.scroll_lock().holders(root), 1);
        // The live show timer settled its own direction.
        assert_eq!(ctl.phase(), Phase::Open);
    }

    #[test]
    fn foreign_timer_is_ignored() {
        let (mut doc, scroll, root) = setup();
        let mut ctl = TransitionController::new();
        let foreign = doc.set_timeout(Duration::from_millis(5));
        for id in doc.advance(Duration::from_millis(5)) {
            assert!(!ctl.handle_timer(&mut doc, scroll, root, id));
            assert_eq!(id, foreign);
        }
    }

    #[test]
    fn custom_duration_respected() {
        let (mut doc, scroll, root) = setup();
        let mut ctl = TransitionController::with_duration(Duration::from_millis(50));

        ctl.begin_open(&mut doc, scroll, root, true);
        settle(&mut doc, &mut ctl, scroll, root, 49);
        assert_eq!(ctl.phase(), Phase::Opening);
        settle(&mut doc, &mut ctl, scroll, root, 1);
        assert_eq!(ctl.phase(), Phase::Open);
    }
}
