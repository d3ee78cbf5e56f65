//! A single animated or instantaneous present/dismiss as a cancellable
//! promise.

use std::time::Duration;

use futures::channel::oneshot;
use log::debug;

use crate::page::PageRef;

/// Fixed length of an animated transition on the host's animation clock.
pub const TRANSITION_DURATION: Duration = Duration::from_millis(300);

/// Which way the transition moves the modal overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionDirection {
    Present,
    Dismiss,
}

/// Progress state of a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionStatus {
    Running,
    Completed,
    Cancelled,
}

/// Terminal result delivered to the promise holder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionOutcome {
    Completed,
    Cancelled,
}

/// Easing curves used by the two directions, factor fixed at 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Easing {
    /// Fast start, slow settle; presents use this.
    Decelerate,
    /// Slow start, fast exit; dismissals use this.
    Accelerate,
}

impl Easing {
    /// Map a linear fraction in `[0, 1]` onto the curve.
    pub fn transform(self, fraction: f64) -> f64 {
        let t = fraction.clamp(0.0, 1.0);
        match self {
            Easing::Decelerate => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::Accelerate => t * t,
        }
    }
}

/// One in-flight present or dismiss.
///
/// The runner owns the completion promise and resolves it exactly once,
/// either when the clock-driven animation finishes or when the transition
/// is cancelled from outside. Dropping an unresolved runner settles the
/// receiver as cancelled, so a caller-visible future can never hang.
pub struct TransitionRunner {
    direction: TransitionDirection,
    page: PageRef,
    animated: bool,
    easing: Easing,
    elapsed: Duration,
    status: TransitionStatus,
    done: Option<oneshot::Sender<TransitionOutcome>>,
}

impl TransitionRunner {
    pub fn new(
        direction: TransitionDirection,
        page: PageRef,
        animated: bool,
    ) -> (Self, oneshot::Receiver<TransitionOutcome>) {
        let (done, receiver) = oneshot::channel();
        let easing = match direction {
            TransitionDirection::Present => Easing::Decelerate,
            TransitionDirection::Dismiss => Easing::Accelerate,
        };
        let runner = Self {
            direction,
            page,
            animated,
            easing,
            elapsed: Duration::ZERO,
            status: TransitionStatus::Running,
            done: Some(done),
        };
        (runner, receiver)
    }

    pub fn direction(&self) -> TransitionDirection {
        self.direction
    }

    pub fn page(&self) -> &PageRef {
        &self.page
    }

    pub fn animated(&self) -> bool {
        self.animated
    }

    pub fn status(&self) -> TransitionStatus {
        self.status
    }

    /// Advance by one frame tick. Returns true once the full duration has
    /// elapsed. Elapsed time saturates at the duration.
    pub fn advance(&mut self, delta: Duration) -> bool {
        self.elapsed = (self.elapsed + delta).min(TRANSITION_DURATION);
        self.elapsed >= TRANSITION_DURATION
    }

    /// Eased progress in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        let linear = self.elapsed.as_secs_f64() / TRANSITION_DURATION.as_secs_f64();
        self.easing.transform(linear)
    }

    /// Current vertical offset for an overlay travelling `travel_px`:
    /// presents slide in from below, dismissals slide out downward.
    pub fn translation(&self, travel_px: f64) -> f64 {
        match self.direction {
            TransitionDirection::Present => travel_px * (1.0 - self.progress()),
            TransitionDirection::Dismiss => travel_px * self.progress(),
        }
    }

    /// Settle the promise. Later calls are no-ops.
    pub fn resolve(&mut self, outcome: TransitionOutcome) {
        if let Some(done) = self.done.take() {
            self.status = match outcome {
                TransitionOutcome::Completed => TransitionStatus::Completed,
                TransitionOutcome::Cancelled => TransitionStatus::Cancelled,
            };
            debug!(
                "{:?} transition for page {:?} settled: {:?}",
                self.direction,
                self.page.id(),
                outcome
            );
            let _ = done.send(outcome);
        }
    }
}
