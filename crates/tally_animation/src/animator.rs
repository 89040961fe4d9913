//! Frame-driven value animator
//!
//! A `ValueAnimator` counts a displayed number up (or down) from zero to a
//! target over a fixed duration. Each run is anchored at the moment its
//! request arrives, so retargeting mid-run restarts the curve from zero
//! rather than continuing from the value on screen.
//!
//! States:
//! - **Idle**: no frame callback scheduled
//! - **Running**: exactly one frame callback scheduled
//!
//! Every new request and `dispose` cancel the scheduled callback before doing
//! anything else. Cancellation is synchronous, so a superseded run can never
//! write its stale value after a newer one.

use std::cell::RefCell;
use std::rc::Rc;

use tally_core::{FrameHandle, FrameScheduler, Timestamp};
use tracing::{debug, trace, warn};

use crate::format::MAX_DECIMALS;
use crate::request::AnimationRequest;

/// Mutable state owned by one animator.
struct AnimatorState {
    display_text: String,
    current_value: f64,
    request: AnimationRequest,
    active_handle: Option<FrameHandle>,
    start: Option<Timestamp>,
    disposed: bool,
}

impl AnimatorState {
    fn cancel(&mut self, scheduler: &dyn FrameScheduler) {
        if let Some(handle) = self.active_handle.take() {
            scheduler.cancel_frame(handle);
            debug!(?handle, "cancelled in-flight counter run");
        }
        self.start = None;
    }

    fn show(&mut self, value: f64) {
        self.current_value = value;
        self.display_text = self.request.render(value);
    }
}

/// Animates one displayed number toward successive targets.
///
/// The animator is a single-threaded component: the scheduler runs step
/// callbacks between calls to [`set_request`](Self::set_request) and
/// [`dispose`](Self::dispose), never during them. Dropping the animator
/// disposes it.
pub struct ValueAnimator {
    state: Rc<RefCell<AnimatorState>>,
    scheduler: Rc<dyn FrameScheduler>,
}

impl ValueAnimator {
    /// Create an idle animator showing `0`.
    pub fn new(scheduler: Rc<dyn FrameScheduler>) -> Self {
        Self::with_format(scheduler, 0, "", "")
    }

    /// Create an idle animator showing zero with the given display format.
    pub fn with_format(
        scheduler: Rc<dyn FrameScheduler>,
        decimals: usize,
        prefix: impl Into<String>,
        suffix: impl Into<String>,
    ) -> Self {
        if decimals > MAX_DECIMALS {
            warn!(decimals, max = MAX_DECIMALS, "counter precision clamped");
        }

        let request = AnimationRequest::new(0.0)
            .with_decimals(decimals)
            .with_prefix(prefix)
            .with_suffix(suffix);
        let display_text = request.render(0.0);

        Self {
            state: Rc::new(RefCell::new(AnimatorState {
                display_text,
                current_value: 0.0,
                request,
                active_handle: None,
                start: None,
                disposed: false,
            })),
            scheduler,
        }
    }

    /// Start animating toward a new target.
    ///
    /// Cancels any run in progress. A zero target shows zero immediately and a
    /// non-positive duration shows the target immediately; neither schedules
    /// a frame. Otherwise the display restarts at zero in the new format and
    /// a frame is scheduled. Ignored once the animator is disposed.
    pub fn set_request(&self, request: AnimationRequest) {
        let mut state = self.state.borrow_mut();
        if state.disposed {
            debug!(
                value = request.target_value,
                "ignoring request on disposed counter"
            );
            return;
        }

        state.cancel(&*self.scheduler);

        if request.duration_ms < 0 {
            warn!(
                duration_ms = request.duration_ms,
                "negative counter duration, snapping to target"
            );
        }
        if request.decimals > MAX_DECIMALS {
            warn!(
                decimals = request.decimals,
                max = MAX_DECIMALS,
                "counter precision clamped"
            );
        }

        let target = request.target_value;
        let duration_ms = request.effective_duration_ms();
        state.request = request;

        if target == 0.0 {
            state.show(0.0);
            debug!("counter reset to zero");
            return;
        }

        if duration_ms == 0 {
            state.show(target);
            debug!(value = target, "counter snapped to target");
            return;
        }

        state.show(0.0);
        state.start = Some(self.scheduler.now());
        state.active_handle = Some(schedule_step(&self.state, &self.scheduler));
        debug!(value = target, duration_ms, "counter run started");
    }

    /// Cancel any scheduled frame and stop accepting requests.
    ///
    /// Safe to call any number of times.
    pub fn dispose(&self) {
        let mut state = self.state.borrow_mut();
        state.cancel(&*self.scheduler);
        if !state.disposed {
            state.disposed = true;
            debug!(text = %state.display_text, "counter disposed");
        }
    }

    /// The text the host should render verbatim.
    pub fn display_text(&self) -> String {
        self.state.borrow().display_text.clone()
    }

    /// Numeric value behind the current display text.
    pub fn current_value(&self) -> f64 {
        self.state.borrow().current_value
    }

    /// Target of the most recent request.
    pub fn target_value(&self) -> f64 {
        self.state.borrow().request.target_value
    }

    /// Whether a frame callback is scheduled.
    pub fn is_running(&self) -> bool {
        self.state.borrow().active_handle.is_some()
    }

    pub fn is_disposed(&self) -> bool {
        self.state.borrow().disposed
    }
}

impl Drop for ValueAnimator {
    fn drop(&mut self) {
        self.dispose();
    }
}

/// Schedule the next step of the current run.
///
/// The callback holds only a weak reference to the state, so the frame loop
/// never keeps a dropped animator alive.
fn schedule_step(
    state: &Rc<RefCell<AnimatorState>>,
    scheduler: &Rc<dyn FrameScheduler>,
) -> FrameHandle {
    let weak = Rc::downgrade(state);
    let step_scheduler = Rc::clone(scheduler);
    scheduler.request_frame(Box::new(move |now| {
        if let Some(state) = weak.upgrade() {
            step(&state, &step_scheduler, now);
        }
    }))
}

fn step(
    state_rc: &Rc<RefCell<AnimatorState>>,
    scheduler: &Rc<dyn FrameScheduler>,
    now: Timestamp,
) {
    let mut state = state_rc.borrow_mut();
    state.active_handle = None;

    let Some(start) = state.start else {
        return;
    };

    let request = &state.request;
    let elapsed = now.saturating_sub(start).as_millis_f64();
    let progress = (elapsed / request.effective_duration_ms() as f64).clamp(0.0, 1.0);
    let current = request.easing.apply(progress) * request.target_value;

    state.show(current);
    trace!(progress, text = %state.display_text, "counter step");

    if progress < 1.0 {
        state.active_handle = Some(schedule_step(state_rc, scheduler));
    } else {
        state.start = None;
        debug!(text = %state.display_text, "counter run complete");
    }
}
