//! Animation frame scheduling
//!
//! The `FrameScheduler` trait is the "request a callback before the next
//! paint / cancel it" capability a host environment provides. `FrameLoop` is
//! the host side: it owns pending callbacks and runs them once per frame.

use std::cell::{Cell, RefCell};

use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;
use tracing::trace;

use crate::clock::{Clock, ManualClock, SystemClock, Timestamp};

new_key_type! {
    /// Opaque handle to a scheduled frame callback.
    ///
    /// Handles are versioned, so a stale handle never cancels a callback that
    /// later reused the same slot.
    pub struct FrameHandle;
}

/// A callback run once before the next paint, receiving the frame timestamp.
pub type FrameCallback = Box<dyn FnOnce(Timestamp)>;

/// Request/cancel capability for per-frame callbacks.
pub trait FrameScheduler {
    /// Current monotonic time on the scheduler's clock.
    fn now(&self) -> Timestamp;

    /// Schedule `callback` to run on the next frame.
    fn request_frame(&self, callback: FrameCallback) -> FrameHandle;

    /// Cancel a scheduled callback.
    ///
    /// Once this returns the callback will never run. Cancelling a handle that
    /// already ran or was already cancelled does nothing.
    fn cancel_frame(&self, handle: FrameHandle);
}

/// Host frame loop that runs scheduled callbacks once per frame.
pub struct FrameLoop<C: Clock = SystemClock> {
    clock: C,
    pending: RefCell<SlotMap<FrameHandle, FrameCallback>>,
    frames_run: Cell<u64>,
}

impl FrameLoop<SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock::new())
    }
}

impl Default for FrameLoop<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> FrameLoop<C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            clock,
            pending: RefCell::new(SlotMap::with_key()),
            frames_run: Cell::new(0),
        }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Run one frame.
    ///
    /// Only callbacks pending when the frame starts are run; anything they
    /// schedule waits for the next frame. A callback cancelled by an earlier
    /// callback in the same frame is skipped. Returns the number of callbacks
    /// that ran.
    pub fn run_frame(&self) -> usize {
        let now = self.clock.now();
        let due: SmallVec<[FrameHandle; 8]> = self.pending.borrow().keys().collect();

        let mut ran = 0;
        for handle in due {
            // Release the borrow before running so the callback may reschedule.
            let callback = self.pending.borrow_mut().remove(handle);
            if let Some(callback) = callback {
                callback(now);
                ran += 1;
            }
        }

        self.frames_run.set(self.frames_run.get() + 1);
        trace!(
            frame = self.frames_run.get(),
            ran,
            pending = self.pending_frames(),
            "frame complete"
        );
        ran
    }

    /// Number of callbacks waiting for the next frame.
    pub fn pending_frames(&self) -> usize {
        self.pending.borrow().len()
    }

    pub fn has_pending_frames(&self) -> bool {
        !self.pending.borrow().is_empty()
    }

    /// Total number of frames run so far.
    pub fn frames_run(&self) -> u64 {
        self.frames_run.get()
    }
}

impl FrameLoop<ManualClock> {
    /// Frame loop on a manual clock starting at zero.
    pub fn manual() -> Self {
        Self::with_clock(ManualClock::new())
    }

    /// Advance the clock by `millis` and run one frame.
    pub fn advance_and_run(&self, millis: f64) -> usize {
        self.clock.advance_ms(millis);
        self.run_frame()
    }

    /// Step frames at a fixed interval until nothing is pending.
    ///
    /// Stops after `max_frames` frames. Returns the number of frames run.
    pub fn run_until_idle(&self, frame_interval_ms: f64, max_frames: usize) -> usize {
        let mut frames = 0;
        while self.has_pending_frames() && frames < max_frames {
            self.advance_and_run(frame_interval_ms);
            frames += 1;
        }
        frames
    }
}

impl<C: Clock> FrameScheduler for FrameLoop<C> {
    fn now(&self) -> Timestamp {
        self.clock.now()
    }

    fn request_frame(&self, callback: FrameCallback) -> FrameHandle {
        self.pending.borrow_mut().insert(callback)
    }

    fn cancel_frame(&self, handle: FrameHandle) {
        let removed = self.pending.borrow_mut().remove(handle);
        if removed.is_some() {
            trace!(?handle, "frame cancelled");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    fn recorder() -> (Rc<RefCell<Vec<&'static str>>>, impl Fn(&'static str) -> FrameCallback) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = log.clone();
        let make = move |name: &'static str| -> FrameCallback {
            let sink = sink.clone();
            Box::new(move |_now| sink.borrow_mut().push(name))
        };
        (log, make)
    }

    #[test]
    fn test_callback_receives_frame_timestamp() {
        let frames = FrameLoop::manual();
        let seen = Rc::new(Cell::new(None));

        let slot = seen.clone();
        frames.request_frame(Box::new(move |now| slot.set(Some(now))));

        frames.advance_and_run(250.0);
        assert_eq!(seen.get(), Some(Timestamp::from_micros(250_000)));
    }

    #[test]
    fn test_callbacks_run_once() {
        let frames = FrameLoop::manual();
        let (log, make) = recorder();

        frames.request_frame(make("a"));
        assert_eq!(frames.advance_and_run(16.0), 1);
        assert_eq!(frames.advance_and_run(16.0), 0);
        assert_eq!(*log.borrow(), vec!["a"]);
        assert_eq!(frames.frames_run(), 2);
    }

    #[test]
    fn test_cancelled_callback_never_runs() {
        let frames = FrameLoop::manual();
        let (log, make) = recorder();

        let handle = frames.request_frame(make("cancelled"));
        frames.request_frame(make("kept"));
        frames.cancel_frame(handle);

        frames.advance_and_run(16.0);
        assert_eq!(*log.borrow(), vec!["kept"]);
    }

    #[test]
    fn test_cancel_is_noop_for_stale_handles() {
        let frames = FrameLoop::manual();
        let (log, make) = recorder();

        let stale = frames.request_frame(make("first"));
        frames.advance_and_run(16.0);

        // The slot may be reused, the versioned key must not match it.
        frames.request_frame(make("second"));
        frames.cancel_frame(stale);
        frames.cancel_frame(stale);

        frames.advance_and_run(16.0);
        assert_eq!(*log.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn test_rescheduled_callback_waits_for_next_frame() {
        let frames = Rc::new(FrameLoop::manual());
        let count = Rc::new(Cell::new(0));

        let inner_frames = frames.clone();
        let inner_count = count.clone();
        frames.request_frame(Box::new(move |_| {
            inner_count.set(inner_count.get() + 1);
            let again = inner_count.clone();
            inner_frames.request_frame(Box::new(move |_| again.set(again.get() + 1)));
        }));

        assert_eq!(frames.advance_and_run(16.0), 1);
        assert_eq!(count.get(), 1);
        assert!(frames.has_pending_frames());

        assert_eq!(frames.advance_and_run(16.0), 1);
        assert_eq!(count.get(), 2);
        assert!(!frames.has_pending_frames());
    }

    #[test]
    fn test_cancel_during_frame_skips_later_callback() {
        let frames = Rc::new(FrameLoop::manual());
        let (log, make) = recorder();

        let victim = Rc::new(Cell::new(None));
        let canceller_frames = frames.clone();
        let canceller_victim = victim.clone();
        let canceller_log = log.clone();
        frames.request_frame(Box::new(move |_| {
            canceller_log.borrow_mut().push("canceller");
            if let Some(handle) = canceller_victim.get() {
                canceller_frames.cancel_frame(handle);
            }
        }));
        victim.set(Some(frames.request_frame(make("victim"))));

        frames.advance_and_run(16.0);
        assert_eq!(*log.borrow(), vec!["canceller"]);
        assert!(!frames.has_pending_frames());
    }

    #[test]
    fn test_run_until_idle_stops_at_limit() {
        let frames = Rc::new(FrameLoop::manual());

        fn forever(frames: Rc<FrameLoop<ManualClock>>) {
            let next = frames.clone();
            frames.request_frame(Box::new(move |_| forever(next)));
        }
        forever(frames.clone());

        assert_eq!(frames.run_until_idle(16.0, 10), 10);
        assert!(frames.has_pending_frames());
        assert_eq!(frames.clock().now().as_micros(), 160_000);
    }
}
