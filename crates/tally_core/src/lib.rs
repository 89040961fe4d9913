//! Tally Core Runtime
//!
//! Foundational primitives for driving time-based UI updates:
//!
//! - **Monotonic Time**: `Timestamp` plus the `Clock` abstraction, with a
//!   real `SystemClock` and a deterministic `ManualClock` for tests
//! - **Frame Scheduling**: the `FrameScheduler` capability (request/cancel a
//!   callback that runs before the next paint) and `FrameLoop`, a host
//!   implementation of it
//!
//! # Example
//!
//! ```rust
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use tally_core::{FrameLoop, FrameScheduler};
//!
//! let frames = FrameLoop::manual();
//! let fired = Rc::new(Cell::new(false));
//!
//! let flag = fired.clone();
//! frames.request_frame(Box::new(move |_now| flag.set(true)));
//!
//! frames.advance_and_run(16.0);
//! assert!(fired.get());
//! ```

pub mod clock;
pub mod frame;

pub use clock::{Clock, ManualClock, SystemClock, Timestamp};
pub use frame::{FrameCallback, FrameHandle, FrameLoop, FrameScheduler};
