//! Tally Animation System
//!
//! Frame-driven counters for dashboard KPIs.
//!
//! # Features
//!
//! - **Value Animator**: counts a displayed number up to each new target
//! - **Easing**: quadratic, cubic and CSS cubic-bezier curves
//! - **Formatting**: fixed-decimal display text with prefix/suffix
//! - **Config**: counter defaults loaded from TOML
//!
//! # Example
//!
//! ```rust
//! use std::rc::Rc;
//! use tally_animation::{AnimationRequest, ValueAnimator};
//! use tally_core::FrameLoop;
//!
//! let frames = Rc::new(FrameLoop::manual());
//! let counter = ValueAnimator::new(frames.clone());
//!
//! counter.set_request(AnimationRequest::new(200.0).with_duration_ms(1000));
//! frames.advance_and_run(500.0);
//! assert_eq!(counter.display_text(), "150");
//!
//! frames.advance_and_run(500.0);
//! assert_eq!(counter.display_text(), "200");
//! assert!(!counter.is_running());
//! ```

pub mod animator;
pub mod config;
pub mod easing;
pub mod error;
pub mod format;
pub mod request;

pub use animator::ValueAnimator;
pub use config::CounterConfig;
pub use easing::Easing;
pub use error::ConfigError;
pub use format::{format_fixed, MAX_DECIMALS};
pub use request::AnimationRequest;
