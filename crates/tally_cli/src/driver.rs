//! Terminal frame driver
//!
//! Pumps a `FrameLoop` at a fixed interval and echoes the counter's display
//! text on a single updating line.

use std::io::{self, Write};
use std::rc::Rc;
use std::time::Duration;

use tally_animation::{AnimationRequest, ValueAnimator};
use tally_core::{Clock, FrameLoop};
use tracing::info;

/// A second request issued part way through the first run.
#[derive(Clone, Debug)]
pub struct Retarget {
    /// Milliseconds after the driver starts
    pub after_ms: f64,
    pub request: AnimationRequest,
}

/// Run frames until the counter settles and no retarget is pending.
///
/// `wait` is called between frames with the frame interval. Returns the
/// number of frames run.
pub fn drive<C: Clock>(
    frames: &Rc<FrameLoop<C>>,
    animator: &ValueAnimator,
    mut retarget: Option<Retarget>,
    frame_interval: Duration,
    mut wait: impl FnMut(Duration),
    out: &mut impl Write,
) -> io::Result<u64> {
    let started = frames.clock().now();
    let mut last_text = animator.display_text();
    write!(out, "\r{last_text}")?;
    out.flush()?;

    while frames.has_pending_frames() || retarget.is_some() {
        wait(frame_interval);

        let elapsed_ms = frames.clock().now().saturating_sub(started).as_millis_f64();
        if retarget.as_ref().is_some_and(|r| elapsed_ms >= r.after_ms) {
            if let Some(next) = retarget.take() {
                info!(value = next.request.target_value, elapsed_ms, "retargeting counter");
                animator.set_request(next.request);
            }
        }

        frames.run_frame();

        let text = animator.display_text();
        if text != last_text {
            // Pad so a shorter value fully overwrites a longer one.
            let width = last_text.chars().count();
            write!(out, "\r{text:<width$}")?;
            out.flush()?;
            last_text = text;
        }
    }

    writeln!(out)?;
    Ok(frames.frames_run())
}
