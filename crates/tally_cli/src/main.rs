//! Tally CLI - preview animated KPI counters in the terminal
//!
//! Runs a `ValueAnimator` on a real-time frame loop and prints every rendered
//! frame on one line. Counter defaults come from an optional `tally.toml`;
//! command-line flags override them.

mod driver;

use std::io;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tally_animation::{AnimationRequest, CounterConfig, ValueAnimator};
use tally_core::FrameLoop;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::driver::Retarget;

/// Animate a KPI counter in the terminal
#[derive(Parser, Debug)]
#[command(name = "tally")]
#[command(about = "Animate a KPI counter in the terminal")]
#[command(version)]
struct Args {
    /// Value to count up to
    #[arg(allow_negative_numbers = true)]
    target: f64,

    /// Animation duration in milliseconds
    #[arg(short, long, allow_negative_numbers = true)]
    duration: Option<i64>,

    /// Digits after the decimal point
    #[arg(long)]
    decimals: Option<usize>,

    /// Text rendered before the number
    #[arg(long)]
    prefix: Option<String>,

    /// Text rendered after the number
    #[arg(long)]
    suffix: Option<String>,

    /// Switch to a second target part way through the run
    #[arg(long, allow_negative_numbers = true)]
    retarget: Option<f64>,

    /// Milliseconds to wait before switching to --retarget
    #[arg(long, default_value = "300")]
    retarget_after: u64,

    /// Frames per second
    #[arg(long)]
    fps: Option<u32>,

    /// Counter config file (tally.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    /// Load the config file (if any) and apply command-line overrides.
    fn resolve_config(&self) -> Result<CounterConfig> {
        let mut config = match &self.config {
            Some(path) => CounterConfig::load(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => CounterConfig::default(),
        };

        if let Some(fps) = self.fps {
            config.frame.fps = fps;
        }
        config.validate().context("Invalid frame settings")?;
        Ok(config)
    }

    /// Build a request for `target` from config defaults and flags.
    fn request(&self, config: &CounterConfig, target: f64) -> AnimationRequest {
        let mut request = config.request(target);
        if let Some(duration) = self.duration {
            request.duration_ms = duration;
        }
        if let Some(decimals) = self.decimals {
            request.decimals = decimals;
        }
        if let Some(prefix) = &self.prefix {
            request.prefix = prefix.clone();
        }
        if let Some(suffix) = &self.suffix {
            request.suffix = suffix.clone();
        }
        request
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = args.resolve_config()?;
    let request = args.request(&config, args.target);
    let retarget = args.retarget.map(|target| Retarget {
        after_ms: args.retarget_after as f64,
        request: args.request(&config, target),
    });

    info!(
        value = request.target_value,
        duration_ms = request.duration_ms,
        fps = config.frame.fps,
        "starting counter"
    );

    let frames = Rc::new(FrameLoop::new());
    let animator = ValueAnimator::with_format(
        frames.clone(),
        request.decimals,
        request.prefix.clone(),
        request.suffix.clone(),
    );
    animator.set_request(request);

    let interval = Duration::from_secs_f64(config.frame_interval_ms() / 1000.0);
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let frames_run = driver::drive(
        &frames,
        &animator,
        retarget,
        interval,
        std::thread::sleep,
        &mut out,
    )
    .context("Failed to write counter output")?;

    animator.dispose();
    info!(frames = frames_run, "counter settled");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_args() {
        let args = Args::try_parse_from(["tally", "200"]).unwrap();
        assert_eq!(args.target, 200.0);
        assert_eq!(args.retarget_after, 300);
        assert!(args.config.is_none());

        let config = args.resolve_config().unwrap();
        let request = args.request(&config, args.target);
        assert_eq!(request, AnimationRequest::new(200.0));
    }

    #[test]
    fn test_flags_override_config_defaults() {
        let args = Args::try_parse_from([
            "tally",
            "-12.5",
            "--duration",
            "400",
            "--decimals",
            "1",
            "--suffix",
            "%",
            "--fps",
            "30",
        ])
        .unwrap();

        let config = args.resolve_config().unwrap();
        assert_eq!(config.frame.fps, 30);

        let request = args.request(&config, args.target);
        assert_eq!(request.target_value, -12.5);
        assert_eq!(request.duration_ms, 400);
        assert_eq!(request.render(-12.5), "-12.5%");
    }

    #[test]
    fn test_rejects_zero_fps() {
        let args = Args::try_parse_from(["tally", "1", "--fps", "0"]).unwrap();
        assert!(args.resolve_config().is_err());
    }

    #[test]
    fn test_missing_target_is_an_error() {
        assert!(Args::try_parse_from(["tally"]).is_err());
    }
}
