//! Counter configuration (tally.toml)
//!
//! ```toml
//! [counter]
//! duration_ms = 1200
//! decimals = 1
//! suffix = "%"
//! easing = "ease-out-quad"
//!
//! [frame]
//! fps = 60
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::easing::Easing;
use crate::error::{ConfigError, Result};
use crate::format::MAX_DECIMALS;
use crate::request::AnimationRequest;

/// Highest frame rate a host loop may be configured for.
pub const MAX_FPS: u32 = 240;

/// Top-level counter configuration
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct CounterConfig {
    #[serde(default)]
    pub counter: CounterDefaults,
    #[serde(default)]
    pub frame: FrameConfig,
}

/// Defaults applied to every request built from this config
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct CounterDefaults {
    #[serde(default = "default_duration_ms")]
    pub duration_ms: i64,
    #[serde(default)]
    pub decimals: usize,
    #[serde(default)]
    pub prefix: String,
    #[serde(default)]
    pub suffix: String,
    #[serde(default)]
    pub easing: Easing,
}

fn default_duration_ms() -> i64 {
    AnimationRequest::DEFAULT_DURATION_MS
}

impl Default for CounterDefaults {
    fn default() -> Self {
        Self {
            duration_ms: default_duration_ms(),
            decimals: 0,
            prefix: String::new(),
            suffix: String::new(),
            easing: Easing::default(),
        }
    }
}

/// Host frame loop settings
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct FrameConfig {
    #[serde(default = "default_fps")]
    pub fps: u32,
}

fn default_fps() -> u32 {
    60
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self { fps: default_fps() }
    }
}

impl CounterConfig {
    /// Parse and validate configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: CounterConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        debug!(path = %path.display(), "loaded counter config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.counter.duration_ms < 0 {
            return Err(ConfigError::Invalid(format!(
                "counter.duration_ms must not be negative (got {})",
                self.counter.duration_ms
            )));
        }
        if self.counter.decimals > MAX_DECIMALS {
            return Err(ConfigError::Invalid(format!(
                "counter.decimals must be at most {MAX_DECIMALS} (got {})",
                self.counter.decimals
            )));
        }
        if !self.counter.easing.is_monotonic() {
            return Err(ConfigError::Invalid(format!(
                "counter.easing control points must lie in [0, 1] (got {:?})",
                self.counter.easing
            )));
        }
        if self.frame.fps == 0 || self.frame.fps > MAX_FPS {
            return Err(ConfigError::Invalid(format!(
                "frame.fps must be between 1 and {MAX_FPS} (got {})",
                self.frame.fps
            )));
        }
        Ok(())
    }

    /// Build a request for `target` using the configured defaults.
    pub fn request(&self, target: f64) -> AnimationRequest {
        AnimationRequest::new(target)
            .with_duration_ms(self.counter.duration_ms)
            .with_decimals(self.counter.decimals)
            .with_prefix(self.counter.prefix.clone())
            .with_suffix(self.counter.suffix.clone())
            .with_easing(self.counter.easing)
    }

    /// Time between frames of the host loop.
    pub fn frame_interval_ms(&self) -> f64 {
        1000.0 / self.frame.fps.max(1) as f64
    }
}
