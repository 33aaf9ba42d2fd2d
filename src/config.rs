use std::time::Duration;

use clap::Args;

use crate::constants::{COOL_DOWN, WHEEL_NOISE_THRESHOLD};
use crate::error::{Result, ShowcaseError};

/// Tunables of the navigation controller and its input adapters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavigationConfig {
    pub cool_down: Duration,
    pub wheel_threshold: f32,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            cool_down: COOL_DOWN,
            wheel_threshold: WHEEL_NOISE_THRESHOLD,
        }
    }
}

impl NavigationConfig {
    pub fn validate(self) -> Result<Self> {
        if self.cool_down.is_zero() {
            return Err(ShowcaseError::ZeroCoolDown);
        }
        if !self.wheel_threshold.is_finite() || self.wheel_threshold < 0.0 {
            return Err(ShowcaseError::InvalidWheelThreshold(self.wheel_threshold));
        }
        Ok(self)
    }
}

/// Command line flags shared by every subcommand of the binary.
#[derive(Args, Debug, Clone)]
pub struct NavigationArgs {
    /// Cool-down after an accepted move, in milliseconds
    #[arg(long, default_value_t = COOL_DOWN.as_millis() as u64)]
    pub cool_down_ms: u64,

    /// Wheel deltas with a magnitude at or below this are ignored
    #[arg(long, default_value_t = WHEEL_NOISE_THRESHOLD)]
    pub wheel_threshold: f32,

    /// Comma separated slide ids (defaults to the built-in sections)
    #[arg(long, value_delimiter = ',')]
    pub slides: Vec<String>,
}

impl NavigationArgs {
    pub fn to_config(&self) -> Result<NavigationConfig> {
        NavigationConfig {
            cool_down: Duration::from_millis(self.cool_down_ms),
            wheel_threshold: self.wheel_threshold,
        }
        .validate()
    }
}
