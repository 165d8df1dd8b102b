//! Hunt Configuration
//!
//! Canvas bounds, palette, spawn ceiling, tick period and the anti-cheat
//! switch. Values come from environment variables with defaults matching
//! the classic 700x500 canvas.

use std::time::Duration;
use thiserror::Error;

use crate::game::anticheat::SpeedPolicy;
use crate::game::diamond::{Color, default_palette};
use crate::game::field::FieldConfig;

/// Configuration for the hunt.
#[derive(Debug, Clone)]
pub struct HuntConfig {
    /// Canvas width in pixels.
    pub canvas_width: u32,
    /// Canvas height in pixels.
    pub canvas_height: u32,
    /// Colors diamonds are drawn from.
    pub palette: Vec<Color>,
    /// Spawning pauses while the field holds more diamonds than this.
    pub spawn_ceiling: usize,
    /// Period of the spawn/flush tick.
    pub tick_period: Duration,
    /// Ban players whose claims imply impossible movement speed.
    pub cheating_prevention: bool,
    /// Fixed spawn RNG seed. `None` seeds from the wall clock.
    pub rng_seed: Option<u64>,
}

impl Default for HuntConfig {
    fn default() -> Self {
        Self {
            canvas_width: 700,
            canvas_height: 500,
            palette: default_palette(),
            spawn_ceiling: 100,
            tick_period: Duration::from_millis(crate::TICK_PERIOD_MS),
            cheating_prevention: true,
            rng_seed: None,
        }
    }
}

/// Largest accepted canvas side in pixels.
pub const MAX_CANVAS_SIDE: u32 = 1 << 16;

/// Configuration errors.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// Palette has no colors.
    #[error("diamond palette is empty")]
    EmptyPalette,
    /// Canvas leaves no room for diamonds.
    #[error("canvas {width}x{height} is too small (need more than 40x170)")]
    CanvasTooSmall {
        /// Configured width.
        width: u32,
        /// Configured height.
        height: u32,
    },
    /// Canvas larger than positions can address.
    #[error("canvas {width}x{height} is too large (max {max} per side)")]
    CanvasTooLarge {
        /// Configured width.
        width: u32,
        /// Configured height.
        height: u32,
        /// Largest accepted side.
        max: u32,
    },
    /// Tick period of zero.
    #[error("tick period must be positive")]
    ZeroTickPeriod,
}

impl HuntConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            canvas_width: read_env("HUNT_CANVAS_WIDTH").unwrap_or(defaults.canvas_width),
            canvas_height: read_env("HUNT_CANVAS_HEIGHT").unwrap_or(defaults.canvas_height),
            palette: std::env::var("HUNT_COLORS")
                .ok()
                .map(|raw| parse_palette(&raw))
                .unwrap_or(defaults.palette),
            spawn_ceiling: read_env("HUNT_SPAWN_CEILING").unwrap_or(defaults.spawn_ceiling),
            tick_period: read_env("HUNT_TICK_MS")
                .map(Duration::from_millis)
                .unwrap_or(defaults.tick_period),
            cheating_prevention: std::env::var("HUNT_CHEATING_PREVENTION")
                .map(|v| !(v == "false" || v == "0"))
                .unwrap_or(defaults.cheating_prevention),
            rng_seed: read_env("HUNT_RNG_SEED"),
        }
    }

    /// Check that the configuration can actually run a hunt.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.palette.is_empty() {
            return Err(ConfigError::EmptyPalette);
        }
        if self.canvas_width <= 40 || self.canvas_height <= 170 {
            return Err(ConfigError::CanvasTooSmall {
                width: self.canvas_width,
                height: self.canvas_height,
            });
        }
        if self.canvas_width > MAX_CANVAS_SIDE || self.canvas_height > MAX_CANVAS_SIDE {
            return Err(ConfigError::CanvasTooLarge {
                width: self.canvas_width,
                height: self.canvas_height,
                max: MAX_CANVAS_SIDE,
            });
        }
        if self.tick_period.is_zero() {
            return Err(ConfigError::ZeroTickPeriod);
        }
        Ok(())
    }

    /// Field settings derived from this config.
    pub fn field_config(&self) -> FieldConfig {
        FieldConfig {
            canvas_width: self.canvas_width,
            canvas_height: self.canvas_height,
            palette: self.palette.clone(),
            spawn_ceiling: self.spawn_ceiling,
        }
    }

    /// Anti-cheat policy derived from this config.
    pub fn speed_policy(&self) -> SpeedPolicy {
        SpeedPolicy {
            enabled: self.cheating_prevention,
            ..SpeedPolicy::default()
        }
    }
}

fn read_env<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|raw| raw.trim().parse().ok())
}

fn parse_palette(raw: &str) -> Vec<Color> {
    raw.split(',')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(Color::new)
        .collect()
}
