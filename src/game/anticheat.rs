//! Movement Speed Check
//!
//! A player "walks" from one claimed diamond to the next. Claims that imply
//! moving faster than 2.5x the nominal walking speed get the player banned.
//! This filters gross teleporting only; a client that paces its own claims
//! is not detected.

use chrono::{DateTime, Utc};

use crate::core::position::Position;

/// Nominal avatar walking speed (px/s).
pub const WALKING_SPEED: f64 = 50.0;

/// Tolerated multiple of the walking speed.
pub const SPEED_TOLERANCE_FACTOR: f64 = 2.5;

/// Moves up to this distance (px) are never checked.
pub const STATIONARY_RADIUS: f64 = 1.0;

/// Verdict of the speed check.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpeedVerdict {
    /// Movement is possible.
    Plausible,
    /// Movement is too fast.
    Implausible {
        /// Distance travelled (px).
        distance: f64,
        /// Time taken (s). Zero or less means "instantly".
        elapsed_secs: f64,
    },
}

/// Anti-cheat speed policy.
#[derive(Debug, Clone, Copy)]
pub struct SpeedPolicy {
    /// Whether the check runs at all.
    pub enabled: bool,
    /// Highest accepted speed (px/s).
    pub max_speed: f64,
    /// Radius within which no check is made (px).
    pub stationary_radius: f64,
}

impl Default for SpeedPolicy {
    fn default() -> Self {
        Self {
            enabled: true,
            max_speed: WALKING_SPEED * SPEED_TOLERANCE_FACTOR,
            stationary_radius: STATIONARY_RADIUS,
        }
    }
}

impl SpeedPolicy {
    /// Judge a move from `from` (at `since`) to `to` (at `now`).
    pub fn check(
        &self,
        from: Position,
        since: DateTime<Utc>,
        to: Position,
        now: DateTime<Utc>,
    ) -> SpeedVerdict {
        if !self.enabled {
            return SpeedVerdict::Plausible;
        }

        let distance = from.distance(to);
        if distance <= self.stationary_radius {
            return SpeedVerdict::Plausible;
        }

        let elapsed_secs = (now - since).num_milliseconds() as f64 / 1000.0;
        if elapsed_secs <= 0.0 || distance / elapsed_secs > self.max_speed {
            SpeedVerdict::Implausible { distance, elapsed_secs }
        } else {
            SpeedVerdict::Plausible
        }
    }
}
