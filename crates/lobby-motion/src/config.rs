use serde::{Deserialize, Serialize};

use lobby_core::{CoreError, CoreResult, Position, WalkableArea};

use crate::depth::DepthRange;

/// How fast the character walks towards a click target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SpeedPolicy {
    /// One speed for free exploration, a faster one when walking to an object.
    Fixed {
        /// Units per second for plain clicks and keyboard movement.
        base: f64,
        /// Units per second when an action is pending.
        interaction: f64,
    },
    /// Base speed, raised so any click arrives within `max_travel_secs`.
    Bounded {
        /// Units per second for short moves and keyboard movement.
        base: f64,
        /// Upper bound on travel time for a click-driven move.
        max_travel_secs: f64,
    },
}

impl Default for SpeedPolicy {
    fn default() -> Self {
        Self::Fixed {
            base: 100.0,
            interaction: 200.0,
        }
    }
}

impl SpeedPolicy {
    /// Speed used for keyboard movement.
    pub fn base(&self) -> f64 {
        match *self {
            Self::Fixed { base, .. } | Self::Bounded { base, .. } => base,
        }
    }

    /// Speed for a click-driven move, fixed for the whole trip.
    pub fn speed_for(&self, initial_distance: f64, has_action: bool) -> f64 {
        match *self {
            Self::Fixed { base, interaction } => {
                if has_action {
                    interaction
                } else {
                    base
                }
            }
            Self::Bounded {
                base,
                max_travel_secs,
            } => base.max(initial_distance / max_travel_secs),
        }
    }

    fn validate(&self) -> CoreResult<()> {
        let (a, b, what) = match *self {
            Self::Fixed { base, interaction } => (base, interaction, "interaction speed"),
            Self::Bounded {
                base,
                max_travel_secs,
            } => (base, max_travel_secs, "max travel time"),
        };
        if !(a.is_finite() && a > 0.0) {
            return Err(CoreError::InvalidConfig(format!(
                "base speed must be positive, got {a}"
            )));
        }
        if !(b.is_finite() && b > 0.0) {
            return Err(CoreError::InvalidConfig(format!(
                "{what} must be positive, got {b}"
            )));
        }
        Ok(())
    }
}

/// Configuration for a [`crate::MovementController`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    /// Legal positions.
    pub walkable_area: WalkableArea,
    /// Where the character starts (clamped on use).
    pub start: Position,
    /// Click-to-move speed policy.
    pub speed: SpeedPolicy,
    /// Distance below which the character snaps onto its target.
    pub arrival_threshold: f64,
    /// Scale range for the depth illusion.
    pub depth: DepthRange,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            walkable_area: WalkableArea::LOBBY,
            start: Position::new(300.0, 40.0),
            speed: SpeedPolicy::default(),
            arrival_threshold: 5.0,
            depth: DepthRange::default(),
        }
    }
}

impl MotionConfig {
    /// Set the walkable area.
    pub fn with_walkable_area(mut self, area: WalkableArea) -> Self {
        self.walkable_area = area;
        self
    }

    /// Set the starting position.
    pub fn with_start(mut self, start: Position) -> Self {
        self.start = start;
        self
    }

    /// Set the speed policy.
    pub fn with_speed(mut self, speed: SpeedPolicy) -> Self {
        self.speed = speed;
        self
    }

    /// Set the arrival threshold.
    pub fn with_arrival_threshold(mut self, threshold: f64) -> Self {
        self.arrival_threshold = threshold;
        self
    }

    /// Set the depth scale range.
    pub fn with_depth(mut self, depth: DepthRange) -> Self {
        self.depth = depth;
        self
    }

    /// Check every value is in range.
    pub fn validate(&self) -> CoreResult<()> {
        self.walkable_area.validate()?;
        self.speed.validate()?;
        if !(self.arrival_threshold.is_finite() && self.arrival_threshold > 0.0) {
            return Err(CoreError::InvalidConfig(format!(
                "arrival threshold must be positive, got {}",
                self.arrival_threshold
            )));
        }
        Ok(())
    }
}
