use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// A point in scene-local units.
///
/// `y` is measured upward from the bottom of the scene, so a smaller `y`
/// means the character stands closer to the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    /// Horizontal coordinate.
    pub x: f64,
    /// Distance from the bottom of the scene.
    pub y: f64,
}

impl Position {
    /// Create a position.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Straight-line distance to another position.
    pub fn distance_to(&self, other: Position) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Move `ratio` of the way towards `other` (0.0 stays, 1.0 lands on it).
    pub fn towards(&self, other: Position, ratio: f64) -> Position {
        Position {
            x: self.x + (other.x - self.x) * ratio,
            y: self.y + (other.y - self.y) * ratio,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.1}, {:.1})", self.x, self.y)
    }
}

/// The rectangle of legal character positions.
///
/// Supplied once at startup and never mutated while the scene runs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WalkableArea {
    /// Left edge.
    pub min_x: f64,
    /// Right edge.
    pub max_x: f64,
    /// Front of the floor (closest to the viewer).
    pub min_y: f64,
    /// Back of the floor (farthest from the viewer).
    pub max_y: f64,
}

impl WalkableArea {
    /// The lobby floor.
    pub const LOBBY: Self = Self {
        min_x: 40.0,
        max_x: 600.0,
        min_y: 20.0,
        max_y: 64.0,
    };

    /// Create a validated walkable area.
    pub fn new(min_x: f64, max_x: f64, min_y: f64, max_y: f64) -> CoreResult<Self> {
        let area = Self {
            min_x,
            max_x,
            min_y,
            max_y,
        };
        area.validate()?;
        Ok(area)
    }

    /// Check that every bound is finite and each axis is non-inverted.
    pub fn validate(&self) -> CoreResult<()> {
        let bounds = [self.min_x, self.max_x, self.min_y, self.max_y];
        if bounds.iter().any(|b| !b.is_finite()) {
            return Err(CoreError::InvalidArea("bounds must be finite".into()));
        }
        if self.min_x > self.max_x {
            return Err(CoreError::InvalidArea(format!(
                "min_x {} exceeds max_x {}",
                self.min_x, self.max_x
            )));
        }
        if self.min_y > self.max_y {
            return Err(CoreError::InvalidArea(format!(
                "min_y {} exceeds max_y {}",
                self.min_y, self.max_y
            )));
        }
        Ok(())
    }

    /// Clamp a position into the area. NaN coordinates collapse to the minimum bound.
    pub fn clamp(&self, position: Position) -> Position {
        Position {
            x: clamp_axis(position.x, self.min_x, self.max_x),
            y: clamp_axis(position.y, self.min_y, self.max_y),
        }
    }

    /// Clamp a single `y` value into the depth band.
    pub fn clamp_y(&self, y: f64) -> f64 {
        clamp_axis(y, self.min_y, self.max_y)
    }

    /// Whether the position lies inside the area (bounds inclusive).
    pub fn contains(&self, position: Position) -> bool {
        (self.min_x..=self.max_x).contains(&position.x)
            && (self.min_y..=self.max_y).contains(&position.y)
    }

    /// Where `y` sits in the depth band: 0.0 at the front, 1.0 at the back.
    pub fn depth_fraction(&self, y: f64) -> f64 {
        let span = self.max_y - self.min_y;
        if span <= 0.0 {
            return 0.0;
        }
        (self.clamp_y(y) - self.min_y) / span
    }
}

impl Default for WalkableArea {
    fn default() -> Self {
        Self::LOBBY
    }
}

// `max` then `min` never panics and maps NaN to `lo`, unlike `f64::clamp`.
fn clamp_axis(value: f64, lo: f64, hi: f64) -> f64 {
    value.max(lo).min(hi)
}

/// A rendered rectangle in client (screen) pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClientRect {
    /// Left edge in client pixels.
    pub left: f64,
    /// Top edge in client pixels.
    pub top: f64,
    /// Rendered width.
    pub width: f64,
    /// Rendered height.
    pub height: f64,
}

/// Fixed logical resolution of the game canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Full canvas width.
    pub width: f64,
    /// Full canvas height (scene plus toolbar).
    pub height: f64,
    /// Height of the scene area above the toolbar.
    pub scene_height: f64,
    /// Height of the toolbar strip.
    pub toolbar_height: f64,
}

impl Viewport {
    /// Classic 640x400 layout: a 640x320 scene over an 80px toolbar.
    pub const CLASSIC: Self = Self {
        width: 640.0,
        height: 400.0,
        scene_height: 320.0,
        toolbar_height: 80.0,
    };

    /// Map a client click inside the rendered scene rect to scene coordinates.
    ///
    /// The rect may be scaled to any size; the result uses the bottom-origin
    /// `y` convention and is not clamped. Returns `None` for a degenerate rect.
    pub fn scene_point(&self, client_x: f64, client_y: f64, rect: ClientRect) -> Option<Position> {
        if rect.width <= 0.0 || rect.height <= 0.0 {
            return None;
        }
        let scale_x = self.width / rect.width;
        let scale_y = self.scene_height / rect.height;
        let x = (client_x - rect.left) * scale_x;
        let top_y = (client_y - rect.top) * scale_y;
        Some(Position::new(x, self.scene_height - top_y))
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::CLASSIC
    }
}
