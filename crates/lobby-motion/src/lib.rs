//! Frame-driven character movement for Lobby.
//!
//! A [`MovementController`] turns click targets and held keys into a smoothly
//! interpolated position. It never owns a timer: it asks a
//! [`lobby_core::Scheduler`] for the next frame and reacts to the ticks the
//! host hands back. Depth (scale and stacking order) is a pure function of the
//! position's `y`, see [`depth`].

/// Speed policy and controller configuration.
pub mod config;
/// Depth illusion: scale and z-order from `y`.
pub mod depth;
/// Held movement keys.
pub mod keyboard;
/// The movement controller and its observable state.
pub mod movement;

/// Re-export of [`config::MotionConfig`] and [`config::SpeedPolicy`].
pub use config::{MotionConfig, SpeedPolicy};
/// Re-exports of depth helpers.
pub use depth::{Depth, DepthRange};
/// Re-exports of keyboard types.
pub use keyboard::{HeldKeys, MoveKey};
/// Re-exports of movement types.
pub use movement::{AnimState, Facing, FrameOutcome, MovementController, MovementState};
