//! Core types for Lobby: the scene, its interactive objects, and the plumbing
//! every interactive component shares.
//!
//! This crate knows nothing about movement, dialog, or the terminal. It
//! defines the coordinate system they agree on, the observable state slices
//! they publish into, and the [`Scheduler`] capability that stands in for the
//! host's animation-frame and timer callbacks.

/// Error types used throughout the crate.
pub mod error;
/// Scene coordinates, the walkable band, and viewport mapping.
pub mod geometry;
/// Observable state slices with subscribe/notify.
pub mod observable;
/// Frame and timer scheduling abstraction.
pub mod schedule;
/// Scene layout: interactive objects and the actions they trigger.
pub mod scene;

/// Re-export error types.
pub use error::{CoreError, CoreResult};
/// Re-export geometry types.
pub use geometry::{ClientRect, Position, Viewport, WalkableArea};
/// Re-export observable types.
pub use observable::{Observable, SubscriptionId};
/// Re-export scheduling types.
pub use schedule::{ManualScheduler, Scheduler, Tick, TickHandle, Wake};
/// Re-export scene types.
pub use scene::{ActionKind, InteractiveObject, SceneConfig, Size};
