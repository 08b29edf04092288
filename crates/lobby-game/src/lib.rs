//! The lobby game session.
//!
//! [`GameSession`] wires the movement controller, the dialog engine, the
//! typewriter and the terminal around one [`lobby_core::Scheduler`]. Hosts
//! feed it clicks, keys and fired ticks, and render from the observable
//! slices it exposes.
//!
//! ```
//! use std::time::Duration;
//! use lobby_core::{ActionKind, ManualScheduler};
//! use lobby_game::{GameConfig, GameSession};
//!
//! let mut game = GameSession::new(GameConfig::default(), ManualScheduler::new()).unwrap();
//! game.trigger_action(ActionKind::Skills).unwrap();
//! game.advance(Duration::from_secs(5));
//! assert_eq!(game.ui().modal, Some(ActionKind::Skills));
//! ```

/// Session configuration.
pub mod config;
/// Error types for the game crate.
pub mod error;
/// The composition root.
pub mod session;
/// Sound cue dispatch.
pub mod sound;
/// The UI state slice.
pub mod ui;

pub use config::GameConfig;
pub use error::{GameError, GameResult};
pub use session::{EscapeTarget, GameSession};
pub use sound::{SoundBoard, SoundCue};
pub use ui::UiState;
