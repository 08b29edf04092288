//! Configuration for a game session.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use lobby_core::{CoreError, SceneConfig};
use lobby_dialog::TypewriterConfig;
use lobby_motion::MotionConfig;
use lobby_terminal::TerminalConfig;

use crate::error::GameResult;

/// Everything a [`crate::GameSession`] is built from.
///
/// Every field has a default, so a JSON file only needs the values it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Scene layout and objects.
    pub scene: SceneConfig,
    /// Movement tuning.
    pub motion: MotionConfig,
    /// Dialog reveal speed.
    pub typewriter: TypewriterConfig,
    /// Terminal settings.
    pub terminal: TerminalConfig,
    /// Whether sound cues start enabled.
    pub sound_enabled: bool,
    /// Minimum gap between two typing blips, in milliseconds.
    pub typing_sound_throttle_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            scene: SceneConfig::lobby(),
            motion: MotionConfig::default(),
            typewriter: TypewriterConfig::default(),
            terminal: TerminalConfig::default(),
            sound_enabled: true,
            typing_sound_throttle_ms: 30,
        }
    }
}

impl GameConfig {
    /// Set the scene.
    pub fn with_scene(mut self, scene: SceneConfig) -> Self {
        self.scene = scene;
        self
    }

    /// Set the movement configuration.
    pub fn with_motion(mut self, motion: MotionConfig) -> Self {
        self.motion = motion;
        self
    }

    /// Set the typewriter configuration.
    pub fn with_typewriter(mut self, typewriter: TypewriterConfig) -> Self {
        self.typewriter = typewriter;
        self
    }

    /// Set the terminal configuration.
    pub fn with_terminal(mut self, terminal: TerminalConfig) -> Self {
        self.terminal = terminal;
        self
    }

    /// Enable or disable sound cues.
    pub fn with_sound(mut self, enabled: bool) -> Self {
        self.sound_enabled = enabled;
        self
    }

    /// The typing blip throttle.
    pub fn typing_sound_throttle(&self) -> Duration {
        Duration::from_millis(self.typing_sound_throttle_ms)
    }

    /// Check every part, and that scene and motion agree on the walkable area.
    pub fn validate(&self) -> GameResult<()> {
        self.scene.validate()?;
        self.motion.validate()?;
        self.typewriter.validate()?;
        if self.scene.walkable_area != self.motion.walkable_area {
            return Err(CoreError::InvalidConfig(
                "scene and motion walkable areas differ".into(),
            )
            .into());
        }
        Ok(())
    }

    /// Parse and validate JSON.
    pub fn from_json(json: &str) -> GameResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON file.
    pub fn load(path: &Path) -> GameResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}
