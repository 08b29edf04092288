use serde::Serialize;

use lobby_core::ActionKind;

/// The UI slice the presentation layer renders from.
///
/// Written only by [`crate::GameSession`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UiState {
    /// The welcome screen has been dismissed.
    pub welcome_shown: bool,
    /// The content panel being shown, if any.
    pub modal: Option<ActionKind>,
    /// The terminal window is open.
    pub terminal_open: bool,
    /// The section shown full-screen inside the terminal, if any.
    pub terminal_screen: Option<ActionKind>,
    /// Current page of that screen, 0-based.
    pub screen_page: usize,
    /// Object under the pointer, by id.
    pub hovered_object: Option<String>,
    /// Sound cues are enabled.
    pub sound_enabled: bool,
    /// The current dialog node's options may be offered.
    pub options_visible: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            welcome_shown: false,
            modal: None,
            terminal_open: false,
            terminal_screen: None,
            screen_page: 0,
            hovered_object: None,
            sound_enabled: true,
            options_visible: false,
        }
    }
}

impl UiState {
    /// Whether scene clicks should be ignored.
    pub fn blocks_scene(&self) -> bool {
        self.modal.is_some() || self.terminal_open
    }
}
