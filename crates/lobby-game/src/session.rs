//! The composition root.
//!
//! [`GameSession`] owns the scheduler and every interactive component, routes
//! input to them, and hands each fired tick to whichever component asked for
//! it. Cross-component rules (a dialog node change restarts the typewriter, an
//! arrival opens a panel, Escape closes the topmost thing) live here and
//! nowhere else.

use std::fmt;
use std::time::Duration;

use tracing::{debug, trace, warn};

use lobby_core::{
    ActionKind, ClientRect, ManualScheduler, Observable, Position, SceneConfig, Scheduler,
    SubscriptionId, Tick,
};
use lobby_dialog::{
    ChoiceOutcome, DialogEngine, DialogGraph, DialogSession, EASTER_EGG_NODE, INTRO_NODE,
    Typewriter, TypewriterEvent, TypewriterSnapshot, WELCOME_NODE, portfolio_tree,
};
use lobby_motion::{FrameOutcome, MoveKey, MovementController, MovementState};
use lobby_terminal::{Profile, ScreenViewer, TerminalEffect, TerminalSession, screen_for};

use crate::config::GameConfig;
use crate::error::{GameError, GameResult};
use crate::sound::{SoundBoard, SoundCue};
use crate::ui::UiState;

/// Clicks on the character before it gets chatty.
const EASTER_EGG_CLICKS: u32 = 5;

/// What a press of Escape dismissed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EscapeTarget {
    /// The full-screen section inside the terminal.
    Screen,
    /// The terminal window.
    Terminal,
    /// The content panel.
    Modal,
    /// The conversation.
    Dialog,
    /// Nothing was open; movement was stopped.
    Movement,
}

/// One visitor's session in the lobby.
pub struct GameSession<S: Scheduler = ManualScheduler> {
    config: GameConfig,
    sched: S,
    movement: MovementController,
    dialog: DialogEngine,
    typewriter: Typewriter,
    terminal: TerminalSession,
    screen: Option<ScreenViewer>,
    ui: Observable<UiState>,
    sound: SoundBoard,
    character_clicks: u32,
}

impl<S: Scheduler> fmt::Debug for GameSession<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameSession")
            .field("now", &self.sched.now())
            .field("ui", self.ui.get())
            .field("movement", self.movement.state())
            .field("dialog", self.dialog.session())
            .field("typewriter", self.typewriter.snapshot())
            .finish()
    }
}

impl<S: Scheduler> GameSession<S> {
    /// Create a session with the built-in conversation and profile.
    pub fn new(config: GameConfig, sched: S) -> GameResult<Self> {
        Self::with_content(config, portfolio_tree(), Profile::default(), sched)
    }

    /// Create a session with custom dialog content and profile.
    pub fn with_content(
        config: GameConfig,
        graph: DialogGraph,
        profile: Profile,
        sched: S,
    ) -> GameResult<Self> {
        config.validate()?;
        graph.validate()?;

        let ui = UiState {
            sound_enabled: config.sound_enabled,
            ..UiState::default()
        };
        debug!(nodes = graph.len(), objects = config.scene.objects.len(), "game session created");

        Ok(Self {
            movement: MovementController::new(config.motion.clone()),
            dialog: DialogEngine::new(graph),
            typewriter: Typewriter::new(config.typewriter),
            terminal: TerminalSession::new(profile, config.terminal.clone()),
            screen: None,
            ui: Observable::new(ui),
            sound: SoundBoard::new(config.typing_sound_throttle()),
            character_clicks: 0,
            sched,
            config,
        })
    }

    // -- Accessors --

    /// The configuration in use.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The scene layout.
    pub fn scene(&self) -> &SceneConfig {
        &self.config.scene
    }

    /// The UI slice.
    pub fn ui(&self) -> &UiState {
        self.ui.get()
    }

    /// The movement controller.
    pub fn movement(&self) -> &MovementController {
        &self.movement
    }

    /// The dialog engine.
    pub fn dialog(&self) -> &DialogEngine {
        &self.dialog
    }

    /// The typewriter.
    pub fn typewriter(&self) -> &Typewriter {
        &self.typewriter
    }

    /// The terminal.
    pub fn terminal(&self) -> &TerminalSession {
        &self.terminal
    }

    /// The terminal screen being viewed, if any.
    pub fn screen(&self) -> Option<&ScreenViewer> {
        self.screen.as_ref()
    }

    /// The scheduler.
    pub fn scheduler(&self) -> &S {
        &self.sched
    }

    /// Listen to UI changes.
    pub fn subscribe_ui(&mut self, listener: impl FnMut(&UiState) + 'static) -> SubscriptionId {
        self.ui.subscribe(listener)
    }

    /// Listen to movement changes.
    pub fn subscribe_movement(
        &mut self,
        listener: impl FnMut(&MovementState) + 'static,
    ) -> SubscriptionId {
        self.movement.subscribe(listener)
    }

    /// Listen to dialog session changes.
    pub fn subscribe_dialog(
        &mut self,
        listener: impl FnMut(&DialogSession) + 'static,
    ) -> SubscriptionId {
        self.dialog.subscribe(listener)
    }

    /// Listen to typewriter changes.
    pub fn subscribe_typewriter(
        &mut self,
        listener: impl FnMut(&TypewriterSnapshot) + 'static,
    ) -> SubscriptionId {
        self.typewriter.subscribe(listener)
    }

    /// Install the host's sound playback hook.
    pub fn set_sound_hook(&mut self, hook: impl FnMut(SoundCue) + 'static) {
        self.sound.set_hook(hook);
    }

    // -- Scene --

    /// Dismiss the welcome screen and start the intro conversation.
    ///
    /// Leaves the welcome screen up if the dialog content has no intro node.
    pub fn dismiss_welcome(&mut self) -> GameResult<()> {
        if self.ui.get().welcome_shown {
            return Ok(());
        }
        self.open_dialog(INTRO_NODE)?;
        self.ui.update(|ui| ui.welcome_shown = true);
        Ok(())
    }

    /// Walk to a scene point. Ignored while a panel or the terminal is open.
    pub fn click_scene(&mut self, point: Position) -> bool {
        if self.ui.get().blocks_scene() {
            trace!(%point, "scene click ignored");
            return false;
        }
        self.movement.move_to(point, None, &mut self.sched);
        true
    }

    /// Map a client click through the viewport, then [`Self::click_scene`].
    pub fn click_client(&mut self, client_x: f64, client_y: f64, rect: ClientRect) -> bool {
        match self.config.scene.viewport.scene_point(client_x, client_y, rect) {
            Some(point) => self.click_scene(point),
            None => false,
        }
    }

    /// Click an object by id.
    pub fn click_object(&mut self, id: &str) -> GameResult<bool> {
        let action = self
            .config
            .scene
            .object(id)
            .map(|o| o.action)
            .ok_or_else(|| GameError::UnknownObject(id.to_string()))?;
        self.trigger_action(action)
    }

    /// Run an action from an object or the toolbar.
    ///
    /// `Talk` opens the conversation straight away. Anything else walks to the
    /// bound object's interaction point and opens its panel on arrival.
    /// Ignored (returns `false`) while a panel or the terminal is open.
    pub fn trigger_action(&mut self, action: ActionKind) -> GameResult<bool> {
        if self.ui.get().blocks_scene() {
            trace!(%action, "action ignored");
            return Ok(false);
        }
        if action == ActionKind::Talk {
            self.open_dialog(WELCOME_NODE)?;
            return Ok(true);
        }
        let point = self
            .config
            .scene
            .object_for_action(action)
            .map(|o| o.interaction_point);
        match point {
            Some(point) => self.movement.move_to(point, Some(action), &mut self.sched),
            None => self.open_modal(action),
        }
        Ok(true)
    }

    /// Click on the character itself. Every fifth click opens the easter egg
    /// conversation, if the dialog content has one.
    pub fn click_character(&mut self) -> GameResult<bool> {
        if self.overlay_open() {
            return Ok(false);
        }
        self.character_clicks += 1;
        if self.character_clicks < EASTER_EGG_CLICKS {
            return Ok(false);
        }
        self.character_clicks = 0;
        if !self.dialog.graph().contains(EASTER_EGG_NODE) {
            return Ok(false);
        }
        self.open_dialog(EASTER_EGG_NODE)?;
        Ok(true)
    }

    /// Track the object under the pointer.
    pub fn hover_object(&mut self, id: Option<&str>) {
        let hovered = id.map(str::to_string);
        if self.ui.get().hovered_object == hovered {
            return;
        }
        if hovered.is_some() {
            self.cue(SoundCue::Select);
        }
        self.ui.update(|ui| ui.hovered_object = hovered);
    }

    /// Close the content panel.
    pub fn close_modal(&mut self) {
        if self.ui.get().modal.is_some() {
            self.ui.update(|ui| ui.modal = None);
        }
        self.movement.finish_interaction();
    }

    /// Flip sound cues on or off. Returns the new setting.
    pub fn toggle_sound(&mut self) -> bool {
        self.ui.update(|ui| ui.sound_enabled = !ui.sound_enabled);
        self.ui.get().sound_enabled
    }

    // -- Keyboard --

    /// A key went down. Returns whether the session handled it.
    ///
    /// Key names follow DOM `KeyboardEvent.key`.
    pub fn key_down(&mut self, key: &str) -> bool {
        match key {
            "Escape" => {
                self.escape();
                true
            }
            " " | "Enter" => self.skip_typewriter(),
            "t" | "T" if !self.overlay_open() => {
                self.open_terminal();
                true
            }
            _ => match MoveKey::from_key_name(key) {
                Some(mk) if !self.overlay_open() => {
                    self.movement.key_down(mk, &mut self.sched);
                    true
                }
                _ => false,
            },
        }
    }

    /// A key went up.
    pub fn key_up(&mut self, key: &str) -> bool {
        match MoveKey::from_key_name(key) {
            Some(mk) => {
                self.movement.key_up(mk, &mut self.sched);
                true
            }
            None => false,
        }
    }

    /// Input focus was lost.
    pub fn blur(&mut self) {
        self.movement.blur(&mut self.sched);
    }

    /// Close the topmost open thing, or stop walking.
    pub fn escape(&mut self) -> EscapeTarget {
        if self.screen.is_some() {
            self.close_screen();
            EscapeTarget::Screen
        } else if self.ui.get().terminal_open {
            self.close_terminal();
            EscapeTarget::Terminal
        } else if self.ui.get().modal.is_some() {
            self.close_modal();
            EscapeTarget::Modal
        } else if self.dialog.is_open() {
            self.close_dialog();
            EscapeTarget::Dialog
        } else {
            self.movement.stop(&mut self.sched);
            EscapeTarget::Movement
        }
    }

    fn overlay_open(&self) -> bool {
        self.ui.get().blocks_scene() || self.dialog.is_open()
    }

    // -- Dialog --

    /// Open the conversation at `node`.
    pub fn open_dialog(&mut self, node: &str) -> GameResult<()> {
        self.dialog.start(node)?;
        self.present_node();
        Ok(())
    }

    /// Pick a reply. Ignored until the current line has finished typing.
    pub fn choose_option(&mut self, option_id: &str) -> GameResult<ChoiceOutcome> {
        if !self.ui.get().options_visible {
            trace!(option = option_id, "choice before options were shown");
            return Ok(ChoiceOutcome::Ignored);
        }
        let outcome = self.dialog.choose(option_id)?;
        if outcome != ChoiceOutcome::Ignored {
            self.cue(SoundCue::Confirm);
            self.present_node();
        }
        Ok(outcome)
    }

    /// Close the conversation and halt the typewriter.
    pub fn close_dialog(&mut self) {
        self.dialog.close();
        self.present_node();
    }

    /// Reveal the rest of the current line. Returns `false` if nothing was typing.
    pub fn skip_typewriter(&mut self) -> bool {
        if !self.typewriter.is_running() {
            return false;
        }
        self.typewriter.skip(&mut self.sched);
        self.set_options_visible(true);
        true
    }

    fn present_node(&mut self) {
        let text = self.dialog.current_node().map(|node| node.text.clone());
        match text {
            Some(text) => {
                self.typewriter.restart(&text, &mut self.sched);
                let done = self.typewriter.is_complete();
                self.set_options_visible(done);
            }
            None => {
                self.typewriter.stop(&mut self.sched);
                self.set_options_visible(false);
            }
        }
    }

    fn set_options_visible(&mut self, visible: bool) {
        if self.ui.get().options_visible != visible {
            self.ui.update(|ui| ui.options_visible = visible);
        }
    }

    // -- Terminal --

    /// Open the terminal window.
    pub fn open_terminal(&mut self) {
        if !self.ui.get().terminal_open {
            self.ui.update(|ui| ui.terminal_open = true);
        }
    }

    /// Close the terminal window and any screen inside it.
    pub fn close_terminal(&mut self) {
        self.screen = None;
        self.ui.update(|ui| {
            ui.terminal_open = false;
            ui.terminal_screen = None;
            ui.screen_page = 0;
        });
    }

    /// Run a terminal line and apply the effects that change session state.
    ///
    /// All effects are returned; printing, clearing and downloads are the
    /// host's job.
    pub fn submit_terminal(&mut self, line: &str) -> Vec<TerminalEffect> {
        let effects = self.terminal.submit(line);
        for effect in &effects {
            match effect {
                TerminalEffect::OpenSection(kind) => self.open_screen(*kind),
                TerminalEffect::OpenDialog(node) => {
                    self.close_terminal();
                    if let Err(err) = self.open_dialog(node) {
                        warn!(%err, "terminal could not open dialog");
                    }
                }
                TerminalEffect::Close => self.close_terminal(),
                TerminalEffect::Print(_)
                | TerminalEffect::Clear
                | TerminalEffect::DownloadResume(_) => {}
            }
        }
        effects
    }

    /// Show the next screen page. Returns `false` at the end.
    pub fn screen_next(&mut self) -> bool {
        let moved = self.screen.as_mut().is_some_and(ScreenViewer::next_page);
        self.sync_screen_page();
        moved
    }

    /// Show the previous screen page. Returns `false` at the start.
    pub fn screen_prev(&mut self) -> bool {
        let moved = self.screen.as_mut().is_some_and(ScreenViewer::prev_page);
        self.sync_screen_page();
        moved
    }

    /// Leave the terminal screen, back to the prompt.
    pub fn close_screen(&mut self) {
        self.screen = None;
        self.ui.update(|ui| {
            ui.terminal_screen = None;
            ui.screen_page = 0;
        });
    }

    fn open_screen(&mut self, kind: ActionKind) {
        let Some(screen) = screen_for(kind, self.terminal.profile()) else {
            return;
        };
        self.screen = Some(ScreenViewer::new(screen));
        self.ui.update(|ui| {
            ui.terminal_open = true;
            ui.terminal_screen = Some(kind);
            ui.screen_page = 0;
        });
    }

    fn sync_screen_page(&mut self) {
        if let Some(page) = self.screen.as_ref().map(|v| v.page_number() - 1) {
            self.ui.set_if_changed(UiState {
                screen_page: page,
                ..self.ui.get().clone()
            });
        }
    }

    // -- Ticks --

    /// Hand a fired tick to its owner. Returns `false` for stale ticks.
    pub fn dispatch(&mut self, tick: Tick) -> bool {
        if self.movement.owns(tick.handle) {
            if let FrameOutcome::Arrived {
                action: Some(action),
            } = self.movement.on_tick(tick, &mut self.sched)
            {
                if self.ui.get().blocks_scene() {
                    debug!(%action, "arrived under an overlay, panel dropped");
                    self.movement.finish_interaction();
                } else {
                    self.open_modal(action);
                }
            }
            return true;
        }
        if self.typewriter.owns(tick.handle) {
            match self.typewriter.on_tick(tick, &mut self.sched) {
                TypewriterEvent::Revealed(_) => self.cue(SoundCue::Type),
                TypewriterEvent::Completed => {
                    self.cue(SoundCue::Type);
                    self.set_options_visible(true);
                }
                TypewriterEvent::Ignored => {}
            }
            return true;
        }
        trace!(handle = tick.handle.raw(), "stale tick dropped");
        false
    }

    fn open_modal(&mut self, action: ActionKind) {
        debug!(%action, "panel opened");
        self.ui.update(|ui| ui.modal = Some(action));
    }

    fn cue(&mut self, cue: SoundCue) {
        if self.ui.get().sound_enabled {
            let now = self.sched.now();
            self.sound.play(cue, now);
        }
    }
}

impl GameSession<ManualScheduler> {
    /// Let `by` pass, dispatching every tick that falls due. Returns how many fired.
    pub fn advance(&mut self, by: Duration) -> usize {
        let until = self.sched.now() + by;
        let mut fired = 0;
        while let Some(tick) = self.sched.pop_due(until) {
            self.dispatch(tick);
            fired += 1;
        }
        fired
    }

    /// Fire the next pending tick, however far away. Returns `false` when idle.
    pub fn step(&mut self) -> bool {
        match self.sched.pop_next() {
            Some(tick) => {
                self.dispatch(tick);
                true
            }
            None => false,
        }
    }

    /// Step until nothing is pending or `max_ticks` have fired.
    pub fn run_until_idle(&mut self, max_ticks: usize) -> usize {
        let mut fired = 0;
        while fired < max_ticks && self.step() {
            fired += 1;
        }
        fired
    }
}

impl<S: Scheduler> Drop for GameSession<S> {
    fn drop(&mut self) {
        self.movement.stop(&mut self.sched);
        self.typewriter.stop(&mut self.sched);
    }
}
