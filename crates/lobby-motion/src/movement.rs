use std::fmt;
use std::time::Duration;

use serde::Serialize;
use tracing::debug;

use lobby_core::{
    ActionKind, Observable, Position, Scheduler, SubscriptionId, Tick, TickHandle, Wake,
};

use crate::config::MotionConfig;
use crate::depth::Depth;
use crate::keyboard::{HeldKeys, MoveKey};

/// Which way the character sprite faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Facing {
    /// Facing left.
    Left,
    /// Facing right.
    #[default]
    Right,
}

/// Animation the sprite should play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimState {
    /// Standing still.
    #[default]
    Idle,
    /// Walking, by click or by keyboard.
    Walking,
    /// Arrived at an object and triggered its action.
    Interacting,
}

/// Snapshot of the movement slice.
///
/// `target_position` is set exactly while a click-driven move is in flight;
/// `pending_action` only ever accompanies a target.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovementState {
    /// Where the character is now.
    pub current_position: Position,
    /// Where a click-driven move is heading.
    pub target_position: Option<Position>,
    /// Sprite facing.
    pub facing: Facing,
    /// Sprite animation.
    pub anim: AnimState,
    /// Action to fire on arrival.
    pub pending_action: Option<ActionKind>,
}

impl MovementState {
    fn at(position: Position) -> Self {
        Self {
            current_position: position,
            target_position: None,
            facing: Facing::default(),
            anim: AnimState::Idle,
            pending_action: None,
        }
    }
}

/// What a frame tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// The tick was not the controller's pending frame.
    Ignored,
    /// The character moved and another frame was requested.
    Moved,
    /// The character reached its target; no further frame was requested.
    Arrived {
        /// The action that fired, if the move came from an object click.
        action: Option<ActionKind>,
    },
    /// Nothing left to drive; the loop ended.
    Halted,
}

type ArrivalHook = Box<dyn FnMut(ActionKind)>;

/// Moves the character towards click targets or along held keys, one frame at a time.
///
/// At most one frame request is outstanding at any time. Every position the
/// controller stores has been clamped into the walkable area.
pub struct MovementController {
    config: MotionConfig,
    state: Observable<MovementState>,
    held: HeldKeys,
    frame: Option<TickHandle>,
    last_frame_at: Duration,
    trip_speed: f64,
    on_arrival: Option<ArrivalHook>,
}

impl fmt::Debug for MovementController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MovementController")
            .field("state", self.state.get())
            .field("held", &self.held)
            .field("frame", &self.frame)
            .finish()
    }
}

impl MovementController {
    /// Create a controller standing at the configured (clamped) start.
    pub fn new(config: MotionConfig) -> Self {
        let start = config.walkable_area.clamp(config.start);
        let trip_speed = config.speed.base();
        Self {
            config,
            state: Observable::new(MovementState::at(start)),
            held: HeldKeys::default(),
            frame: None,
            last_frame_at: Duration::ZERO,
            trip_speed,
            on_arrival: None,
        }
    }

    /// Install the hook fired once per arrival that carries an action.
    pub fn with_on_arrival(mut self, hook: impl FnMut(ActionKind) + 'static) -> Self {
        self.set_on_arrival(hook);
        self
    }

    /// Replace the arrival hook.
    pub fn set_on_arrival(&mut self, hook: impl FnMut(ActionKind) + 'static) {
        self.on_arrival = Some(Box::new(hook));
    }

    /// The configuration in use.
    pub fn config(&self) -> &MotionConfig {
        &self.config
    }

    /// Current snapshot.
    pub fn state(&self) -> &MovementState {
        self.state.get()
    }

    /// Current position.
    pub fn position(&self) -> Position {
        self.state.get().current_position
    }

    /// Depth values for the current position.
    pub fn depth(&self) -> Depth {
        self.config
            .depth
            .depth_for_y(&self.config.walkable_area, self.position().y)
    }

    /// Listen to every snapshot change.
    pub fn subscribe(&mut self, listener: impl FnMut(&MovementState) + 'static) -> SubscriptionId {
        self.state.subscribe(listener)
    }

    /// Stop listening.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.state.unsubscribe(id)
    }

    /// Whether a frame request is outstanding.
    pub fn is_running(&self) -> bool {
        self.frame.is_some()
    }

    /// The outstanding frame request, if any.
    pub fn frame_handle(&self) -> Option<TickHandle> {
        self.frame
    }

    /// Whether `handle` is this controller's outstanding frame.
    pub fn owns(&self, handle: TickHandle) -> bool {
        self.frame == Some(handle)
    }

    /// Walk towards `target`, firing `action` on arrival.
    ///
    /// The target is clamped. Held keys are released: click and keyboard
    /// movement exclude each other. Nothing moves until the next frame.
    pub fn move_to<S: Scheduler + ?Sized>(
        &mut self,
        target: Position,
        action: Option<ActionKind>,
        sched: &mut S,
    ) {
        let target = self.config.walkable_area.clamp(target);
        self.held.clear();

        let current = self.position();
        self.trip_speed = self
            .config
            .speed
            .speed_for(current.distance_to(target), action.is_some());
        let facing = facing_towards(current.x, target.x, self.state.get().facing);

        self.state.update(|s| {
            s.target_position = Some(target);
            s.pending_action = action;
            s.anim = AnimState::Walking;
            s.facing = facing;
        });
        self.arm(sched);
        debug!(%target, ?action, speed = self.trip_speed, "move armed");
    }

    /// Cancel any movement and stand still.
    pub fn stop<S: Scheduler + ?Sized>(&mut self, sched: &mut S) {
        self.disarm(sched);
        self.held.clear();
        self.state.update(|s| {
            s.target_position = None;
            s.pending_action = None;
            s.anim = AnimState::Idle;
        });
    }

    /// Leave the `Interacting` pose once the triggered content is dismissed.
    pub fn finish_interaction(&mut self) {
        if self.state.get().anim == AnimState::Interacting {
            self.state.update(|s| s.anim = AnimState::Idle);
        }
    }

    /// A movement key went down. Cancels any click-driven move.
    pub fn key_down<S: Scheduler + ?Sized>(&mut self, key: MoveKey, sched: &mut S) {
        self.held.press(key);
        let facing = match key {
            MoveKey::Left => Some(Facing::Left),
            MoveKey::Right => Some(Facing::Right),
            MoveKey::Up | MoveKey::Down => None,
        };
        self.state.update(|s| {
            s.target_position = None;
            s.pending_action = None;
            s.anim = AnimState::Walking;
            if let Some(facing) = facing {
                s.facing = facing;
            }
        });
        self.arm(sched);
    }

    /// A movement key went up. Releasing the last key returns to idle.
    pub fn key_up<S: Scheduler + ?Sized>(&mut self, key: MoveKey, sched: &mut S) {
        self.held.release(key);
        self.settle_keys(sched);
    }

    /// Input focus was lost: treat every key as released.
    pub fn blur<S: Scheduler + ?Sized>(&mut self, sched: &mut S) {
        self.held.clear();
        self.settle_keys(sched);
    }

    /// Handle a fired tick. Ticks for any other handle are ignored.
    pub fn on_tick<S: Scheduler + ?Sized>(&mut self, tick: Tick, sched: &mut S) -> FrameOutcome {
        if self.frame != Some(tick.handle) {
            return FrameOutcome::Ignored;
        }
        self.frame = None;

        let dt = tick.at.saturating_sub(self.last_frame_at).as_secs_f64();
        self.last_frame_at = tick.at;

        if let Some(target) = self.state.get().target_position {
            return self.step_towards(target, dt, sched);
        }
        if !self.held.is_empty() {
            self.step_keys(dt);
            self.request_frame(sched);
            return FrameOutcome::Moved;
        }

        self.state.update(|s| s.anim = AnimState::Idle);
        FrameOutcome::Halted
    }

    fn step_towards<S: Scheduler + ?Sized>(
        &mut self,
        target: Position,
        dt: f64,
        sched: &mut S,
    ) -> FrameOutcome {
        let current = self.position();
        let distance = current.distance_to(target);
        let threshold = self.config.arrival_threshold;
        if distance < threshold {
            return self.arrive(target);
        }

        let ratio = (self.trip_speed * dt / distance).min(1.0);
        let next = self
            .config
            .walkable_area
            .clamp(current.towards(target, ratio));
        if next.distance_to(target) < threshold {
            return self.arrive(target);
        }

        self.state.update(|s| s.current_position = next);
        self.request_frame(sched);
        FrameOutcome::Moved
    }

    fn step_keys(&mut self, dt: f64) {
        let (dx, dy) = self.held.direction();
        let step = self.config.speed.base() * dt;
        let current = self.position();
        let next = self
            .config
            .walkable_area
            .clamp(Position::new(current.x + dx * step, current.y + dy * step));
        self.state.update(|s| {
            s.current_position = next;
            if dx < 0.0 {
                s.facing = Facing::Left;
            } else if dx > 0.0 {
                s.facing = Facing::Right;
            }
        });
    }

    fn arrive(&mut self, target: Position) -> FrameOutcome {
        let action = self.state.get().pending_action;
        self.state.update(|s| {
            s.current_position = target;
            s.target_position = None;
            s.pending_action = None;
            s.anim = if action.is_some() {
                AnimState::Interacting
            } else {
                AnimState::Idle
            };
        });
        if let (Some(action), Some(hook)) = (action, self.on_arrival.as_mut()) {
            hook(action);
        }
        debug!(%target, ?action, "arrived");
        FrameOutcome::Arrived { action }
    }

    fn settle_keys<S: Scheduler + ?Sized>(&mut self, sched: &mut S) {
        if self.held.is_empty() && self.state.get().target_position.is_none() {
            self.disarm(sched);
            if self.state.get().anim == AnimState::Walking {
                self.state.update(|s| s.anim = AnimState::Idle);
            }
        }
    }

    fn arm<S: Scheduler + ?Sized>(&mut self, sched: &mut S) {
        if self.frame.is_none() {
            self.last_frame_at = sched.now();
            self.request_frame(sched);
        }
    }

    fn request_frame<S: Scheduler + ?Sized>(&mut self, sched: &mut S) {
        self.frame = Some(sched.request_tick(Wake::NextFrame));
    }

    fn disarm<S: Scheduler + ?Sized>(&mut self, sched: &mut S) {
        if let Some(handle) = self.frame.take() {
            sched.cancel(handle);
        }
    }
}

fn facing_towards(from_x: f64, to_x: f64, current: Facing) -> Facing {
    if to_x < from_x {
        Facing::Left
    } else if to_x > from_x {
        Facing::Right
    } else {
        current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SpeedPolicy;
    use lobby_core::{ManualScheduler, WalkableArea};
    use proptest::prelude::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn controller_at(x: f64, y: f64) -> MovementController {
        MovementController::new(MotionConfig::default().with_start(Position::new(x, y)))
    }

    /// Pump frames until the controller stops requesting them.
    fn run(
        ctrl: &mut MovementController,
        sched: &mut ManualScheduler,
        max_frames: usize,
    ) -> (Vec<Position>, FrameOutcome) {
        let mut trail = Vec::new();
        let mut last = FrameOutcome::Halted;
        for _ in 0..max_frames {
            let Some(tick) = sched.pop_next() else {
                break;
            };
            last = ctrl.on_tick(tick, sched);
            trail.push(ctrl.position());
            if !matches!(last, FrameOutcome::Moved) {
                break;
            }
        }
        (trail, last)
    }

    #[test]
    fn move_to_arms_one_frame_without_moving() {
        let mut sched = ManualScheduler::new();
        let mut ctrl = controller_at(100.0, 20.0);
        ctrl.move_to(Position::new(300.0, 40.0), None, &mut sched);

        assert_eq!(ctrl.position(), Position::new(100.0, 20.0));
        assert_eq!(ctrl.state().target_position, Some(Position::new(300.0, 40.0)));
        assert_eq!(ctrl.state().anim, AnimState::Walking);
        assert!(ctrl.is_running());
        assert_eq!(sched.pending_count(), 1);

        // Re-targeting mid-move keeps a single frame loop.
        ctrl.move_to(Position::new(200.0, 30.0), None, &mut sched);
        assert_eq!(sched.pending_count(), 1);
    }

    #[test]
    fn walks_along_the_straight_line_and_snaps_onto_target() {
        let mut sched = ManualScheduler::new();
        let mut ctrl = controller_at(100.0, 20.0);
        let start = Position::new(100.0, 20.0);
        let target = Position::new(300.0, 40.0);
        ctrl.move_to(target, None, &mut sched);

        let (trail, outcome) = run(&mut ctrl, &mut sched, 1_000);

        assert_eq!(outcome, FrameOutcome::Arrived { action: None });
        assert_eq!(ctrl.position(), target);
        assert_eq!(ctrl.state().target_position, None);
        assert_eq!(ctrl.state().anim, AnimState::Idle);
        assert!(!ctrl.is_running());
        assert_eq!(sched.pending_count(), 0);

        let total = start.distance_to(target);
        for p in &trail {
            // Collinear with the start-target segment.
            let cross = (target.x - start.x) * (p.y - start.y) - (target.y - start.y) * (p.x - start.x);
            assert!(cross.abs() < 1e-6, "{p} is off the line");
            assert!(start.distance_to(*p) <= total + 1e-9, "{p} overshot");
            assert!(WalkableArea::LOBBY.contains(*p));
        }

        // 201 units at 100 units/s with 16 ms frames: about two seconds.
        assert!((120..=130).contains(&trail.len()), "{} frames", trail.len());
    }

    #[test]
    fn position_after_one_second_matches_base_speed() {
        let mut sched = ManualScheduler::new().with_frame_period(Duration::from_millis(10));
        let mut ctrl = controller_at(100.0, 20.0);
        ctrl.move_to(Position::new(300.0, 40.0), None, &mut sched);

        for _ in 0..100 {
            let tick = sched.pop_next().unwrap();
            assert_eq!(ctrl.on_tick(tick, &mut sched), FrameOutcome::Moved);
        }

        let travelled = Position::new(100.0, 20.0).distance_to(ctrl.position());
        assert!((travelled - 100.0).abs() < 1e-6, "travelled {travelled}");
    }

    #[test]
    fn pending_action_fires_once_on_arrival() {
        let fired = Rc::new(Cell::new(0));
        let counter = Rc::clone(&fired);
        let mut sched = ManualScheduler::new();
        let mut ctrl = controller_at(300.0, 40.0).with_on_arrival(move |action| {
            assert_eq!(action, ActionKind::Skills);
            counter.set(counter.get() + 1);
        });

        ctrl.move_to(Position::new(170.0, 28.0), Some(ActionKind::Skills), &mut sched);
        assert_eq!(ctrl.state().pending_action, Some(ActionKind::Skills));
        assert_eq!(ctrl.state().facing, Facing::Left);

        let (_, outcome) = run(&mut ctrl, &mut sched, 1_000);

        assert_eq!(
            outcome,
            FrameOutcome::Arrived {
                action: Some(ActionKind::Skills)
            }
        );
        assert_eq!(fired.get(), 1);
        assert_eq!(ctrl.state().pending_action, None);
        assert_eq!(ctrl.state().anim, AnimState::Interacting);
        assert_eq!(sched.pending_count(), 0);

        ctrl.finish_interaction();
        assert_eq!(ctrl.state().anim, AnimState::Idle);
    }

    #[test]
    fn interaction_moves_use_the_faster_speed() {
        let mut sched = ManualScheduler::new().with_frame_period(Duration::from_millis(10));
        let mut ctrl = controller_at(100.0, 40.0);
        ctrl.move_to(Position::new(500.0, 40.0), Some(ActionKind::Experience), &mut sched);

        for _ in 0..50 {
            let tick = sched.pop_next().unwrap();
            ctrl.on_tick(tick, &mut sched);
        }
        // Half a second at 200 units/s.
        assert!((ctrl.position().x - 200.0).abs() < 1e-6);
    }

    #[test]
    fn bounded_policy_arrives_within_the_bound() {
        let config = MotionConfig::default()
            .with_start(Position::new(40.0, 20.0))
            .with_speed(SpeedPolicy::Bounded {
                base: 100.0,
                max_travel_secs: 1.0,
            });
        let mut sched = ManualScheduler::new();
        let mut ctrl = MovementController::new(config);
        ctrl.move_to(Position::new(600.0, 64.0), None, &mut sched);

        let (trail, outcome) = run(&mut ctrl, &mut sched, 1_000);
        assert!(matches!(outcome, FrameOutcome::Arrived { .. }));
        // 1 s of 16 ms frames, plus one frame of slack.
        assert!(trail.len() <= 64, "{} frames", trail.len());
    }

    #[test]
    fn targets_outside_the_area_are_clamped() {
        let mut sched = ManualScheduler::new();
        let mut ctrl = controller_at(300.0, 40.0);
        ctrl.move_to(Position::new(9_000.0, -30.0), None, &mut sched);
        assert_eq!(ctrl.state().target_position, Some(Position::new(600.0, 20.0)));

        run(&mut ctrl, &mut sched, 10_000);
        assert_eq!(ctrl.position(), Position::new(600.0, 20.0));
    }

    #[test]
    fn start_position_is_clamped() {
        let ctrl = controller_at(-10.0, 500.0);
        assert_eq!(ctrl.position(), Position::new(40.0, 64.0));
    }

    #[test]
    fn stop_cancels_the_frame_and_ignores_stale_ticks() {
        let mut sched = ManualScheduler::new();
        let mut ctrl = controller_at(100.0, 20.0);
        ctrl.move_to(Position::new(300.0, 40.0), Some(ActionKind::About), &mut sched);
        let handle = ctrl.frame_handle().unwrap();

        ctrl.stop(&mut sched);
        assert!(!ctrl.is_running());
        assert_eq!(sched.pending_count(), 0);
        assert_eq!(ctrl.state().pending_action, None);
        assert_eq!(ctrl.state().anim, AnimState::Idle);

        let stale = Tick {
            handle,
            at: Duration::from_millis(16),
        };
        assert_eq!(ctrl.on_tick(stale, &mut sched), FrameOutcome::Ignored);
        assert_eq!(ctrl.position(), Position::new(100.0, 20.0));
    }

    #[test]
    fn held_keys_move_continuously_until_released() {
        let mut sched = ManualScheduler::new().with_frame_period(Duration::from_millis(10));
        let mut ctrl = controller_at(300.0, 40.0);
        ctrl.key_down(MoveKey::Right, &mut sched);
        assert_eq!(ctrl.state().anim, AnimState::Walking);

        for _ in 0..50 {
            let tick = sched.pop_next().unwrap();
            assert_eq!(ctrl.on_tick(tick, &mut sched), FrameOutcome::Moved);
        }
        assert!((ctrl.position().x - 350.0).abs() < 1e-6);
        assert_eq!(ctrl.state().facing, Facing::Right);

        ctrl.key_up(MoveKey::Right, &mut sched);
        assert_eq!(ctrl.state().anim, AnimState::Idle);
        assert!(!ctrl.is_running());
        assert_eq!(sched.pending_count(), 0);
    }

    #[test]
    fn keyboard_movement_is_clamped() {
        let mut sched = ManualScheduler::new();
        let mut ctrl = controller_at(300.0, 60.0);
        ctrl.key_down(MoveKey::Up, &mut sched);
        run(&mut ctrl, &mut sched, 200);
        assert_eq!(ctrl.position().y, 64.0);
    }

    #[test]
    fn blur_releases_every_key() {
        let mut sched = ManualScheduler::new();
        let mut ctrl = controller_at(300.0, 40.0);
        ctrl.key_down(MoveKey::Left, &mut sched);
        ctrl.key_down(MoveKey::Down, &mut sched);
        ctrl.blur(&mut sched);
        assert_eq!(ctrl.state().anim, AnimState::Idle);
        assert_eq!(sched.pending_count(), 0);
    }

    #[test]
    fn keyboard_and_click_cancel_each_other() {
        let mut sched = ManualScheduler::new();
        let mut ctrl = controller_at(300.0, 40.0);

        ctrl.move_to(Position::new(500.0, 50.0), Some(ActionKind::Experience), &mut sched);
        ctrl.key_down(MoveKey::Left, &mut sched);
        assert_eq!(ctrl.state().target_position, None);
        assert_eq!(ctrl.state().pending_action, None);
        assert_eq!(sched.pending_count(), 1);

        ctrl.move_to(Position::new(100.0, 30.0), None, &mut sched);
        // Keys were released by the click: arriving ends the loop.
        let (_, outcome) = run(&mut ctrl, &mut sched, 10_000);
        assert_eq!(outcome, FrameOutcome::Arrived { action: None });
        assert!(!ctrl.is_running());
    }

    #[test]
    fn subscribers_observe_positions() {
        let frames = Rc::new(Cell::new(0));
        let counter = Rc::clone(&frames);
        let mut sched = ManualScheduler::new();
        let mut ctrl = controller_at(100.0, 20.0);
        ctrl.subscribe(move |state| {
            assert!(WalkableArea::LOBBY.contains(state.current_position));
            counter.set(counter.get() + 1);
        });
        ctrl.move_to(Position::new(120.0, 20.0), None, &mut sched);
        run(&mut ctrl, &mut sched, 100);
        assert!(frames.get() >= 2);
    }

    proptest! {
        #[test]
        fn converges_and_stays_inside(
            sx in 40.0f64..=600.0, sy in 20.0f64..=64.0,
            tx in 40.0f64..=600.0, ty in 20.0f64..=64.0,
            interact in any::<bool>(),
        ) {
            let mut sched = ManualScheduler::new();
            let mut ctrl = controller_at(sx, sy);
            let target = Position::new(tx, ty);
            let action = interact.then_some(ActionKind::Contact);
            ctrl.move_to(target, action, &mut sched);

            let (trail, outcome) = run(&mut ctrl, &mut sched, 10_000);

            prop_assert_eq!(outcome, FrameOutcome::Arrived { action });
            prop_assert_eq!(ctrl.position(), target);
            for p in trail {
                prop_assert!(WalkableArea::LOBBY.contains(p));
            }
            prop_assert_eq!(sched.pending_count(), 0);
        }
    }
}
