use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::trace;

use lobby_core::{Observable, Scheduler, SubscriptionId, Tick, TickHandle, Wake};

use crate::error::{DialogError, DialogResult};

/// Reveal speed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypewriterConfig {
    /// Characters revealed per second.
    pub chars_per_second: f64,
}

impl Default for TypewriterConfig {
    fn default() -> Self {
        Self {
            chars_per_second: 40.0,
        }
    }
}

impl TypewriterConfig {
    /// Set the reveal rate.
    pub fn with_chars_per_second(mut self, rate: f64) -> Self {
        self.chars_per_second = rate;
        self
    }

    /// Delay between two reveals: `1000 / chars_per_second` milliseconds.
    pub fn interval(&self) -> Duration {
        let nanos = (1e9 / self.chars_per_second).round();
        Duration::from_nanos(nanos as u64)
    }

    /// The rate must be positive and finite.
    pub fn validate(&self) -> DialogResult<()> {
        if self.chars_per_second.is_finite() && self.chars_per_second > 0.0 {
            Ok(())
        } else {
            Err(DialogError::InvalidRate(self.chars_per_second))
        }
    }
}

/// What presenters render.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TypewriterSnapshot {
    /// The part of the text revealed so far.
    pub displayed_prefix: String,
    /// Whether characters are still being revealed.
    pub is_running: bool,
}

/// What a timer tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypewriterEvent {
    /// Not this typewriter's pending timer.
    Ignored,
    /// One more character was revealed.
    Revealed(char),
    /// The last character was revealed.
    Completed,
}

type CharHook = Box<dyn FnMut(char)>;
type CompleteHook = Box<dyn FnMut()>;

/// Reveals text one character per timer tick.
///
/// Characters are Unicode scalar values. At most one timer is pending, and
/// `on_complete` fires at most once per text.
pub struct Typewriter {
    config: TypewriterConfig,
    text: String,
    chars: Vec<char>,
    revealed: usize,
    timer: Option<TickHandle>,
    started: bool,
    complete_fired: bool,
    snapshot: Observable<TypewriterSnapshot>,
    on_character: Option<CharHook>,
    on_complete: Option<CompleteHook>,
}

impl fmt::Debug for Typewriter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Typewriter")
            .field("text", &self.text)
            .field("revealed", &self.revealed)
            .field("timer", &self.timer)
            .field("complete_fired", &self.complete_fired)
            .finish()
    }
}

impl Default for Typewriter {
    fn default() -> Self {
        Self::new(TypewriterConfig::default())
    }
}

impl Typewriter {
    /// Create an idle typewriter with nothing displayed.
    pub fn new(config: TypewriterConfig) -> Self {
        Self {
            config,
            text: String::new(),
            chars: Vec::new(),
            revealed: 0,
            timer: None,
            started: false,
            complete_fired: false,
            snapshot: Observable::default(),
            on_character: None,
            on_complete: None,
        }
    }

    /// Install the per-character hook (builder form).
    pub fn with_on_character(mut self, hook: impl FnMut(char) + 'static) -> Self {
        self.set_on_character(hook);
        self
    }

    /// Install the completion hook (builder form).
    pub fn with_on_complete(mut self, hook: impl FnMut() + 'static) -> Self {
        self.set_on_complete(hook);
        self
    }

    /// Replace the per-character hook.
    pub fn set_on_character(&mut self, hook: impl FnMut(char) + 'static) {
        self.on_character = Some(Box::new(hook));
    }

    /// Replace the completion hook.
    pub fn set_on_complete(&mut self, hook: impl FnMut() + 'static) {
        self.on_complete = Some(Box::new(hook));
    }

    /// The configuration in use.
    pub fn config(&self) -> &TypewriterConfig {
        &self.config
    }

    /// The full text being revealed.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Current snapshot.
    pub fn snapshot(&self) -> &TypewriterSnapshot {
        self.snapshot.get()
    }

    /// The revealed prefix.
    pub fn displayed(&self) -> &str {
        &self.snapshot.get().displayed_prefix
    }

    /// Whether characters are still being revealed.
    pub fn is_running(&self) -> bool {
        self.snapshot.get().is_running
    }

    /// Whether the whole text is shown.
    pub fn is_complete(&self) -> bool {
        self.started && self.revealed == self.chars.len()
    }

    /// Listen to snapshot changes.
    pub fn subscribe(
        &mut self,
        listener: impl FnMut(&TypewriterSnapshot) + 'static,
    ) -> SubscriptionId {
        self.snapshot.subscribe(listener)
    }

    /// Stop listening.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.snapshot.unsubscribe(id)
    }

    /// Whether `handle` is this typewriter's pending timer.
    pub fn owns(&self, handle: TickHandle) -> bool {
        self.timer == Some(handle)
    }

    /// Begin revealing `text`.
    ///
    /// Calling again with the text already in flight (or already finished)
    /// changes nothing. Different text resets and starts over.
    pub fn start<S: Scheduler + ?Sized>(&mut self, text: &str, sched: &mut S) {
        if self.started && self.text == text {
            return;
        }
        self.restart(text, sched);
    }

    /// Reset and reveal `text` from the beginning, even if it is unchanged.
    pub fn restart<S: Scheduler + ?Sized>(&mut self, text: &str, sched: &mut S) {
        self.cancel_timer(sched);
        self.text = text.to_string();
        self.chars = text.chars().collect();
        self.revealed = 0;
        self.started = true;
        self.complete_fired = false;

        if self.chars.is_empty() {
            self.snapshot.set(TypewriterSnapshot::default());
            self.fire_complete();
            return;
        }

        self.snapshot.set(TypewriterSnapshot {
            displayed_prefix: String::new(),
            is_running: true,
        });
        self.timer = Some(sched.request_tick(Wake::After(self.config.interval())));
        trace!(chars = self.chars.len(), "typewriter started");
    }

    /// Show the whole text now.
    ///
    /// Returns `true` if this call fired `on_complete`.
    pub fn skip<S: Scheduler + ?Sized>(&mut self, sched: &mut S) -> bool {
        if !self.started {
            return false;
        }
        self.cancel_timer(sched);
        self.revealed = self.chars.len();
        self.snapshot.set_if_changed(TypewriterSnapshot {
            displayed_prefix: self.text.clone(),
            is_running: false,
        });
        self.fire_complete()
    }

    /// Halt without completing. The revealed prefix stays on screen.
    pub fn stop<S: Scheduler + ?Sized>(&mut self, sched: &mut S) {
        self.cancel_timer(sched);
        self.started = false;
        if self.snapshot.get().is_running {
            self.snapshot.update(|s| s.is_running = false);
        }
    }

    /// Handle a fired tick. Ticks for any other handle are ignored.
    pub fn on_tick<S: Scheduler + ?Sized>(&mut self, tick: Tick, sched: &mut S) -> TypewriterEvent {
        if self.timer != Some(tick.handle) {
            return TypewriterEvent::Ignored;
        }
        self.timer = None;

        let Some(&ch) = self.chars.get(self.revealed) else {
            return TypewriterEvent::Ignored;
        };
        self.revealed += 1;
        let done = self.revealed == self.chars.len();
        self.snapshot.update(|s| {
            s.displayed_prefix.push(ch);
            s.is_running = !done;
        });
        if let Some(hook) = self.on_character.as_mut() {
            hook(ch);
        }

        if done {
            self.fire_complete();
            TypewriterEvent::Completed
        } else {
            self.timer = Some(sched.request_tick(Wake::After(self.config.interval())));
            TypewriterEvent::Revealed(ch)
        }
    }

    fn fire_complete(&mut self) -> bool {
        if self.complete_fired {
            return false;
        }
        self.complete_fired = true;
        trace!("typewriter complete");
        if let Some(hook) = self.on_complete.as_mut() {
            hook();
        }
        true
    }

    fn cancel_timer<S: Scheduler + ?Sized>(&mut self, sched: &mut S) {
        if let Some(handle) = self.timer.take() {
            sched.cancel(handle);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use lobby_core::ManualScheduler;
    use proptest::prelude::*;

    use super::*;

    fn counted() -> (Typewriter, Rc<Cell<u32>>, Rc<RefCell<String>>) {
        let completes = Rc::new(Cell::new(0));
        let typed = Rc::new(RefCell::new(String::new()));
        let c = Rc::clone(&completes);
        let t = Rc::clone(&typed);
        let tw = Typewriter::default()
            .with_on_complete(move || c.set(c.get() + 1))
            .with_on_character(move |ch| t.borrow_mut().push(ch));
        (tw, completes, typed)
    }

    fn drain(tw: &mut Typewriter, sched: &mut ManualScheduler) -> Vec<TypewriterEvent> {
        let mut events = Vec::new();
        while let Some(tick) = sched.pop_next() {
            events.push(tw.on_tick(tick, sched));
        }
        events
    }

    #[test]
    fn default_interval_is_25ms() {
        assert_eq!(TypewriterConfig::default().interval(), Duration::from_millis(25));
        assert_eq!(
            TypewriterConfig::default()
                .with_chars_per_second(100.0)
                .interval(),
            Duration::from_millis(10)
        );
    }

    #[test]
    fn rate_validation() {
        TypewriterConfig::default().validate().unwrap();
        for bad in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                TypewriterConfig::default()
                    .with_chars_per_second(bad)
                    .validate(),
                Err(DialogError::InvalidRate(_))
            ));
        }
    }

    #[test]
    fn reveals_one_char_per_interval() {
        let mut sched = ManualScheduler::new();
        let (mut tw, completes, typed) = counted();
        tw.start("hello", &mut sched);
        assert!(tw.is_running());
        assert_eq!(tw.displayed(), "");

        let mut count = 0;
        while let Some(tick) = sched.pop_due(Duration::from_millis(100)) {
            tw.on_tick(tick, &mut sched);
            count += 1;
        }
        assert_eq!(count, 4);
        assert_eq!(tw.displayed(), "hell");
        assert!(tw.is_running());

        let events = drain(&mut tw, &mut sched);
        assert_eq!(events, vec![TypewriterEvent::Completed]);
        assert_eq!(tw.displayed(), "hello");
        assert!(!tw.is_running());
        assert!(tw.is_complete());
        assert_eq!(completes.get(), 1);
        assert_eq!(typed.borrow().as_str(), "hello");
    }

    #[test]
    fn skip_right_after_start() {
        let mut sched = ManualScheduler::new();
        let (mut tw, completes, _) = counted();
        tw.start("hello", &mut sched);

        assert!(tw.skip(&mut sched));
        assert_eq!(
            tw.snapshot(),
            &TypewriterSnapshot {
                displayed_prefix: "hello".into(),
                is_running: false,
            }
        );
        assert_eq!(completes.get(), 1);
        assert_eq!(sched.pending_count(), 0);

        assert!(!tw.skip(&mut sched));
        assert_eq!(completes.get(), 1);
    }

    #[test]
    fn skip_after_completion_does_not_refire() {
        let mut sched = ManualScheduler::new();
        let (mut tw, completes, _) = counted();
        tw.start("ab", &mut sched);
        drain(&mut tw, &mut sched);
        assert_eq!(completes.get(), 1);
        assert!(!tw.skip(&mut sched));
        assert_eq!(completes.get(), 1);
    }

    #[test]
    fn restart_with_new_text_cancels_old_timer() {
        let mut sched = ManualScheduler::new();
        let (mut tw, completes, _) = counted();
        tw.start("abc", &mut sched);
        let first = sched.pop_next().unwrap();
        tw.on_tick(first, &mut sched);
        assert_eq!(tw.displayed(), "a");

        tw.start("xyz", &mut sched);
        assert_eq!(sched.pending_count(), 1);
        assert_eq!(tw.displayed(), "");

        drain(&mut tw, &mut sched);
        assert_eq!(tw.displayed(), "xyz");
        assert_eq!(completes.get(), 1);
    }

    #[test]
    fn same_text_does_not_restart() {
        let mut sched = ManualScheduler::new();
        let mut tw = Typewriter::default();
        tw.start("abc", &mut sched);
        let tick = sched.pop_next().unwrap();
        tw.on_tick(tick, &mut sched);

        tw.start("abc", &mut sched);
        assert_eq!(tw.displayed(), "a");
        assert_eq!(sched.pending_count(), 1);

        tw.restart("abc", &mut sched);
        assert_eq!(tw.displayed(), "");
        assert_eq!(sched.pending_count(), 1);
    }

    #[test]
    fn stale_tick_is_ignored() {
        let mut sched = ManualScheduler::new();
        let mut tw = Typewriter::default();
        tw.start("abc", &mut sched);
        let stale = sched.pop_next().unwrap();
        tw.restart("abc", &mut sched);
        // The old handle no longer belongs to the typewriter.
        assert!(!tw.owns(stale.handle));
        assert_eq!(tw.on_tick(stale, &mut sched), TypewriterEvent::Ignored);
        assert_eq!(tw.displayed(), "");
    }

    #[test]
    fn stop_never_completes() {
        let mut sched = ManualScheduler::new();
        let (mut tw, completes, _) = counted();
        tw.start("hello", &mut sched);
        let tick = sched.pop_next().unwrap();
        tw.on_tick(tick, &mut sched);

        tw.stop(&mut sched);
        assert!(!tw.is_running());
        assert_eq!(tw.displayed(), "h");
        assert_eq!(sched.pending_count(), 0);
        assert_eq!(completes.get(), 0);

        // After a stop the same text starts over.
        tw.start("hello", &mut sched);
        assert_eq!(tw.displayed(), "");
        assert!(tw.is_running());
    }

    #[test]
    fn empty_text_completes_immediately() {
        let mut sched = ManualScheduler::new();
        let (mut tw, completes, _) = counted();
        tw.start("", &mut sched);
        assert!(!tw.is_running());
        assert_eq!(tw.displayed(), "");
        assert_eq!(completes.get(), 1);
        assert_eq!(sched.pending_count(), 0);
        assert!(!tw.skip(&mut sched));
        assert_eq!(completes.get(), 1);
    }

    #[test]
    fn reveals_unicode_scalars() {
        let mut sched = ManualScheduler::new();
        let mut tw = Typewriter::default();
        tw.start("né→✓", &mut sched);
        let events = drain(&mut tw, &mut sched);
        assert_eq!(
            events,
            vec![
                TypewriterEvent::Revealed('n'),
                TypewriterEvent::Revealed('é'),
                TypewriterEvent::Revealed('→'),
                TypewriterEvent::Completed,
            ]
        );
        assert_eq!(tw.displayed(), "né→✓");
    }

    proptest! {
        #[test]
        fn full_run_reveals_everything_once(text in "\\PC{0,40}") {
            let mut sched = ManualScheduler::new();
            let (mut tw, completes, typed) = counted();
            tw.start(&text, &mut sched);
            drain(&mut tw, &mut sched);

            prop_assert_eq!(tw.displayed(), text.as_str());
            let typed_text = typed.borrow();
            prop_assert_eq!(typed_text.as_str(), text.as_str());
            prop_assert_eq!(completes.get(), 1);
            prop_assert!(!tw.is_running());
            prop_assert_eq!(sched.pending_count(), 0);
        }
    }
}
