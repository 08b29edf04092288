//! Fire-and-forget sound cues.
//!
//! The core never produces audio. It decides *when* a cue should play and
//! hands it to a host hook.

use std::fmt;
use std::time::Duration;

/// A sound the host may play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    /// Short blip per revealed character.
    Type,
    /// Pointer moved onto something clickable.
    Select,
    /// A choice was made.
    Confirm,
}

type CueHook = Box<dyn FnMut(SoundCue)>;

/// Throttles typing blips and forwards cues to the host.
pub struct SoundBoard {
    throttle: Duration,
    last_type: Option<Duration>,
    hook: Option<CueHook>,
}

impl fmt::Debug for SoundBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SoundBoard")
            .field("throttle", &self.throttle)
            .field("last_type", &self.last_type)
            .field("hook", &self.hook.is_some())
            .finish()
    }
}

impl SoundBoard {
    /// A board with no hook installed.
    pub fn new(throttle: Duration) -> Self {
        Self {
            throttle,
            last_type: None,
            hook: None,
        }
    }

    /// Install the host's playback hook.
    pub fn set_hook(&mut self, hook: impl FnMut(SoundCue) + 'static) {
        self.hook = Some(Box::new(hook));
    }

    /// Play `cue` at scheduler time `now`, unless throttled.
    ///
    /// Returns whether the cue was passed on.
    pub fn play(&mut self, cue: SoundCue, now: Duration) -> bool {
        if cue == SoundCue::Type {
            if self
                .last_type
                .is_some_and(|last| now.saturating_sub(last) < self.throttle)
            {
                return false;
            }
            self.last_type = Some(now);
        }
        match self.hook.as_mut() {
            Some(hook) => {
                hook(cue);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    fn board() -> (SoundBoard, Rc<RefCell<Vec<SoundCue>>>) {
        let played = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&played);
        let mut board = SoundBoard::new(Duration::from_millis(30));
        board.set_hook(move |cue| sink.borrow_mut().push(cue));
        (board, played)
    }

    #[test]
    fn typing_blips_are_throttled() {
        let (mut board, played) = board();
        let ms = Duration::from_millis;
        assert!(board.play(SoundCue::Type, ms(0)));
        assert!(!board.play(SoundCue::Type, ms(25)));
        assert!(board.play(SoundCue::Type, ms(30)));
        assert!(!board.play(SoundCue::Type, ms(59)));
        assert!(board.play(SoundCue::Type, ms(75)));
        assert_eq!(played.borrow().len(), 3);
    }

    #[test]
    fn other_cues_are_not_throttled() {
        let (mut board, played) = board();
        let now = Duration::from_millis(10);
        assert!(board.play(SoundCue::Confirm, now));
        assert!(board.play(SoundCue::Confirm, now));
        assert!(board.play(SoundCue::Select, now));
        assert_eq!(
            *played.borrow(),
            vec![SoundCue::Confirm, SoundCue::Confirm, SoundCue::Select]
        );
    }

    #[test]
    fn without_hook_nothing_plays() {
        let mut board = SoundBoard::new(Duration::from_millis(30));
        assert!(!board.play(SoundCue::Confirm, Duration::ZERO));
    }
}
