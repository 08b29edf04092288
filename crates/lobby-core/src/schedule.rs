use std::time::Duration;

/// Handle to one pending tick request.
///
/// Handles are never reused by a scheduler, so a component can tell a tick it
/// is still waiting for from a stale one it already cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TickHandle(u64);

impl TickHandle {
    /// Build a handle from a raw id. Only schedulers should need this.
    pub const fn from_raw(id: u64) -> Self {
        Self(id)
    }

    /// The raw id.
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// When a requested tick should fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wake {
    /// At the next display refresh.
    NextFrame,
    /// After a fixed delay.
    After(Duration),
}

/// A fired tick, delivered by the host to whichever component requested it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    /// The request this tick answers.
    pub handle: TickHandle,
    /// Scheduler time at which it fired.
    pub at: Duration,
}

/// The host's frame and timer source.
///
/// Every request fires at most once; repeating work re-requests from inside
/// its own tick handler. Nothing blocks: "waiting" is just a pending handle.
pub trait Scheduler {
    /// Current scheduler time.
    fn now(&self) -> Duration;

    /// Request a single future tick.
    fn request_tick(&mut self, wake: Wake) -> TickHandle;

    /// Cancel a pending request. Returns `false` if it already fired or was cancelled.
    fn cancel(&mut self, handle: TickHandle) -> bool;
}

#[derive(Debug, Clone, Copy)]
struct Pending {
    handle: TickHandle,
    due: Duration,
}

/// A deterministic scheduler driven explicitly by the caller.
///
/// Frames are spaced `frame_period` apart. Ticks are released in due order
/// (ties in request order) through [`ManualScheduler::pop_due`].
#[derive(Debug, Clone)]
pub struct ManualScheduler {
    now: Duration,
    frame_period: Duration,
    next_id: u64,
    pending: Vec<Pending>,
}

impl Default for ManualScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualScheduler {
    /// Default frame period, roughly 60 Hz.
    pub const DEFAULT_FRAME_PERIOD: Duration = Duration::from_millis(16);

    /// Create a scheduler at time zero with the default frame period.
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            frame_period: Self::DEFAULT_FRAME_PERIOD,
            next_id: 0,
            pending: Vec::new(),
        }
    }

    /// Set the frame period. Zero is bumped to one millisecond.
    pub fn with_frame_period(mut self, period: Duration) -> Self {
        self.frame_period = period.max(Duration::from_millis(1));
        self
    }

    /// The configured frame period.
    pub fn frame_period(&self) -> Duration {
        self.frame_period
    }

    /// Number of requests still waiting to fire.
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Whether a request is still waiting.
    pub fn is_pending(&self, handle: TickHandle) -> bool {
        self.pending.iter().any(|p| p.handle == handle)
    }

    /// Due time of the earliest pending request.
    pub fn next_due(&self) -> Option<Duration> {
        self.pending.iter().map(|p| p.due).min()
    }

    /// Release the earliest request due at or before `until`.
    ///
    /// Time jumps to the tick's due time. When nothing is due, time moves to
    /// `until` and `None` is returned.
    pub fn pop_due(&mut self, until: Duration) -> Option<Tick> {
        let index = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, p)| p.due <= until)
            .min_by_key(|(_, p)| (p.due, p.handle))
            .map(|(i, _)| i);

        match index {
            Some(i) => {
                let fired = self.pending.remove(i);
                self.now = self.now.max(fired.due);
                Some(Tick {
                    handle: fired.handle,
                    at: self.now,
                })
            }
            None => {
                self.now = self.now.max(until);
                None
            }
        }
    }

    /// Release the earliest pending request regardless of how far away it is.
    pub fn pop_next(&mut self) -> Option<Tick> {
        let due = self.next_due()?;
        self.pop_due(due)
    }
}

impl Scheduler for ManualScheduler {
    fn now(&self) -> Duration {
        self.now
    }

    fn request_tick(&mut self, wake: Wake) -> TickHandle {
        let handle = TickHandle(self.next_id);
        self.next_id += 1;
        let delay = match wake {
            Wake::NextFrame => self.frame_period,
            Wake::After(delay) => delay,
        };
        self.pending.push(Pending {
            handle,
            due: self.now + delay,
        });
        handle
    }

    fn cancel(&mut self, handle: TickHandle) -> bool {
        let before = self.pending.len();
        self.pending.retain(|p| p.handle != handle);
        self.pending.len() != before
    }
}
