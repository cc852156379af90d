use crate::ScrollTarget;

pub const DEFAULT_SCROLL_DEBOUNCE_MS: u64 = 10;
pub const DEFAULT_UNCLOAK_INTERVAL_MS: u64 = 50;

/// Timing configuration for [`ScrollScheduler`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SchedulerOptions {
    /// Quiescence window: a recompute fires only after this long without new triggers.
    pub scroll_debounce_ms: u64,
    /// Delay between two drains of the uncloak queue.
    pub uncloak_interval_ms: u64,
    pub scroll_target: ScrollTarget,
}

impl Default for SchedulerOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl SchedulerOptions {
    pub fn new() -> Self {
        Self {
            scroll_debounce_ms: DEFAULT_SCROLL_DEBOUNCE_MS,
            uncloak_interval_ms: DEFAULT_UNCLOAK_INTERVAL_MS,
            scroll_target: ScrollTarget::Viewport,
        }
    }

    pub fn with_scroll_debounce_ms(mut self, ms: u64) -> Self {
        self.scroll_debounce_ms = ms;
        self
    }

    pub fn with_uncloak_interval_ms(mut self, ms: u64) -> Self {
        self.uncloak_interval_ms = ms;
        self
    }

    pub fn with_scroll_target(mut self, target: ScrollTarget) -> Self {
        self.scroll_target = target;
        self
    }
}

/// A one-shot deadline. Re-arming replaces the pending deadline.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Timer {
    deadline: Option<u64>,
}

impl Timer {
    pub fn arm(&mut self, now_ms: u64, delay_ms: u64) {
        self.deadline = Some(now_ms.saturating_add(delay_ms));
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn deadline(&self) -> Option<u64> {
        self.deadline
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Disarms and returns `true` once the deadline has been reached.
    pub fn fire(&mut self, now_ms: u64) -> bool {
        match self.deadline {
            Some(d) if now_ms >= d => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

/// Work waiting for the next post-render checkpoint.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Due {
    pub recompute: bool,
    pub drain: bool,
}

impl Due {
    pub fn any(&self) -> bool {
        self.recompute || self.drain
    }
}

/// Coalesces raw triggers into recomputes and paces the uncloak queue.
///
/// The scheduler owns no clock. Adapters feed it `now_ms` timestamps:
/// - `trigger(now_ms)` on every raw event (resets the quiescence window)
/// - `tick(now_ms)` from their timer/frame loop
///
/// Work that `tick` reports as due is meant to run after the host's current render settles, so
/// it stays pending until taken with `take_recompute` / `take_drain`.
#[derive(Clone, Debug)]
pub struct ScrollScheduler {
    options: SchedulerOptions,
    debounce: Timer,
    drain: Timer,
    due: Due,
    active: bool,
}

impl ScrollScheduler {
    pub fn new(options: SchedulerOptions) -> Self {
        Self {
            options,
            debounce: Timer::default(),
            drain: Timer::default(),
            due: Due::default(),
            active: false,
        }
    }

    pub fn options(&self) -> &SchedulerOptions {
        &self.options
    }

    /// Replaces the timing options. Pending deadlines keep their current values.
    pub fn set_options(&mut self, options: SchedulerOptions) {
        self.options = options;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn start(&mut self) {
        self.active = true;
    }

    /// Cancels every timer and drops pending work. Until the next `start`, triggers are ignored
    /// and `tick` reports nothing.
    pub fn stop(&mut self) {
        self.active = false;
        self.debounce.cancel();
        self.drain.cancel();
        self.due = Due::default();
    }

    /// Records a raw trigger, restarting the quiescence window.
    pub fn trigger(&mut self, now_ms: u64) {
        if !self.active {
            return;
        }
        self.debounce.arm(now_ms, self.options.scroll_debounce_ms);
    }

    /// Requests a recompute at the next checkpoint, skipping the quiescence window.
    pub fn request_recompute(&mut self) {
        if !self.active {
            return;
        }
        self.debounce.cancel();
        self.due.recompute = true;
    }

    /// (Re)starts the drain cadence: the next drain is due one interval from `now_ms`.
    pub fn schedule_drain(&mut self, now_ms: u64) {
        if !self.active {
            return;
        }
        self.drain.arm(now_ms, self.options.uncloak_interval_ms);
    }

    pub fn suspend_drain(&mut self) {
        self.drain.cancel();
        self.due.drain = false;
    }

    /// Advances both timers and returns the work now due.
    pub fn tick(&mut self, now_ms: u64) -> Due {
        if !self.active {
            return Due::default();
        }
        if self.debounce.fire(now_ms) {
            self.due.recompute = true;
        }
        if self.drain.fire(now_ms) {
            self.due.drain = true;
        }
        self.due
    }

    pub fn due(&self) -> Due {
        self.due
    }

    pub fn take_recompute(&mut self) -> bool {
        core::mem::take(&mut self.due.recompute)
    }

    pub fn take_drain(&mut self) -> bool {
        core::mem::take(&mut self.due.drain)
    }

    pub fn debounce_deadline(&self) -> Option<u64> {
        self.debounce.deadline()
    }

    pub fn drain_deadline(&self) -> Option<u64> {
        self.drain.deadline()
    }

    /// Earliest pending deadline, for hosts that sleep between ticks.
    pub fn next_deadline(&self) -> Option<u64> {
        match (self.debounce.deadline(), self.drain.deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }
}
