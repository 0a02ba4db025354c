use std::time::{Duration, Instant};

/// How often the controller ticks.
pub const TICK_INTERVAL: Duration = Duration::from_millis(1000);

/// Cadence of the countdown redraw timer.
pub const COUNTDOWN_INTERVAL: Duration = Duration::from_millis(1000);

/// Self-correcting poll: fires once at least `interval` has passed since the
/// last time it fired, however irregular the frames are.
#[derive(Debug, Clone)]
pub struct TickPoll {
    interval: Duration,
    last_tick: Option<Instant>,
}

impl TickPoll {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_tick: None,
        }
    }

    /// Records `now` as a tick without firing, e.g. after an out-of-band render.
    pub fn arm(&mut self, now: Instant) {
        self.last_tick = Some(now);
    }

    pub fn poll(&mut self, now: Instant) -> bool {
        let due = match self.last_tick {
            None => true,
            Some(last) => now.saturating_duration_since(last) >= self.interval,
        };
        if due {
            self.last_tick = Some(now);
        }
        due
    }
}

impl Default for TickPoll {
    fn default() -> Self {
        Self::new(TICK_INTERVAL)
    }
}

/// A fixed-period timer. Dropping it is cancelling it.
#[derive(Debug, Clone)]
pub struct RepeatingTimer {
    period: Duration,
    next_due: Instant,
}

impl RepeatingTimer {
    pub fn start(now: Instant, period: Duration) -> Self {
        Self {
            period,
            next_due: now + period,
        }
    }

    pub fn poll(&mut self, now: Instant) -> bool {
        if now < self.next_due {
            return false;
        }
        self.next_due += self.period;
        if self.next_due <= now {
            // Fell behind (window hidden, machine asleep): skip missed beats.
            self.next_due = now + self.period;
        }
        true
    }
}

/// Detects "focus regained" and "visibility regained" edges from the
/// per-frame viewport state.
#[derive(Debug, Clone, Default)]
pub struct LifecycleWatch {
    focused: Option<bool>,
    minimized: Option<bool>,
}

impl LifecycleWatch {
    /// Returns `true` when the window just regained focus or was just restored.
    pub fn observe(&mut self, focused: Option<bool>, minimized: Option<bool>) -> bool {
        let regained_focus = self.focused == Some(false) && focused == Some(true);
        let restored = self.minimized == Some(true) && minimized == Some(false);

        if focused.is_some() {
            self.focused = focused;
        }
        if minimized.is_some() {
            self.minimized = minimized;
        }
        regained_focus || restored
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_poll_fires_first_then_once_per_interval() {
        let t0 = Instant::now();
        let mut poll = TickPoll::default();
        assert!(poll.poll(t0));
        assert!(!poll.poll(t0 + Duration::from_millis(16)));
        assert!(!poll.poll(t0 + Duration::from_millis(999)));
        assert!(poll.poll(t0 + Duration::from_millis(1003)));
        // Measured from the late tick, not from t0 + 1000.
        assert!(!poll.poll(t0 + Duration::from_millis(2000)));
        assert!(poll.poll(t0 + Duration::from_millis(2003)));
    }

    #[test]
    fn armed_poll_waits_a_full_interval() {
        let t0 = Instant::now();
        let mut poll = TickPoll::default();
        poll.arm(t0);
        assert!(!poll.poll(t0 + Duration::from_millis(500)));
        assert!(poll.poll(t0 + TICK_INTERVAL));
    }

    #[test]
    fn repeating_timer_skips_missed_beats() {
        let t0 = Instant::now();
        let mut timer = RepeatingTimer::start(t0, COUNTDOWN_INTERVAL);
        assert!(!timer.poll(t0 + Duration::from_millis(500)));
        assert!(timer.poll(t0 + Duration::from_millis(1000)));
        assert!(!timer.poll(t0 + Duration::from_millis(1500)));

        // Hidden for ten seconds: one catch-up fire, not ten.
        let late = t0 + Duration::from_secs(12);
        assert!(timer.poll(late));
        assert!(!timer.poll(late + Duration::from_millis(10)));
        assert!(timer.poll(late + COUNTDOWN_INTERVAL));
    }

    #[test]
    fn lifecycle_reports_only_regain_edges() {
        let mut watch = LifecycleWatch::default();
        assert!(!watch.observe(Some(true), Some(false)));
        assert!(!watch.observe(Some(true), Some(false)));
        assert!(!watch.observe(Some(false), Some(false)));
        assert!(!watch.observe(None, None));
        assert!(watch.observe(Some(true), Some(false)));

        assert!(!watch.observe(Some(true), Some(true)));
        assert!(watch.observe(Some(true), Some(false)));
    }
}
