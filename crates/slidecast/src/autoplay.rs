use std::time::{Duration, Instant};

/// Default interval between autoplay advances.
pub const DEFAULT_CADENCE: Duration = Duration::from_millis(5000);

/// The recurring advance timer: an on/off toggle around a single deadline.
///
/// `poll` delivers at most one tick and reschedules from the poll time, so
/// ticks never arrive closer together than one cadence even after a stalled
/// frame. The deadline is the only timer state there is, which makes a
/// second live timer per toggle session structurally impossible.
#[derive(Debug, Clone)]
pub struct Autoplay {
    cadence: Duration,
    next_tick: Option<Instant>,
}

impl Autoplay {
    pub fn new(cadence: Duration) -> Autoplay {
        Autoplay {
            cadence,
            next_tick: None,
        }
    }

    pub fn is_on(&self) -> bool {
        self.next_tick.is_some()
    }

    pub fn cadence(&self) -> Duration {
        self.cadence
    }

    /// Switch the driver on or off. Turning it on while already on keeps
    /// the pending deadline; turning it off clears the deadline so no
    /// further tick can fire. Both repeats are no-ops.
    pub fn set_on(&mut self, on: bool, now: Instant) {
        if on {
            if self.next_tick.is_none() {
                self.next_tick = Some(now + self.cadence);
            }
        } else {
            self.next_tick = None;
        }
    }

    /// Flip the toggle; returns the new state.
    pub fn toggle(&mut self, now: Instant) -> bool {
        let on = !self.is_on();
        self.set_on(on, now);
        on
    }

    /// True when a tick is due at `now`. Consumes the deadline and
    /// schedules the next one from `now`.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.next_tick {
            Some(deadline) if now >= deadline => {
                self.next_tick = Some(now + self.cadence);
                true
            }
            _ => false,
        }
    }

    /// Time until the pending deadline: zero when already due, `None` when
    /// the driver is off. Used for frame scheduling.
    pub fn time_to_next(&self, now: Instant) -> Option<Duration> {
        self.next_tick
            .map(|deadline| deadline.saturating_duration_since(now))
    }
}

impl Default for Autoplay {
    fn default() -> Autoplay {
        Autoplay::new(DEFAULT_CADENCE)
    }
}
