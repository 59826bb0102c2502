use std::time::{Duration, Instant};

use crate::config::GameConfig;

/// A fixed-period timer polled against caller-supplied instants.
#[derive(Debug, Clone, Copy)]
pub struct Interval {
    period: Duration,
    next_due: Instant,
    coalesce: bool,
}

impl Interval {
    /// Fires once per elapsed period, catching up on every missed period.
    #[must_use]
    pub fn new(period: Duration, now: Instant) -> Self {
        debug_assert!(!period.is_zero());
        Self {
            period,
            next_due: now + period,
            coalesce: false,
        }
    }

    /// Fires at most once per poll; missed periods are dropped.
    #[must_use]
    pub fn coalescing(period: Duration, now: Instant) -> Self {
        Self {
            coalesce: true,
            ..Self::new(period, now)
        }
    }

    /// Returns how many times the interval fired since the last poll.
    pub fn poll(&mut self, now: Instant) -> u32 {
        if now < self.next_due {
            return 0;
        }

        let missed = (now - self.next_due).as_nanos() / self.period.as_nanos();
        let fired = u32::try_from(missed + 1).unwrap_or(u32::MAX);
        self.next_due += self.period * fired;

        if self.coalesce { fired.min(1) } else { fired }
    }

    /// Instant of the next firing.
    #[must_use]
    pub fn next_due(&self) -> Instant {
        self.next_due
    }
}

/// Firings collected from one scheduler poll.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct Due {
    pub ticks: u32,
    pub countdowns: u32,
}

/// The two independent clocks that drive a game: the simulation tick and
/// the one-second countdown.
///
/// The countdown never drops a period so the clock tracks wall time even
/// when a frame stalls; simulation ticks coalesce instead of bursting.
#[derive(Debug, Clone, Copy)]
pub struct Scheduler {
    simulation: Interval,
    countdown: Interval,
}

impl Scheduler {
    /// Starts both clocks at `now`.
    #[must_use]
    pub fn new(config: &GameConfig, now: Instant) -> Self {
        Self {
            simulation: Interval::coalescing(config.tick_interval, now),
            countdown: Interval::new(config.countdown_interval, now),
        }
    }

    /// Collects everything that became due up to `now`.
    pub fn poll(&mut self, now: Instant) -> Due {
        Due {
            ticks: self.simulation.poll(now),
            countdowns: self.countdown.poll(now),
        }
    }

    /// Earliest instant at which either clock fires next.
    #[must_use]
    pub fn next_deadline(&self) -> Instant {
        self.simulation.next_due().min(self.countdown.next_due())
    }
}
