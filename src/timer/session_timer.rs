//! Session timer: whole elapsed seconds driven by a logical clock.
//!
//! The timer never reads the wall clock. Whoever drives the event loop
//! calls [`SessionTimer::advance`] with the time that passed, and gets
//! back the ticks that fired. Stopping is synchronous: a stopped timer
//! ignores `advance` entirely, so no tick can race a `stop()`.
//!
//! ```
//! use std::time::Duration;
//! use rust_pairs::timer::SessionTimer;
//!
//! let mut timer = SessionTimer::new();
//! timer.start();
//! let ticks = timer.advance(Duration::from_millis(2500));
//!
//! assert_eq!(ticks.as_slice(), &[1, 2]);
//! assert_eq!(timer.formatted_time(), "00:02");
//! ```

use std::time::Duration;

use smallvec::SmallVec;

/// Interval between ticks.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Elapsed-seconds counter for a session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionTimer {
    running: bool,
    elapsed_seconds: u32,
    /// Time accumulated toward the next tick.
    carry: Duration,
}

impl SessionTimer {
    /// Create a stopped timer at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start counting. No-op if already running.
    pub fn start(&mut self) {
        self.running = true;
    }

    /// Stop counting. No-op if not running.
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Stop and zero the elapsed time.
    pub fn reset(&mut self) {
        self.running = false;
        self.elapsed_seconds = 0;
        self.carry = Duration::ZERO;
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    #[must_use]
    pub fn elapsed_seconds(&self) -> u32 {
        self.elapsed_seconds
    }

    /// Time until the next tick, or `None` while stopped.
    #[must_use]
    pub fn until_next_tick(&self) -> Option<Duration> {
        self.running.then(|| TICK_INTERVAL - self.carry)
    }

    /// Let `dt` pass. Returns the elapsed-second value of every tick that fired.
    pub fn advance(&mut self, dt: Duration) -> SmallVec<[u32; 4]> {
        let mut ticks = SmallVec::new();
        if !self.running {
            return ticks;
        }
        self.carry += dt;
        while self.carry >= TICK_INTERVAL {
            self.carry -= TICK_INTERVAL;
            self.elapsed_seconds += 1;
            ticks.push(self.elapsed_seconds);
        }
        ticks
    }

    /// Elapsed time as `MM:SS`. Minutes are not capped.
    #[must_use]
    pub fn formatted_time(&self) -> String {
        format_seconds(self.elapsed_seconds)
    }
}

/// Format a second count as zero-padded `MM:SS`.
#[must_use]
pub fn format_seconds(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
