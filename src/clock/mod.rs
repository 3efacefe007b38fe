// Clock and countdown service used by the taskbar and the trial gate

pub mod sensors;

use std::cell::Cell;
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::Local;

pub use sensors::TemperatureSensor;

/// Millisecond time source
pub trait Clock {
    fn now_ms(&self) -> u64;
}

/// Wall clock, milliseconds since the Unix epoch
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }
}

/// Hand-driven clock for tests and replays
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<u64>,
}

impl ManualClock {
    pub fn new(start_ms: u64) -> Self {
        Self {
            now: Cell::new(start_ms),
        }
    }

    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get().saturating_add(ms));
    }

    pub fn set(&self, ms: u64) {
        self.now.set(ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }
}

/// A single countdown from a recorded start
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    pub started_at: u64,
    pub duration_ms: u64,
}

impl Countdown {
    pub fn new(started_at: u64, duration_ms: u64) -> Self {
        Self {
            started_at,
            duration_ms,
        }
    }

    /// Time since start; a clock running behind the start counts as zero
    pub fn elapsed(&self, now: u64) -> u64 {
        now.saturating_sub(self.started_at)
    }

    pub fn remaining(&self, now: u64) -> u64 {
        self.duration_ms.saturating_sub(self.elapsed(now))
    }

    pub fn is_elapsed(&self, now: u64) -> bool {
        self.elapsed(now) >= self.duration_ms
    }
}

/// `MM:SS`, rounding partial seconds up so the display reaches 00:00 only at expiry
pub fn format_remaining(ms: u64) -> String {
    let secs = ms.div_ceil(1000);
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Local time of day for the taskbar
pub fn wall_clock_label() -> String {
    Local::now().format("%H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_countdown_boundaries() {
        let countdown = Countdown::new(1_000, 1_800_000);
        assert!(!countdown.is_elapsed(1_000 + 1_799_999));
        assert!(countdown.is_elapsed(1_000 + 1_800_000));
        assert_eq!(countdown.remaining(1_000 + 1_799_999), 1);
        assert_eq!(countdown.remaining(1_000 + 2_000_000), 0);
    }

    #[test]
    fn test_countdown_clock_behind_start() {
        let countdown = Countdown::new(5_000, 10);
        assert_eq!(countdown.elapsed(4_000), 0);
        assert_eq!(countdown.remaining(4_000), 10);
    }

    #[test]
    fn test_format_remaining() {
        assert_eq!(format_remaining(1_800_000), "30:00");
        assert_eq!(format_remaining(61_001), "01:02");
        assert_eq!(format_remaining(1), "00:01");
        assert_eq!(format_remaining(0), "00:00");
    }

    #[test]
    fn test_manual_clock_advances() {
        let clock = ManualClock::new(10);
        clock.advance(5);
        assert_eq!(clock.now_ms(), 15);
        clock.set(3);
        assert_eq!(clock.now_ms(), 3);
    }
}
