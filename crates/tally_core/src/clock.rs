//! Monotonic time sources.
//!
//! Every timestamp handed to a frame callback comes from a `Clock`. The real
//! clock measures from an `Instant` captured at construction; the manual
//! clock only moves when told to, which keeps animation tests deterministic.

use std::cell::Cell;
use std::time::Instant;

/// A point on a monotonic timeline, in microseconds since the clock origin.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(u64);

impl Timestamp {
    /// The clock origin.
    pub const fn zero() -> Self {
        Self(0)
    }

    pub const fn from_micros(micros: u64) -> Self {
        Self(micros)
    }

    /// Create a timestamp from fractional milliseconds.
    ///
    /// Negative and NaN inputs land on the origin.
    pub fn from_millis_f64(millis: f64) -> Self {
        let micros = (millis * 1000.0).round();
        if micros.is_nan() || micros <= 0.0 {
            Self(0)
        } else {
            Self(micros as u64)
        }
    }

    pub const fn as_micros(&self) -> u64 {
        self.0
    }

    pub fn as_millis_f64(&self) -> f64 {
        self.0 as f64 / 1000.0
    }

    /// Time elapsed since `earlier`, or zero if `earlier` is in the future.
    pub fn saturating_sub(self, earlier: Timestamp) -> Timestamp {
        Self(self.0.saturating_sub(earlier.0))
    }

    /// Shift forward by fractional milliseconds.
    pub fn add_millis(self, millis: f64) -> Timestamp {
        Self(self.0.saturating_add(Timestamp::from_millis_f64(millis).0))
    }
}

/// A monotonic time source.
pub trait Clock {
    /// Current time. Successive calls never go backwards.
    fn now(&self) -> Timestamp;
}

/// Wall clock backed by `std::time::Instant`.
#[derive(Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::from_micros(self.origin.elapsed().as_micros() as u64)
    }
}

/// A clock that only advances when asked to.
///
/// Used by headless drivers and tests to simulate frame timing exactly.
#[derive(Debug, Default)]
pub struct ManualClock {
    position: Cell<Timestamp>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the clock to `position`.
    ///
    /// Requests to move backwards are ignored so the clock stays monotonic.
    pub fn set(&self, position: Timestamp) {
        if position > self.position.get() {
            self.position.set(position);
        }
    }

    /// Move the clock to an absolute time in milliseconds.
    pub fn set_millis(&self, millis: f64) {
        self.set(Timestamp::from_millis_f64(millis));
    }

    /// Advance the clock by `millis` milliseconds.
    pub fn advance_ms(&self, millis: f64) {
        let next = self.position.get().add_millis(millis);
        self.position.set(next);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        self.position.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_millis_conversion() {
        let ts = Timestamp::from_millis_f64(16.667);
        assert_eq!(ts.as_micros(), 16_667);
        assert!((ts.as_millis_f64() - 16.667).abs() < 1e-9);

        assert_eq!(Timestamp::from_millis_f64(-5.0), Timestamp::zero());
        assert_eq!(Timestamp::from_millis_f64(f64::NAN), Timestamp::zero());
    }

    #[test]
    fn test_saturating_sub() {
        let early = Timestamp::from_micros(1_000);
        let late = Timestamp::from_micros(3_500);

        assert_eq!(late.saturating_sub(early).as_micros(), 2_500);
        assert_eq!(early.saturating_sub(late), Timestamp::zero());
    }

    #[test]
    fn test_manual_clock_advance() {
        let clock = ManualClock::new();
        assert_eq!(clock.now(), Timestamp::zero());

        clock.advance_ms(500.0);
        assert_eq!(clock.now().as_micros(), 500_000);

        clock.advance_ms(0.5);
        assert_eq!(clock.now().as_micros(), 500_500);
    }

    #[test]
    fn test_manual_clock_never_goes_backwards() {
        let clock = ManualClock::new();
        clock.set_millis(1_000.0);
        clock.set_millis(200.0);
        assert_eq!(clock.now().as_micros(), 1_000_000);
    }

    #[test]
    fn test_system_clock_is_monotonic() {
        let clock = SystemClock::new();
        let first = clock.now();
        let second = clock.now();
        assert!(second >= first);
    }
}
