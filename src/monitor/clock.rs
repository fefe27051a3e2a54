//! Wall clock seam
//!
//! Chart labels are local time-of-day strings. The clock is injected so
//! tests can pin both the instant and the UTC offset.

use chrono::{DateTime, FixedOffset, Local, Utc};

/// Source of the current time and the display offset
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
    fn offset(&self) -> FixedOffset;
}

/// The machine's clock and local timezone
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn offset(&self) -> FixedOffset {
        *Local::now().offset()
    }
}

/// `HH:MM:SS` for an instant in the clock's offset
pub fn time_label(clock: &dyn Clock, at: DateTime<Utc>) -> String {
    at.with_timezone(&clock.offset()).format("%H:%M:%S").to_string()
}

/// `HH:MM:SS` for epoch seconds, empty when out of range
pub fn epoch_label(clock: &dyn Clock, epoch_secs: i64) -> String {
    DateTime::from_timestamp(epoch_secs, 0)
        .map(|at| time_label(clock, at))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FixedClock;

    #[test]
    fn test_labels_use_clock_offset() {
        // 2023-11-14T22:13:20Z
        let clock = FixedClock::at(1_700_000_000, 5 * 3600 + 1800);
        assert_eq!(time_label(&clock, clock.now()), "03:43:20");
        assert_eq!(epoch_label(&clock, 1_700_000_060), "03:44:20");
    }

    #[test]
    fn test_out_of_range_epoch() {
        let clock = FixedClock::at(0, 0);
        assert_eq!(epoch_label(&clock, i64::MAX), "");
    }
}
