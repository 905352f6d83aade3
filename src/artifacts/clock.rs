//! Time source for the generation timestamps embedded in artifacts

use chrono::{DateTime, Utc};

/// Source of the current instant
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    /// ISO-8601 UTC with millisecond precision, e.g. `2025-06-01T09:30:00.000Z`
    fn timestamp(&self) -> String {
        self.now().format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
    }
}

/// Wall clock
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always reports the same instant
#[derive(Clone, Copy, Debug)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_timestamp_format() {
        let clock = FixedClock(Utc.with_ymd_and_hms(2025, 6, 1, 9, 30, 5).unwrap());
        assert_eq!(clock.timestamp(), "2025-06-01T09:30:05.000Z");
    }
}
