//! Time and timestamp helpers.

use chrono::{DateTime, Local, NaiveTime, Utc};

/// UTC timestamp used for `last_updated`, log records, etc.
pub type Timestamp = DateTime<Utc>;

/// Return the current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}

/// Return the current wall-clock time of day in the host's timezone.
///
/// Time-of-day decisions (alternate threshold windows, scheduled wash start)
/// follow the local clock, not UTC.
#[must_use]
pub fn local_time() -> NaiveTime {
    Local::now().time()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_return_current_utc_time() {
        let before = Utc::now();
        let ts = now();
        let after = Utc::now();
        assert!(ts >= before);
        assert!(ts <= after);
    }

    #[test]
    fn should_return_a_time_of_day() {
        use chrono::Timelike;
        let t = local_time();
        assert!(t.hour() < 24);
    }
}
