//! Scheduled-start offset — hours from now until the target wash start.
//!
//! The appliance takes an "hours from now" value for its internal clock.
//! The target start is 08:00; more than ten minutes past the hour counts as
//! the next hour.

use chrono::{NaiveTime, Timelike};

/// Hour of day the deferred wash should start at.
pub const TARGET_START_HOUR: u32 = 8;

/// Compute the scheduled-start offset in hours.
///
/// `0` means "start immediately" — both for the early-afternoon gap
/// (effective hour 6..=12, a guard against scheduling into a too-soon
/// window) and for non-deferred starts.
#[must_use]
pub fn appoint_offset(now: NaiveTime) -> u32 {
    let mut hour = now.hour();
    if now.minute() > 10 {
        hour += 1;
    }
    if hour <= 5 {
        TARGET_START_HOUR - hour
    } else if hour >= 13 {
        TARGET_START_HOUR + 24 - hour
    } else {
        0
    }
}
