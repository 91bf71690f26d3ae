//! Threshold resolution — pure band lookup and time-window logic.

/// Find the output value for a sensor reading.
///
/// `sensor_values` is walked from the front (the high end of a descending
/// list); the first threshold the reading meets or exceeds wins, i.e. the
/// smallest index `i` with `value >= sensor_values[i]`. `None` means the
/// reading sits below the lowest band and the caller falls back to turn-off
/// semantics.
///
/// The list is trusted to be sorted descending; out-of-order input silently
/// matches a different band.
#[must_use]
pub fn resolve<'a, V>(value: f64, sensor_values: &[f64], entity_values: &'a [V]) -> Option<&'a V> {
    sensor_values
        .iter()
        .zip(entity_values)
        .find(|(threshold, _)| value >= **threshold)
        .map(|(_, output)| output)
}

/// Whether `hour` falls inside the alternate-threshold window.
///
/// Non-wrapping when `end > start` (`start < hour < end`), wrapping across
/// midnight otherwise (`hour > start || hour < end`). Both comparisons are
/// strict: the boundary hours themselves are outside the window.
#[must_use]
pub fn alt_window_active(hour: u32, [start, end]: [u32; 2]) -> bool {
    if end > start {
        hour > start && hour < end
    } else {
        hour > start || hour < end
    }
}
