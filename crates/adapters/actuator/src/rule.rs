//! Threshold rule — the `actuate` service-call payload.

use serde::Deserialize;

use hestia_domain::id::EntityId;

/// Seconds to wait before executing, when the payload does not say.
pub const DEFAULT_DELAY_SECS: u64 = 180;

/// Alternate-threshold window used when the payload does not say (evening
/// through early morning).
pub const DEFAULT_ALT_TIME_RANGE: [u32; 2] = [20, 8];

/// One actuation request: watch a sensor value, drive a target entity.
///
/// `sensor_values` is expected sorted descending; pairing with
/// `entity_values` is positional. The sort order is a documented
/// precondition — it is not validated, and an out-of-order list silently
/// resolves to a different band than intended.
#[derive(Debug, Clone, Deserialize)]
pub struct ThresholdRule {
    /// Sensor entity to read.
    pub sensor_id: EntityId,
    /// Read this attribute instead of the sensor's state.
    #[serde(default)]
    pub sensor_attr: Option<String>,
    /// Descending threshold list.
    pub sensor_values: Vec<f64>,
    /// Substitute threshold list used inside `alt_time_range`.
    #[serde(default)]
    pub alt_sensor_values: Option<Vec<f64>>,
    /// `[start_hour, end_hour)`-ish window, wrapping midnight when
    /// `start > end`; boundary hours are excluded.
    #[serde(default = "default_alt_time_range")]
    pub alt_time_range: [u32; 2],
    /// Target entity to drive.
    pub entity_id: EntityId,
    /// Attribute of the target entity holding its current output value.
    #[serde(default)]
    pub entity_attr: Option<String>,
    /// Service verb to call; defaults to `set_<target_attr>`.
    #[serde(default)]
    pub service: Option<String>,
    /// Payload key for the output value; defaults to `entity_attr`.
    #[serde(default)]
    pub service_attr: Option<String>,
    /// Output values, same length and order as `sensor_values`.
    pub entity_values: Vec<serde_json::Value>,
    /// Debounce delay in seconds; `0` executes synchronously.
    #[serde(default = "default_delay")]
    pub delay: u64,
}

fn default_delay() -> u64 {
    DEFAULT_DELAY_SECS
}

fn default_alt_time_range() -> [u32; 2] {
    DEFAULT_ALT_TIME_RANGE
}

impl ThresholdRule {
    /// The payload key carrying the output value: `service_attr`, falling
    /// back to `entity_attr`.
    #[must_use]
    pub fn target_attr(&self) -> Option<&str> {
        self.service_attr
            .as_deref()
            .or(self.entity_attr.as_deref())
    }

    /// The service verb: explicit `service`, else `set_<target_attr>`.
    #[must_use]
    pub fn service_name(&self) -> String {
        match (&self.service, self.target_attr()) {
            (Some(service), _) => service.clone(),
            (None, Some(attr)) => format!("set_{attr}"),
            (None, None) => String::new(),
        }
    }

    /// Dedup key for the debounce registry: `entity_id~target_attr`.
    #[must_use]
    pub fn debounce_key(&self) -> String {
        format!(
            "{}~{}",
            self.entity_id,
            self.target_attr().unwrap_or_default()
        )
    }

    /// Registration-time validation; the descending sort order of
    /// `sensor_values` is deliberately not checked.
    ///
    /// # Errors
    ///
    /// Returns a [`RuleError`] describing the first violated constraint.
    pub fn validate(&self) -> Result<(), RuleError> {
        if self.sensor_values.is_empty() {
            return Err(RuleError::EmptyThresholds);
        }
        if self.sensor_values.len() != self.entity_values.len() {
            return Err(RuleError::MismatchedValues {
                sensor: self.sensor_values.len(),
                entity: self.entity_values.len(),
            });
        }
        if let Some(alt) = &self.alt_sensor_values {
            if alt.len() != self.sensor_values.len() {
                return Err(RuleError::MismatchedValues {
                    sensor: self.sensor_values.len(),
                    entity: alt.len(),
                });
            }
        }
        if self.target_attr().is_none() {
            return Err(RuleError::MissingTargetAttr);
        }
        if self.alt_time_range.iter().any(|hour| *hour >= 24) {
            return Err(RuleError::BadTimeRange(self.alt_time_range));
        }
        Ok(())
    }
}

/// Constraint violations in an `actuate` payload.
#[derive(Debug, thiserror::Error)]
pub enum RuleError {
    /// The threshold list has no entries.
    #[error("sensor_values must not be empty")]
    EmptyThresholds,

    /// Threshold and output lists are not positionally pairable.
    #[error("value lists differ in length ({sensor} thresholds vs {entity} outputs)")]
    MismatchedValues { sensor: usize, entity: usize },

    /// Neither `service_attr` nor `entity_attr` was given, so there is no
    /// payload key (and no debounce key) to use.
    #[error("one of service_attr or entity_attr is required")]
    MissingTargetAttr,

    /// A window bound is not a valid hour of day.
    #[error("alt_time_range hours must be below 24, got {0:?}")]
    BadTimeRange([u32; 2]),
}
