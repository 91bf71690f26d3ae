//! Washer property snapshot — the raw state read from the appliance.

use std::collections::HashMap;

use serde_json::Value;

/// Property names polled on every refresh.
pub const TRACKED_PROPS: [&str; 5] = [
    PROP_PROGRAM,
    PROP_WASH_PROCESS,
    PROP_WASH_STATUS,
    PROP_APPOINT_TIME,
    PROP_DRY_MODE,
];

pub const PROP_PROGRAM: &str = "program";
pub const PROP_WASH_PROCESS: &str = "wash_process";
pub const PROP_WASH_STATUS: &str = "wash_status";
pub const PROP_APPOINT_TIME: &str = "appoint_time";
pub const PROP_DRY_MODE: &str = "DryMode";

/// Point-in-time property values; a missing/empty device response leaves
/// the property `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WasherSnapshot {
    pub program: Option<String>,
    pub wash_process: Option<i64>,
    pub wash_status: Option<i64>,
    pub appoint_time: Option<i64>,
    pub dry_mode: Option<i64>,
}

impl WasherSnapshot {
    /// Build a snapshot from raw per-property responses.
    #[must_use]
    pub fn from_props(mut props: HashMap<String, Option<Value>>) -> Self {
        let mut take = |name: &str| props.remove(name).flatten();
        Self {
            program: take(PROP_PROGRAM).and_then(|v| match v {
                Value::String(s) => Some(s),
                other => other.as_i64().map(|n| n.to_string()),
            }),
            wash_process: take(PROP_WASH_PROCESS).and_then(|v| v.as_i64()),
            wash_status: take(PROP_WASH_STATUS).and_then(|v| v.as_i64()),
            appoint_time: take(PROP_APPOINT_TIME).and_then(|v| v.as_i64()),
            dry_mode: take(PROP_DRY_MODE).and_then(|v| v.as_i64()),
        }
    }

    /// Derived on/off state: the washer counts as on while a cycle runs
    /// (process stage 1..=6) or while a deferred start is armed.
    #[must_use]
    pub fn is_on(&self) -> bool {
        self.wash_status == Some(1)
            && (matches!(self.wash_process, Some(stage) if (1..=6).contains(&stage))
                || matches!(self.appoint_time, Some(hours) if hours != 0))
    }

    /// Read-only attribute bag mirroring the raw property values.
    #[must_use]
    pub fn attributes(&self) -> HashMap<String, Value> {
        let json = |v: &Option<i64>| v.map_or(Value::Null, Value::from);
        HashMap::from([
            (
                PROP_PROGRAM.to_string(),
                self.program.clone().map_or(Value::Null, Value::String),
            ),
            (PROP_WASH_PROCESS.to_string(), json(&self.wash_process)),
            (PROP_WASH_STATUS.to_string(), json(&self.wash_status)),
            (PROP_APPOINT_TIME.to_string(), json(&self.appoint_time)),
            (PROP_DRY_MODE.to_string(), json(&self.dry_mode)),
        ])
    }
}
