//! Entity snapshots — the read model served by the host's state store.
//!
//! An entity is an observable/controllable aspect of a device (a sensor's
//! reading, a fan's on/off state). Integrations never own host entities;
//! they read point-in-time [`EntitySnapshot`]s and dispatch service calls.

mod attribute_value;

pub use attribute_value::AttributeValue;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::id::EntityId;
use crate::time::Timestamp;

/// State string meaning "the entity is off".
pub const STATE_OFF: &str = "off";

/// Point-in-time view of one entity: raw state string plus attribute bag.
///
/// The state is kept as the host's raw string (`"on"`, `"off"`, `"23.5"`, …);
/// numeric interpretation happens at the call site via [`state_as_f64`](Self::state_as_f64).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntitySnapshot {
    pub entity_id: EntityId,
    pub state: String,
    #[serde(default)]
    pub attributes: HashMap<String, AttributeValue>,
    pub last_updated: Timestamp,
}

impl EntitySnapshot {
    /// Build a snapshot with the given state and no attributes.
    #[must_use]
    pub fn new(entity_id: EntityId, state: impl Into<String>, last_updated: Timestamp) -> Self {
        Self {
            entity_id,
            state: state.into(),
            attributes: HashMap::new(),
            last_updated,
        }
    }

    /// Attach an attribute (builder style).
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: AttributeValue) -> Self {
        self.attributes.insert(name.into(), value);
        self
    }

    /// Whether the state string is exactly `"off"`.
    #[must_use]
    pub fn is_off(&self) -> bool {
        self.state == STATE_OFF
    }

    /// Look up an attribute by name.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&AttributeValue> {
        self.attributes.get(name)
    }

    /// The state string parsed as a number, if it is one.
    #[must_use]
    pub fn state_as_f64(&self) -> Option<f64> {
        self.state.trim().parse().ok()
    }

    /// An attribute coerced to a number, if present and numeric.
    #[must_use]
    pub fn attribute_as_f64(&self, name: &str) -> Option<f64> {
        self.attributes.get(name).and_then(AttributeValue::as_f64)
    }

    /// Human-readable name for log lines; falls back to the entity id.
    #[must_use]
    pub fn friendly_name(&self) -> &str {
        match self.attributes.get("friendly_name") {
            Some(AttributeValue::String(name)) => name,
            _ => self.entity_id.as_str(),
        }
    }
}
