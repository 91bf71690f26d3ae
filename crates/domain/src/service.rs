//! Service calls — commands dispatched back into the host.
//!
//! Examples: `fan.turn_on`, `climate.set_temperature`.

use serde::{Deserialize, Serialize};

use crate::id::EntityId;

/// A service call addressed to the host's dispatcher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceCall {
    /// Service domain, usually derived from the target entity id.
    pub domain: String,
    /// Service verb (`turn_on`, `set_speed`, …).
    pub service: String,
    /// Payload; always carries `entity_id` for entity-targeted calls.
    pub data: serde_json::Value,
}

impl ServiceCall {
    /// Build a call with an arbitrary payload.
    #[must_use]
    pub fn new(
        domain: impl Into<String>,
        service: impl Into<String>,
        data: serde_json::Value,
    ) -> Self {
        Self {
            domain: domain.into(),
            service: service.into(),
            data,
        }
    }

    /// `turn_on` targeting one entity, domain derived from the id.
    #[must_use]
    pub fn turn_on(entity_id: &EntityId) -> Self {
        Self::targeting(entity_id, "turn_on")
    }

    /// `turn_off` targeting one entity, domain derived from the id.
    #[must_use]
    pub fn turn_off(entity_id: &EntityId) -> Self {
        Self::targeting(entity_id, "turn_off")
    }

    /// A call setting one named attribute on an entity
    /// (`{ "entity_id": …, attr: value }`).
    #[must_use]
    pub fn set_attribute(
        entity_id: &EntityId,
        service: impl Into<String>,
        attr: &str,
        value: serde_json::Value,
    ) -> Self {
        Self::new(
            entity_id.domain(),
            service,
            serde_json::json!({ "entity_id": entity_id.as_str(), attr: value }),
        )
    }

    fn targeting(entity_id: &EntityId, service: &str) -> Self {
        Self::new(
            entity_id.domain(),
            service,
            serde_json::json!({ "entity_id": entity_id.as_str() }),
        )
    }
}

impl std::fmt::Display for ServiceCall {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.domain, self.service)
    }
}
