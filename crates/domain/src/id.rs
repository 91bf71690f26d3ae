//! Dotted entity identifiers, e.g. `sensor.bedroom_temperature`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Identifier of an entity living in the host's state store.
///
/// The text before the first `.` is the entity's domain (`sensor`, `fan`, …)
/// and doubles as the service-call domain when the entity is actuated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EntityId(String);

impl EntityId {
    /// Build a validated entity id.
    ///
    /// # Errors
    ///
    /// Returns a validation error when the id is empty, has no `.` separator,
    /// or has an empty domain or object part.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        match id.split_once('.') {
            Some((domain, object)) if !domain.is_empty() && !object.is_empty() => Ok(Self(id)),
            _ => Err(ValidationError::MalformedEntityId(id)),
        }
    }

    /// The domain part, i.e. the text before the first `.`.
    #[must_use]
    pub fn domain(&self) -> &str {
        // Validated at construction, the separator is always present.
        self.0.split('.').next().unwrap_or_default()
    }

    /// The full id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for EntityId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for EntityId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<EntityId> for String {
    fn from(id: EntityId) -> Self {
        id.0
    }
}
