//! State-store port — read access to the host's entity states.

use std::future::Future;

use hestia_domain::entity::EntitySnapshot;
use hestia_domain::id::EntityId;

/// Read-only view of the host's state machine.
///
/// Integrations never cache snapshots across invocations; every rule
/// execution reads fresh state.
pub trait StateStore: Send + Sync {
    /// Fetch the current snapshot of one entity, if it exists.
    fn get_state(
        &self,
        entity_id: &EntityId,
    ) -> impl Future<Output = Option<EntitySnapshot>> + Send;
}

impl<S: StateStore> StateStore for std::sync::Arc<S> {
    fn get_state(
        &self,
        entity_id: &EntityId,
    ) -> impl Future<Output = Option<EntitySnapshot>> + Send {
        S::get_state(self, entity_id)
    }
}
