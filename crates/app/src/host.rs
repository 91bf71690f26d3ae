//! In-process host — in-memory implementations of the host-side ports.
//!
//! The real platform owns the state machine and the service registry; these
//! stand-ins back the demo binary and double as spies in the test suites.

use std::collections::HashMap;
use std::sync::Mutex;

use hestia_domain::entity::EntitySnapshot;
use hestia_domain::error::HestiaError;
use hestia_domain::id::EntityId;
use hestia_domain::service::ServiceCall;

use crate::ports::{ServiceDispatcher, StateStore};

/// In-memory entity state, keyed by entity id.
#[derive(Default)]
pub struct InMemoryStateStore {
    states: Mutex<HashMap<EntityId, EntitySnapshot>>,
}

impl InMemoryStateStore {
    /// Insert or replace one entity snapshot.
    pub fn set_state(&self, snapshot: EntitySnapshot) {
        self.lock().insert(snapshot.entity_id.clone(), snapshot);
    }

    /// Remove one entity, returning its last snapshot.
    pub fn remove_state(&self, entity_id: &EntityId) -> Option<EntitySnapshot> {
        self.lock().remove(entity_id)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<EntityId, EntitySnapshot>> {
        self.states
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl StateStore for InMemoryStateStore {
    async fn get_state(&self, entity_id: &EntityId) -> Option<EntitySnapshot> {
        self.lock().get(entity_id).cloned()
    }
}

/// Dispatcher that logs every call and keeps it for inspection.
///
/// Dispatch never fails; the demo host has no service registry to reject
/// against.
#[derive(Default)]
pub struct RecordingDispatcher {
    calls: Mutex<Vec<ServiceCall>>,
}

impl RecordingDispatcher {
    /// All calls dispatched so far, oldest first.
    #[must_use]
    pub fn calls(&self) -> Vec<ServiceCall> {
        self.lock().clone()
    }

    /// Drain the recorded calls.
    #[must_use]
    pub fn take_calls(&self) -> Vec<ServiceCall> {
        std::mem::take(&mut *self.lock())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<ServiceCall>> {
        self.calls
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl ServiceDispatcher for RecordingDispatcher {
    async fn call_service(&self, call: ServiceCall) -> Result<(), HestiaError> {
        tracing::info!(domain = %call.domain, service = %call.service, data = %call.data, "service call");
        self.lock().push(call);
        Ok(())
    }
}
