//! # hestia-adapter-actuator
//!
//! Threshold actuator integration. Exposes a single service verb,
//! `actuate`, whose payload is a [`ThresholdRule`]: watch a numeric sensor
//! value, walk a descending threshold list, and drive a target entity when
//! the value enters a different band. Repeated requests per
//! (entity, attribute) key are debounced through a single-shot timer.
//!
//! ## Dependency rule
//!
//! Depends on `hestia-app` (port traits) and `hestia-domain` only.

mod debounce;
mod executor;
mod resolver;
mod rule;

pub use debounce::DebounceScheduler;
pub use executor::RuleExecutor;
pub use resolver::{alt_window_active, resolve};
pub use rule::{DEFAULT_DELAY_SECS, RuleError, ThresholdRule};

use hestia_domain::error::{HestiaError, NotFoundError};

use hestia_app::ports::{Integration, ServiceDispatcher, StateStore};

/// Service verb accepted by this integration.
pub const SERVICE_ACTUATE: &str = "actuate";

/// The actuator integration: payload decoding + debounce scheduling.
pub struct ActuatorIntegration<S, D> {
    scheduler: DebounceScheduler<S, D>,
}

impl<S, D> ActuatorIntegration<S, D>
where
    S: StateStore + 'static,
    D: ServiceDispatcher + 'static,
{
    /// Wire the integration against the host's state store and dispatcher.
    pub fn new(store: S, dispatcher: D) -> Self {
        Self {
            scheduler: DebounceScheduler::new(RuleExecutor::new(store, dispatcher)),
        }
    }

    /// Number of debounce entries currently pending.
    #[must_use]
    pub fn pending_len(&self) -> usize {
        self.scheduler.pending_len()
    }
}

impl<S, D> Integration for ActuatorIntegration<S, D>
where
    S: StateStore + 'static,
    D: ServiceDispatcher + 'static,
{
    fn name(&self) -> &'static str {
        "actuator"
    }

    async fn handle_service_call(
        &self,
        service: &str,
        data: serde_json::Value,
    ) -> Result<(), HestiaError> {
        if service != SERVICE_ACTUATE {
            return Err(NotFoundError {
                entity: "Service",
                id: service.to_string(),
            }
            .into());
        }

        let rule: ThresholdRule =
            serde_json::from_value(data).map_err(|err| HestiaError::Payload(Box::new(err)))?;
        rule.validate()
            .map_err(|err| HestiaError::Payload(Box::new(err)))?;
        self.scheduler.trigger(rule).await
    }

    async fn teardown(&self) -> Result<(), HestiaError> {
        self.scheduler.clear();
        Ok(())
    }
}
