//! Integration port — the lifecycle and service-call seam for integrations.
//!
//! An integration bridges one external concern (a rule engine, a vendor
//! device, …) into the system. The binary crate constructs integrations,
//! forwards service calls to them, and tears them down on shutdown.

use std::future::Future;

use hestia_domain::error::HestiaError;

/// A pluggable integration.
pub trait Integration: Send + Sync {
    /// Unique name identifying this integration (e.g. `"actuator"`).
    fn name(&self) -> &'static str;

    /// Handle a service call addressed to this integration.
    ///
    /// # Errors
    ///
    /// Returns [`HestiaError::NotFound`] for unknown verbs and
    /// [`HestiaError::Payload`] for undecodable payloads. Downstream
    /// device/dispatch failures are logged and swallowed here — the service
    /// surface has no return value, effects are observable only through
    /// entity state and logs.
    fn handle_service_call(
        &self,
        service: &str,
        data: serde_json::Value,
    ) -> impl Future<Output = Result<(), HestiaError>> + Send;

    /// Called on graceful shutdown. Clean up pending work.
    fn teardown(&self) -> impl Future<Output = Result<(), HestiaError>> + Send {
        async { Ok(()) }
    }
}
