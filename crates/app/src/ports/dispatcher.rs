//! Service-dispatch port — the host's side-effect channel.

use std::future::Future;

use hestia_domain::error::HestiaError;
use hestia_domain::service::ServiceCall;

/// Dispatches a service call into the host.
///
/// The call is awaited to completion; there is no retry on failure, the
/// next triggering event is the only recovery path.
pub trait ServiceDispatcher: Send + Sync {
    /// Dispatch one call.
    ///
    /// # Errors
    ///
    /// Returns [`HestiaError::Dispatch`] when the host reports a failure.
    fn call_service(&self, call: ServiceCall)
    -> impl Future<Output = Result<(), HestiaError>> + Send;
}

impl<D: ServiceDispatcher> ServiceDispatcher for std::sync::Arc<D> {
    fn call_service(
        &self,
        call: ServiceCall,
    ) -> impl Future<Output = Result<(), HestiaError>> + Send {
        D::call_service(self, call)
    }
}
