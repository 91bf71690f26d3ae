//! Device-transport port — the appliance property RPC primitive.

use std::future::Future;

/// Errors from a device transport.
///
/// Callers at the entity boundary swallow both kinds after logging, but the
/// split keeps "device unreachable" distinguishable from "device answered
/// and said no".
#[derive(Debug, thiserror::Error)]
pub enum DeviceError {
    /// The transport could not reach the device at all.
    #[error("device unreachable")]
    Unreachable(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The device answered, but not with the expected acknowledgement.
    #[error("device rejected command {command}: {response:?}")]
    Rejected {
        command: String,
        response: Vec<serde_json::Value>,
    },
}

/// Raw command channel to one physical device.
///
/// Property reads use the `get_prop` command with the property name as the
/// single argument and expect a one-element response list.
pub trait DeviceTransport: Send + Sync {
    /// Send one command and await the device's response list.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceError::Unreachable`] when the device cannot be
    /// reached.
    fn send(
        &self,
        command: &str,
        args: &[serde_json::Value],
    ) -> impl Future<Output = Result<Vec<serde_json::Value>, DeviceError>> + Send;
}

impl<T: DeviceTransport> DeviceTransport for &T {
    fn send(
        &self,
        command: &str,
        args: &[serde_json::Value],
    ) -> impl Future<Output = Result<Vec<serde_json::Value>, DeviceError>> + Send {
        T::send(self, command, args)
    }
}

impl<T: DeviceTransport> DeviceTransport for std::sync::Arc<T> {
    fn send(
        &self,
        command: &str,
        args: &[serde_json::Value],
    ) -> impl Future<Output = Result<Vec<serde_json::Value>, DeviceError>> + Send {
        T::send(self, command, args)
    }
}
