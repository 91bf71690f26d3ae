//! Port definitions — traits the host platform provides and adapters implement.
//!
//! Ports are the boundaries between the integrations and the outside world.
//! They are defined here so that the integration crates can depend on them
//! without knowing anything about the host's internals.

pub mod device;
pub mod dispatcher;
pub mod integration;
pub mod state_store;

pub use device::{DeviceError, DeviceTransport};
pub use dispatcher::ServiceDispatcher;
pub use integration::Integration;
pub use state_store::StateStore;
