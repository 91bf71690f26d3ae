//! # hestia-app
//!
//! Port definitions (traits) sitting between the integrations and the host
//! platform, plus a small in-process host used by the demo binary and as a
//! shared test double.
//!
//! ## Dependency rule
//! Depends on `hestia-domain` only. Adapters implement the ports; the binary
//! wires everything together.

pub mod host;
pub mod ports;
