//! # hestia-domain
//!
//! Pure domain model for the hestia integrations.
//!
//! ## Responsibilities
//! - Foundational types: entity identifiers, error conventions, timestamps
//! - Define **entity snapshots** (the read model served by the host's state store)
//! - Define **attribute values** (typed attribute storage)
//! - Define **service calls** (commands dispatched back into the host)
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod entity;
pub mod error;
pub mod id;
pub mod service;
pub mod time;
