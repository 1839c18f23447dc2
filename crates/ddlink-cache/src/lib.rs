//! Host availability tracking for the debrid client.
//!
//! The tracker is the circuit breaker of the unlocking pipeline: hosts the
//! debrid service reported as unusable are skipped until a fixed TTL elapses.

pub mod availability;
pub mod tracker;

pub use availability::HostAvailability;
pub use tracker::{HostTracker, HostTrackerConfig, UNAVAILABLE_HOST_TTL};
