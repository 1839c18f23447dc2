//! Client for the AllDebrid REST API.
//!
//! [`AllDebridClient`] is both the debrid unlock adapter and the redirector
//! resolver adapter of the unlocking pipeline. Every transport or API failure
//! is logged and absorbed into "no result"; host-level failures additionally
//! trip the [`HostAvailability`](ddlink_cache::HostAvailability) circuit
//! breaker.

pub mod api;
pub mod client;
pub mod error;

pub use client::{AllDebridClient, DebridConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use error::DebridError;
