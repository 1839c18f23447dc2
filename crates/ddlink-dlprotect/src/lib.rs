//! Fallback resolution of protected links through the browser-automation
//! service.
//!
//! [`DlProtectClient`] talks to the remote service; [`CachedResolver`] is a
//! decorator that keeps successful resolutions in memory so repeated lookups
//! of the same link do not reach the (slow, serialising) browser pool.

pub mod cached;
pub mod client;
pub mod error;

pub use cached::{CachedResolver, CachedResolverConfig};
pub use client::{DlProtectClient, DlProtectConfig, DEFAULT_SERVICE_URL};
pub use error::DlProtectError;
