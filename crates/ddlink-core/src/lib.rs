//! Core types and traits for the ddlink unlocking pipeline.
//!
//! This crate provides the link classification helpers and the collaborator
//! traits shared by the debrid client, the fallback resolver client and the
//! resolution orchestrator.

pub mod clock;
pub mod error;
pub mod fallback;
pub mod link;
pub mod resolution;
pub mod unlocker;

pub use clock::{Clock, SystemClock};
pub use error::{Result, UnlockError};
pub use fallback::{CacheStats, FallbackResolver};
pub use link::{Host, RedirectorDomains, DEFAULT_REDIRECTOR_DOMAINS};
pub use resolution::Resolution;
pub use unlocker::{RedirectorResolver, UnlockedLink, Unlocker};
