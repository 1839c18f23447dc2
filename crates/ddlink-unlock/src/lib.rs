//! Resolution orchestrator.
//!
//! [`UnlockService`] turns a link discovered by a scraper into the most
//! usable link it can get, trying the redirector resolver, the debrid
//! unlocker and the fallback resolver in turn. It never fails: every path
//! degrades to the cleaned input link.

pub mod service;

pub use service::{UnlockService, DEFAULT_MAX_HOPS};
