use crate::availability::HostAvailability;
use dashmap::DashMap;
use ddlink_core::{Clock, Host, SystemClock};
use jiff::{SignedDuration, Timestamp};
use std::time::Duration;
use tracing::{debug, info};
use typed_builder::TypedBuilder;

/// How long a host stays unavailable after being marked.
pub const UNAVAILABLE_HOST_TTL: Duration = Duration::from_secs(15 * 60);

/// Configures a [`HostTracker`].
#[derive(Debug, Clone, TypedBuilder)]
pub struct HostTrackerConfig {
    /// Window during which a marked host is skipped.
    #[builder(default = UNAVAILABLE_HOST_TTL)]
    pub ttl: Duration,
}

impl Default for HostTrackerConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// In-memory [`HostAvailability`] backed by DashMap.
///
/// Each host key is guarded by its shard lock, which gives atomic
/// read-then-evict and insert per host without any cross-host coordination.
/// Expired records are only reclaimed when they are read again.
#[derive(Debug)]
pub struct HostTracker<C = SystemClock> {
    entries: DashMap<Host, Timestamp>,
    ttl: SignedDuration,
    clock: C,
}

impl HostTracker<SystemClock> {
    /// Creates a tracker with the default 15 minute TTL.
    pub fn new() -> Self {
        Self::with_config(HostTrackerConfig::default())
    }

    pub fn with_config(config: HostTrackerConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }
}

impl Default for HostTracker<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> HostTracker<C> {
    /// Creates a tracker reading time from the given clock.
    pub fn with_clock(config: HostTrackerConfig, clock: C) -> Self {
        Self {
            entries: DashMap::new(),
            ttl: SignedDuration::try_from(config.ttl).unwrap_or(SignedDuration::MAX),
            clock,
        }
    }

    /// Returns the configured TTL.
    pub fn ttl(&self) -> SignedDuration {
        self.ttl
    }

    /// Hosts currently inside their unavailability window.
    ///
    /// Expired records are skipped but not evicted.
    pub fn unavailable_hosts(&self) -> Vec<Host> {
        let now = self.clock.now();
        let mut hosts: Vec<Host> = self
            .entries
            .iter()
            .filter(|entry| !self.is_expired(*entry.value(), now))
            .map(|entry| entry.key().clone())
            .collect();
        hosts.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        hosts
    }

    fn is_expired(&self, marked_at: Timestamp, now: Timestamp) -> bool {
        now.duration_since(marked_at) > self.ttl
    }
}

impl<C: Clock> HostAvailability for HostTracker<C> {
    fn is_unavailable(&self, host: &Host) -> bool {
        let now = self.clock.now();

        let Some(marked_at) = self.entries.get(host).map(|entry| *entry.value()) else {
            return false;
        };

        if !self.is_expired(marked_at, now) {
            return true;
        }

        // Only evict if the record is still the expired one; a concurrent mark
        // may have refreshed it since the read above.
        if self
            .entries
            .remove_if(host, |_, marked_at| self.is_expired(*marked_at, now))
            .is_some()
        {
            info!(host = %host, "Host is available again (TTL expired)");
            return false;
        }

        self.entries
            .get(host)
            .is_some_and(|entry| !self.is_expired(*entry.value(), now))
    }

    fn mark_unavailable(&self, host: &Host) {
        let now = self.clock.now();
        let previous = self.entries.insert(host.clone(), now);
        info!(
            host = %host,
            ttl_minutes = self.ttl.as_secs() / 60,
            refreshed = previous.is_some(),
            "Host marked as unavailable"
        );
        debug!(host = %host, marked_at = %now, "Stored host availability record");
    }
}

#[cfg(test)]
pub(crate) mod test_clock {
    use ddlink_core::Clock;
    use jiff::{SignedDuration, Timestamp};
    use std::sync::{Arc, Mutex};

    #[derive(Clone)]
    pub(crate) struct TestClock {
        inner: Arc<Mutex<Timestamp>>,
    }

    impl TestClock {
        pub(crate) fn new(now: Timestamp) -> Self {
            Self {
                inner: Arc::new(Mutex::new(now)),
            }
        }

        pub(crate) fn advance(&self, by: SignedDuration) {
            let mut now = self
                .inner
                .lock()
                .expect("test clock lock should not be poisoned");
            *now = *now + by;
        }
    }

    impl Clock for TestClock {
        fn now(&self) -> Timestamp {
            *self
                .inner
                .lock()
                .expect("test clock lock should not be poisoned")
        }
    }
}
