use ddlink_core::Host;

/// A time-bounded record of hosts that are temporarily unusable.
///
/// Absence is the default (available) state. There is no explicit unmark:
/// recovery happens only once a record outlives its TTL.
pub trait HostAvailability: Send + Sync + 'static {
    /// Returns `true` iff the host was marked within the TTL window.
    ///
    /// Implementations may evict an expired record as a side effect.
    fn is_unavailable(&self, host: &Host) -> bool;

    /// Marks the host unavailable from now on, resetting any existing window.
    fn mark_unavailable(&self, host: &Host);
}
