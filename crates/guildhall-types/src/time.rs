//! Timestamps and durations for the simulation clock.
//!
//! The core never reads a wall clock: every system call receives an
//! explicit `now` from the external scheduler. All waiting is represented
//! as data -- a stored [`Timestamp`] compared against the supplied `now` --
//! which is what permits deterministic offline catch-up.
//!
//! Internally time is an integer count of milliseconds since the Unix
//! epoch. [`chrono`] conversions exist only for the boundary with the
//! persistence and UI collaborators.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Milliseconds per second.
const MILLIS_PER_SECOND: u64 = 1_000;
/// Seconds per minute.
const SECONDS_PER_MINUTE: u64 = 60;
/// Minutes per hour.
const MINUTES_PER_HOUR: u64 = 60;
/// Hours per day.
const HOURS_PER_DAY: u64 = 24;

// ---------------------------------------------------------------------------
// Timestamp
// ---------------------------------------------------------------------------

/// An absolute instant: milliseconds since the Unix epoch.
///
/// Totally ordered. Arithmetic with [`TickDuration`] saturates at the
/// representable bounds rather than wrapping.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct Timestamp(i64);

impl Timestamp {
    /// The Unix epoch itself (0 ms).
    pub const UNIX_EPOCH: Self = Self(0);

    /// Create a timestamp from a millisecond count.
    pub const fn from_millis(millis: i64) -> Self {
        Self(millis)
    }

    /// Return the millisecond count since the epoch.
    pub const fn as_millis(self) -> i64 {
        self.0
    }

    /// Convert from a [`chrono`] UTC datetime (boundary interop).
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt.timestamp_millis())
    }

    /// Convert to a [`chrono`] UTC datetime (boundary interop).
    ///
    /// Returns `None` if the millisecond count is outside chrono's
    /// representable range.
    pub fn to_datetime(self) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.0).single()
    }

    /// Return this instant advanced by `duration`, saturating at `i64::MAX`.
    pub fn saturating_add(self, duration: TickDuration) -> Self {
        let span = i64::try_from(duration.as_millis()).unwrap_or(i64::MAX);
        Self(self.0.saturating_add(span))
    }

    /// Return this instant moved back by `duration`, saturating at `i64::MIN`.
    pub fn saturating_sub(self, duration: TickDuration) -> Self {
        let span = i64::try_from(duration.as_millis()).unwrap_or(i64::MAX);
        Self(self.0.saturating_sub(span))
    }

    /// True iff this instant is strictly before `other`.
    pub const fn before(self, other: Self) -> bool {
        self.0 < other.0
    }

    /// True iff this instant is at or after `other` (inclusive boundary).
    pub const fn at_or_after(self, other: Self) -> bool {
        self.0 >= other.0
    }
}

// ---------------------------------------------------------------------------
// TickDuration
// ---------------------------------------------------------------------------

/// A non-negative span of milliseconds.
///
/// Constructors from coarser units saturate rather than overflow.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct TickDuration(u64);

impl TickDuration {
    /// The zero-length span.
    pub const ZERO: Self = Self(0);

    /// Create a duration from a millisecond count.
    pub const fn from_millis(millis: u64) -> Self {
        Self(millis)
    }

    /// Create a duration from whole seconds.
    pub const fn from_secs(secs: u64) -> Self {
        Self(secs.saturating_mul(MILLIS_PER_SECOND))
    }

    /// Create a duration from whole minutes.
    pub const fn from_minutes(minutes: u64) -> Self {
        Self::from_secs(minutes.saturating_mul(SECONDS_PER_MINUTE))
    }

    /// Create a duration from whole hours.
    pub const fn from_hours(hours: u64) -> Self {
        Self::from_minutes(hours.saturating_mul(MINUTES_PER_HOUR))
    }

    /// Create a duration from whole days.
    pub const fn from_days(days: u64) -> Self {
        Self::from_hours(days.saturating_mul(HOURS_PER_DAY))
    }

    /// Return the millisecond count.
    pub const fn as_millis(self) -> u64 {
        self.0
    }

    /// Absolute difference between two instants.
    pub const fn between(a: Timestamp, b: Timestamp) -> Self {
        Self(a.as_millis().abs_diff(b.as_millis()))
    }

    /// Sum of two durations, saturating at `u64::MAX`.
    pub const fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    /// Difference of two durations, saturating at zero.
    pub const fn saturating_sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn unit_constructors_compose() {
        assert_eq!(TickDuration::from_secs(1).as_millis(), 1_000);
        assert_eq!(TickDuration::from_minutes(2).as_millis(), 120_000);
        assert_eq!(TickDuration::from_hours(1).as_millis(), 3_600_000);
        assert_eq!(TickDuration::from_days(1).as_millis(), 86_400_000);
    }

    #[test]
    fn timestamp_ordering() {
        let earlier = Timestamp::from_millis(1_000);
        let later = Timestamp::from_millis(2_000);
        assert!(earlier.before(later));
        assert!(later.at_or_after(earlier));
        // Inclusive boundary.
        assert!(earlier.at_or_after(earlier));
        assert!(!earlier.before(earlier));
    }

    #[test]
    fn add_then_sub_roundtrips() {
        let t = Timestamp::from_millis(5_000);
        let d = TickDuration::from_secs(3);
        assert_eq!(t.saturating_add(d).saturating_sub(d), t);
    }

    #[test]
    fn between_is_symmetric() {
        let a = Timestamp::from_millis(1_000);
        let b = Timestamp::from_millis(4_500);
        assert_eq!(TickDuration::between(a, b), TickDuration::from_millis(3_500));
        assert_eq!(TickDuration::between(b, a), TickDuration::from_millis(3_500));
    }

    #[test]
    fn saturation_at_bounds() {
        let t = Timestamp::from_millis(i64::MAX);
        let advanced = t.saturating_add(TickDuration::from_days(1));
        assert_eq!(advanced.as_millis(), i64::MAX);

        let d = TickDuration::from_millis(5);
        assert_eq!(
            d.saturating_sub(TickDuration::from_millis(10)),
            TickDuration::ZERO,
        );
    }

    #[test]
    fn datetime_roundtrip() {
        let t = Timestamp::from_millis(1_700_000_000_000);
        let dt = t.to_datetime().unwrap();
        assert_eq!(Timestamp::from_datetime(dt), t);
    }

    #[test]
    fn serde_roundtrip_as_integers() {
        let t = Timestamp::from_millis(42);
        assert_eq!(serde_json::to_string(&t).unwrap(), "42");
        let d = TickDuration::from_millis(7);
        assert_eq!(serde_json::to_string(&d).unwrap(), "7");
    }
}
