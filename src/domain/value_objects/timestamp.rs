//! # Timestamp Value Object
//!
//! UTC timestamp wrapper with domain-specific methods.
//!
//! The engine never reads the wall clock implicitly on hot paths: quote
//! expiry and quoting deadlines are evaluated against an explicit `now`
//! passed by the caller, which keeps expiry checks deterministic in tests.
//!
//! # Examples
//!
//! ```
//! use fx_rfq::domain::value_objects::timestamp::Timestamp;
//!
//! let now = Timestamp::now();
//! let later = now.add_secs(60);
//!
//! assert!(later.is_after(&now));
//! assert_eq!(now.duration_until(&later).as_secs(), 60);
//! ```

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// A UTC timestamp with millisecond-or-better precision.
///
/// Wraps `chrono::DateTime<Utc>` with helpers for deadline arithmetic.
///
/// # Invariants
///
/// - Always in UTC.
///
/// # Examples
///
/// ```
/// use fx_rfq::domain::value_objects::timestamp::Timestamp;
///
/// let ts = Timestamp::from_millis(1704067200000).unwrap();
/// assert_eq!(ts.timestamp_millis(), 1704067200000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a timestamp for the current moment.
    #[must_use]
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Creates a timestamp from Unix milliseconds.
    ///
    /// Returns `None` if the value is out of the representable range.
    #[must_use]
    pub fn from_millis(millis: i64) -> Option<Self> {
        Utc.timestamp_millis_opt(millis).single().map(Self)
    }

    /// Creates a timestamp from Unix seconds.
    ///
    /// Returns `None` if the value is out of the representable range.
    #[must_use]
    pub fn from_secs(secs: i64) -> Option<Self> {
        Utc.timestamp_opt(secs, 0).single().map(Self)
    }

    /// Returns the Unix timestamp in milliseconds.
    #[inline]
    #[must_use]
    pub fn timestamp_millis(&self) -> i64 {
        self.0.timestamp_millis()
    }

    /// Returns a timestamp `secs` seconds later.
    ///
    /// Saturates at the representable maximum.
    #[must_use]
    pub fn add_secs(&self, secs: i64) -> Self {
        self.0
            .checked_add_signed(chrono::Duration::seconds(secs))
            .map_or(Self(DateTime::<Utc>::MAX_UTC), Self)
    }

    /// Returns a timestamp `secs` seconds earlier.
    ///
    /// Saturates at the representable minimum.
    #[must_use]
    pub fn sub_secs(&self, secs: i64) -> Self {
        self.0
            .checked_sub_signed(chrono::Duration::seconds(secs))
            .map_or(Self(DateTime::<Utc>::MIN_UTC), Self)
    }

    /// Returns a timestamp advanced by a `std::time::Duration`.
    ///
    /// Saturates at the representable maximum.
    #[must_use]
    pub fn add_duration(&self, duration: Duration) -> Self {
        chrono::Duration::from_std(duration)
            .ok()
            .and_then(|d| self.0.checked_add_signed(d))
            .map_or(Self(DateTime::<Utc>::MAX_UTC), Self)
    }

    /// Returns true if this timestamp is strictly after `other`.
    #[inline]
    #[must_use]
    pub fn is_after(&self, other: &Self) -> bool {
        self.0 > other.0
    }

    /// Returns true if this timestamp is strictly before `other`.
    #[inline]
    #[must_use]
    pub fn is_before(&self, other: &Self) -> bool {
        self.0 < other.0
    }

    /// Returns the duration from this timestamp until `other`.
    ///
    /// Returns `Duration::ZERO` if `other` is not in the future.
    #[must_use]
    pub fn duration_until(&self, other: &Self) -> Duration {
        (other.0 - self.0).to_std().unwrap_or(Duration::ZERO)
    }

    /// Returns the duration elapsed from `other` until this timestamp.
    ///
    /// Returns `Duration::ZERO` if `other` is not in the past.
    #[must_use]
    pub fn duration_since(&self, other: &Self) -> Duration {
        (self.0 - other.0).to_std().unwrap_or(Duration::ZERO)
    }

    /// Returns the inner `DateTime<Utc>`.
    #[inline]
    #[must_use]
    pub const fn as_datetime(&self) -> DateTime<Utc> {
        self.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }
}
