//! Typed time and memory quantities with checked arithmetic.
//!
//! Non-negativity and a canonical seconds/bytes representation are enforced
//! at construction; arithmetic goes through explicit, total methods (`add`,
//! `checked_sub`) rather than operator overloading, so failure-prone
//! subtraction can't be silently wrapped or ignored.

use crate::error::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};
use std::ops::Add;

/// Unixtime sentinel: timestamps at or beyond the start of the year 3000
/// are rejected at construction.
const YEAR_3000_UNIXTIME: u64 = 32_503_680_000;

/// A non-negative duration, stored as a whole number of seconds.
///
/// # Examples
///
/// ```
/// use clockwork_rs::quantities::Duration;
///
/// let a = Duration::minutes(2);
/// let b = Duration::seconds(30);
/// assert_eq!((a.add(b)).as_secs(), 150);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Duration(u64);

impl Duration {
    /// Construct a duration from a whole number of seconds.
    pub const fn seconds(seconds: u64) -> Self {
        Self(seconds)
    }

    /// Construct a duration from a whole number of minutes.
    pub const fn minutes(minutes: u64) -> Self {
        Self(minutes * 60)
    }

    /// Construct a duration from a whole number of hours.
    pub const fn hours(hours: u64) -> Self {
        Self(hours * 3600)
    }

    /// Construct a duration from a whole number of days.
    pub const fn days(days: u64) -> Self {
        Self(days * 86_400)
    }

    /// The zero duration.
    pub const ZERO: Self = Self(0);

    /// The raw number of whole seconds.
    pub const fn as_secs(self) -> u64 {
        self.0
    }

    /// Checked addition; durations are closed under addition and cannot
    /// overflow in realistic use, so this is infallible.
    ///
    /// ```
    /// use clockwork_rs::quantities::Duration;
    /// assert_eq!(Duration::seconds(2).add(Duration::seconds(3)).as_secs(), 5);
    /// ```
    pub const fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }

    /// Subtraction that fails rather than wrapping when it would go negative.
    ///
    /// ```
    /// use clockwork_rs::quantities::Duration;
    /// assert!(Duration::seconds(1).checked_sub(Duration::seconds(2)).is_err());
    /// assert_eq!(Duration::seconds(5).checked_sub(Duration::seconds(2)).unwrap().as_secs(), 3);
    /// ```
    pub fn checked_sub(self, other: Self) -> DomainResult<Self> {
        self.0
            .checked_sub(other.0)
            .map(Self)
            .ok_or(DomainError::NegativeDuration {
                minuend: self.0,
                subtrahend: other.0,
            })
    }

    /// `true` iff subtracting `other` would not go negative, without
    /// returning the result. Used by the scheduler's left-walk to decide
    /// whether another decrement is representable.
    pub const fn can_subtract(self, other: Self) -> bool {
        self.0 >= other.0
    }
}

impl Add for Duration {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Duration::add(self, rhs)
    }
}

/// A point in time: a non-negative count of seconds since the Unix epoch,
/// bounded above by a sentinel at the start of the year 3000.
///
/// # Examples
///
/// ```
/// use clockwork_rs::quantities::{Duration, Timestamp};
///
/// let t = Timestamp::new(100).unwrap();
/// let later = t.checked_add(Duration::seconds(50)).unwrap();
/// assert_eq!(later.unixtime(), 150);
/// assert_eq!(later.checked_sub_timestamp(t).unwrap().as_secs(), 50);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(u64);

impl Timestamp {
    /// Construct a timestamp, validating it falls within `[0, year 3000)`.
    pub fn new(unixtime: u64) -> DomainResult<Self> {
        if unixtime > YEAR_3000_UNIXTIME {
            return Err(DomainError::TimestampOutOfRange(unixtime));
        }
        Ok(Self(unixtime))
    }

    /// The Unix epoch, `Timestamp(0)`.
    pub const EPOCH: Self = Self(0);

    /// The raw unixtime.
    pub const fn unixtime(self) -> u64 {
        self.0
    }

    /// `self + duration`.
    pub fn checked_add(self, duration: Duration) -> DomainResult<Self> {
        Self::new(self.0 + duration.as_secs())
    }

    /// `self - duration`, failing (not saturating) if the result would be
    /// negative.
    pub fn checked_sub_duration(self, duration: Duration) -> DomainResult<Self> {
        let result = self
            .0
            .checked_sub(duration.as_secs())
            .ok_or(DomainError::NegativeTimestamp {
                minuend: self.0,
                subtrahend: duration.as_secs(),
            })?;
        Self::new(result)
    }

    /// `self - other`, as a [`Duration`], failing if `other > self`.
    pub fn checked_sub_timestamp(self, other: Self) -> DomainResult<Duration> {
        self.0
            .checked_sub(other.0)
            .map(Duration::seconds)
            .ok_or(DomainError::NegativeTimestamp {
                minuend: self.0,
                subtrahend: other.0,
            })
    }
}

/// A source of "midnight" for a given timestamp, used to translate a
/// within-period start offset back into an absolute dispatch time.
///
/// This is deliberately a seam rather than a single hard-coded rule: always
/// returning the epoch is a defensible simplification, but callers that need
/// dispatch times anchored to the task's actual calendar day should pick
/// that alternative explicitly instead of the crate silently guessing.
pub trait PeriodClock: Send + Sync {
    /// Return the reference point that `UniqueTask::offset` is measured from.
    fn midnight(&self, period_id: Timestamp) -> Timestamp;
}

/// Always returns the Unix epoch, regardless of `period_id`.
///
/// ```
/// use clockwork_rs::quantities::{PeriodClock, ReferenceMidnight, Timestamp};
/// let clock = ReferenceMidnight;
/// let t = Timestamp::new(123_456).unwrap();
/// assert_eq!(clock.midnight(t).unixtime(), 0);
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct ReferenceMidnight;

impl PeriodClock for ReferenceMidnight {
    fn midnight(&self, _period_id: Timestamp) -> Timestamp {
        Timestamp::EPOCH
    }
}

/// Computes the real UTC calendar-day boundary of `period_id`, for callers
/// who need dispatch times anchored to the task's actual period rather than
/// the epoch.
#[derive(Debug, Default, Clone, Copy)]
pub struct CalendarMidnight;

impl PeriodClock for CalendarMidnight {
    fn midnight(&self, period_id: Timestamp) -> Timestamp {
        use chrono::{DateTime, Utc};
        let dt: DateTime<Utc> = DateTime::from_timestamp(period_id.unixtime() as i64, 0)
            .unwrap_or_else(|| DateTime::from_timestamp(0, 0).unwrap());
        let midnight = dt.date_naive().and_hms_opt(0, 0, 0).unwrap();
        let unixtime = midnight.and_utc().timestamp().max(0) as u64;
        Timestamp::new(unixtime).unwrap_or(Timestamp::EPOCH)
    }
}

/// A non-negative quantity of memory, stored as a whole number of bytes.
///
/// Not on the critical scheduling path (a skyline's `size` is a bare `f64`),
/// but kept for callers that prefer to express pool capacity or task
/// footprint in byte-scaled units and convert.
///
/// # Examples
///
/// ```
/// use clockwork_rs::quantities::Memory;
///
/// let a = Memory::megabytes(10);
/// let b = Memory::kilobytes(512);
/// assert_eq!(a.checked_sub(b).unwrap().as_bytes(), 10 * 1024 * 1024 - 512 * 1024);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Memory(u64);

impl Memory {
    pub const fn bytes(bytes: u64) -> Self {
        Self(bytes)
    }

    pub const fn kilobytes(kb: u64) -> Self {
        Self(kb * 1024)
    }

    pub const fn megabytes(mb: u64) -> Self {
        Self(mb * 1024 * 1024)
    }

    pub const fn gigabytes(gb: u64) -> Self {
        Self(gb * 1024 * 1024 * 1024)
    }

    pub const fn terabytes(tb: u64) -> Self {
        Self(tb * 1024 * 1024 * 1024 * 1024)
    }

    pub const fn as_bytes(self) -> u64 {
        self.0
    }

    pub const fn checked_add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }

    /// Fails rather than wrapping when it would go negative.
    pub fn checked_sub(self, other: Self) -> DomainResult<Self> {
        self.0
            .checked_sub(other.0)
            .map(Self)
            .ok_or_else(|| DomainError::NegativeMemory(-((other.0 - self.0) as f64)))
    }

    /// Parse a human memory literal such as `"100mb"`, `"22GB"`, `"0"`.
    ///
    /// ```
    /// use clockwork_rs::quantities::Memory;
    /// assert_eq!(Memory::parse("10MB").unwrap(), Memory::megabytes(10));
    /// assert_eq!(Memory::parse("0").unwrap(), Memory::bytes(0));
    /// ```
    pub fn parse(literal: &str) -> DomainResult<Self> {
        let trimmed = literal.trim().to_uppercase();
        if trimmed == "0" {
            return Ok(Self::bytes(0));
        }
        const UNITS: &[(&str, u64)] = &[
            ("TB", 1024 * 1024 * 1024 * 1024),
            ("GB", 1024 * 1024 * 1024),
            ("MB", 1024 * 1024),
            ("KB", 1024),
            ("B", 1),
        ];
        for (suffix, multiple) in UNITS {
            if let Some(digits) = trimmed.strip_suffix(suffix) {
                let value: f64 = digits
                    .trim()
                    .parse()
                    .map_err(|_| DomainError::InvalidMemoryLiteral(literal.to_string()))?;
                if value < 0.0 {
                    return Err(DomainError::NegativeMemory(value));
                }
                return Ok(Self((value * *multiple as f64) as u64));
            }
        }
        Err(DomainError::InvalidMemoryLiteral(literal.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_constructors_agree_on_seconds() {
        assert_eq!(Duration::minutes(1).as_secs(), 60);
        assert_eq!(Duration::hours(1).as_secs(), 3600);
        assert_eq!(Duration::days(1).as_secs(), 86_400);
    }

    #[test]
    fn duration_checked_sub_rejects_negative_results() {
        let err = Duration::seconds(1)
            .checked_sub(Duration::seconds(2))
            .unwrap_err();
        assert!(matches!(err, DomainError::NegativeDuration { .. }));
    }

    #[test]
    fn timestamp_rejects_year_3000_sentinel() {
        assert!(Timestamp::new(YEAR_3000_UNIXTIME).is_ok());
        assert!(Timestamp::new(YEAR_3000_UNIXTIME + 1).is_err());
    }

    #[test]
    fn timestamp_sub_timestamp_yields_duration() {
        let a = Timestamp::new(100).unwrap();
        let b = Timestamp::new(40).unwrap();
        assert_eq!(a.checked_sub_timestamp(b).unwrap().as_secs(), 60);
        assert!(b.checked_sub_timestamp(a).is_err());
    }

    #[test]
    fn reference_midnight_is_always_epoch() {
        let clock = ReferenceMidnight;
        let t = Timestamp::new(999_999).unwrap();
        assert_eq!(clock.midnight(t), Timestamp::EPOCH);
    }

    #[test]
    fn memory_parse_handles_common_literals() {
        assert_eq!(Memory::parse("100MB").unwrap(), Memory::megabytes(100));
        assert_eq!(Memory::parse("8.5TB").unwrap().as_bytes(), (8.5 * 1024f64.powi(4)) as u64);
        assert!(Memory::parse("nonsense").is_err());
    }
}
