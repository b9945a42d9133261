//! Wall-clock instants and the clock abstraction.
//!
//! [`Instant`] wraps a UTC `chrono::DateTime` at millisecond resolution. Every
//! constructor validates its input, so any `Instant` value is a representable
//! calendar date and the decomposition engine can rely on that.

use chrono::{DateTime, Months, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Milliseconds in one second.
pub const MS_PER_SECOND: u64 = 1_000;
/// Milliseconds in one minute.
pub const MS_PER_MINUTE: u64 = 60 * MS_PER_SECOND;
/// Milliseconds in one hour.
pub const MS_PER_HOUR: u64 = 60 * MS_PER_MINUTE;
/// Milliseconds in one day.
pub const MS_PER_DAY: u64 = 24 * MS_PER_HOUR;
/// Milliseconds in one week.
pub const MS_PER_WEEK: u64 = 7 * MS_PER_DAY;

/// Shortest all-digit string treated as epoch milliseconds by [`Instant::parse`].
const MIN_EPOCH_DIGITS: usize = 8;

/// Trait for abstracting the wall clock.
///
/// Only the tick scheduler reads the clock. Everything below it takes instants
/// as arguments.
pub trait TimeSource {
    /// Returns the current instant.
    fn now(&self) -> Instant;
}

/// Errors produced while constructing an [`Instant`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InstantError {
    /// Input was empty or whitespace.
    Empty,

    /// Input matched none of the accepted formats.
    Unparseable,

    /// Value lies outside the representable calendar range.
    OutOfRange,

    /// Calendar fields name no real date or time of day (e.g. February 30).
    InvalidDate,
}

impl core::fmt::Display for InstantError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            InstantError::Empty => write!(f, "instant input is empty"),
            InstantError::Unparseable => write!(f, "instant input is not a recognized date"),
            InstantError::OutOfRange => write!(f, "instant is outside the supported calendar range"),
            InstantError::InvalidDate => write!(f, "calendar fields do not name a valid date and time"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for InstantError {}

/// An absolute point in time, UTC, millisecond resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Instant(DateTime<Utc>);

impl Instant {
    /// 1970-01-01T00:00:00Z.
    pub const UNIX_EPOCH: Instant = Instant(DateTime::UNIX_EPOCH);

    /// Creates an instant from milliseconds since the Unix epoch.
    pub fn from_millis(millis: i64) -> Result<Self, InstantError> {
        DateTime::from_timestamp_millis(millis)
            .map(Instant)
            .ok_or(InstantError::OutOfRange)
    }

    /// Creates an instant from a UTC calendar date and time of day.
    ///
    /// # Errors
    /// `InvalidDate` if the fields name no calendar date or time of day.
    pub fn from_ymd_hms(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
    ) -> Result<Self, InstantError> {
        Utc.with_ymd_and_hms(year, month, day, hour, minute, second)
            .single()
            .map(Instant)
            .ok_or(InstantError::InvalidDate)
    }

    /// Wraps an existing UTC date-time, dropping sub-millisecond precision.
    pub fn from_datetime(datetime: DateTime<Utc>) -> Result<Self, InstantError> {
        Self::from_millis(datetime.timestamp_millis())
    }

    /// Parses user or stored input into an instant.
    ///
    /// Accepted forms, after trimming:
    /// * at least 8 ASCII digits: milliseconds since the Unix epoch
    /// * RFC 3339 (`2024-05-01T10:00:00+02:00`)
    /// * `YYYY-MM-DDTHH:MM` or `YYYY-MM-DDTHH:MM:SS[.fff]`, read as UTC, with
    ///   an optional trailing `Z` on the minutes form
    /// * `YYYY-MM-DD`, midnight UTC
    pub fn parse(input: &str) -> Result<Self, InstantError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(InstantError::Empty);
        }

        if trimmed.len() >= MIN_EPOCH_DIGITS && trimmed.bytes().all(|b| b.is_ascii_digit()) {
            let millis: i64 = trimmed.parse().map_err(|_| InstantError::OutOfRange)?;
            return Self::from_millis(millis);
        }

        if let Ok(datetime) = DateTime::parse_from_rfc3339(trimmed) {
            return Self::from_datetime(datetime.with_timezone(&Utc));
        }

        for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%MZ"] {
            if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
                return Self::from_datetime(naive.and_utc());
            }
        }

        if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
            let midnight = date.and_hms_opt(0, 0, 0).ok_or(InstantError::OutOfRange)?;
            return Self::from_datetime(midnight.and_utc());
        }

        Err(InstantError::Unparseable)
    }

    /// Returns the underlying UTC date-time.
    pub fn as_datetime(&self) -> DateTime<Utc> {
        self.0
    }

    /// Milliseconds since the Unix epoch.
    pub fn as_millis(&self) -> i64 {
        self.0.timestamp_millis()
    }

    /// Milliseconds elapsed since `earlier`, zero if `earlier` is later.
    pub fn millis_since(&self, earlier: Instant) -> u64 {
        u64::try_from(self.as_millis() - earlier.as_millis()).unwrap_or(0)
    }

    /// Signed milliseconds from `self` until `later` (negative if `later` is in the past).
    pub fn signed_millis_until(&self, later: Instant) -> i64 {
        later.as_millis() - self.as_millis()
    }

    /// Adds milliseconds, returns `None` past the end of the calendar range.
    pub fn checked_add_millis(self, millis: u64) -> Option<Self> {
        let millis = i64::try_from(millis).ok()?;
        let sum = self.as_millis().checked_add(millis)?;
        Self::from_millis(sum).ok()
    }

    /// Advances by whole calendar months, clamping the day of month.
    ///
    /// Jan 31 + 1 month is Feb 29 in a leap year and Feb 28 otherwise. The
    /// time of day is kept.
    pub fn checked_add_months(self, months: u32) -> Option<Self> {
        self.0.checked_add_months(Months::new(months)).map(Instant)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Instant {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Instant({=i64}ms)", self.as_millis())
    }
}

/// Reads the host's system clock.
#[cfg(feature = "std")]
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeSource;

#[cfg(feature = "std")]
impl TimeSource for SystemTimeSource {
    fn now(&self) -> Instant {
        let millis = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
            .unwrap_or(0);
        Instant::from_millis(millis).unwrap_or(Instant::UNIX_EPOCH)
    }
}
