//! Core value types shared by the engine, the projection and the ticker.

use crate::time::{MS_PER_DAY, MS_PER_HOUR, MS_PER_MINUTE};

/// Calendar-aware breakdown of the time left until a target instant.
///
/// `months` counts calendar months; everything below is a greedy fixed-unit
/// decomposition of what remains after those months.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Breakdown {
    /// Whole calendar months.
    pub months: u32,

    /// Whole weeks after months are removed.
    pub weeks: u32,

    /// Whole days after weeks are removed.
    pub days: u32,

    /// Whole hours after days are removed.
    pub hours: u32,

    /// Whole minutes after hours are removed.
    pub minutes: u32,

    /// Whole seconds after minutes are removed.
    pub seconds: u32,

    /// Sub-second leftover, truncated out of `seconds`.
    pub millis: u32,

    /// Undecomposed distance to the target in milliseconds.
    pub total_millis: u64,

    /// Target reached or passed.
    pub done: bool,
}

impl Breakdown {
    /// Terminal breakdown: every field zero.
    pub const DONE: Breakdown = Breakdown {
        months: 0,
        weeks: 0,
        days: 0,
        hours: 0,
        minutes: 0,
        seconds: 0,
        millis: 0,
        total_millis: 0,
        done: true,
    };

    /// Returns true once the target has been reached.
    #[inline]
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Whole days to the target, counted linearly from the raw delta.
    #[inline]
    pub fn total_days(&self) -> u64 {
        self.total_millis / MS_PER_DAY
    }

    /// Whole hours to the target, counted linearly from the raw delta.
    #[inline]
    pub fn total_hours(&self) -> u64 {
        self.total_millis / MS_PER_HOUR
    }

    /// Minutes left over after [`total_hours`](Self::total_hours).
    #[inline]
    pub fn remaining_minutes(&self) -> u64 {
        (self.total_millis % MS_PER_HOUR) / MS_PER_MINUTE
    }
}

/// Display density of a countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayMode {
    /// Months, weeks, days, hours, minutes and seconds.
    #[default]
    Full,

    /// Calendar months only.
    Months,

    /// Total days only.
    Days,

    /// Total hours plus remaining minutes.
    HoursMinutes,
}

impl DisplayMode {
    /// All modes, in the order a mode picker lists them.
    pub const ALL: [DisplayMode; 4] = [
        DisplayMode::Full,
        DisplayMode::Months,
        DisplayMode::Days,
        DisplayMode::HoursMinutes,
    ];

    /// Stable key used when the mode is stored.
    pub fn key(&self) -> &'static str {
        match self {
            DisplayMode::Full => "full",
            DisplayMode::Months => "months",
            DisplayMode::Days => "days",
            DisplayMode::HoursMinutes => "hm",
        }
    }
}

/// Unknown display mode key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ModeError {
    /// The key names no display mode.
    Unknown,
}

impl core::fmt::Display for ModeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ModeError::Unknown => write!(f, "unknown display mode (expected full, months, days or hm)"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ModeError {}

impl core::str::FromStr for DisplayMode {
    type Err = ModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DisplayMode::ALL
            .into_iter()
            .find(|mode| mode.key() == s)
            .ok_or(ModeError::Unknown)
    }
}

impl core::fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.key())
    }
}

/// One rendered tier of a projected countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CountdownTier {
    Months,
    Weeks,
    Days,
    Hours,
    Minutes,
    Seconds,
    /// Calendar months shown on their own.
    TotalMonths,
    /// Linear day count to the target.
    TotalDays,
    /// Linear hour count to the target.
    TotalHours,
    /// Minutes past the last whole hour.
    RemainingMinutes,
}

impl CountdownTier {
    /// Stable key identifying the tier's slot in a rendered countdown.
    pub fn key(&self) -> &'static str {
        match self {
            CountdownTier::Months => "months",
            CountdownTier::Weeks => "weeks",
            CountdownTier::Days => "days",
            CountdownTier::Hours => "hours",
            CountdownTier::Minutes => "minutes",
            CountdownTier::Seconds => "seconds",
            CountdownTier::TotalMonths => "months-total",
            CountdownTier::TotalDays => "days-total",
            CountdownTier::TotalHours => "hours-total",
            CountdownTier::RemainingMinutes => "minutes-remaining",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            CountdownTier::Months | CountdownTier::TotalMonths => "Months",
            CountdownTier::Weeks => "Weeks",
            CountdownTier::Days | CountdownTier::TotalDays => "Days",
            CountdownTier::Hours | CountdownTier::TotalHours => "Hours",
            CountdownTier::Minutes | CountdownTier::RemainingMinutes => "Minutes",
            CountdownTier::Seconds => "Seconds",
        }
    }

    /// Whether the value is rendered zero-padded to two digits.
    pub fn is_padded(&self) -> bool {
        !matches!(
            self,
            CountdownTier::TotalMonths | CountdownTier::TotalDays | CountdownTier::TotalHours
        )
    }
}
