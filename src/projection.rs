//! Display-mode projection of a [`Breakdown`].

use crate::types::{Breakdown, CountdownTier, DisplayMode};
use heapless::Vec;

/// Maximum number of tiers any mode emits.
pub const MAX_TIERS: usize = 6;

/// Ordered `(tier, value)` pairs for one countdown.
pub type Projection = Vec<(CountdownTier, u64), MAX_TIERS>;

/// Maps a breakdown to the tiers shown in `mode`.
///
/// `Months` reports the calendar-accurate month count. `Days` and
/// `HoursMinutes` count linearly from the undecomposed delta, so they answer
/// "how long from now" instead of re-multiplying calendar months by an
/// average month length.
pub fn project_for_mode(breakdown: &Breakdown, mode: DisplayMode) -> Projection {
    match mode {
        DisplayMode::Full => collect(&[
            (CountdownTier::Months, u64::from(breakdown.months)),
            (CountdownTier::Weeks, u64::from(breakdown.weeks)),
            (CountdownTier::Days, u64::from(breakdown.days)),
            (CountdownTier::Hours, u64::from(breakdown.hours)),
            (CountdownTier::Minutes, u64::from(breakdown.minutes)),
            (CountdownTier::Seconds, u64::from(breakdown.seconds)),
        ]),
        DisplayMode::Months => collect(&[(CountdownTier::TotalMonths, u64::from(breakdown.months))]),
        DisplayMode::Days => collect(&[(CountdownTier::TotalDays, breakdown.total_days())]),
        DisplayMode::HoursMinutes => collect(&[
            (CountdownTier::TotalHours, breakdown.total_hours()),
            (CountdownTier::RemainingMinutes, breakdown.remaining_minutes()),
        ]),
    }
}

// Callers pass at most MAX_TIERS entries.
fn collect(tiers: &[(CountdownTier, u64)]) -> Projection {
    tiers.iter().copied().collect()
}
