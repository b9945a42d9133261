//! Calendar-aware duration decomposition.
//!
//! [`decompose`] turns a `(reference, target)` pair into a [`Breakdown`]:
//! whole calendar months first, then weeks, days, hours, minutes and seconds
//! of fixed length. Month lengths vary between 28 and 31 days, so months are
//! counted by advancing the reference on the calendar rather than by dividing
//! the delta by an average month.

use chrono::Datelike;

use crate::time::{Instant, MS_PER_DAY, MS_PER_HOUR, MS_PER_MINUTE, MS_PER_SECOND, MS_PER_WEEK};
use crate::types::Breakdown;

/// Decomposes the time from `reference` until `target`.
///
/// Returns [`Breakdown::DONE`] when `target <= reference`. Otherwise `months`
/// is the largest count such that `reference` advanced by that many calendar
/// months (day of month clamped) is not after `target`, and the rest is split
/// greedily into fixed units with truncation at every tier.
pub fn decompose(reference: Instant, target: Instant) -> Breakdown {
    if target <= reference {
        return Breakdown::DONE;
    }

    let total_millis = target.millis_since(reference);
    let (months, cursor) = whole_months_between(reference, target);
    let mut rest = target.millis_since(cursor);

    let weeks = take_units(&mut rest, MS_PER_WEEK);
    let days = take_units(&mut rest, MS_PER_DAY);
    let hours = take_units(&mut rest, MS_PER_HOUR);
    let minutes = take_units(&mut rest, MS_PER_MINUTE);
    let seconds = take_units(&mut rest, MS_PER_SECOND);

    Breakdown {
        months,
        weeks,
        days,
        hours,
        minutes,
        seconds,
        millis: rest as u32,
        total_millis,
        done: false,
    }
}

/// Counts whole calendar months from `reference` to `target`.
///
/// Returns the count and `reference` advanced by it. Requires
/// `reference < target`.
fn whole_months_between(reference: Instant, target: Instant) -> (u32, Instant) {
    let from = reference.as_datetime();
    let to = target.as_datetime();

    // Month-index distance overshoots the true count by at most one.
    let span = (i64::from(to.year()) - i64::from(from.year())) * 12 + i64::from(to.month0())
        - i64::from(from.month0());
    let mut months = u32::try_from(span.max(0)).unwrap_or(u32::MAX);

    loop {
        if months == 0 {
            return (0, reference);
        }
        match reference.checked_add_months(months) {
            Some(cursor) if cursor <= target => return (months, cursor),
            _ => months -= 1,
        }
    }
}

/// Removes as many whole `unit`s from `rest` as fit and returns the count.
#[inline]
fn take_units(rest: &mut u64, unit: u64) -> u32 {
    let count = *rest / unit;
    *rest %= unit;
    u32::try_from(count).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: u32) -> Instant {
        Instant::from_ymd_hms(year, month, day, hour, minute, second).unwrap()
    }

    #[test]
    fn equal_instants_are_done() {
        let now = at(2024, 6, 1, 12, 0, 0);
        assert_eq!(decompose(now, now), Breakdown::DONE);
    }

    #[test]
    fn past_target_is_done() {
        let now = at(2024, 6, 1, 12, 0, 0);
        let past = at(2024, 5, 1, 12, 0, 0);
        assert_eq!(decompose(now, past), Breakdown::DONE);
    }

    #[test]
    fn counts_calendar_months_from_month_end() {
        let breakdown = decompose(at(2024, 1, 31, 0, 0, 0), at(2024, 3, 31, 0, 0, 0));
        assert_eq!(breakdown.months, 2);
        assert_eq!(breakdown.weeks, 0);
        assert_eq!(breakdown.days, 0);
        assert_eq!(breakdown.hours, 0);
        assert!(!breakdown.done);
    }

    #[test]
    fn short_month_does_not_count_until_clamped_day_is_reached() {
        // Jan 31 + 1 month = Feb 29 (2024), which is after Feb 28.
        let breakdown = decompose(at(2024, 1, 31, 0, 0, 0), at(2024, 2, 28, 0, 0, 0));
        assert_eq!(breakdown.months, 0);
        assert_eq!(breakdown.weeks, 4);
        assert_eq!(breakdown.days, 0);
    }

    #[test]
    fn overshooting_month_span_is_corrected() {
        // Mar 15 10:00 -> Apr 15 09:00 is one hour short of a month.
        let breakdown = decompose(at(2024, 3, 15, 10, 0, 0), at(2024, 4, 15, 9, 0, 0));
        assert_eq!(breakdown.months, 0);
        assert_eq!(breakdown.weeks, 4);
        assert_eq!(breakdown.days, 2);
        assert_eq!(breakdown.hours, 23);
    }

    #[test]
    fn sub_second_leftover_is_truncated() {
        let reference = at(2024, 6, 1, 0, 0, 0);
        let target = reference.checked_add_millis(999).unwrap();
        let breakdown = decompose(reference, target);
        assert_eq!(breakdown.seconds, 0);
        assert_eq!(breakdown.millis, 999);
        assert_eq!(breakdown.total_millis, 999);
        assert!(!breakdown.done);
    }

    #[test]
    fn take_units_leaves_remainder() {
        let mut rest = 3 * MS_PER_HOUR + 5;
        assert_eq!(take_units(&mut rest, MS_PER_HOUR), 3);
        assert_eq!(rest, 5);
    }
}
