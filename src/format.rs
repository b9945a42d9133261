//! Short countdown texts for banners and trip subtitles.
//!
//! All output is written into fixed-capacity `heapless` strings.

use core::fmt::Write;

use crate::time::MS_PER_MINUTE;
use crate::types::{Breakdown, DisplayMode};
use heapless::String;

/// Capacity of texts produced by this module.
pub const TEXT_CAPACITY: usize = 48;

/// A rendered banner or subtitle.
pub type CountdownText = String<TEXT_CAPACITY>;

const DEPARTING_NOW: &str = "Departing now";

const SECONDS_PER_MINUTE: i64 = 60;
const SECONDS_PER_HOUR: i64 = 3_600;
const SECONDS_PER_DAY: i64 = 86_400;

/// Renders the next-trip banner countdown for `mode`.
///
/// * `Months` - "3 months remaining"
/// * `Days` - "12 days remaining"
/// * `HoursMinutes` - "51 h · 07 m"
/// * `Full` - the two coarsest tiers starting at the first non-zero one,
///   e.g. "2 mo · 1 wk" or "8 m · 9 s"
///
/// A finished countdown renders "Departing now".
pub fn banner_text(breakdown: &Breakdown, mode: DisplayMode) -> Result<CountdownText, core::fmt::Error> {
    let mut out = CountdownText::new();
    if breakdown.done {
        out.write_str(DEPARTING_NOW)?;
        return Ok(out);
    }

    match mode {
        DisplayMode::Months => {
            write_count(&mut out, u64::from(breakdown.months), "month")?;
            out.write_str(" remaining")?;
        }
        DisplayMode::Days => {
            write_count(&mut out, breakdown.total_days(), "day")?;
            out.write_str(" remaining")?;
        }
        DisplayMode::HoursMinutes => {
            write!(out, "{} h · {:02} m", breakdown.total_hours(), breakdown.remaining_minutes())?;
        }
        DisplayMode::Full => {
            let b = breakdown;
            if b.months > 0 {
                write!(out, "{} mo · {} wk", b.months, b.weeks)?;
            } else if b.weeks > 0 {
                write!(out, "{} wk · {} d", b.weeks, b.days)?;
            } else if b.days > 0 {
                write!(out, "{} d · {} h", b.days, b.hours)?;
            } else if b.hours > 0 {
                write!(out, "{} h · {} m", b.hours, b.minutes)?;
            } else {
                write!(out, "{} m · {} s", b.minutes, b.seconds)?;
            }
        }
    }
    Ok(out)
}

/// Renders a trip card subtitle from the signed time until departure.
///
/// Within a minute either side of departure this is "Departing now";
/// otherwise "Leaves in 3 days" or "Departed 2 hours ago".
pub fn departure_subtitle(delta_ms: i64) -> Result<CountdownText, core::fmt::Error> {
    let mut out = CountdownText::new();
    let minute = MS_PER_MINUTE as i64;

    if delta_ms <= -minute {
        out.write_str("Departed ")?;
    } else if delta_ms < minute {
        out.write_str(DEPARTING_NOW)?;
        return Ok(out);
    } else {
        out.write_str("Leaves ")?;
    }
    write_relative(&mut out, delta_ms)?;
    Ok(out)
}

/// Writes a relative time using the largest whole unit of day, hour, minute
/// or second. Seconds are rounded half up before the unit is picked.
fn write_relative<W: Write>(out: &mut W, delta_ms: i64) -> core::fmt::Result {
    let seconds = delta_ms.saturating_add(500).div_euclid(1_000);
    let (value, unit) = match seconds.unsigned_abs() {
        s if s >= SECONDS_PER_DAY as u64 => (seconds / SECONDS_PER_DAY, "day"),
        s if s >= SECONDS_PER_HOUR as u64 => (seconds / SECONDS_PER_HOUR, "hour"),
        s if s >= SECONDS_PER_MINUTE as u64 => (seconds / SECONDS_PER_MINUTE, "minute"),
        _ => (seconds, "second"),
    };

    match (unit, value) {
        ("day", 1) => out.write_str("tomorrow"),
        ("day", -1) => out.write_str("yesterday"),
        ("second", 0) => out.write_str("now"),
        (_, v) if v > 0 => {
            out.write_str("in ")?;
            write_count(out, v.unsigned_abs(), unit)
        }
        (_, v) => {
            write_count(out, v.unsigned_abs(), unit)?;
            out.write_str(" ago")
        }
    }
}

fn write_count<W: Write>(out: &mut W, value: u64, unit: &str) -> core::fmt::Result {
    let plural = if value == 1 { "" } else { "s" };
    write!(out, "{} {}{}", value, unit, plural)
}
