//! Proximity and badge classification of a countdown.

use crate::time::MS_PER_DAY;
use crate::trip::TripId;
use crate::types::Breakdown;

/// Trips at most this many whole days out get the [`Badge::Soon`] badge.
pub const SOON_BADGE_DAYS: u64 = 14;

/// How close a departure is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Proximity {
    /// Departed.
    Past,
    /// Within a day.
    Imminent,
    /// Within three days.
    Urgent,
    /// Within two weeks.
    Soon,
    /// Further out.
    Distant,
}

impl Proximity {
    /// Classifies the signed time until departure (negative once departed).
    pub fn from_delta(delta_ms: i64) -> Self {
        if delta_ms <= 0 {
            return Proximity::Past;
        }
        match delta_ms.unsigned_abs() {
            d if d <= MS_PER_DAY => Proximity::Imminent,
            d if d <= 3 * MS_PER_DAY => Proximity::Urgent,
            d if d <= SOON_BADGE_DAYS * MS_PER_DAY => Proximity::Soon,
            _ => Proximity::Distant,
        }
    }

    /// Stable key for styling.
    pub fn key(&self) -> &'static str {
        match self {
            Proximity::Past => "past",
            Proximity::Imminent => "imminent",
            Proximity::Urgent => "urgent",
            Proximity::Soon => "soon",
            Proximity::Distant => "distant",
        }
    }
}

/// Marker shown on a trip card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Badge {
    /// The selected next trip.
    Next,
    /// Departing within [`SOON_BADGE_DAYS`] whole days.
    Soon,
}

impl Badge {
    /// Stable key for styling.
    pub fn key(&self) -> &'static str {
        match self {
            Badge::Next => "next",
            Badge::Soon => "soon",
        }
    }
}

/// Picks the badge for a trip from its breakdown and the selected next trip.
pub fn badge_for(id: TripId, breakdown: &Breakdown, next_trip: Option<TripId>) -> Option<Badge> {
    if breakdown.done {
        None
    } else if next_trip == Some(id) {
        Some(Badge::Next)
    } else if breakdown.total_days() <= SOON_BADGE_DAYS {
        Some(Badge::Soon)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn proximity_thresholds_are_inclusive() {
        assert_eq!(Proximity::from_delta(0), Proximity::Past);
        assert_eq!(Proximity::from_delta(-5), Proximity::Past);
        assert_eq!(Proximity::from_delta(MS_PER_DAY as i64), Proximity::Imminent);
        assert_eq!(Proximity::from_delta(MS_PER_DAY as i64 + 1), Proximity::Urgent);
        assert_eq!(Proximity::from_delta(3 * MS_PER_DAY as i64), Proximity::Urgent);
        assert_eq!(Proximity::from_delta(14 * MS_PER_DAY as i64), Proximity::Soon);
        assert_eq!(Proximity::from_delta(14 * MS_PER_DAY as i64 + 1), Proximity::Distant);
    }

    #[test]
    fn next_badge_wins_over_soon() {
        let breakdown = Breakdown {
            total_millis: MS_PER_DAY,
            ..Breakdown::default()
        };
        assert_eq!(badge_for(TripId(1), &breakdown, Some(TripId(1))), Some(Badge::Next));
        assert_eq!(badge_for(TripId(2), &breakdown, Some(TripId(1))), Some(Badge::Soon));
    }

    #[test]
    fn departed_trips_get_no_badge() {
        assert_eq!(badge_for(TripId(1), &Breakdown::DONE, Some(TripId(1))), None);
    }

    #[test]
    fn soon_badge_stops_after_fourteen_whole_days() {
        let fifteen_days = Breakdown {
            total_millis: 15 * MS_PER_DAY,
            ..Breakdown::default()
        };
        assert_eq!(badge_for(TripId(1), &fifteen_days, None), None);

        let almost_fifteen = Breakdown {
            total_millis: 15 * MS_PER_DAY - 1,
            ..Breakdown::default()
        };
        assert_eq!(badge_for(TripId(1), &almost_fifteen, None), Some(Badge::Soon));
    }
}
