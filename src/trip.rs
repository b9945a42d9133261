//! Trip records and the trait the scheduler reads them through.

use core::fmt::Write;

use crate::time::Instant;
use heapless::String;

/// Maximum destination label length in bytes.
pub const DESTINATION_CAPACITY: usize = 64;

/// An identifier for a trip.
///
/// Callers choose ids when creating trips and use them to look up breakdowns
/// in a tick snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TripId(pub u32);

impl From<u32> for TripId {
    fn from(id: u32) -> Self {
        TripId(id)
    }
}

impl From<TripId> for u32 {
    fn from(id: TripId) -> Self {
        id.0
    }
}

/// Anything the tick scheduler can count down to.
///
/// Implement this for your own trip records if you don't use [`Trip`].
pub trait Scheduled {
    /// Identity used to key breakdowns and the next-trip selection.
    fn trip_id(&self) -> TripId;

    /// Departure instant, or `None` if it is missing or could not be parsed.
    ///
    /// Trips without a departure are skipped by the scheduler.
    fn departure(&self) -> Option<Instant>;
}

/// Trip validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TripError {
    /// Destination is empty after trimming.
    EmptyDestination,

    /// Destination does not fit in [`DESTINATION_CAPACITY`] bytes.
    DestinationTooLong,

    /// Return instant is before the departure.
    ReturnBeforeDeparture,

    /// No departure field of a record holds a parsable instant.
    MissingDeparture,
}

impl core::fmt::Display for TripError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            TripError::EmptyDestination => write!(f, "destination must not be empty"),
            TripError::DestinationTooLong => {
                write!(f, "destination exceeds {} bytes", DESTINATION_CAPACITY)
            }
            TripError::ReturnBeforeDeparture => {
                write!(f, "return must not be before departure")
            }
            TripError::MissingDeparture => {
                write!(f, "record has no parsable departure")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for TripError {}

/// Loosely shaped trip record, as kept in stored or legacy data.
///
/// Every field is optional raw text; several fields are aliases for the same
/// value. [`Trip::from_record`] resolves each alias group in field order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TripRecord<'a> {
    pub id: Option<TripId>,

    // Destination label aliases.
    pub destination: Option<&'a str>,
    pub title: Option<&'a str>,
    pub name: Option<&'a str>,

    // Departure aliases.
    pub departure: Option<&'a str>,
    pub departure_date: Option<&'a str>,
    pub date: Option<&'a str>,
    pub start_date: Option<&'a str>,
    pub when: Option<&'a str>,

    // Return aliases.
    pub return_date: Option<&'a str>,
    pub return_date_value: Option<&'a str>,
    pub end_date: Option<&'a str>,
    pub arrival: Option<&'a str>,
}

impl<'a> TripRecord<'a> {
    fn labels(&self) -> [Option<&'a str>; 3] {
        [self.destination, self.title, self.name]
    }

    fn departures(&self) -> [Option<&'a str>; 5] {
        [
            self.departure,
            self.departure_date,
            self.date,
            self.start_date,
            self.when,
        ]
    }

    fn returns(&self) -> [Option<&'a str>; 4] {
        [
            self.return_date,
            self.return_date_value,
            self.end_date,
            self.arrival,
        ]
    }
}

/// First alias that parses as an instant.
fn first_instant(candidates: &[Option<&str>]) -> Option<Instant> {
    candidates
        .iter()
        .flatten()
        .find_map(|value| Instant::parse(value).ok())
}

/// A validated trip: destination, departure and optional return.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trip {
    id: TripId,
    destination: String<DESTINATION_CAPACITY>,
    departure: Instant,
    return_at: Option<Instant>,
}

impl Trip {
    /// Creates a trip, trimming the destination.
    ///
    /// # Errors
    /// * `EmptyDestination` - Destination is blank
    /// * `DestinationTooLong` - Destination exceeds [`DESTINATION_CAPACITY`]
    /// * `ReturnBeforeDeparture` - `return_at` is earlier than `departure`
    pub fn new(
        id: TripId,
        destination: &str,
        departure: Instant,
        return_at: Option<Instant>,
    ) -> Result<Self, TripError> {
        let trimmed = destination.trim();
        if trimmed.is_empty() {
            return Err(TripError::EmptyDestination);
        }

        let mut label = String::new();
        label
            .push_str(trimmed)
            .map_err(|_| TripError::DestinationTooLong)?;

        if let Some(return_at) = return_at {
            if return_at < departure {
                return Err(TripError::ReturnBeforeDeparture);
            }
        }

        Ok(Self {
            id,
            destination: label,
            departure,
            return_at,
        })
    }

    /// Normalizes a loosely shaped record at position `index` of its list.
    ///
    /// * Destination: first non-blank of `destination`, `title`, `name`,
    ///   otherwise "Trip N" with N = `index + 1`
    /// * Departure: first alias that parses with [`Instant::parse`]
    /// * Return: first return alias that parses, dropped if it is before the
    ///   departure
    /// * Id: the record's id, otherwise `index + 1`
    ///
    /// # Errors
    /// * `MissingDeparture` - No departure alias parses
    /// * `DestinationTooLong` - The chosen label exceeds [`DESTINATION_CAPACITY`]
    pub fn from_record(record: &TripRecord<'_>, index: usize) -> Result<Self, TripError> {
        let departure = first_instant(&record.departures()).ok_or(TripError::MissingDeparture)?;
        let return_at = first_instant(&record.returns()).filter(|return_at| *return_at >= departure);

        let position = index.saturating_add(1);
        let id = record
            .id
            .unwrap_or_else(|| TripId(u32::try_from(position).unwrap_or(u32::MAX)));

        let mut fallback: String<DESTINATION_CAPACITY> = String::new();
        let destination = match record
            .labels()
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|label| !label.is_empty())
        {
            Some(label) => label,
            None => {
                write!(fallback, "Trip {}", position).map_err(|_| TripError::DestinationTooLong)?;
                fallback.as_str()
            }
        };

        Self::new(id, destination, departure, return_at)
    }

    /// Returns the trip id.
    pub fn id(&self) -> TripId {
        self.id
    }

    /// Returns the trimmed destination label.
    pub fn destination(&self) -> &str {
        self.destination.as_str()
    }

    /// Returns the departure instant.
    pub fn departs_at(&self) -> Instant {
        self.departure
    }

    /// Returns the return instant, if any.
    pub fn return_at(&self) -> Option<Instant> {
        self.return_at
    }
}

impl Scheduled for Trip {
    fn trip_id(&self) -> TripId {
        self.id
    }

    fn departure(&self) -> Option<Instant> {
        Some(self.departure)
    }
}

impl<S: Scheduled> Scheduled for &S {
    fn trip_id(&self) -> TripId {
        (*self).trip_id()
    }

    fn departure(&self) -> Option<Instant> {
        (*self).departure()
    }
}
