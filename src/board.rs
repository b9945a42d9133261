//! Ordered, fixed-capacity trip collection.
//!
//! [`TripBoard`] is the caller-side home of the trips a ticker counts down to.
//! It keeps trips sorted by departure, owns the selected [`DisplayMode`] and
//! remembers when the rendered countdowns went stale so the next tick can be
//! forced.

use crate::command::BoardAction;
use crate::trip::{Trip, TripId, TripRecord};
use crate::types::DisplayMode;
use heapless::Vec;

/// Errors that can occur during board operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BoardError {
    /// A trip with this id is already on the board.
    DuplicateTripId(TripId),

    /// No trip with this id is on the board.
    UnknownTripId(TripId),

    /// The board is full and cannot accept more trips.
    BoardFull { capacity: usize },
}

impl core::fmt::Display for BoardError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            BoardError::DuplicateTripId(id) => {
                write!(f, "trip ID {} already exists on board", id.0)
            }
            BoardError::UnknownTripId(id) => {
                write!(f, "trip ID {} does not exist on board", id.0)
            }
            BoardError::BoardFull { capacity } => {
                write!(f, "board is full, capacity is {}", capacity)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for BoardError {}

/// Trips sorted by departure, plus the display mode they are shown in.
///
/// # Type Parameters
/// * `N` - Maximum number of trips the board can hold
#[derive(Debug, Clone)]
pub struct TripBoard<const N: usize> {
    trips: Vec<Trip, N>,
    mode: DisplayMode,
    refresh_pending: bool,
}

impl<const N: usize> TripBoard<N> {
    /// Creates an empty board in [`DisplayMode::Full`].
    ///
    /// A fresh board starts with a refresh pending so the first tick is forced.
    pub fn new() -> Self {
        Self::with_mode(DisplayMode::Full)
    }

    /// Creates an empty board in the given mode.
    pub fn with_mode(mode: DisplayMode) -> Self {
        Self {
            trips: Vec::new(),
            mode,
            refresh_pending: true,
        }
    }

    /// Dispatches an action to the matching method.
    pub fn handle_action(&mut self, action: BoardAction) -> Result<(), BoardError> {
        match action {
            BoardAction::Add(trip) => self.add_trip(trip),
            BoardAction::Update(trip) => self.update_trip(trip),
            BoardAction::Remove(id) => self.remove_trip(id).map(|_| ()),
            BoardAction::SetMode(mode) => {
                self.set_mode(mode);
                Ok(())
            }
        }
    }

    /// Adds a trip, keeping the board sorted by departure.
    ///
    /// Trips with equal departures keep their insertion order.
    ///
    /// # Errors
    /// * `DuplicateTripId` - A trip with this id already exists
    /// * `BoardFull` - The board holds `N` trips
    pub fn add_trip(&mut self, trip: Trip) -> Result<(), BoardError> {
        if self.position(trip.id()).is_some() {
            return Err(BoardError::DuplicateTripId(trip.id()));
        }
        self.insert_sorted(trip)
    }

    /// Replaces the trip with the same id and re-sorts it.
    ///
    /// # Errors
    /// `UnknownTripId` if no trip with this id exists.
    pub fn update_trip(&mut self, trip: Trip) -> Result<(), BoardError> {
        let idx = self
            .position(trip.id())
            .ok_or(BoardError::UnknownTripId(trip.id()))?;
        self.trips.remove(idx);
        self.insert_sorted(trip)
    }

    /// Imports loosely shaped records, as when migrating stored data.
    ///
    /// Records that do not normalize into a [`Trip`] are skipped. Returns the
    /// number of trips added.
    ///
    /// # Errors
    /// `DuplicateTripId` or `BoardFull` as for [`add_trip`](Self::add_trip).
    /// Trips added before the error stay on the board.
    pub fn import_records(&mut self, records: &[TripRecord<'_>]) -> Result<usize, BoardError> {
        let mut added = 0;
        for (index, record) in records.iter().enumerate() {
            let Ok(trip) = Trip::from_record(record, index) else {
                #[cfg(feature = "defmt")]
                defmt::debug!("skipping trip record {=usize}", index);
                continue;
            };
            self.add_trip(trip)?;
            added += 1;
        }
        Ok(added)
    }

    /// Removes and returns a trip.
    ///
    /// # Errors
    /// `UnknownTripId` if no trip with this id exists.
    pub fn remove_trip(&mut self, id: TripId) -> Result<Trip, BoardError> {
        let idx = self.position(id).ok_or(BoardError::UnknownTripId(id))?;
        let trip = self.trips.remove(idx);
        self.refresh_pending = true;
        Ok(trip)
    }

    /// Changes the display mode. A change marks a refresh as pending.
    pub fn set_mode(&mut self, mode: DisplayMode) {
        if self.mode != mode {
            self.mode = mode;
            self.refresh_pending = true;
        }
    }

    /// Returns the display mode.
    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    /// Returns the trips in departure order.
    pub fn trips(&self) -> &[Trip] {
        &self.trips
    }

    /// Looks up a trip by id.
    pub fn get(&self, id: TripId) -> Option<&Trip> {
        self.trips.iter().find(|trip| trip.id() == id)
    }

    /// Number of trips on the board.
    pub fn len(&self) -> usize {
        self.trips.len()
    }

    /// Returns true if the board holds no trips.
    pub fn is_empty(&self) -> bool {
        self.trips.is_empty()
    }

    /// Maximum number of trips.
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Returns true if the board changed since the last serviced tick.
    pub fn refresh_pending(&self) -> bool {
        self.refresh_pending
    }

    /// Marks the rendered countdowns as stale.
    pub fn request_refresh(&mut self) {
        self.refresh_pending = true;
    }

    /// Acknowledges a forced tick.
    pub fn clear_refresh(&mut self) {
        self.refresh_pending = false;
    }

    fn position(&self, id: TripId) -> Option<usize> {
        self.trips.iter().position(|trip| trip.id() == id)
    }

    fn insert_sorted(&mut self, trip: Trip) -> Result<(), BoardError> {
        let idx = self
            .trips
            .iter()
            .position(|existing| existing.departs_at() > trip.departs_at())
            .unwrap_or(self.trips.len());
        self.trips
            .insert(idx, trip)
            .map_err(|_| BoardError::BoardFull { capacity: N })?;
        self.refresh_pending = true;
        Ok(())
    }
}

impl<const N: usize> Default for TripBoard<N> {
    fn default() -> Self {
        Self::new()
    }
}
