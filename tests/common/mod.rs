//! Shared test infrastructure for trip-countdown integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use trip_countdown::{Instant, Scheduled, TimeSource, Trip, TripId};

// ============================================================================
// Instants
// ============================================================================

/// UTC calendar instant
pub fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: u32) -> Instant {
    Instant::from_ymd_hms(year, month, day, hour, minute, second).unwrap()
}

/// Instant offset from `base` by signed milliseconds
pub fn offset(base: Instant, millis: i64) -> Instant {
    Instant::from_millis(base.as_millis() + millis).unwrap()
}

// ============================================================================
// Mock Time Source
// ============================================================================

/// Mock time source with controllable time advancement
pub struct MockTimeSource {
    current_time: core::cell::Cell<Instant>,
}

impl MockTimeSource {
    pub fn new(start: Instant) -> Self {
        Self {
            current_time: core::cell::Cell::new(start),
        }
    }

    /// Advance time by the given number of milliseconds
    pub fn advance(&self, millis: u64) {
        let current = self.current_time.get();
        self.current_time.set(current.checked_add_millis(millis).unwrap());
    }

    pub fn set_time(&self, time: Instant) {
        self.current_time.set(time);
    }
}

impl TimeSource for MockTimeSource {
    fn now(&self) -> Instant {
        self.current_time.get()
    }
}

// ============================================================================
// Trips
// ============================================================================

/// Trip record whose departure may be missing, like unvalidated stored data
#[derive(Debug, Clone, Copy)]
pub struct LooseTrip {
    pub id: u32,
    pub departure: Option<Instant>,
}

impl LooseTrip {
    pub fn new(id: u32, departure: Instant) -> Self {
        Self {
            id,
            departure: Some(departure),
        }
    }

    pub fn without_departure(id: u32) -> Self {
        Self { id, departure: None }
    }
}

impl Scheduled for LooseTrip {
    fn trip_id(&self) -> TripId {
        TripId(self.id)
    }

    fn departure(&self) -> Option<Instant> {
        self.departure
    }
}

/// Validated trip with a placeholder destination
pub fn trip(id: u32, departure: Instant) -> Trip {
    Trip::new(TripId(id), "Reykjavik", departure, None).unwrap()
}
