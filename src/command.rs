//! Command-based control for trip boards.

use crate::trip::{Trip, TripId};
use crate::types::DisplayMode;

/// Actions for changing a [`TripBoard`](crate::board::TripBoard).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardAction {
    /// Add trip.
    Add(Trip),
    /// Replace trip with the same id.
    Update(Trip),
    /// Remove trip.
    Remove(TripId),
    /// Switch display mode.
    SetMode(DisplayMode),
}
