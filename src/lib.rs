#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`Instant`**: A validated UTC point in time with millisecond resolution
//! - **`decompose`**: Splits the time until a target into calendar months plus weeks, days, hours, minutes and seconds
//! - **`Breakdown`**: The result of `decompose`, with a `done` flag once the target is reached
//! - **`DisplayMode`**: Which tiers a countdown shows (`Full`, `Months`, `Days`, `HoursMinutes`)
//! - **`project_for_mode`**: Maps a `Breakdown` to the ordered tiers of a `DisplayMode`
//! - **`Scheduled`**: Trait to implement for your trip records (or use `Trip`)
//! - **`TripRecord`**: Loosely shaped stored data, normalized with `Trip::from_record`
//! - **`CountdownTicker`**: Recomputes every trip's breakdown at a bounded rate and picks the next trip
//! - **`TimeSource`**: Trait to implement for your wall clock
//! - **`TripBoard`**: Ordered trip collection that forces a tick after every change
//!
//! The engine never reads the clock. Only the ticker does, through its `TimeSource`.

pub mod time;
pub mod types;
pub mod decompose;
pub mod projection;
pub mod trip;
pub mod ticker;
pub mod board;
pub mod command;
pub mod status;
pub mod format;

pub use time::{Instant, InstantError, TimeSource, MS_PER_DAY, MS_PER_HOUR, MS_PER_MINUTE, MS_PER_SECOND, MS_PER_WEEK};
#[cfg(feature = "std")]
pub use time::SystemTimeSource;
pub use types::{Breakdown, CountdownTier, DisplayMode, ModeError};
pub use decompose::decompose;
pub use projection::{project_for_mode, Projection};
pub use trip::{Scheduled, Trip, TripError, TripId, TripRecord};
pub use ticker::{
    compute_snapshot, next_tick_delay, on_tick, select_next_trip, CountdownTicker, TickError,
    TickSnapshot, TickStatus, TickerConfig, DEFAULT_MIN_TICK_INTERVAL_MS,
};
pub use board::{BoardError, TripBoard};
pub use command::BoardAction;
pub use status::{badge_for, Badge, Proximity};
pub use format::{banner_text, departure_subtitle, CountdownText};
