//! Throttled tick scheduling over a collection of trips.
//!
//! Provides [`CountdownTicker`], which recomputes every trip's [`Breakdown`] at
//! a bounded rate and tracks the soonest upcoming departure. The pure building
//! blocks ([`on_tick`], [`compute_snapshot`], [`select_next_trip`]) are exposed
//! for callers that keep the previous snapshot themselves.

use crate::board::TripBoard;
use crate::decompose::decompose;
use crate::time::{Instant, TimeSource};
use crate::trip::{Scheduled, TripId};
use crate::types::Breakdown;
use heapless::Vec;

/// Default minimum spacing between two unforced ticks.
pub const DEFAULT_MIN_TICK_INTERVAL_MS: u64 = 900;

/// Run-time ticker settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickerConfig {
    min_interval_ms: u64,
}

impl TickerConfig {
    /// Creates the default configuration.
    pub const fn new() -> Self {
        Self {
            min_interval_ms: DEFAULT_MIN_TICK_INTERVAL_MS,
        }
    }

    /// Sets the minimum spacing between unforced ticks.
    ///
    /// Default is [`DEFAULT_MIN_TICK_INTERVAL_MS`].
    pub const fn min_interval_ms(mut self, millis: u64) -> Self {
        self.min_interval_ms = millis;
        self
    }

    /// Returns the minimum spacing between unforced ticks.
    pub const fn min_interval(&self) -> u64 {
        self.min_interval_ms
    }
}

impl Default for TickerConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Outcome of a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TickStatus {
    /// Breakdowns were recomputed and at least one countdown is running.
    ///
    /// Tick again after `next_tick_ms` to catch the next change of the seconds
    /// tier without being throttled.
    Updated { next_tick_ms: u64 },

    /// Breakdowns were recomputed and no countdown is running.
    ///
    /// Nothing changes until the trip collection does.
    Idle,

    /// Called too soon after the previous tick. The previous snapshot stands.
    Throttled,
}

/// Errors that can occur during a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TickError {
    /// More scheduled trips than the snapshot can hold.
    CapacityExceeded { capacity: usize },
}

impl core::fmt::Display for TickError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            TickError::CapacityExceeded { capacity } => {
                write!(f, "more scheduled trips than snapshot capacity of {}", capacity)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for TickError {}

/// Result of one active tick: a breakdown per trip plus the next trip.
///
/// # Type Parameters
/// * `N` - Maximum number of trips the snapshot can hold
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickSnapshot<const N: usize> {
    ticked_at: Instant,
    breakdowns: Vec<(TripId, Breakdown), N>,
    next_trip: Option<TripId>,
}

impl<const N: usize> TickSnapshot<N> {
    /// Instant the breakdowns were computed against.
    pub fn ticked_at(&self) -> Instant {
        self.ticked_at
    }

    /// Looks up the breakdown for a trip.
    pub fn breakdown(&self, id: TripId) -> Option<&Breakdown> {
        self.breakdowns
            .iter()
            .find(|(trip_id, _)| *trip_id == id)
            .map(|(_, breakdown)| breakdown)
    }

    /// All breakdowns, in trip collection order.
    pub fn breakdowns(&self) -> &[(TripId, Breakdown)] {
        &self.breakdowns
    }

    /// Trip with the soonest future departure, if any.
    pub fn next_trip(&self) -> Option<TripId> {
        self.next_trip
    }

    /// Returns true if any countdown has not reached its target.
    pub fn has_running(&self) -> bool {
        self.breakdowns.iter().any(|(_, breakdown)| !breakdown.done)
    }

    /// Number of trips covered.
    pub fn len(&self) -> usize {
        self.breakdowns.len()
    }

    /// Returns true if no trip was covered.
    pub fn is_empty(&self) -> bool {
        self.breakdowns.is_empty()
    }
}

/// Decomposes every scheduled trip against `now` and selects the next trip.
///
/// Trips without a departure are skipped.
///
/// # Errors
/// `CapacityExceeded` if more than `N` trips have a departure.
pub fn compute_snapshot<S: Scheduled, const N: usize>(
    now: Instant,
    trips: &[S],
) -> Result<TickSnapshot<N>, TickError> {
    let mut breakdowns = Vec::new();

    for trip in trips {
        let Some(departure) = trip.departure() else {
            continue;
        };
        breakdowns
            .push((trip.trip_id(), decompose(now, departure)))
            .map_err(|_| TickError::CapacityExceeded { capacity: N })?;
    }

    Ok(TickSnapshot {
        ticked_at: now,
        breakdowns,
        next_trip: select_next_trip(now, trips),
    })
}

/// Selects the trip with the soonest departure strictly after `now`.
///
/// Ties keep the earlier trip in collection order.
pub fn select_next_trip<S: Scheduled>(now: Instant, trips: &[S]) -> Option<TripId> {
    let mut best: Option<(Instant, TripId)> = None;

    for trip in trips {
        let Some(departure) = trip.departure() else {
            continue;
        };
        if departure <= now {
            continue;
        }
        match best {
            Some((soonest, _)) if soonest <= departure => {}
            _ => best = Some((departure, trip.trip_id())),
        }
    }

    best.map(|(_, id)| id)
}

/// Runs one tick, threading the previous snapshot through explicitly.
///
/// Returns `previous` unchanged when not forced and fewer than
/// `config.min_interval()` milliseconds have passed since it was taken.
/// Otherwise returns a fresh snapshot.
pub fn on_tick<S: Scheduled, const N: usize>(
    now: Instant,
    trips: &[S],
    previous: Option<TickSnapshot<N>>,
    force: bool,
    config: &TickerConfig,
) -> Result<TickSnapshot<N>, TickError> {
    match previous {
        Some(previous) if !is_due(now, previous.ticked_at, force, config) => Ok(previous),
        _ => compute_snapshot(now, trips),
    }
}

/// Delay until the next tick that both passes the throttle and shows a
/// seconds-tier change.
///
/// A tick at or after the first change shows it, so a change that lands
/// inside the throttle window is picked up by the first unthrottled tick.
/// Returns `None` when no countdown is running.
pub fn next_tick_delay<const N: usize>(snapshot: &TickSnapshot<N>, config: &TickerConfig) -> Option<u64> {
    snapshot
        .breakdowns
        .iter()
        .filter(|(_, breakdown)| !breakdown.done)
        // Seconds tick over once the sub-second leftover has elapsed.
        .map(|(_, breakdown)| u64::from(breakdown.millis) + 1)
        .min()
        .map(|first_change| first_change.max(config.min_interval_ms))
}

fn is_due(now: Instant, last_tick: Instant, force: bool, config: &TickerConfig) -> bool {
    if force {
        return true;
    }

    let elapsed = last_tick.signed_millis_until(now);
    if elapsed < 0 {
        #[cfg(feature = "defmt")]
        defmt::warn!("clock moved back {=i64}ms since last tick", -elapsed);
        return true;
    }

    elapsed.unsigned_abs() >= config.min_interval_ms
}

/// Recomputes trip countdowns at a bounded rate.
///
/// The ticker owns the last snapshot and reads the clock through a
/// [`TimeSource`]; the trip collection stays with the caller and is passed in
/// on every tick.
///
/// # Type Parameters
/// * `'t` - Lifetime of the time source reference
/// * `T` - Time source implementation type
/// * `N` - Maximum number of trips per snapshot
pub struct CountdownTicker<'t, T: TimeSource, const N: usize> {
    time_source: &'t T,
    config: TickerConfig,
    last: Option<TickSnapshot<N>>,
}

impl<'t, T: TimeSource, const N: usize> CountdownTicker<'t, T, N> {
    /// Creates a ticker with the default configuration.
    pub fn new(time_source: &'t T) -> Self {
        Self::with_config(time_source, TickerConfig::default())
    }

    /// Creates a ticker with a custom configuration.
    pub fn with_config(time_source: &'t T, config: TickerConfig) -> Self {
        Self {
            time_source,
            config,
            last: None,
        }
    }

    /// Ticks against the current time.
    pub fn tick<S: Scheduled>(&mut self, trips: &[S], force: bool) -> Result<TickStatus, TickError> {
        let now = self.time_source.now();
        self.tick_at(now, trips, force)
    }

    /// Ticks against an explicit instant.
    ///
    /// # Returns
    /// * `Ok(TickStatus::Updated { .. })` - Recomputed, countdowns still running
    /// * `Ok(TickStatus::Idle)` - Recomputed, nothing left to count down
    /// * `Ok(TickStatus::Throttled)` - Skipped, previous snapshot unchanged
    /// * `Err` - More scheduled trips than `N`
    pub fn tick_at<S: Scheduled>(
        &mut self,
        now: Instant,
        trips: &[S],
        force: bool,
    ) -> Result<TickStatus, TickError> {
        if let Some(last) = &self.last {
            if !is_due(now, last.ticked_at, force, &self.config) {
                #[cfg(feature = "defmt")]
                defmt::trace!("tick throttled");
                return Ok(TickStatus::Throttled);
            }
        }

        let snapshot = compute_snapshot::<S, N>(now, trips)?;

        #[cfg(feature = "defmt")]
        {
            let previous_next = self.last.as_ref().and_then(TickSnapshot::next_trip);
            if previous_next != snapshot.next_trip {
                defmt::debug!("next trip {} -> {}", previous_next, snapshot.next_trip);
            }
        }

        let status = match next_tick_delay(&snapshot, &self.config) {
            Some(next_tick_ms) => TickStatus::Updated { next_tick_ms },
            None => TickStatus::Idle,
        };
        self.last = Some(snapshot);
        Ok(status)
    }

    /// Ticks over a board's trips, forcing the tick if the board changed.
    pub fn service_board<const M: usize>(&mut self, board: &mut TripBoard<M>) -> Result<TickStatus, TickError> {
        let status = self.tick(board.trips(), board.refresh_pending())?;
        board.clear_refresh();
        Ok(status)
    }

    /// Returns the most recent snapshot, if any tick has run.
    pub fn snapshot(&self) -> Option<&TickSnapshot<N>> {
        self.last.as_ref()
    }

    /// Returns the next trip from the most recent snapshot.
    pub fn next_trip(&self) -> Option<TripId> {
        self.last.as_ref().and_then(TickSnapshot::next_trip)
    }

    /// Returns the active configuration.
    pub fn config(&self) -> TickerConfig {
        self.config
    }

    /// Drops the last snapshot so the next tick always recomputes.
    pub fn reset(&mut self) {
        self.last = None;
    }
}
