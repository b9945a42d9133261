//! Integration tests for the trip board and its actions

mod common;
use common::*;

use trip_countdown::{
    BoardAction, BoardError, DisplayMode, Instant, Trip, TripBoard, TripError, TripId, TripRecord,
    MS_PER_DAY,
};

fn departures<const N: usize>(board: &TripBoard<N>) -> heapless::Vec<u32, N> {
    board.trips().iter().map(|trip| trip.id().0).collect()
}

#[test]
fn actions_dispatch_to_board_operations() {
    let base = at(2024, 9, 1, 7, 45, 0);
    let mut board = TripBoard::<4>::new();

    board.handle_action(BoardAction::Add(trip(1, offset(base, 2 * MS_PER_DAY as i64)))).unwrap();
    board.handle_action(BoardAction::Add(trip(2, base))).unwrap();
    assert_eq!(departures(&board).as_slice(), &[2, 1]);

    board.handle_action(BoardAction::Update(trip(2, offset(base, 3 * MS_PER_DAY as i64)))).unwrap();
    assert_eq!(departures(&board).as_slice(), &[1, 2]);

    board.handle_action(BoardAction::Remove(TripId(1))).unwrap();
    assert_eq!(departures(&board).as_slice(), &[2]);

    board.handle_action(BoardAction::SetMode(DisplayMode::HoursMinutes)).unwrap();
    assert_eq!(board.mode(), DisplayMode::HoursMinutes);
}

#[test]
fn unknown_ids_are_rejected() {
    let mut board = TripBoard::<2>::new();
    assert_eq!(
        board.handle_action(BoardAction::Remove(TripId(4))),
        Err(BoardError::UnknownTripId(TripId(4)))
    );
    assert_eq!(
        board.handle_action(BoardAction::Update(trip(4, Instant::UNIX_EPOCH))),
        Err(BoardError::UnknownTripId(TripId(4)))
    );
}

#[test]
fn every_change_marks_refresh_pending() {
    let base = at(2024, 9, 1, 7, 45, 0);
    let mut board = TripBoard::<4>::with_mode(DisplayMode::Days);
    assert!(board.refresh_pending());
    board.clear_refresh();

    board.add_trip(trip(1, base)).unwrap();
    assert!(board.refresh_pending());
    board.clear_refresh();

    board.update_trip(trip(1, offset(base, 60_000))).unwrap();
    assert!(board.refresh_pending());
    board.clear_refresh();

    let removed = board.remove_trip(TripId(1)).unwrap();
    assert_eq!(removed.departs_at(), offset(base, 60_000));
    assert!(board.refresh_pending());
    board.clear_refresh();

    board.request_refresh();
    assert!(board.refresh_pending());
}

#[test]
fn failed_add_leaves_board_unchanged() {
    let base = at(2024, 9, 1, 7, 45, 0);
    let mut board = TripBoard::<2>::new();
    board.add_trip(trip(1, base)).unwrap();
    board.add_trip(trip(2, base)).unwrap();
    board.clear_refresh();

    assert_eq!(board.add_trip(trip(3, base)), Err(BoardError::BoardFull { capacity: 2 }));
    assert_eq!(board.add_trip(trip(2, base)), Err(BoardError::DuplicateTripId(TripId(2))));
    assert_eq!(board.len(), 2);
    assert_eq!(board.capacity(), 2);
    assert!(!board.refresh_pending());
}

#[test]
fn trip_lookup_and_validation() {
    let departure = at(2024, 9, 1, 7, 45, 0);
    let mut board = TripBoard::<2>::default();
    let lisbon = Trip::new(TripId(5), "  Lisbon ", departure, Some(offset(departure, MS_PER_DAY as i64)))
        .unwrap();
    board.add_trip(lisbon).unwrap();

    let stored = board.get(TripId(5)).unwrap();
    assert_eq!(stored.destination(), "Lisbon");
    assert_eq!(stored.return_at(), Some(offset(departure, MS_PER_DAY as i64)));
    assert!(board.get(TripId(6)).is_none());

    assert_eq!(
        Trip::new(TripId(6), "   ", departure, None),
        Err(TripError::EmptyDestination)
    );
    assert_eq!(
        Trip::new(TripId(6), "Oslo", departure, Some(offset(departure, -1))),
        Err(TripError::ReturnBeforeDeparture)
    );
}

#[test]
fn display_mode_keys_parse() {
    assert_eq!("hm".parse::<DisplayMode>(), Ok(DisplayMode::HoursMinutes));
    assert_eq!("days".parse::<DisplayMode>(), Ok(DisplayMode::Days));
    assert!("fortnights".parse::<DisplayMode>().is_err());
    assert_eq!(DisplayMode::default(), DisplayMode::Full);
}

#[test]
fn legacy_records_migrate_onto_board() {
    let records = [
        TripRecord {
            id: Some(TripId(10)),
            name: Some("Cusco"),
            start_date: Some("2025-01-05T06:15:00Z"),
            end_date: Some("2025-01-19"),
            ..TripRecord::default()
        },
        TripRecord {
            title: Some("Broken"),
            departure: Some("whenever"),
            ..TripRecord::default()
        },
        TripRecord {
            destination: Some(""),
            departure_date: Some("1735689600000"),
            arrival: Some("2024-12-01"),
            ..TripRecord::default()
        },
    ];

    let mut board = TripBoard::<4>::new();
    assert_eq!(board.import_records(&records), Ok(2));

    let unnamed = board.get(TripId(3)).unwrap();
    assert_eq!(unnamed.destination(), "Trip 3");
    assert_eq!(unnamed.departs_at(), at(2025, 1, 1, 0, 0, 0));
    assert_eq!(unnamed.return_at(), None);

    let cusco = board.get(TripId(10)).unwrap();
    assert_eq!(cusco.destination(), "Cusco");
    assert_eq!(cusco.departs_at(), at(2025, 1, 5, 6, 15, 0));
    assert_eq!(cusco.return_at(), Some(at(2025, 1, 19, 0, 0, 0)));

    assert_eq!(departures(&board).as_slice(), &[3, 10]);
}

#[test]
fn record_import_stops_at_board_errors() {
    let records = [
        TripRecord {
            departure: Some("2025-01-01"),
            ..TripRecord::default()
        },
        TripRecord {
            id: Some(TripId(1)),
            departure: Some("2025-02-01"),
            ..TripRecord::default()
        },
    ];

    let mut board = TripBoard::<4>::new();
    assert_eq!(
        board.import_records(&records),
        Err(BoardError::DuplicateTripId(TripId(1)))
    );
    assert_eq!(board.len(), 1);
}
