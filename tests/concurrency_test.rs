//! Concurrent booking of a single seat.
//!
//! Every attempt targets the same showing, row and column with a different
//! user. Exactly one must win; the rest must be told the seat is taken.

mod common;

use futures::future::join_all;
use seat_reservation::services::{CreateReservation, ReservationError};

async fn race_for_one_seat(attempts: i32) {
    let catalog = common::catalog().await;

    let tasks = (1..=attempts).map(|user_id| {
        let service = catalog.service.clone();
        let request = CreateReservation {
            user_id,
            sequence_id: catalog.sequence.id,
            seat_row: 3,
            seat_column: 5,
            place_id: catalog.place_id,
        };
        tokio::spawn(async move { service.create_reservation(request).await })
    });

    let results: Vec<_> = join_all(tasks)
        .await
        .into_iter()
        .map(|joined| joined.expect("booking task panicked"))
        .collect();

    let successes = results.iter().filter(|r| r.is_ok()).count();
    let conflicts = results
        .iter()
        .filter(|r| matches!(r, Err(ReservationError::AlreadyReserved { .. })))
        .count();

    assert_eq!(successes, 1, "exactly one booking must win");
    assert_eq!(conflicts, attempts as usize - 1);

    assert_eq!(catalog.store.seats().await.len(), 1);
    assert_eq!(catalog.store.reservations().await.len(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn one_winner_among_fifty_concurrent_bookings() {
    race_for_one_seat(50).await;
}

#[tokio::test]
async fn one_winner_on_a_single_threaded_runtime() {
    race_for_one_seat(10).await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn different_seats_do_not_block_each_other() {
    let catalog = common::catalog().await;

    let tasks = (1..=20).map(|column| {
        let service = catalog.service.clone();
        let request = CreateReservation {
            user_id: column,
            sequence_id: catalog.sequence.id,
            seat_row: 1,
            seat_column: column,
            place_id: catalog.place_id,
        };
        tokio::spawn(async move { service.create_reservation(request).await })
    });

    for joined in join_all(tasks).await {
        joined.expect("booking task panicked").expect("distinct seats must all book");
    }

    assert_eq!(catalog.store.seats().await.len(), 20);
    assert_eq!(catalog.store.reservations().await.len(), 20);
}
