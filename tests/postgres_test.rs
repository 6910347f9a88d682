//! Runs against a live Postgres. Start one, export `DATABASE_URL`, then
//! `cargo test --test postgres_test -- --ignored`.

use chrono::Utc;
use futures::future::join_all;

use seat_reservation::config::Config;
use seat_reservation::database::Database;
use seat_reservation::models::{NewReservation, NewSeat};
use seat_reservation::repository::{StoreError, Stores};
use seat_reservation::services::{CreateReservation, ReservationError, ReservationService};

async fn stores() -> Stores {
    let mut config = Config::from_defaults().unwrap();
    config.database.url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let db = Database::new(&config.database).await.unwrap();
    db.run_migrations().await.unwrap();
    Stores::postgres(db.pool)
}

// Seats are global by (row, col), so every run books a fresh one.
fn fresh_row() -> i32 {
    1_000 + (Utc::now().timestamp_micros() % 1_000_000_000) as i32
}

#[tokio::test]
#[ignore]
async fn concurrent_seat_insert_converges_on_one_row() {
    let stores = stores().await;
    let row = fresh_row();
    let new_seat = NewSeat { place_id: 1, seat_row: row, seat_col: 1 };

    let mut first = stores.unit_of_work.begin().await.unwrap();
    let created = first.insert_seat(new_seat).await.unwrap();
    first.commit().await.unwrap();

    let mut second = stores.unit_of_work.begin().await.unwrap();
    let existing = second.insert_seat(NewSeat { place_id: 2, ..new_seat }).await.unwrap();
    second.commit().await.unwrap();

    assert_eq!(existing.id, created.id);
    assert_eq!(existing.place_id, 1);
}

#[tokio::test]
#[ignore]
async fn duplicate_reservation_insert_is_a_unique_violation() {
    let stores = stores().await;
    let row = fresh_row();

    let mut tx = stores.unit_of_work.begin().await.unwrap();
    let seat = tx.insert_seat(NewSeat { place_id: 1, seat_row: row, seat_col: 2 }).await.unwrap();
    let booking = NewReservation { user_id: 1, sequence_id: 1, seat_id: seat.id };
    tx.insert_reservation(booking).await.unwrap();
    tx.commit().await.unwrap();

    let mut tx = stores.unit_of_work.begin().await.unwrap();
    let err = tx
        .insert_reservation(NewReservation { user_id: 2, ..booking })
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::UniqueViolation(ref c) if c == "reservations_sequence_id_seat_id_key"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
#[ignore]
async fn concurrent_bookings_of_one_seat_yield_one_winner() {
    let service = ReservationService::new(stores().await);
    let request = CreateReservation {
        user_id: 1,
        sequence_id: 1,
        seat_row: fresh_row(),
        seat_column: 3,
        place_id: 1,
    };

    let results = join_all((0..16).map(|user_id| {
        let service = service.clone();
        tokio::spawn(async move {
            service
                .create_reservation(CreateReservation { user_id, ..request })
                .await
        })
    }))
    .await;

    let mut wins = 0;
    let mut conflicts = 0;
    for result in results {
        match result.unwrap() {
            Ok(()) => wins += 1,
            Err(ReservationError::AlreadyReserved { .. }) => conflicts += 1,
            Err(other) => panic!("unexpected error: {other}"),
        }
    }
    assert_eq!(wins, 1);
    assert_eq!(conflicts, 15);
}
