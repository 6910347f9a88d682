//! Listing returns exactly the caller's reservations, whatever the mix of
//! users and seats that were booked before.

mod common;

use proptest::prelude::*;
use proptest::test_runner::TestCaseError;
use seat_reservation::services::CreateReservation;
use std::collections::HashSet;

fn bookings() -> impl Strategy<Value = Vec<(i32, i32, i32)>> {
    // (user, row, column) on a small grid so repeated seats show up
    prop::collection::vec((1..4i32, 1..4i32, 1..4i32), 0..24)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn list_matches_successful_bookings(bookings in bookings()) {
        let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap();

        runtime.block_on(async {
            let catalog = common::catalog().await;
            let mut taken = HashSet::new();
            let mut expected: Vec<(i32, i32, i32)> = Vec::new();

            for (user_id, seat_row, seat_column) in bookings {
                let result = catalog
                    .service
                    .create_reservation(CreateReservation {
                        user_id,
                        sequence_id: catalog.sequence.id,
                        seat_row,
                        seat_column,
                        place_id: catalog.place_id,
                    })
                    .await;

                // Only the first booking of a seat may succeed
                let first = taken.insert((seat_row, seat_column));
                prop_assert_eq!(result.is_ok(), first);
                if first {
                    expected.push((user_id, seat_row, seat_column));
                }
            }

            for user_id in 1..4 {
                let listed: Vec<(i32, i32, i32)> = catalog
                    .service
                    .list_reservations(user_id)
                    .await
                    .unwrap()
                    .into_iter()
                    .map(|v| (v.user_id, v.seat_row, v.seat_column))
                    .collect();
                let wanted: Vec<(i32, i32, i32)> =
                    expected.iter().copied().filter(|(u, _, _)| *u == user_id).collect();
                prop_assert_eq!(listed, wanted);
            }
            Ok::<(), TestCaseError>(())
        })?;
    }
}
