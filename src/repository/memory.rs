//! In-process backend used by the test suite and the `memory` storage mode.
//!
//! A [`BookingTx`] holds the table lock from `begin` until it is committed or
//! dropped, so bookings are serialized. Rows it inserts are kept beside the
//! locked tables and only moved into them on commit.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Utc};
use tokio::sync::{Mutex, OwnedMutexGuard};

use super::{
    BookingTx, GoodsStore, ReservationStore, SeatStore, SequenceStore, StoreError, StoreResult,
    UnitOfWork,
};
use super::seed::{CatalogSeed, SeedSummary};
use crate::models::{Goods, NewReservation, NewSeat, Place, Reservation, Seat, Sequence};

#[derive(Debug, Clone)]
struct GoodsRecord {
    id: i32,
    title: String,
    goods_image_url: String,
    place_id: Option<i32>,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

#[derive(Debug, Default)]
struct Tables {
    places: BTreeMap<i32, Place>,
    goods: BTreeMap<i32, GoodsRecord>,
    sequences: BTreeMap<i32, Sequence>,
    seats: BTreeMap<i32, Seat>,
    reservations: BTreeMap<i32, Reservation>,
    last_place_id: i32,
    last_goods_id: i32,
    last_sequence_id: i32,
    last_seat_id: i32,
    last_reservation_id: i32,
}

fn now() -> NaiveDateTime {
    Utc::now().naive_utc()
}

impl Tables {
    fn goods_with_place(&self, record: &GoodsRecord) -> Goods {
        Goods {
            id: record.id,
            title: record.title.clone(),
            goods_image_url: record.goods_image_url.clone(),
            place: record.place_id.and_then(|id| self.places.get(&id).cloned()),
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }

    fn seat_by_row_and_col(&self, seat_row: i32, seat_col: i32) -> Option<Seat> {
        self.seats
            .values()
            .find(|s| s.seat_row == seat_row && s.seat_col == seat_col)
            .cloned()
    }

    fn reservation_by_sequence_and_seat(&self, sequence_id: i32, seat_id: i32) -> Option<Reservation> {
        self.reservations
            .values()
            .find(|r| r.sequence_id == sequence_id && r.seat_id == seat_id)
            .cloned()
    }
}

/// Shared handle; clones see the same tables.
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    // Catalog fixtures. The catalog is owned elsewhere in production, so these
    // bypass the store traits.

    pub async fn insert_place(&self, name: &str) -> Place {
        let mut tables = self.tables.lock().await;
        tables.last_place_id += 1;
        let ts = now();
        let place = Place {
            id: tables.last_place_id,
            name: name.to_string(),
            created_at: ts,
            updated_at: ts,
        };
        tables.places.insert(place.id, place.clone());
        place
    }

    pub async fn insert_goods(&self, title: &str, goods_image_url: &str, place_id: Option<i32>) -> Goods {
        let mut tables = self.tables.lock().await;
        tables.last_goods_id += 1;
        let ts = now();
        let record = GoodsRecord {
            id: tables.last_goods_id,
            title: title.to_string(),
            goods_image_url: goods_image_url.to_string(),
            place_id,
            created_at: ts,
            updated_at: ts,
        };
        tables.goods.insert(record.id, record.clone());
        tables.goods_with_place(&record)
    }

    pub async fn insert_sequence(&self, goods_id: i32, date: NaiveDate, time: NaiveTime, is_free: bool) -> Sequence {
        let mut tables = self.tables.lock().await;
        tables.last_sequence_id += 1;
        let ts = now();
        let sequence = Sequence {
            id: tables.last_sequence_id,
            goods_id,
            date,
            time,
            is_free,
            created_at: ts,
            updated_at: ts,
        };
        tables.sequences.insert(sequence.id, sequence.clone());
        sequence
    }

    /// Loads a catalog fixture, assigning ids in file order.
    pub async fn seed(&self, catalog: &CatalogSeed) -> SeedSummary {
        let mut summary = SeedSummary::default();
        let placed = catalog.places.iter().map(|p| (Some(p), &p.goods));
        let unplaced = std::iter::once((None, &catalog.goods));

        for (place, goods) in placed.chain(unplaced) {
            let place_id = match place {
                Some(place) => {
                    summary.places += 1;
                    Some(self.insert_place(&place.name).await.id)
                }
                None => None,
            };
            for item in goods {
                let created = self.insert_goods(&item.title, &item.goods_image_url, place_id).await;
                summary.goods += 1;
                for sequence in &item.sequences {
                    self.insert_sequence(created.id, sequence.date, sequence.time, sequence.is_free)
                        .await;
                    summary.sequences += 1;
                }
            }
        }
        summary
    }

    pub async fn seats(&self) -> Vec<Seat> {
        self.tables.lock().await.seats.values().cloned().collect()
    }

    pub async fn reservations(&self) -> Vec<Reservation> {
        self.tables.lock().await.reservations.values().cloned().collect()
    }

    #[cfg(test)]
    pub(crate) async fn remove_seat(&self, id: i32) {
        self.tables.lock().await.seats.remove(&id);
    }
}

#[async_trait]
impl SeatStore for MemoryStore {
    async fn find_by_id(&self, id: i32) -> StoreResult<Option<Seat>> {
        Ok(self.tables.lock().await.seats.get(&id).cloned())
    }

    async fn find_by_row_and_col(&self, seat_row: i32, seat_col: i32) -> StoreResult<Option<Seat>> {
        Ok(self.tables.lock().await.seat_by_row_and_col(seat_row, seat_col))
    }
}

#[async_trait]
impl SequenceStore for MemoryStore {
    async fn find_by_id(&self, id: i32) -> StoreResult<Option<Sequence>> {
        Ok(self.tables.lock().await.sequences.get(&id).cloned())
    }
}

#[async_trait]
impl GoodsStore for MemoryStore {
    async fn find_by_id(&self, id: i32) -> StoreResult<Option<Goods>> {
        let tables = self.tables.lock().await;
        Ok(tables.goods.get(&id).map(|record| tables.goods_with_place(record)))
    }
}

#[async_trait]
impl ReservationStore for MemoryStore {
    async fn find_by_id(&self, id: i32) -> StoreResult<Option<Reservation>> {
        Ok(self.tables.lock().await.reservations.get(&id).cloned())
    }

    async fn find_all_by_user_id(&self, user_id: i32) -> StoreResult<Vec<Reservation>> {
        let tables = self.tables.lock().await;
        Ok(tables
            .reservations
            .values()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn find_by_sequence_and_seat(&self, sequence_id: i32, seat_id: i32) -> StoreResult<Option<Reservation>> {
        Ok(self
            .tables
            .lock()
            .await
            .reservation_by_sequence_and_seat(sequence_id, seat_id))
    }

    async fn delete_by_id(&self, id: i32) -> StoreResult<()> {
        self.tables.lock().await.reservations.remove(&id);
        Ok(())
    }
}

#[async_trait]
impl UnitOfWork for MemoryStore {
    async fn begin(&self) -> StoreResult<Box<dyn BookingTx>> {
        let guard = Arc::clone(&self.tables).lock_owned().await;
        Ok(Box::new(MemoryBookingTx {
            guard,
            seats: Vec::new(),
            reservations: Vec::new(),
        }))
    }
}

pub struct MemoryBookingTx {
    guard: OwnedMutexGuard<Tables>,
    // Uncommitted inserts, in id order
    seats: Vec<Seat>,
    reservations: Vec<Reservation>,
}

impl MemoryBookingTx {
    fn staged_seat(&self, seat_row: i32, seat_col: i32) -> Option<Seat> {
        self.guard.seat_by_row_and_col(seat_row, seat_col).or_else(|| {
            self.seats
                .iter()
                .find(|s| s.seat_row == seat_row && s.seat_col == seat_col)
                .cloned()
        })
    }

    fn staged_reservation(&self, sequence_id: i32, seat_id: i32) -> Option<Reservation> {
        self.guard
            .reservation_by_sequence_and_seat(sequence_id, seat_id)
            .or_else(|| {
                self.reservations
                    .iter()
                    .find(|r| r.sequence_id == sequence_id && r.seat_id == seat_id)
                    .cloned()
            })
    }
}

#[async_trait]
impl BookingTx for MemoryBookingTx {
    async fn find_seat_by_row_and_col(&mut self, seat_row: i32, seat_col: i32) -> StoreResult<Option<Seat>> {
        Ok(self.staged_seat(seat_row, seat_col))
    }

    async fn insert_seat(&mut self, seat: NewSeat) -> StoreResult<Seat> {
        // The lock rules out a concurrent writer, so an existing row is a caller bug
        if self.staged_seat(seat.seat_row, seat.seat_col).is_some() {
            return Err(StoreError::UniqueViolation("seats_seat_row_seat_col_key".to_string()));
        }
        let ts = now();
        let created = Seat {
            id: self.guard.last_seat_id + self.seats.len() as i32 + 1,
            place_id: seat.place_id,
            seat_row: seat.seat_row,
            seat_col: seat.seat_col,
            created_at: ts,
            updated_at: ts,
        };
        self.seats.push(created.clone());
        Ok(created)
    }

    async fn find_reservation_by_sequence_and_seat(
        &mut self,
        sequence_id: i32,
        seat_id: i32,
    ) -> StoreResult<Option<Reservation>> {
        Ok(self.staged_reservation(sequence_id, seat_id))
    }

    async fn insert_reservation(&mut self, reservation: NewReservation) -> StoreResult<Reservation> {
        if self
            .staged_reservation(reservation.sequence_id, reservation.seat_id)
            .is_some()
        {
            return Err(StoreError::UniqueViolation(
                "reservations_sequence_id_seat_id_key".to_string(),
            ));
        }
        let ts = now();
        let created = Reservation {
            id: self.guard.last_reservation_id + self.reservations.len() as i32 + 1,
            user_id: reservation.user_id,
            sequence_id: reservation.sequence_id,
            seat_id: reservation.seat_id,
            created_at: ts,
            updated_at: ts,
        };
        self.reservations.push(created.clone());
        Ok(created)
    }

    async fn commit(self: Box<Self>) -> StoreResult<()> {
        let MemoryBookingTx { mut guard, seats, reservations } = *self;
        for seat in seats {
            guard.last_seat_id = seat.id;
            guard.seats.insert(seat.id, seat);
        }
        for reservation in reservations {
            guard.last_reservation_id = reservation.id;
            guard.reservations.insert(reservation.id, reservation);
        }
        Ok(())
    }
}
