use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};

use super::reservation::RESERVATION_COLUMNS;
use super::seat::SEAT_COLUMNS;
use super::StoreResult;
use crate::models::{NewReservation, NewSeat, Reservation, Seat};

/// Opens the all-or-nothing scope in which a seat gets booked.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    async fn begin(&self) -> StoreResult<Box<dyn BookingTx>>;
}

/// Writes staged inside a [`BookingTx`] become visible only on [`BookingTx::commit`].
/// Dropping the transaction without committing discards them.
#[async_trait]
pub trait BookingTx: Send {
    async fn find_seat_by_row_and_col(&mut self, seat_row: i32, seat_col: i32) -> StoreResult<Option<Seat>>;

    /// Inserts the seat, or returns the row a concurrent writer created for the
    /// same row and column first.
    async fn insert_seat(&mut self, seat: NewSeat) -> StoreResult<Seat>;

    async fn find_reservation_by_sequence_and_seat(
        &mut self,
        sequence_id: i32,
        seat_id: i32,
    ) -> StoreResult<Option<Reservation>>;

    /// Fails with [`super::StoreError::UniqueViolation`] when the
    /// `(sequence_id, seat_id)` pair is already taken.
    async fn insert_reservation(&mut self, reservation: NewReservation) -> StoreResult<Reservation>;

    async fn commit(self: Box<Self>) -> StoreResult<()>;
}

#[derive(Clone)]
pub struct PgUnitOfWork {
    pool: PgPool,
}

impl PgUnitOfWork {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UnitOfWork for PgUnitOfWork {
    async fn begin(&self) -> StoreResult<Box<dyn BookingTx>> {
        let tx = self.pool.begin().await?;
        Ok(Box::new(PgBookingTx { tx }))
    }
}

pub struct PgBookingTx {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl BookingTx for PgBookingTx {
    async fn find_seat_by_row_and_col(&mut self, seat_row: i32, seat_col: i32) -> StoreResult<Option<Seat>> {
        let seat = sqlx::query_as::<_, Seat>(&format!(
            "SELECT {SEAT_COLUMNS} FROM seats WHERE seat_row = $1 AND seat_col = $2"
        ))
        .bind(seat_row)
        .bind(seat_col)
        .fetch_optional(&mut *self.tx)
        .await?;
        Ok(seat)
    }

    async fn insert_seat(&mut self, seat: NewSeat) -> StoreResult<Seat> {
        // Blocks until a concurrent insert of the same row/col resolves
        let inserted = sqlx::query_as::<_, Seat>(&format!(
            "INSERT INTO seats (place_id, seat_row, seat_col)
             VALUES ($1, $2, $3)
             ON CONFLICT (seat_row, seat_col) DO NOTHING
             RETURNING {SEAT_COLUMNS}"
        ))
        .bind(seat.place_id)
        .bind(seat.seat_row)
        .bind(seat.seat_col)
        .fetch_optional(&mut *self.tx)
        .await?;

        if let Some(seat) = inserted {
            return Ok(seat);
        }

        let existing = sqlx::query_as::<_, Seat>(&format!(
            "SELECT {SEAT_COLUMNS} FROM seats WHERE seat_row = $1 AND seat_col = $2"
        ))
        .bind(seat.seat_row)
        .bind(seat.seat_col)
        .fetch_one(&mut *self.tx)
        .await?;
        Ok(existing)
    }

    async fn find_reservation_by_sequence_and_seat(
        &mut self,
        sequence_id: i32,
        seat_id: i32,
    ) -> StoreResult<Option<Reservation>> {
        let reservation = sqlx::query_as::<_, Reservation>(&format!(
            "SELECT {RESERVATION_COLUMNS} FROM reservations WHERE sequence_id = $1 AND seat_id = $2"
        ))
        .bind(sequence_id)
        .bind(seat_id)
        .fetch_optional(&mut *self.tx)
        .await?;
        Ok(reservation)
    }

    async fn insert_reservation(&mut self, reservation: NewReservation) -> StoreResult<Reservation> {
        let created = sqlx::query_as::<_, Reservation>(&format!(
            "INSERT INTO reservations (user_id, sequence_id, seat_id)
             VALUES ($1, $2, $3)
             RETURNING {RESERVATION_COLUMNS}"
        ))
        .bind(reservation.user_id)
        .bind(reservation.sequence_id)
        .bind(reservation.seat_id)
        .fetch_one(&mut *self.tx)
        .await?;
        Ok(created)
    }

    async fn commit(self: Box<Self>) -> StoreResult<()> {
        self.tx.commit().await?;
        Ok(())
    }
}
