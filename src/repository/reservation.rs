use async_trait::async_trait;
use sqlx::PgPool;

use super::StoreResult;
use crate::models::Reservation;

pub(crate) const RESERVATION_COLUMNS: &str = "id, user_id, sequence_id, seat_id, created_at, updated_at";

#[async_trait]
pub trait ReservationStore: Send + Sync {
    async fn find_by_id(&self, id: i32) -> StoreResult<Option<Reservation>>;

    /// All reservations of a user in primary-key order.
    async fn find_all_by_user_id(&self, user_id: i32) -> StoreResult<Vec<Reservation>>;

    async fn find_by_sequence_and_seat(&self, sequence_id: i32, seat_id: i32) -> StoreResult<Option<Reservation>>;

    /// Deleting an id that does not exist is not an error.
    async fn delete_by_id(&self, id: i32) -> StoreResult<()>;
}

#[derive(Clone)]
pub struct PgReservationStore {
    pool: PgPool,
}

impl PgReservationStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReservationStore for PgReservationStore {
    async fn find_by_id(&self, id: i32) -> StoreResult<Option<Reservation>> {
        let reservation = sqlx::query_as::<_, Reservation>(&format!(
            "SELECT {RESERVATION_COLUMNS} FROM reservations WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(reservation)
    }

    async fn find_all_by_user_id(&self, user_id: i32) -> StoreResult<Vec<Reservation>> {
        let reservations = sqlx::query_as::<_, Reservation>(&format!(
            "SELECT {RESERVATION_COLUMNS} FROM reservations WHERE user_id = $1 ORDER BY id"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(reservations)
    }

    async fn find_by_sequence_and_seat(&self, sequence_id: i32, seat_id: i32) -> StoreResult<Option<Reservation>> {
        let reservation = sqlx::query_as::<_, Reservation>(&format!(
            "SELECT {RESERVATION_COLUMNS} FROM reservations WHERE sequence_id = $1 AND seat_id = $2"
        ))
        .bind(sequence_id)
        .bind(seat_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(reservation)
    }

    async fn delete_by_id(&self, id: i32) -> StoreResult<()> {
        sqlx::query("DELETE FROM reservations WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
