use async_trait::async_trait;
use sqlx::PgPool;

use super::StoreResult;
use crate::models::Seat;

pub(crate) const SEAT_COLUMNS: &str = "id, place_id, seat_row, seat_col, created_at, updated_at";

#[async_trait]
pub trait SeatStore: Send + Sync {
    async fn find_by_id(&self, id: i32) -> StoreResult<Option<Seat>>;

    /// Seats are keyed by row and column only; the place is not part of the lookup.
    async fn find_by_row_and_col(&self, seat_row: i32, seat_col: i32) -> StoreResult<Option<Seat>>;
}

#[derive(Clone)]
pub struct PgSeatStore {
    pool: PgPool,
}

impl PgSeatStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SeatStore for PgSeatStore {
    async fn find_by_id(&self, id: i32) -> StoreResult<Option<Seat>> {
        let seat = sqlx::query_as::<_, Seat>(&format!("SELECT {SEAT_COLUMNS} FROM seats WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(seat)
    }

    async fn find_by_row_and_col(&self, seat_row: i32, seat_col: i32) -> StoreResult<Option<Seat>> {
        let seat = sqlx::query_as::<_, Seat>(&format!(
            "SELECT {SEAT_COLUMNS} FROM seats WHERE seat_row = $1 AND seat_col = $2"
        ))
        .bind(seat_row)
        .bind(seat_col)
        .fetch_optional(&self.pool)
        .await?;
        Ok(seat)
    }
}
