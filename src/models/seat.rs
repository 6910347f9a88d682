use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use chrono::NaiveDateTime;

#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Seat {
    pub id: i32,
    pub place_id: i32,
    pub seat_row: i32,
    pub seat_col: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

// Seat row that has not been persisted yet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewSeat {
    pub place_id: i32,
    pub seat_row: i32,
    pub seat_col: i32,
}
