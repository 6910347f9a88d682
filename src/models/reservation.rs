use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use chrono::NaiveDateTime;

#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Reservation {
    pub id: i32,
    pub user_id: i32,
    pub sequence_id: i32,
    pub seat_id: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewReservation {
    pub user_id: i32,
    pub sequence_id: i32,
    pub seat_id: i32,
}
