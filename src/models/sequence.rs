use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// A scheduled showing of some goods.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Sequence {
    pub id: i32,
    pub goods_id: i32,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub is_free: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}
