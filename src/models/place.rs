use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use chrono::NaiveDateTime;

/// Venue that goods are staged at and seats belong to.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Place {
    pub id: i32,
    pub name: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}
