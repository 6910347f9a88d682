use serde::{Deserialize, Serialize};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use super::{Goods, Reservation, Seat, Sequence};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SequenceSummary {
    pub id: i32,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub is_free: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<&Sequence> for SequenceSummary {
    fn from(sequence: &Sequence) -> Self {
        Self {
            id: sequence.id,
            date: sequence.date,
            time: sequence.time,
            is_free: sequence.is_free,
            created_at: sequence.created_at,
            updated_at: sequence.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoodsSummary {
    pub id: i32,
    pub title: String,
    pub goods_image_url: String,
}

impl From<&Goods> for GoodsSummary {
    fn from(goods: &Goods) -> Self {
        Self {
            id: goods.id,
            title: goods.title.clone(),
            goods_image_url: goods.goods_image_url.clone(),
        }
    }
}

/// Reservation joined with its sequence, goods and seat, as handed to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationView {
    pub id: i32,
    pub user_id: i32,
    pub sequence: SequenceSummary,
    pub goods: GoodsSummary,
    pub seat_row: i32,
    pub seat_column: i32,
    pub place_name: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl ReservationView {
    pub fn assemble(reservation: &Reservation, sequence: &Sequence, goods: &Goods, seat: &Seat) -> Self {
        Self {
            id: reservation.id,
            user_id: reservation.user_id,
            sequence: SequenceSummary::from(sequence),
            goods: GoodsSummary::from(goods),
            seat_row: seat.seat_row,
            seat_column: seat.seat_col,
            place_name: goods.place_name().map(str::to_owned),
            created_at: reservation.created_at,
            updated_at: reservation.updated_at,
        }
    }
}
