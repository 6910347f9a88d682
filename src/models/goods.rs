use serde::{Deserialize, Serialize};
use chrono::NaiveDateTime;

use super::Place;

/// Sellable show. `place` is absent when the goods were never bound to a venue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goods {
    pub id: i32,
    pub title: String,
    pub goods_image_url: String,
    pub place: Option<Place>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Goods {
    pub fn place_name(&self) -> Option<&str> {
        self.place.as_ref().map(|p| p.name.as_str())
    }
}
