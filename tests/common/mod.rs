#![allow(dead_code)]

use chrono::{NaiveDate, NaiveTime};
use seat_reservation::models::Sequence;
use seat_reservation::repository::{MemoryStore, Stores};
use seat_reservation::services::ReservationService;

pub struct Catalog {
    pub store: MemoryStore,
    pub service: ReservationService,
    pub place_id: i32,
    pub sequence: Sequence,
}

/// One venue, one show and one evening showing of it.
pub async fn catalog() -> Catalog {
    let store = MemoryStore::new();
    let place = store.insert_place("Opera House").await;
    let goods = store
        .insert_goods("La Traviata", "https://cdn.example/traviata.png", Some(place.id))
        .await;
    let sequence = store
        .insert_sequence(
            goods.id,
            NaiveDate::from_ymd_opt(2026, 10, 30).unwrap(),
            NaiveTime::from_hms_opt(19, 0, 0).unwrap(),
            false,
        )
        .await;

    let service = ReservationService::new(Stores::memory(store.clone()));
    Catalog { store, service, place_id: place.id, sequence }
}
