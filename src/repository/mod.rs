//! Storage capabilities consumed by the reservation service.
//!
//! Every store is an object-safe async trait so the service can run against
//! Postgres in production and against [`memory::MemoryStore`] in tests.

pub mod seat;
pub mod sequence;
pub mod goods;
pub mod reservation;
pub mod unit_of_work;
pub mod memory;
pub mod seed;

use std::sync::Arc;

use sqlx::PgPool;

pub use goods::{GoodsStore, PgGoodsStore};
pub use memory::MemoryStore;
pub use reservation::{PgReservationStore, ReservationStore};
pub use seat::{PgSeatStore, SeatStore};
pub use seed::{CatalogSeed, SeedError, SeedSummary};
pub use sequence::{PgSequenceStore, SequenceStore};
pub use unit_of_work::{BookingTx, PgUnitOfWork, UnitOfWork};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("unique constraint violated: {0}")]
    UniqueViolation(String),
    #[error("database error: {0}")]
    Database(#[source] sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                let constraint = db_err.constraint().unwrap_or("unknown").to_string();
                return StoreError::UniqueViolation(constraint);
            }
        }
        StoreError::Database(err)
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// The four stores plus the transactional entry point, bundled for injection.
#[derive(Clone)]
pub struct Stores {
    pub seats: Arc<dyn SeatStore>,
    pub sequences: Arc<dyn SequenceStore>,
    pub goods: Arc<dyn GoodsStore>,
    pub reservations: Arc<dyn ReservationStore>,
    pub unit_of_work: Arc<dyn UnitOfWork>,
}

impl Stores {
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            seats: Arc::new(PgSeatStore::new(pool.clone())),
            sequences: Arc::new(PgSequenceStore::new(pool.clone())),
            goods: Arc::new(PgGoodsStore::new(pool.clone())),
            reservations: Arc::new(PgReservationStore::new(pool.clone())),
            unit_of_work: Arc::new(PgUnitOfWork::new(pool)),
        }
    }

    pub fn memory(store: MemoryStore) -> Self {
        Self {
            seats: Arc::new(store.clone()),
            sequences: Arc::new(store.clone()),
            goods: Arc::new(store.clone()),
            reservations: Arc::new(store.clone()),
            unit_of_work: Arc::new(store),
        }
    }
}
