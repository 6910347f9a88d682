pub mod config;
pub mod database;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;
pub mod controllers;

use axum::{http::Method, routing::get, Router};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::{Config, StorageBackend};
use crate::repository::{CatalogSeed, MemoryStore, Stores};
use crate::services::ReservationService;

// Shared state for the whole application
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub reservations: ReservationService,
}

impl AppState {
    /// Connects the configured backend and wires the reservation service on top.
    pub async fn new(config: Config) -> anyhow::Result<Arc<Self>> {
        let stores = match config.storage.backend {
            StorageBackend::Postgres => {
                let db = database::Database::new(&config.database).await?;
                info!("Database connected");

                if config.database.run_migrations {
                    db.run_migrations().await?;
                }
                Stores::postgres(db.pool)
            }
            StorageBackend::Memory => {
                let catalog = CatalogSeed::from_file(&config.storage.catalog_file)?;
                let store = MemoryStore::new();
                let summary = store.seed(&catalog).await;
                info!(
                    "Using in-memory storage seeded from {} ({} places, {} goods, {} sequences), data will not survive a restart",
                    config.storage.catalog_file, summary.places, summary.goods, summary.sequences
                );
                Stores::memory(store)
            }
        };

        Ok(Self::with_stores(config, stores))
    }

    pub fn with_stores(config: Config, stores: Stores) -> Arc<Self> {
        Arc::new(Self {
            config,
            reservations: ReservationService::new(stores),
        })
    }
}

pub fn app(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    Router::new()
        .route("/", get(|| async { "Seat Reservation API v1.0" }))
        .route("/health", get(|| async { "OK" }))
        .merge(controllers::routes())
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
