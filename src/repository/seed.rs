//! Catalog fixture for the in-memory backend.
//!
//! Places own their goods and goods own their showings, so the file never
//! refers to an id:
//!
//! ```json
//! {
//!   "places": [{ "name": "Opera House", "goods": [{
//!     "title": "La Traviata",
//!     "goodsImageUrl": "https://cdn.example/traviata.png",
//!     "sequences": [{ "date": "2026-11-20", "time": "19:00:00", "isFree": false }]
//!   }]}],
//!   "goods": []
//! }
//! ```
//!
//! Top-level `goods` have no place.

use std::path::Path;

use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("cannot read catalog file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid catalog file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogSeed {
    #[serde(default)]
    pub places: Vec<PlaceSeed>,
    #[serde(default)]
    pub goods: Vec<GoodsSeed>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceSeed {
    pub name: String,
    #[serde(default)]
    pub goods: Vec<GoodsSeed>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoodsSeed {
    pub title: String,
    pub goods_image_url: String,
    #[serde(default)]
    pub sequences: Vec<SequenceSeed>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SequenceSeed {
    pub date: NaiveDate,
    pub time: NaiveTime,
    #[serde(default)]
    pub is_free: bool,
}

/// Row counts loaded by [`super::MemoryStore::seed`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub places: usize,
    pub goods: usize,
    pub sequences: usize,
}

impl CatalogSeed {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SeedError> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let json = std::fs::read_to_string(path).map_err(|source| SeedError::Read {
            path: display.clone(),
            source,
        })?;
        Self::from_json(&json).map_err(|source| SeedError::Parse { path: display, source })
    }
}
