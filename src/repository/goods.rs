use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::{FromRow, PgPool};

use super::StoreResult;
use crate::models::{Goods, Place};

#[async_trait]
pub trait GoodsStore: Send + Sync {
    /// Goods together with their venue, if they have one.
    async fn find_by_id(&self, id: i32) -> StoreResult<Option<Goods>>;
}

#[derive(Clone)]
pub struct PgGoodsStore {
    pool: PgPool,
}

impl PgGoodsStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Flat LEFT JOIN row; the place columns are all NULL when goods have no venue
#[derive(FromRow)]
struct GoodsRow {
    id: i32,
    title: String,
    goods_image_url: String,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
    place_id: Option<i32>,
    place_name: Option<String>,
    place_created_at: Option<NaiveDateTime>,
    place_updated_at: Option<NaiveDateTime>,
}

impl From<GoodsRow> for Goods {
    fn from(row: GoodsRow) -> Self {
        let place = match (row.place_id, row.place_name, row.place_created_at, row.place_updated_at) {
            (Some(id), Some(name), Some(created_at), Some(updated_at)) => Some(Place {
                id,
                name,
                created_at,
                updated_at,
            }),
            _ => None,
        };

        Goods {
            id: row.id,
            title: row.title,
            goods_image_url: row.goods_image_url,
            place,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl GoodsStore for PgGoodsStore {
    async fn find_by_id(&self, id: i32) -> StoreResult<Option<Goods>> {
        let row = sqlx::query_as::<_, GoodsRow>(
            r#"
            SELECT g.id, g.title, g.goods_image_url, g.created_at, g.updated_at,
                   p.id AS place_id,
                   p.name AS place_name,
                   p.created_at AS place_created_at,
                   p.updated_at AS place_updated_at
            FROM goods g
            LEFT JOIN places p ON p.id = g.place_id
            WHERE g.id = $1
            "#
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Goods::from))
    }
}
