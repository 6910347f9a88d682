use async_trait::async_trait;
use sqlx::PgPool;

use super::StoreResult;
use crate::models::Sequence;

/// Read-only access to showings; the catalog owns their lifecycle.
#[async_trait]
pub trait SequenceStore: Send + Sync {
    async fn find_by_id(&self, id: i32) -> StoreResult<Option<Sequence>>;
}

#[derive(Clone)]
pub struct PgSequenceStore {
    pool: PgPool,
}

impl PgSequenceStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SequenceStore for PgSequenceStore {
    async fn find_by_id(&self, id: i32) -> StoreResult<Option<Sequence>> {
        let sequence = sqlx::query_as::<_, Sequence>(
            "SELECT id, goods_id, date, time, is_free, created_at, updated_at
             FROM sequences
             WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(sequence)
    }
}
