use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;

use crate::store::RecordStore;

/// `user_records` table: one JSONB document per user id.
#[derive(Clone)]
pub struct PgRecordStore {
    pool: PgPool,
}

impl PgRecordStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordStore for PgRecordStore {
    async fn get(&self, user_id: &str) -> Result<Option<Value>> {
        sqlx::query_scalar::<_, Value>("SELECT data FROM user_records WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .with_context(|| format!("failed to read record for {user_id}"))
    }

    async fn save(&self, user_id: &str, patch: Value) -> Result<()> {
        if !patch.is_object() {
            bail!("record patch for {user_id} must be a JSON object");
        }

        // jsonb `||` replaces top-level keys present in the patch
        sqlx::query(
            r#"
            INSERT INTO user_records (user_id, data, updated_at)
            VALUES ($1, $2, now())
            ON CONFLICT (user_id) DO UPDATE
            SET data = user_records.data || EXCLUDED.data,
                updated_at = now()
            "#,
        )
        .bind(user_id)
        .bind(&patch)
        .execute(&self.pool)
        .await
        .with_context(|| format!("failed to save record for {user_id}"))?;

        Ok(())
    }

    async fn delete(&self, user_id: &str) -> Result<()> {
        sqlx::query("DELETE FROM user_records WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await
            .with_context(|| format!("failed to delete record for {user_id}"))?;
        Ok(())
    }
}
