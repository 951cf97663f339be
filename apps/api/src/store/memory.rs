use std::collections::HashMap;

use anyhow::{bail, Result};
use async_trait::async_trait;
use chrono::Utc;
use serde_json::{Map, Value};
use tokio::sync::RwLock;

use crate::store::RecordStore;

/// Process-local record store. Contents are lost on restart.
#[derive(Default)]
pub struct MemoryRecordStore {
    records: RwLock<HashMap<String, Map<String, Value>>>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn get(&self, user_id: &str) -> Result<Option<Value>> {
        let records = self.records.read().await;
        Ok(records.get(user_id).cloned().map(Value::Object))
    }

    async fn save(&self, user_id: &str, patch: Value) -> Result<()> {
        let Value::Object(fields) = patch else {
            bail!("record patch for {user_id} must be a JSON object");
        };
        let mut records = self.records.write().await;
        let record = records.entry(user_id.to_string()).or_default();
        record.extend(fields);
        record.insert(
            "updated_at".to_string(),
            Value::from(Utc::now().to_rfc3339()),
        );
        Ok(())
    }

    async fn delete(&self, user_id: &str) -> Result<()> {
        self.records.write().await.remove(user_id);
        Ok(())
    }
}
