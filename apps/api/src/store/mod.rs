//! Record store: one JSON document per user, addressed by the opaque user id.
//!
//! `save` merges the given top-level fields into the stored document (last
//! write wins). Backends: `PgRecordStore` (production) and
//! `MemoryRecordStore` (no `DATABASE_URL`, tests).
//!
//! `AppState` holds an `Arc<dyn RecordStore>`.

pub mod memory;
pub mod postgres;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::errors::AppError;
use crate::models::identity::Identity;
use crate::models::profile::UserProfile;
use crate::models::record::{
    field_patch, UserRecord, FIELD_DISPLAY_NAME, FIELD_EMAIL, FIELD_PROFILE,
};

pub use memory::MemoryRecordStore;
pub use postgres::PgRecordStore;

#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn get(&self, user_id: &str) -> Result<Option<Value>>;

    /// Shallow-merges the fields of `patch` (a JSON object) into the record,
    /// creating it if needed.
    async fn save(&self, user_id: &str, patch: Value) -> Result<()>;

    // No account deletion endpoint is exposed yet.
    #[allow(dead_code)]
    async fn delete(&self, user_id: &str) -> Result<()>;
}

/// Loads the caller's record for a read-only view, never failing.
///
/// A store error yields an empty record so derivations can still run. Never
/// write back anything derived from this result: use
/// [`load_record_for_update`] for read-modify-write.
pub async fn load_record(store: &dyn RecordStore, identity: &Identity) -> UserRecord {
    match fetch_record(store, identity).await {
        Ok(record) => record,
        Err(e) => {
            warn!("Record store read failed for {}: {e:#}", identity.user_id);
            UserRecord::default()
        }
    }
}

/// Loads the caller's record before a mutation. A failed read is an error
/// here, since persisting a sub-field of an empty stand-in record would
/// overwrite the stored one.
pub async fn load_record_for_update(
    store: &dyn RecordStore,
    identity: &Identity,
) -> Result<UserRecord, AppError> {
    fetch_record(store, identity).await.map_err(|e| {
        warn!(
            "Record store read failed for {}, rejecting update: {e:#}",
            identity.user_id
        );
        AppError::StoreUnavailable("user record could not be loaded, try again".to_string())
    })
}

/// A user with no record at all gets a fresh profile seeded from the
/// identity, which is written back.
async fn fetch_record(store: &dyn RecordStore, identity: &Identity) -> Result<UserRecord> {
    let Some(value) = store.get(&identity.user_id).await? else {
        let record = new_record(identity);
        info!("Creating record for new user {}", identity.user_id);
        let mut patch = field_patch(FIELD_PROFILE, &record.profile);
        if let Value::Object(fields) = &mut patch {
            fields.insert(FIELD_EMAIL.to_string(), Value::from(record.email.clone()));
            fields.insert(
                FIELD_DISPLAY_NAME.to_string(),
                Value::from(record.display_name.clone()),
            );
        }
        persist(store, &identity.user_id, patch).await;
        return Ok(record);
    };
    Ok(UserRecord::from_value(&identity.user_id, value))
}

fn new_record(identity: &Identity) -> UserRecord {
    UserRecord {
        email: identity.email.clone().unwrap_or_default(),
        display_name: identity.display_name.clone().unwrap_or_default(),
        profile: Some(UserProfile::with_display_name(
            identity.display_name.as_deref(),
        )),
        ..Default::default()
    }
}

/// Writes a partial record. Failures are logged and swallowed: callers have
/// already updated their in-memory snapshot and respond from it.
pub async fn persist(store: &dyn RecordStore, user_id: &str, patch: Value) {
    match store.save(user_id, patch).await {
        Ok(()) => debug!("Saved record for {user_id}"),
        Err(e) => warn!("Record store write failed for {user_id}: {e:#}"),
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use serde_json::json;

    struct FailingStore;

    #[async_trait]
    impl RecordStore for FailingStore {
        async fn get(&self, _user_id: &str) -> Result<Option<Value>> {
            Err(anyhow!("connection refused"))
        }

        async fn save(&self, _user_id: &str, _patch: Value) -> Result<()> {
            Err(anyhow!("connection refused"))
        }

        async fn delete(&self, _user_id: &str) -> Result<()> {
            Err(anyhow!("connection refused"))
        }
    }

    fn identity() -> Identity {
        Identity {
            user_id: "u-42".to_string(),
            email: Some("asha@college.edu".to_string()),
            display_name: Some("Asha Rao".to_string()),
        }
    }

    #[tokio::test]
    async fn test_first_load_creates_seeded_profile() {
        let store = MemoryRecordStore::new();
        let record = load_record(&store, &identity()).await;
        let profile = record.profile.unwrap();
        assert_eq!(profile.first_name, "Asha");
        assert_eq!(profile.last_name, "Rao");
        assert_eq!(record.email, "asha@college.edu");

        let stored = store.get("u-42").await.unwrap().unwrap();
        assert_eq!(stored["profile"]["first_name"], "Asha");
        assert_eq!(stored["display_name"], "Asha Rao");
    }

    #[tokio::test]
    async fn test_existing_record_is_not_reseeded() {
        let store = MemoryRecordStore::new();
        store
            .save("u-42", json!({ "profile": { "first_name": "Custom" } }))
            .await
            .unwrap();
        let record = load_record(&store, &identity()).await;
        assert_eq!(record.profile.unwrap().first_name, "Custom");
    }

    #[tokio::test]
    async fn test_store_failure_degrades_to_default() {
        let record = load_record(&FailingStore, &identity()).await;
        assert_eq!(record, UserRecord::default());
        // write failures are swallowed
        persist(&FailingStore, "u-42", json!({ "checklist": {} })).await;
    }

    #[tokio::test]
    async fn test_failed_read_rejects_update_and_keeps_data() {
        let store = super::testing::FlakyStore::default();
        let applications = json!({
            "1": { "opportunity_id": "1", "status": "applied", "applied_at": "2026-05-01T10:00:00Z" },
            "2": { "opportunity_id": "2", "status": "interview", "applied_at": "2026-05-02T10:00:00Z" },
            "3": { "opportunity_id": "3", "status": "selected", "applied_at": "2026-05-03T10:00:00Z" }
        });
        store
            .save("u-42", json!({ "applications": applications }))
            .await
            .unwrap();

        store.fail_next_read();
        let err = load_record_for_update(&store, &identity()).await.unwrap_err();
        assert!(matches!(err, AppError::StoreUnavailable(_)));

        let record = load_record_for_update(&store, &identity()).await.unwrap();
        assert_eq!(record.applications.len(), 3);
    }

    #[tokio::test]
    async fn test_failed_read_is_not_seeded_as_new_user() {
        let store = super::testing::FlakyStore::default();
        store.fail_next_read();
        let record = load_record(&store, &identity()).await;
        assert!(record.profile.is_none());
        assert!(store.inner.get("u-42").await.unwrap().is_none());
    }
}
