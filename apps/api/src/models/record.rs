use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tracing::warn;

use crate::models::application::ApplicationBook;
use crate::models::checklist::ChecklistProgress;
use crate::models::profile::UserProfile;
use crate::notifications::read_state::ReadSet;

pub const FIELD_EMAIL: &str = "email";
pub const FIELD_DISPLAY_NAME: &str = "display_name";
pub const FIELD_PROFILE: &str = "profile";
pub const FIELD_APPLICATIONS: &str = "applications";
pub const FIELD_CHECKLIST: &str = "checklist";
pub const FIELD_READ_NOTIFICATIONS: &str = "read_notifications";

/// The single per-user document held by the record store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub email: String,
    pub display_name: String,
    /// `None` until the profile has been created on first load.
    pub profile: Option<UserProfile>,
    pub applications: ApplicationBook,
    pub checklist: ChecklistProgress,
    pub read_notifications: ReadSet,
}

impl UserRecord {
    /// Decodes a stored document field by field. A malformed field is logged
    /// and replaced by its default so the rest of the record stays usable.
    pub fn from_value(user_id: &str, value: Value) -> Self {
        let mut fields = match value {
            Value::Object(map) => map,
            other => {
                warn!("Record for {user_id} is not an object ({other}); using defaults");
                Map::new()
            }
        };

        UserRecord {
            email: take_field(user_id, &mut fields, FIELD_EMAIL).unwrap_or_default(),
            display_name: take_field(user_id, &mut fields, FIELD_DISPLAY_NAME)
                .unwrap_or_default(),
            profile: take_field(user_id, &mut fields, FIELD_PROFILE),
            applications: take_field(user_id, &mut fields, FIELD_APPLICATIONS)
                .unwrap_or_default(),
            checklist: take_field(user_id, &mut fields, FIELD_CHECKLIST).unwrap_or_default(),
            read_notifications: take_field(user_id, &mut fields, FIELD_READ_NOTIFICATIONS)
                .unwrap_or_default(),
        }
    }
}

fn take_field<T: DeserializeOwned>(
    user_id: &str,
    fields: &mut Map<String, Value>,
    key: &str,
) -> Option<T> {
    let raw = fields.remove(key)?;
    if raw.is_null() {
        return None;
    }
    match serde_json::from_value(raw) {
        Ok(v) => Some(v),
        Err(e) => {
            warn!("Ignoring malformed '{key}' in record for {user_id}: {e}");
            None
        }
    }
}

/// Builds a single-field partial record for `RecordStore::save`.
pub fn field_patch<T: Serialize>(key: &str, value: &T) -> Value {
    let mut patch = Map::new();
    patch.insert(key.to_string(), json!(value));
    Value::Object(patch)
}
