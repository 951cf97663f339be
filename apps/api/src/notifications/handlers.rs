//! Axum route handlers for the Notifications API.

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use crate::errors::AppError;
use crate::models::identity::Identity;
use crate::models::record::{field_patch, UserRecord, FIELD_READ_NOTIFICATIONS};
use crate::notifications::read_state::unread_count;
use crate::notifications::rules::SynthesisInput;
use crate::notifications::synthesizer::synthesize;
use crate::notifications::NotificationRecord;
use crate::state::AppState;
use crate::store::{load_record, load_record_for_update, persist};

#[derive(Debug, Serialize)]
pub struct NotificationsResponse {
    pub notifications: Vec<NotificationRecord>,
    pub unread_count: usize,
}

impl NotificationsResponse {
    fn new(notifications: Vec<NotificationRecord>) -> Self {
        let unread_count = unread_count(&notifications);
        Self {
            notifications,
            unread_count,
        }
    }
}

/// Derives the caller's notifications from their current record snapshot.
pub fn derive_notifications(
    state: &AppState,
    record: &UserRecord,
    now: DateTime<Utc>,
) -> Vec<NotificationRecord> {
    let input = SynthesisInput {
        now,
        opportunities: state.catalog.all(),
        profile: record.profile.as_ref(),
        applications: &record.applications,
        checklist: &record.checklist,
    };
    let notifications = synthesize(&input, &record.read_notifications);
    debug!("Derived {} notifications", notifications.len());
    notifications
}

/// GET /api/v1/notifications
pub async fn handle_list_notifications(
    State(state): State<AppState>,
    identity: Identity,
) -> Result<Json<NotificationsResponse>, AppError> {
    let record = load_record(state.store.as_ref(), &identity).await;
    let notifications = derive_notifications(&state, &record, Utc::now());
    Ok(Json(NotificationsResponse::new(notifications)))
}

/// POST /api/v1/notifications/:id/read
pub async fn handle_mark_read(
    State(state): State<AppState>,
    identity: Identity,
    Path(id): Path<String>,
) -> Result<Json<NotificationsResponse>, AppError> {
    if id.trim().is_empty() {
        return Err(AppError::Validation("notification id cannot be empty".to_string()));
    }

    let mut record = load_record_for_update(state.store.as_ref(), &identity).await?;
    if record.read_notifications.mark_read(&id) {
        persist(
            state.store.as_ref(),
            &identity.user_id,
            field_patch(FIELD_READ_NOTIFICATIONS, &record.read_notifications),
        )
        .await;
    }

    let notifications = derive_notifications(&state, &record, Utc::now());
    Ok(Json(NotificationsResponse::new(notifications)))
}

/// POST /api/v1/notifications/read-all
///
/// Replaces the read set with every id emitted right now.
pub async fn handle_mark_all_read(
    State(state): State<AppState>,
    identity: Identity,
) -> Result<Json<NotificationsResponse>, AppError> {
    let now = Utc::now();
    let mut record = load_record_for_update(state.store.as_ref(), &identity).await?;
    let current = derive_notifications(&state, &record, now);
    if record.read_notifications.mark_all_read(&current) {
        persist(
            state.store.as_ref(),
            &identity.user_id,
            field_patch(FIELD_READ_NOTIFICATIONS, &record.read_notifications),
        )
        .await;
    }

    let notifications = derive_notifications(&state, &record, now);
    Ok(Json(NotificationsResponse::new(notifications)))
}
