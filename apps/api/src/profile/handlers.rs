use axum::{extract::State, Json};
use serde::Serialize;

use crate::errors::AppError;
use crate::models::identity::Identity;
use crate::models::profile::{degree_label, ProfilePatch, UserProfile};
use crate::models::record::{field_patch, UserRecord, FIELD_PROFILE};
use crate::profile::completeness::{compute_completeness_report, CompletenessReport};
use crate::state::AppState;
use crate::store::{load_record, load_record_for_update, persist};

#[derive(Serialize)]
pub struct ProfileResponse {
    pub profile: UserProfile,
    pub degree_label: String,
    pub completeness: CompletenessReport,
    pub email: String,
    pub display_name: String,
}

impl ProfileResponse {
    fn from_record(record: UserRecord) -> Self {
        let profile = record.profile.unwrap_or_default();
        Self {
            degree_label: degree_label(&profile.degree).to_string(),
            completeness: compute_completeness_report(&profile),
            profile,
            email: record.email,
            display_name: record.display_name,
        }
    }
}

/// GET /api/v1/profile
pub async fn handle_get_profile(
    State(state): State<AppState>,
    identity: Identity,
) -> Result<Json<ProfileResponse>, AppError> {
    let record = load_record(state.store.as_ref(), &identity).await;
    Ok(Json(ProfileResponse::from_record(record)))
}

/// PATCH /api/v1/profile
pub async fn handle_update_profile(
    State(state): State<AppState>,
    identity: Identity,
    Json(patch): Json<ProfilePatch>,
) -> Result<Json<ProfileResponse>, AppError> {
    let mut record = load_record_for_update(state.store.as_ref(), &identity).await?;
    let mut profile = record.profile.take().unwrap_or_default();
    profile.apply(patch);

    persist(
        state.store.as_ref(),
        &identity.user_id,
        field_patch(FIELD_PROFILE, &profile),
    )
    .await;

    record.profile = Some(profile);
    Ok(Json(ProfileResponse::from_record(record)))
}
