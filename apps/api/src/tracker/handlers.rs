use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::AppError;
use crate::models::application::{Application, StatusCounts};
use crate::models::checklist::{ChecklistItem, ChecklistProgress};
use crate::models::identity::Identity;
use crate::models::opportunity::ApplicationStatus;
use crate::models::record::{field_patch, UserRecord, FIELD_APPLICATIONS, FIELD_CHECKLIST};
use crate::notifications::handlers::derive_notifications;
use crate::notifications::read_state::unread_count;
use crate::state::AppState;
use crate::store::{load_record, load_record_for_update, persist};
use crate::tracker::dashboard::{build_dashboard, DashboardSummary};
use crate::tracker::readiness::{readiness_report, ReadinessReport};

// ── Applications ────────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct ApplicationsResponse {
    pub applications: Vec<Application>,
    pub counts: StatusCounts,
}

#[derive(Deserialize)]
pub struct SetStatusRequest {
    pub status: ApplicationStatus,
}

/// GET /api/v1/applications
pub async fn handle_list_applications(
    State(state): State<AppState>,
    identity: Identity,
) -> Result<Json<ApplicationsResponse>, AppError> {
    let record = load_record(state.store.as_ref(), &identity).await;
    Ok(Json(ApplicationsResponse {
        applications: record.applications.iter().cloned().collect(),
        counts: record.applications.status_counts(),
    }))
}

/// PUT /api/v1/applications/:opportunity_id
pub async fn handle_set_application_status(
    State(state): State<AppState>,
    identity: Identity,
    Path(opportunity_id): Path<String>,
    Json(req): Json<SetStatusRequest>,
) -> Result<Json<Application>, AppError> {
    if state.catalog.find(&opportunity_id).is_none() {
        return Err(AppError::NotFound(format!("opportunity {opportunity_id}")));
    }

    let mut record = load_record_for_update(state.store.as_ref(), &identity).await?;
    let application = record
        .applications
        .set_status(&opportunity_id, req.status, Utc::now())
        .clone();
    debug!(
        "{} set {} to {}",
        identity.user_id,
        opportunity_id,
        req.status.as_str()
    );

    persist(
        state.store.as_ref(),
        &identity.user_id,
        field_patch(FIELD_APPLICATIONS, &record.applications),
    )
    .await;

    Ok(Json(application))
}

// ── Checklist ───────────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct ChecklistItemView {
    pub item: ChecklistItem,
    pub value: u32,
    pub max: u32,
    pub percent: u32,
    pub complete: bool,
}

#[derive(Serialize)]
pub struct ChecklistResponse {
    pub progress: ChecklistProgress,
    pub items: Vec<ChecklistItemView>,
    pub readiness: ReadinessReport,
}

impl ChecklistResponse {
    fn new(record: &UserRecord) -> Self {
        let progress = record.checklist;
        let profile = record.profile.clone().unwrap_or_default();
        let items = ChecklistItem::ALL
            .iter()
            .map(|&item| ChecklistItemView {
                item,
                value: progress.get(item),
                max: item.max(),
                percent: progress.percent(item),
                complete: progress.is_complete(item),
            })
            .collect();
        Self {
            progress,
            items,
            readiness: readiness_report(&profile, &progress),
        }
    }
}

#[derive(Deserialize)]
pub struct SetChecklistRequest {
    pub value: u32,
}

fn parse_item(raw: &str) -> Result<ChecklistItem, AppError> {
    ChecklistItem::parse(raw)
        .ok_or_else(|| AppError::Validation(format!("unknown checklist item '{raw}'")))
}

/// GET /api/v1/checklist
pub async fn handle_get_checklist(
    State(state): State<AppState>,
    identity: Identity,
) -> Result<Json<ChecklistResponse>, AppError> {
    let record = load_record(state.store.as_ref(), &identity).await;
    Ok(Json(ChecklistResponse::new(&record)))
}

/// POST /api/v1/checklist/:item/increment
///
/// At or above the item's max the counter is left unchanged and nothing is
/// written.
pub async fn handle_increment_checklist(
    State(state): State<AppState>,
    identity: Identity,
    Path(item): Path<String>,
) -> Result<Json<ChecklistResponse>, AppError> {
    let item = parse_item(&item)?;
    let mut record = load_record_for_update(state.store.as_ref(), &identity).await?;

    if record.checklist.increment(item) {
        persist(
            state.store.as_ref(),
            &identity.user_id,
            field_patch(FIELD_CHECKLIST, &record.checklist),
        )
        .await;
    }

    Ok(Json(ChecklistResponse::new(&record)))
}

/// PUT /api/v1/checklist/:item
pub async fn handle_set_checklist(
    State(state): State<AppState>,
    identity: Identity,
    Path(item): Path<String>,
    Json(req): Json<SetChecklistRequest>,
) -> Result<Json<ChecklistResponse>, AppError> {
    let item = parse_item(&item)?;
    let mut record = load_record_for_update(state.store.as_ref(), &identity).await?;
    record.checklist.set(item, req.value);

    persist(
        state.store.as_ref(),
        &identity.user_id,
        field_patch(FIELD_CHECKLIST, &record.checklist),
    )
    .await;

    Ok(Json(ChecklistResponse::new(&record)))
}

// ── Dashboard ───────────────────────────────────────────────────────────────

/// GET /api/v1/dashboard
pub async fn handle_dashboard(
    State(state): State<AppState>,
    identity: Identity,
) -> Result<Json<DashboardSummary>, AppError> {
    let now = Utc::now();
    let record = load_record(state.store.as_ref(), &identity).await;
    let unread = unread_count(&derive_notifications(&state, &record, now));

    Ok(Json(build_dashboard(
        &record,
        state.catalog.all(),
        state.scorer.as_ref(),
        unread,
        now,
    )))
}
