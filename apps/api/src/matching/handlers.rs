use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::Utc;
use serde::Serialize;

use crate::errors::AppError;
use crate::matching::listing::{annotate, list_opportunities, ListingFilter, OpportunityView};
use crate::matching::scorer::MatchBreakdown;
use crate::models::identity::Identity;
use crate::state::AppState;
use crate::store::load_record;

#[derive(Serialize)]
pub struct OpportunityListResponse {
    pub opportunities: Vec<OpportunityView>,
    pub total: usize,
}

#[derive(Serialize)]
pub struct OpportunityDetailResponse {
    pub opportunity: OpportunityView,
    pub breakdown: MatchBreakdown,
}

/// GET /api/v1/opportunities?cohort=&q=
pub async fn handle_list_opportunities(
    State(state): State<AppState>,
    identity: Identity,
    Query(filter): Query<ListingFilter>,
) -> Result<Json<OpportunityListResponse>, AppError> {
    let record = load_record(state.store.as_ref(), &identity).await;
    let profile = record.profile.unwrap_or_default();

    let opportunities = list_opportunities(
        state.catalog.all(),
        &filter,
        &profile,
        &record.applications,
        state.scorer.as_ref(),
        Utc::now(),
    );
    Ok(Json(OpportunityListResponse {
        total: opportunities.len(),
        opportunities,
    }))
}

/// GET /api/v1/opportunities/:id
pub async fn handle_get_opportunity(
    State(state): State<AppState>,
    identity: Identity,
    Path(id): Path<String>,
) -> Result<Json<OpportunityDetailResponse>, AppError> {
    let opp = state
        .catalog
        .find(&id)
        .ok_or_else(|| AppError::NotFound(format!("opportunity {id}")))?;

    let record = load_record(state.store.as_ref(), &identity).await;
    let profile = record.profile.unwrap_or_default();

    let breakdown = state.scorer.breakdown(&profile, &opp.requirements);
    let opportunity = annotate(
        opp,
        &profile,
        &record.applications,
        state.scorer.as_ref(),
        Utc::now(),
    );
    Ok(Json(OpportunityDetailResponse {
        opportunity,
        breakdown,
    }))
}
