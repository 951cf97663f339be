//! Dashboard summary: application stats, deadlines in the next day, profile
//! completion and the unread notification count.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::matching::listing::{annotate, closing_soon, OpportunityView};
use crate::matching::scorer::MatchScorer;
use crate::models::application::StatusCounts;
use crate::models::opportunity::Opportunity;
use crate::models::record::UserRecord;
use crate::profile::completeness::completion_percent;

#[derive(Debug, Serialize)]
pub struct DashboardSummary {
    pub stats: StatusCounts,
    pub total_applications: usize,
    pub closing_soon: Vec<OpportunityView>,
    pub profile_completion: u8,
    pub unread_notifications: usize,
}

pub fn build_dashboard(
    record: &UserRecord,
    catalog: &[Opportunity],
    scorer: &dyn MatchScorer,
    unread_notifications: usize,
    now: DateTime<Utc>,
) -> DashboardSummary {
    let profile = record.profile.clone().unwrap_or_default();

    let mut closing: Vec<OpportunityView> = closing_soon(catalog, now)
        .into_iter()
        .map(|opp| annotate(opp, &profile, &record.applications, scorer, now))
        .collect();
    closing.sort_by_key(|view| view.opportunity.deadline);

    DashboardSummary {
        stats: record.applications.status_counts(),
        total_applications: record.applications.len(),
        closing_soon: closing,
        profile_completion: completion_percent(&profile),
        unread_notifications,
    }
}
