//! Opportunity listing: live match annotation, the list filters, and the
//! deadline countdown shown next to each opportunity.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::matching::scorer::{MatchBand, MatchScorer};
use crate::models::application::ApplicationBook;
use crate::models::opportunity::{ApplicationStatus, Opportunity};
use crate::models::profile::UserProfile;

/// Filter value meaning "no filter".
pub const ALL_FILTER: &str = "All";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeadlineUrgency {
    Open,
    Warning,
    Critical,
    Expired,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Countdown {
    pub text: String,
    /// Whole hours remaining, 0 once expired.
    pub hours_left: i64,
    pub urgency: DeadlineUrgency,
}

/// Countdown label and urgency for a deadline relative to `now`.
pub fn countdown(deadline: DateTime<Utc>, now: DateTime<Utc>) -> Countdown {
    let remaining = deadline - now;
    if remaining <= Duration::zero() {
        return Countdown {
            text: "Expired".to_string(),
            hours_left: 0,
            urgency: DeadlineUrgency::Expired,
        };
    }

    let hours = remaining.num_hours();
    let minutes = remaining.num_minutes() % 60;
    let text = if hours >= 24 {
        format!("{}d {}h left", hours / 24, hours % 24)
    } else {
        format!("{hours}h {minutes}m left")
    };

    let urgency = match hours {
        h if h > 12 => DeadlineUrgency::Open,
        h if h > 2 => DeadlineUrgency::Warning,
        _ => DeadlineUrgency::Critical,
    };

    Countdown {
        text,
        hours_left: hours,
        urgency,
    }
}

/// Query-string filters for the opportunity list. Each filter is off when
/// absent, blank, or `All`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListingFilter {
    /// Matches a cohort tag exactly or a substring of the role title.
    #[serde(alias = "role")]
    pub cohort: Option<String>,
    pub company_type: Option<String>,
    pub industry: Option<String>,
    /// Case-insensitive substring of company or role.
    pub q: Option<String>,
}

fn active(value: Option<&str>) -> Option<&str> {
    match value.map(str::trim) {
        None | Some("") | Some(ALL_FILTER) => None,
        Some(v) => Some(v),
    }
}

impl ListingFilter {
    pub fn accepts(&self, opp: &Opportunity) -> bool {
        let cohort_ok = active(self.cohort.as_deref())
            .map_or(true, |v| opp.cohort == v || opp.role.contains(v));
        let type_ok = active(self.company_type.as_deref())
            .map_or(true, |v| opp.company_type.as_deref() == Some(v));
        let industry_ok = active(self.industry.as_deref())
            .map_or(true, |v| opp.industry.as_deref() == Some(v));
        let query_ok = match self.q.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(q) => {
                let q = q.to_lowercase();
                opp.company.to_lowercase().contains(&q) || opp.role.to_lowercase().contains(&q)
            }
        };
        cohort_ok && type_ok && industry_ok && query_ok
    }
}

/// An opportunity annotated for one user at one instant.
#[derive(Debug, Clone, Serialize)]
pub struct OpportunityView {
    #[serde(flatten)]
    pub opportunity: Opportunity,
    pub match_score: u8,
    pub match_band: MatchBand,
    /// The user's status if they acted on it, otherwise the catalog default.
    pub application_status: ApplicationStatus,
    pub has_applied: bool,
    pub countdown: Countdown,
}

pub fn annotate(
    opp: &Opportunity,
    profile: &UserProfile,
    applications: &ApplicationBook,
    scorer: &dyn MatchScorer,
    now: DateTime<Utc>,
) -> OpportunityView {
    let match_score = scorer.score(profile, &opp.requirements);
    let user_status = applications.status_of(&opp.id);
    OpportunityView {
        opportunity: opp.clone(),
        match_score,
        match_band: MatchBand::for_score(match_score),
        application_status: user_status.unwrap_or(opp.status),
        has_applied: user_status.is_some(),
        countdown: countdown(opp.deadline, now),
    }
}

/// Filters and annotates the catalog, best match first. Equal scores keep
/// catalog order.
pub fn list_opportunities(
    catalog: &[Opportunity],
    filter: &ListingFilter,
    profile: &UserProfile,
    applications: &ApplicationBook,
    scorer: &dyn MatchScorer,
    now: DateTime<Utc>,
) -> Vec<OpportunityView> {
    let mut views: Vec<OpportunityView> = catalog
        .iter()
        .filter(|opp| filter.accepts(opp))
        .map(|opp| annotate(opp, profile, applications, scorer, now))
        .collect();
    views.sort_by(|a, b| b.match_score.cmp(&a.match_score));
    views
}

/// Opportunities whose deadline falls within the next 24 hours.
pub fn closing_soon(catalog: &[Opportunity], now: DateTime<Utc>) -> Vec<&Opportunity> {
    let horizon = now + Duration::hours(24);
    catalog
        .iter()
        .filter(|opp| opp.deadline > now && opp.deadline <= horizon)
        .collect()
}
