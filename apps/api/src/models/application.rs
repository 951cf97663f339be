use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::opportunity::ApplicationStatus;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Application {
    pub opportunity_id: String,
    pub status: ApplicationStatus,
    /// Set when the application is first created; never changed afterwards.
    pub applied_at: DateTime<Utc>,
}

/// Per-status totals across the user's applications.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    pub applied: usize,
    pub interview: usize,
    pub selected: usize,
    pub rejected: usize,
}

/// The user's applications keyed by opportunity id.
///
/// Ordered by id so every derivation iterates in the same order. Entries are
/// created on the first status change and afterwards only updated. There is
/// no removal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicationBook(BTreeMap<String, Application>);

impl ApplicationBook {
    /// Records `status` for an opportunity, keeping the first `applied_at`.
    pub fn set_status(
        &mut self,
        opportunity_id: &str,
        status: ApplicationStatus,
        now: DateTime<Utc>,
    ) -> &Application {
        let entry = self
            .0
            .entry(opportunity_id.to_string())
            .or_insert_with(|| Application {
                opportunity_id: opportunity_id.to_string(),
                status,
                applied_at: now,
            });
        entry.status = status;
        entry
    }

    pub fn status_of(&self, opportunity_id: &str) -> Option<ApplicationStatus> {
        self.0.get(opportunity_id).map(|a| a.status)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Application> {
        self.0.values()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn status_counts(&self) -> StatusCounts {
        let mut counts = StatusCounts::default();
        for app in self.0.values() {
            match app.status {
                ApplicationStatus::Applied => counts.applied += 1,
                ApplicationStatus::Interview => counts.interview += 1,
                ApplicationStatus::Selected => counts.selected += 1,
                ApplicationStatus::Rejected => counts.rejected += 1,
            }
        }
        counts
    }
}
