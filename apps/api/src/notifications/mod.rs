// Notification Synthesizer
// Derives the full notification list from catalog, profile, applications and
// checklist on every call. The read-id set is the only persisted state.

pub mod handlers;
pub mod read_state;
pub mod relative_time;
pub mod rules;
pub mod synthesizer;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationCategory {
    Urgent,
    Action,
    Insight,
    Achievement,
    Update,
}

/// A derived notification. `id` is a pure function of the condition that
/// produced it, so a stored read flag survives re-derivation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationRecord {
    pub id: String,
    pub category: NotificationCategory,
    pub title: String,
    pub description: String,
    /// Relative-time or status label ("Now", "3h ago", "Suggestion", ...).
    pub time: String,
    pub read: bool,
    /// Presentational hint for clients.
    pub icon: String,
}
