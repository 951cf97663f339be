use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status of an application.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    #[default]
    Applied,
    Interview,
    Selected,
    Rejected,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Applied => "applied",
            ApplicationStatus::Interview => "interview",
            ApplicationStatus::Selected => "selected",
            ApplicationStatus::Rejected => "rejected",
        }
    }
}

/// Catalog entry. Read-only for the lifetime of the process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Opportunity {
    pub id: String,
    pub company: String,
    pub role: String,
    /// Coarse filter tag (SDE, Cybersecurity, Analyst, ...). Not used in scoring.
    pub cohort: String,
    pub location: String,
    pub salary: String,
    pub deadline: DateTime<Utc>,
    /// Free-text requirements: skills (optionally `A/B` alternatives) and at
    /// most one CGPA threshold such as `CGPA > 8.0`.
    #[serde(default)]
    pub requirements: Vec<String>,
    /// Status shown when the user has not acted on the opportunity yet.
    #[serde(default)]
    pub status: ApplicationStatus,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub company_type: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
}
