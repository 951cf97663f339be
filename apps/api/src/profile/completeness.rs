use serde::{Deserialize, Serialize};

use crate::models::profile::UserProfile;

/// Text fields counted towards completion. Skills and resume add one bonus
/// slot each on top of these.
const COUNTED_FIELDS: usize = 6;
const BONUS_SLOTS: usize = 2;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompletenessReport {
    pub percent: u8,
    pub missing_fields: Vec<String>,
}

fn counted_fields(profile: &UserProfile) -> [(&'static str, &str); COUNTED_FIELDS] {
    [
        ("first_name", profile.first_name.as_str()),
        ("last_name", profile.last_name.as_str()),
        ("phone", profile.phone.as_str()),
        ("college_name", profile.college_name.as_str()),
        ("degree", profile.degree.as_str()),
        ("cgpa", profile.cgpa.as_str()),
    ]
}

/// Fill ratio over the six text fields plus the skills and resume slots,
/// ignoring whether onboarding has finished.
pub fn fill_percent(profile: &UserProfile) -> u8 {
    let filled = counted_fields(profile)
        .iter()
        .filter(|(_, value)| !value.trim().is_empty())
        .count();
    let skills_bonus = usize::from(!profile.skills.is_empty());
    let resume_bonus = usize::from(profile.resume_uploaded);
    let total = COUNTED_FIELDS + BONUS_SLOTS;
    ((filled + skills_bonus + resume_bonus) as f64 / total as f64 * 100.0).round() as u8
}

/// Profile completion as shown to the user: 0 until onboarding is complete.
pub fn completion_percent(profile: &UserProfile) -> u8 {
    if !profile.onboarding_completed {
        return 0;
    }
    fill_percent(profile)
}

pub fn compute_completeness_report(profile: &UserProfile) -> CompletenessReport {
    let mut missing_fields: Vec<String> = counted_fields(profile)
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name.to_string())
        .collect();
    if profile.skills.is_empty() {
        missing_fields.push("skills".to_string());
    }
    if !profile.resume_uploaded {
        missing_fields.push("resume".to_string());
    }

    CompletenessReport {
        percent: completion_percent(profile),
        missing_fields,
    }
}
