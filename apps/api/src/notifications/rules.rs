//! Notification rules. Each rule is a pure function of the synthesis input and
//! yields zero or more drafts; `Rule::ORDERED` fixes presentation order.

use chrono::{DateTime, Duration, Utc};

use crate::matching::requirements::{matched_count, partition};
use crate::models::application::ApplicationBook;
use crate::models::checklist::ChecklistProgress;
use crate::models::opportunity::{ApplicationStatus, Opportunity};
use crate::models::profile::UserProfile;
use crate::notifications::relative_time::time_ago;
use crate::notifications::NotificationCategory;
use crate::profile::completeness::fill_percent;

pub const URGENT_WINDOW_HOURS: f64 = 6.0;
pub const SOON_WINDOW_HOURS: f64 = 24.0;
pub const SKILL_TARGET: usize = 5;
pub const BEST_MATCH_MIN_PERCENT: u32 = 50;
pub const DSA_MILESTONE: u32 = 50;

/// Snapshot of every input source for one synthesis call.
#[derive(Debug, Clone, Copy)]
pub struct SynthesisInput<'a> {
    pub now: DateTime<Utc>,
    pub opportunities: &'a [Opportunity],
    /// `None` when no profile could be loaded; treated as not onboarded.
    pub profile: Option<&'a UserProfile>,
    pub applications: &'a ApplicationBook,
    pub checklist: &'a ChecklistProgress,
}

impl<'a> SynthesisInput<'a> {
    fn onboarded_profile(&self) -> Option<&'a UserProfile> {
        self.profile.filter(|p| p.onboarding_completed)
    }

    fn skill_count(&self) -> usize {
        self.profile.map(|p| p.skills.len()).unwrap_or(0)
    }
}

/// A notification before its read flag is known.
#[derive(Debug, Clone, PartialEq)]
pub struct Draft {
    pub id: String,
    pub category: NotificationCategory,
    pub title: String,
    pub description: String,
    pub time: String,
    pub icon: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    DeadlineUrgency,
    MissingResume,
    ProfileCompletion,
    SkillGap,
    BestMatch,
    NoApplications,
    FirstApplication,
    FiveSkills,
    DsaMilestone,
    ApplicationLifecycle,
}

impl Rule {
    pub const ORDERED: [Rule; 10] = [
        Rule::DeadlineUrgency,
        Rule::MissingResume,
        Rule::ProfileCompletion,
        Rule::SkillGap,
        Rule::BestMatch,
        Rule::NoApplications,
        Rule::FirstApplication,
        Rule::FiveSkills,
        Rule::DsaMilestone,
        Rule::ApplicationLifecycle,
    ];

    pub fn evaluate(self, input: &SynthesisInput<'_>) -> Vec<Draft> {
        match self {
            Rule::DeadlineUrgency => deadline_urgency(input),
            Rule::MissingResume => missing_resume(input).into_iter().collect(),
            Rule::ProfileCompletion => profile_completion(input).into_iter().collect(),
            Rule::SkillGap => skill_gap(input).into_iter().collect(),
            Rule::BestMatch => best_match(input).into_iter().collect(),
            Rule::NoApplications => no_applications(input).into_iter().collect(),
            Rule::FirstApplication => first_application(input).into_iter().collect(),
            Rule::FiveSkills => five_skills(input).into_iter().collect(),
            Rule::DsaMilestone => dsa_milestone(input).into_iter().collect(),
            Rule::ApplicationLifecycle => application_lifecycle(input),
        }
    }
}

fn hours_until(deadline: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    (deadline - now).num_milliseconds() as f64 / 3_600_000.0
}

fn deadline_urgency(input: &SynthesisInput<'_>) -> Vec<Draft> {
    let mut drafts = Vec::new();
    for opp in input.opportunities {
        let hours_left = hours_until(opp.deadline, input.now);
        if hours_left > 0.0 && hours_left <= URGENT_WINDOW_HOURS {
            let remaining = if hours_left < 1.0 {
                format!("{} minutes", (hours_left * 60.0).round())
            } else {
                format!("{hours_left:.1} hours")
            };
            drafts.push(Draft {
                id: format!("deadline-urgent-{}", opp.id),
                category: NotificationCategory::Urgent,
                title: format!("{} deadline in {remaining}!", opp.company),
                description: format!(
                    "Your application for {} at {} is due soon. Apply now to avoid missing out.",
                    opp.role, opp.company
                ),
                time: "Now".to_string(),
                icon: "alert-triangle",
            });
        } else if hours_left > URGENT_WINDOW_HOURS && hours_left <= SOON_WINDOW_HOURS {
            let opened = opp.deadline - Duration::hours(SOON_WINDOW_HOURS as i64);
            drafts.push(Draft {
                id: format!("deadline-soon-{}", opp.id),
                category: NotificationCategory::Urgent,
                title: format!("{} deadline in {} hours", opp.company, hours_left.round()),
                description: format!("{} position at {} closes soon.", opp.role, opp.company),
                time: time_ago(opened, input.now),
                icon: "clock",
            });
        }
    }
    drafts
}

fn missing_resume(input: &SynthesisInput<'_>) -> Option<Draft> {
    if input.profile.is_some_and(|p| p.resume_uploaded) {
        return None;
    }
    Some(Draft {
        id: "action-resume".to_string(),
        category: NotificationCategory::Action,
        title: "Resume not uploaded!".to_string(),
        description: "Upload your resume to improve matching and apply faster. Many companies require it for initial screening.".to_string(),
        time: "Action needed".to_string(),
        icon: "file-text",
    })
}

/// Either onboarding is unfinished (`action-profile`) or it is finished but
/// the profile is below 100% (`action-profile-incomplete`). Never both.
fn profile_completion(input: &SynthesisInput<'_>) -> Option<Draft> {
    let Some(profile) = input.onboarded_profile() else {
        return Some(Draft {
            id: "action-profile".to_string(),
            category: NotificationCategory::Action,
            title: "Complete your profile".to_string(),
            description: "Complete onboarding to unlock opportunity matching and personalized recommendations.".to_string(),
            time: "Action needed".to_string(),
            icon: "check-circle",
        });
    };

    let percent = fill_percent(profile);
    if percent >= 100 {
        return None;
    }
    Some(Draft {
        id: "action-profile-incomplete".to_string(),
        category: NotificationCategory::Action,
        title: "Complete your profile".to_string(),
        description: format!(
            "Your profile is {percent}% complete. Add more details for better matches."
        ),
        time: "Suggestion".to_string(),
        icon: "check-circle",
    })
}

fn skill_gap(input: &SynthesisInput<'_>) -> Option<Draft> {
    let profile = input.onboarded_profile()?;
    if profile.skills.len() >= SKILL_TARGET {
        return None;
    }
    Some(Draft {
        id: "action-skills".to_string(),
        category: NotificationCategory::Action,
        title: "Add more skills".to_string(),
        description: "Adding at least 5 skills significantly improves your match percentages with opportunities.".to_string(),
        time: "Suggestion".to_string(),
        icon: "code",
    })
}

/// Skill-only match percentage for one opportunity, ignoring any CGPA
/// requirement. `None` when the opportunity lists no skill requirements.
pub fn skill_match_percent(opp: &Opportunity, skills_lower: &[String]) -> Option<u32> {
    let skills = partition(&opp.requirements).skills;
    if skills.is_empty() {
        return None;
    }
    let matched = matched_count(&skills, skills_lower);
    Some((matched as f64 / skills.len() as f64 * 100.0).round() as u32)
}

fn best_match(input: &SynthesisInput<'_>) -> Option<Draft> {
    let profile = input.onboarded_profile()?;
    if profile.skills.is_empty() {
        return None;
    }
    let skills_lower = profile.skills_lower();

    // strictly greater: ties keep the first opportunity seen
    let mut best: Option<(&Opportunity, u32)> = None;
    for opp in input.opportunities {
        let Some(percent) = skill_match_percent(opp, &skills_lower) else {
            continue;
        };
        if percent > best.map(|(_, p)| p).unwrap_or(0) {
            best = Some((opp, percent));
        }
    }

    let (opp, percent) = best.filter(|(_, p)| *p >= BEST_MATCH_MIN_PERCENT)?;
    Some(Draft {
        id: "insight-best-match".to_string(),
        category: NotificationCategory::Insight,
        title: "New opportunity matches your profile".to_string(),
        description: format!(
            "{} posted a {} role with {percent}% match to your skills.",
            opp.company, opp.role
        ),
        time: "Insight".to_string(),
        icon: "target",
    })
}

fn no_applications(input: &SynthesisInput<'_>) -> Option<Draft> {
    input.onboarded_profile()?;
    if !input.applications.is_empty() {
        return None;
    }
    Some(Draft {
        id: "insight-no-apps".to_string(),
        category: NotificationCategory::Insight,
        title: "No applications yet".to_string(),
        description: "You haven't applied to any opportunities yet. Start applying to improve your placement chances!".to_string(),
        time: "Suggestion".to_string(),
        icon: "trending-up",
    })
}

fn first_application(input: &SynthesisInput<'_>) -> Option<Draft> {
    if input.applications.is_empty() {
        return None;
    }
    Some(Draft {
        id: "achievement-first-app".to_string(),
        category: NotificationCategory::Achievement,
        title: "Achievement Unlocked: First Application!".to_string(),
        description: "You submitted your first application. Keep the momentum going!"
            .to_string(),
        time: "Achievement".to_string(),
        icon: "star",
    })
}

fn five_skills(input: &SynthesisInput<'_>) -> Option<Draft> {
    if input.skill_count() < SKILL_TARGET {
        return None;
    }
    Some(Draft {
        id: "achievement-5-skills".to_string(),
        category: NotificationCategory::Achievement,
        title: "Achievement Unlocked: 5 Skills Added!".to_string(),
        description:
            "Great job building your skill profile! Companies can now match you better."
                .to_string(),
        time: "Achievement".to_string(),
        icon: "star",
    })
}

fn dsa_milestone(input: &SynthesisInput<'_>) -> Option<Draft> {
    if input.checklist.dsa < DSA_MILESTONE {
        return None;
    }
    Some(Draft {
        id: "achievement-dsa-50".to_string(),
        category: NotificationCategory::Achievement,
        title: "DSA Milestone: 50 problems solved!".to_string(),
        description: "You're halfway through your DSA goal. Keep pushing!".to_string(),
        time: "Achievement".to_string(),
        icon: "trophy",
    })
}

/// Interview and selection updates. Applications whose opportunity is not in
/// the catalog are skipped since the message names company and role.
fn application_lifecycle(input: &SynthesisInput<'_>) -> Vec<Draft> {
    let mut drafts = Vec::new();
    for app in input.applications.iter() {
        let Some(opp) = input
            .opportunities
            .iter()
            .find(|o| o.id == app.opportunity_id)
        else {
            continue;
        };
        match app.status {
            ApplicationStatus::Interview => drafts.push(Draft {
                id: format!("update-interview-{}", opp.id),
                category: NotificationCategory::Update,
                title: format!("{} interview scheduled", opp.company),
                description: format!(
                    "Your {} interview at {} is scheduled. Prepare well!",
                    opp.role, opp.company
                ),
                time: "Update".to_string(),
                icon: "briefcase",
            }),
            ApplicationStatus::Selected => drafts.push(Draft {
                id: format!("achievement-selected-{}", opp.id),
                category: NotificationCategory::Achievement,
                title: format!("Selected at {}!", opp.company),
                description: format!(
                    "Congratulations! You've been selected for the {} position.",
                    opp.role
                ),
                time: "Update".to_string(),
                icon: "trophy",
            }),
            ApplicationStatus::Applied | ApplicationStatus::Rejected => {}
        }
    }
    drafts
}
