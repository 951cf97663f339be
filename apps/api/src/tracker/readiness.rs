//! Placement readiness: the seven-task preparation checklist, its completion
//! percentage, and per-area scores with a study tip each.
//!
//! Readiness blends profile completion (40%) with task completion (60%) and
//! is 0 until onboarding is finished. Area scores are gated the same way.

use serde::Serialize;

use crate::models::checklist::{ChecklistItem, ChecklistProgress};
use crate::models::profile::UserProfile;
use crate::notifications::rules::SKILL_TARGET;
use crate::profile::completeness::completion_percent;

const PROFILE_WEIGHT: f64 = 0.4;
const TASK_WEIGHT: f64 = 0.6;
const ONBOARDING_TIP: &str = "Complete onboarding to get personalized recommendations.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrepTask {
    pub id: &'static str,
    pub category: &'static str,
    pub title: &'static str,
    pub priority: TaskPriority,
    pub completed: bool,
    /// Counter-backed tasks carry their current value and target.
    pub progress: Option<u32>,
    pub total: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AreaScore {
    pub area: &'static str,
    pub score: u32,
    pub tip: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReadinessReport {
    pub tasks: Vec<PrepTask>,
    pub completed_count: usize,
    pub total_count: usize,
    pub completion_percent: u8,
    pub readiness: u8,
    pub areas: Vec<AreaScore>,
}

fn profile_task(
    id: &'static str,
    category: &'static str,
    title: &'static str,
    priority: TaskPriority,
    completed: bool,
) -> PrepTask {
    PrepTask {
        id,
        category,
        title,
        priority,
        completed,
        progress: None,
        total: None,
    }
}

fn counter_task(
    id: &'static str,
    category: &'static str,
    title: &'static str,
    priority: TaskPriority,
    checklist: &ChecklistProgress,
    item: ChecklistItem,
) -> PrepTask {
    PrepTask {
        id,
        category,
        title,
        priority,
        completed: checklist.is_complete(item),
        progress: Some(checklist.get(item)),
        total: Some(item.max()),
    }
}

pub fn prep_tasks(profile: &UserProfile, checklist: &ChecklistProgress) -> Vec<PrepTask> {
    vec![
        profile_task(
            "resume",
            "Documents",
            "Upload your resume",
            TaskPriority::High,
            profile.resume_uploaded,
        ),
        profile_task(
            "skills",
            "Skills",
            "Add at least 5 skills to your profile",
            TaskPriority::Medium,
            profile.skills.len() >= SKILL_TARGET,
        ),
        counter_task(
            "dsa",
            "Preparation",
            "Complete 100 DSA problems",
            TaskPriority::High,
            checklist,
            ChecklistItem::Dsa,
        ),
        counter_task(
            "aptitude",
            "Preparation",
            "Practice aptitude tests",
            TaskPriority::Medium,
            checklist,
            ChecklistItem::Aptitude,
        ),
        counter_task(
            "mock-interview",
            "Practice",
            "Complete 3 mock interviews",
            TaskPriority::Medium,
            checklist,
            ChecklistItem::MockInterview,
        ),
        // Projects and group discussion have no tracked progress yet.
        profile_task(
            "projects",
            "Portfolio",
            "Add 2 projects to your portfolio",
            TaskPriority::Low,
            false,
        ),
        profile_task(
            "gd",
            "Practice",
            "Practice Group Discussion topics",
            TaskPriority::Low,
            false,
        ),
    ]
}

fn area_scores(onboarded: bool, checklist: &ChecklistProgress) -> Vec<AreaScore> {
    let areas = [
        ("DSA Practice", ChecklistItem::Dsa),
        ("Aptitude", ChecklistItem::Aptitude),
        ("Mock Interviews", ChecklistItem::MockInterview),
    ];
    areas
        .into_iter()
        .map(|(area, item)| {
            if !onboarded {
                return AreaScore {
                    area,
                    score: 0,
                    tip: ONBOARDING_TIP,
                };
            }
            let score = checklist.percent(item);
            let tip = match item {
                ChecklistItem::Dsa if score < 50 => {
                    "Solve more DSA problems daily on LeetCode or HackerRank."
                }
                ChecklistItem::Dsa => "Great progress! Keep solving to maintain your edge.",
                ChecklistItem::Aptitude if score < 50 => {
                    "Solve 10 problems daily on IndiaBix or Prepinsta."
                }
                ChecklistItem::Aptitude => "Strong aptitude skills! Keep practicing.",
                ChecklistItem::MockInterview if score < 100 => {
                    "Schedule mock interviews with peers or mentors."
                }
                ChecklistItem::MockInterview => "All mock interviews completed! Great job.",
            };
            AreaScore { area, score, tip }
        })
        .collect()
}

pub fn readiness_report(profile: &UserProfile, checklist: &ChecklistProgress) -> ReadinessReport {
    let tasks = prep_tasks(profile, checklist);
    let completed_count = tasks.iter().filter(|t| t.completed).count();
    let total_count = tasks.len();
    let completion = (completed_count as f64 / total_count as f64 * 100.0).round() as u8;

    let readiness = if profile.onboarding_completed {
        let blended = f64::from(completion_percent(profile)) * PROFILE_WEIGHT
            + f64::from(completion) * TASK_WEIGHT;
        blended.round() as u8
    } else {
        0
    };

    ReadinessReport {
        areas: area_scores(profile.onboarding_completed, checklist),
        tasks,
        completed_count,
        total_count,
        completion_percent: completion,
        readiness,
    }
}
