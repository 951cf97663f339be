//! Match scorer: 0–100 compatibility between a profile and an opportunity's
//! requirement list.
//!
//! Default: `SkillCgpaScorer` (skills weighted 80, CGPA weighted 20).
//! `AppState` holds an `Arc<dyn MatchScorer>` so listing and notification code
//! never name the concrete scorer.

use serde::{Deserialize, Serialize};

use crate::matching::requirements::{
    parse_leading_decimal, parse_threshold, partition, requirement_matched,
};
use crate::models::profile::UserProfile;

pub const SKILL_WEIGHT: f64 = 80.0;
pub const CGPA_WEIGHT: f64 = 20.0;
/// Skill points awarded when an opportunity lists no skill requirements.
pub const NO_SKILL_REQUIREMENTS_CREDIT: f64 = 40.0;

// ────────────────────────────────────────────────────────────────────────────
// Output
// ────────────────────────────────────────────────────────────────────────────

/// Score plus the parts it was built from, for the opportunity detail view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchBreakdown {
    pub score: u8,
    /// Unrounded skill contribution, 0–80.
    pub skill_points: f64,
    /// CGPA contribution, 0–20.
    pub cgpa_points: f64,
    pub matched: Vec<String>,
    pub unmatched: Vec<String>,
    pub cgpa_requirement: Option<String>,
}

impl MatchBreakdown {
    fn zero() -> Self {
        MatchBreakdown {
            score: 0,
            skill_points: 0.0,
            cgpa_points: 0.0,
            matched: vec![],
            unmatched: vec![],
            cgpa_requirement: None,
        }
    }
}

/// Display band used by the opportunity list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchBand {
    Excellent,
    Strong,
    Fair,
    Low,
}

impl MatchBand {
    pub fn for_score(score: u8) -> Self {
        match score {
            s if s >= 85 => MatchBand::Excellent,
            s if s >= 70 => MatchBand::Strong,
            s if s >= 50 => MatchBand::Fair,
            _ => MatchBand::Low,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Pluggable scorer. Pure: the same inputs always produce the same result.
pub trait MatchScorer: Send + Sync {
    fn breakdown(&self, profile: &UserProfile, requirements: &[String]) -> MatchBreakdown;

    fn score(&self, profile: &UserProfile, requirements: &[String]) -> u8 {
        self.breakdown(profile, requirements).score
    }
}

/// Skill/CGPA weighted scorer.
///
/// Algorithm:
/// 1. Zero when onboarding is incomplete, when the profile has neither skills
///    nor a CGPA, or when there are no requirements.
/// 2. Skills: `matched / total * 80`, or a flat 40 with no skill requirements.
/// 3. CGPA: 20 when there is no CGPA requirement; 0 when required but the
///    profile has none; otherwise 20 if the user meets the threshold, else
///    `round(user / threshold * 20)`. Unparsable numbers contribute 0.
/// 4. `min(round(skills + cgpa), 100)`.
pub struct SkillCgpaScorer;

impl MatchScorer for SkillCgpaScorer {
    fn breakdown(&self, profile: &UserProfile, requirements: &[String]) -> MatchBreakdown {
        compute_match(profile, requirements)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Core algorithm
// ────────────────────────────────────────────────────────────────────────────

pub fn compute_match(profile: &UserProfile, requirements: &[String]) -> MatchBreakdown {
    if !profile.onboarding_completed {
        return MatchBreakdown::zero();
    }
    if profile.skills.is_empty() && !profile.has_cgpa() {
        return MatchBreakdown::zero();
    }
    if requirements.is_empty() {
        return MatchBreakdown::zero();
    }

    let set = partition(requirements);
    let skills_lower = profile.skills_lower();

    let mut matched = Vec::new();
    let mut unmatched = Vec::new();
    for req in &set.skills {
        if requirement_matched(req, &skills_lower) {
            matched.push(req.to_string());
        } else {
            unmatched.push(req.to_string());
        }
    }

    let skill_points = if set.skills.is_empty() {
        NO_SKILL_REQUIREMENTS_CREDIT
    } else {
        matched.len() as f64 / set.skills.len() as f64 * SKILL_WEIGHT
    };

    let cgpa_points = match set.cgpa {
        None => CGPA_WEIGHT,
        Some(_) if !profile.has_cgpa() => 0.0,
        Some(req) => cgpa_points(&profile.cgpa, req),
    };

    let score = (skill_points + cgpa_points).round().clamp(0.0, 100.0) as u8;

    MatchBreakdown {
        score,
        skill_points,
        cgpa_points,
        matched,
        unmatched,
        cgpa_requirement: set.cgpa.map(str::to_string),
    }
}

fn cgpa_points(user_cgpa: &str, requirement: &str) -> f64 {
    let (Some(threshold), Some(user)) = (
        parse_threshold(requirement),
        parse_leading_decimal(user_cgpa),
    ) else {
        return 0.0;
    };

    if user >= threshold {
        CGPA_WEIGHT
    } else if threshold > 0.0 {
        (user / threshold * CGPA_WEIGHT).round().max(0.0)
    } else {
        0.0
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn onboarded(skills: &[&str], cgpa: &str) -> UserProfile {
        UserProfile {
            skills: skills.iter().map(|s| s.to_string()).collect(),
            cgpa: cgpa.to_string(),
            onboarding_completed: true,
            ..Default::default()
        }
    }

    fn reqs(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_full_match_scores_100() {
        let profile = onboarded(&["Python"], "9.0");
        let score = compute_match(&profile, &reqs(&["Python/Java", "CGPA > 8.0"])).score;
        assert_eq!(score, 100);
    }

    #[test]
    fn test_cgpa_below_threshold_is_proportional() {
        let profile = onboarded(&["Python"], "7.0");
        let report = compute_match(&profile, &reqs(&["Python/Java", "CGPA > 8.0"]));
        assert_eq!(report.cgpa_points, 18.0);
        assert_eq!(report.score, 98);
    }

    #[test]
    fn test_exponent_and_infinite_cgpa_meet_threshold() {
        let requirements = reqs(&["Python/Java", "CGPA > 8.0"]);
        let report = compute_match(&onboarded(&["Python"], "1e1"), &requirements);
        assert_eq!(report.cgpa_points, 20.0);
        let report = compute_match(&onboarded(&["Python"], "Infinity"), &requirements);
        assert_eq!(report.score, 100);
        let report = compute_match(&onboarded(&["Python"], "-Infinity"), &requirements);
        assert_eq!(report.cgpa_points, 0.0);
        assert_eq!(report.score, 80);
    }

    #[test]
    fn test_empty_requirements_score_zero() {
        let profile = onboarded(&["Python"], "9.0");
        assert_eq!(compute_match(&profile, &[]).score, 0);
    }

    #[test]
    fn test_incomplete_onboarding_scores_zero() {
        let mut profile = onboarded(&["Python"], "9.0");
        profile.onboarding_completed = false;
        assert_eq!(compute_match(&profile, &reqs(&["Python"])).score, 0);
    }

    #[test]
    fn test_no_skills_and_no_cgpa_scores_zero() {
        let profile = onboarded(&[], "");
        assert_eq!(compute_match(&profile, &reqs(&["SQL"])).score, 0);
    }

    #[test]
    fn test_no_skills_with_cgpa_only_gets_cgpa_credit() {
        let profile = onboarded(&[], "8.0");
        let report = compute_match(&profile, &reqs(&["SQL"]));
        assert_eq!(report.skill_points, 0.0);
        assert_eq!(report.score, 20);
        assert!(report.score <= 20);
    }

    #[test]
    fn test_no_skill_requirements_gives_half_credit() {
        let profile = onboarded(&["Rust"], "6.0");
        let report = compute_match(&profile, &reqs(&["CGPA > 6.0"]));
        assert_eq!(report.skill_points, 40.0);
        assert_eq!(report.score, 60);
    }

    #[test]
    fn test_cgpa_required_but_missing_scores_zero_cgpa() {
        let profile = onboarded(&["Python"], "");
        let report = compute_match(&profile, &reqs(&["Python", "CGPA > 8.0"]));
        assert_eq!(report.cgpa_points, 0.0);
        assert_eq!(report.score, 80);
    }

    #[test]
    fn test_unparsable_cgpa_contributes_zero() {
        let profile = onboarded(&["Python"], "excellent");
        let report = compute_match(&profile, &reqs(&["Python", "CGPA > 8.0"]));
        assert_eq!(report.cgpa_points, 0.0);

        let profile = onboarded(&["Python"], "9.1");
        let report = compute_match(&profile, &reqs(&["Python", "CGPA required"]));
        assert_eq!(report.cgpa_points, 0.0);
    }

    #[test]
    fn test_partial_skill_match_rounds_at_the_end() {
        // 1/3 * 80 = 26.67, + 20 → 46.67 → 47
        let profile = onboarded(&["SQL"], "9");
        let report = compute_match(&profile, &reqs(&["SQL", "Tableau", "Statistics"]));
        assert_eq!(report.matched, vec!["SQL"]);
        assert_eq!(report.unmatched, vec!["Tableau", "Statistics"]);
        assert_eq!(report.score, 47);
    }

    #[test]
    fn test_score_monotonic_in_matched_skills() {
        let requirements = reqs(&["SQL", "Python", "Tableau", "Statistics", "CGPA > 8"]);
        let mut last = 0;
        let mut skills: Vec<&str> = Vec::new();
        for skill in ["SQL", "Python", "Tableau", "Statistics"] {
            skills.push(skill);
            let score = compute_match(&onboarded(&skills, "7.2"), &requirements).score;
            assert!(score >= last, "{score} < {last}");
            assert!(score <= 100);
            last = score;
        }
    }

    #[test]
    fn test_trait_default_score_uses_breakdown() {
        let profile = onboarded(&["Java"], "8.5");
        let scorer = SkillCgpaScorer;
        let requirements = reqs(&["Go/Java", "Microservices"]);
        assert_eq!(
            scorer.score(&profile, &requirements),
            compute_match(&profile, &requirements).score
        );
    }

    #[test]
    fn test_match_bands() {
        assert_eq!(MatchBand::for_score(92), MatchBand::Excellent);
        assert_eq!(MatchBand::for_score(70), MatchBand::Strong);
        assert_eq!(MatchBand::for_score(50), MatchBand::Fair);
        assert_eq!(MatchBand::for_score(49), MatchBand::Low);
    }
}
