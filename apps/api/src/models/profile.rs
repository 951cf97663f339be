use serde::{Deserialize, Serialize};

/// Student profile. Created with empty defaults on first load and only ever
/// mutated through [`ProfilePatch`] merges.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserProfile {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub college_name: String,
    /// Degree code, e.g. `btech`. See [`degree_label`].
    pub degree: String,
    /// Decimal string as entered by the user; parsed leniently when scoring.
    pub cgpa: String,
    pub specialization: String,
    /// Case preserved, compared case-insensitively.
    pub skills: Vec<String>,
    pub resume_uploaded: bool,
    pub resume_file_name: String,
    pub onboarding_completed: bool,
}

/// Partial profile update. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfilePatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub college_name: Option<String>,
    pub degree: Option<String>,
    pub cgpa: Option<String>,
    pub specialization: Option<String>,
    pub skills: Option<Vec<String>>,
    pub resume_uploaded: Option<bool>,
    pub resume_file_name: Option<String>,
    pub onboarding_completed: Option<bool>,
}

const DEGREE_LABELS: &[(&str, &str)] = &[
    ("btech", "B.Tech"),
    ("bsc", "B.Sc"),
    ("bca", "BCA"),
    ("mtech", "M.Tech"),
    ("msc", "M.Sc"),
    ("mca", "MCA"),
    ("mba", "MBA"),
];

/// Human label for a degree code; unknown codes are returned as-is.
pub fn degree_label(code: &str) -> &str {
    DEGREE_LABELS
        .iter()
        .find(|(key, _)| *key == code)
        .map(|(_, label)| *label)
        .unwrap_or(code)
}

impl UserProfile {
    /// Default profile for a fresh account. The display name from the identity
    /// provider seeds first/last name; everything else starts empty.
    pub fn with_display_name(display_name: Option<&str>) -> Self {
        let mut profile = Self::default();
        if let Some(name) = display_name {
            let mut words = name.split_whitespace();
            if let Some(first) = words.next() {
                profile.first_name = first.to_string();
                profile.last_name = words.collect::<Vec<_>>().join(" ");
            }
        }
        profile
    }

    pub fn has_cgpa(&self) -> bool {
        !self.cgpa.is_empty()
    }

    /// Lowercased copy of the skill list, as used by requirement matching.
    pub fn skills_lower(&self) -> Vec<String> {
        self.skills.iter().map(|s| s.to_lowercase()).collect()
    }

    /// Adds a skill unless an equal one (ignoring case) already exists.
    pub fn add_skill(&mut self, skill: &str) -> bool {
        let skill = skill.trim();
        if skill.is_empty() || self.has_skill(skill) {
            return false;
        }
        self.skills.push(skill.to_string());
        true
    }

    pub fn has_skill(&self, skill: &str) -> bool {
        let wanted = skill.to_lowercase();
        self.skills.iter().any(|s| s.to_lowercase() == wanted)
    }

    /// Merges `patch` into the profile in place.
    pub fn apply(&mut self, patch: ProfilePatch) {
        let ProfilePatch {
            first_name,
            last_name,
            phone,
            college_name,
            degree,
            cgpa,
            specialization,
            skills,
            resume_uploaded,
            resume_file_name,
            onboarding_completed,
        } = patch;

        if let Some(v) = first_name {
            self.first_name = v;
        }
        if let Some(v) = last_name {
            self.last_name = v;
        }
        if let Some(v) = phone {
            self.phone = v;
        }
        if let Some(v) = college_name {
            self.college_name = v;
        }
        if let Some(v) = degree {
            self.degree = v;
        }
        if let Some(v) = cgpa {
            self.cgpa = v;
        }
        if let Some(v) = specialization {
            self.specialization = v;
        }
        if let Some(list) = skills {
            self.skills.clear();
            for skill in &list {
                self.add_skill(skill);
            }
        }
        if let Some(v) = resume_uploaded {
            self.resume_uploaded = v;
        }
        if let Some(v) = resume_file_name {
            self.resume_file_name = v;
        }
        if let Some(v) = onboarding_completed {
            self.onboarding_completed = v;
        }
    }
}
