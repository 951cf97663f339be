//! Requirement parsing shared by the match scorer and the best-match insight.
//!
//! A requirement is free text. Any requirement mentioning "cgpa" (any case) is a
//! CGPA threshold; everything else is a skill, optionally written as
//! slash-separated alternatives (`Python/Java`).
//!
//! Skill matching is bidirectional substring containment after lowercasing:
//! an alternative matches when it contains a user skill or a user skill
//! contains it. This misses synonyms ("ML" vs "Machine Learning") and lets
//! short tokens match inside longer ones ("R" inside "HR"). Both scoring and
//! notifications depend on this exact behaviour.

/// Requirements split into the CGPA criterion and the skill criteria.
#[derive(Debug, Clone, PartialEq)]
pub struct RequirementSet<'a> {
    /// First requirement mentioning "cgpa". Later ones are ignored.
    pub cgpa: Option<&'a str>,
    /// Every requirement that does not mention "cgpa", in order.
    pub skills: Vec<&'a str>,
}

pub fn is_cgpa_requirement(requirement: &str) -> bool {
    requirement.to_lowercase().contains("cgpa")
}

pub fn partition(requirements: &[String]) -> RequirementSet<'_> {
    let mut cgpa = None;
    let mut skills = Vec::new();
    for req in requirements {
        if is_cgpa_requirement(req) {
            if cgpa.is_none() {
                cgpa = Some(req.as_str());
            }
        } else {
            skills.push(req.as_str());
        }
    }
    RequirementSet { cgpa, skills }
}

/// Lowercased, trimmed alternatives of a skill requirement.
pub fn alternatives(requirement: &str) -> Vec<String> {
    requirement
        .to_lowercase()
        .split('/')
        .map(|part| part.trim().to_string())
        .collect()
}

/// True when any alternative of `requirement` matches any of `skills_lower`.
/// `skills_lower` must already be lowercased.
pub fn requirement_matched(requirement: &str, skills_lower: &[String]) -> bool {
    alternatives(requirement).iter().any(|alt| {
        skills_lower
            .iter()
            .any(|skill| alt.contains(skill.as_str()) || skill.contains(alt.as_str()))
    })
}

/// Number of `skill_requirements` matched by the user's skills.
pub fn matched_count(skill_requirements: &[&str], skills_lower: &[String]) -> usize {
    skill_requirements
        .iter()
        .filter(|req| requirement_matched(req, skills_lower))
        .count()
}

/// Numeric threshold of a CGPA requirement: every character other than a
/// digit or '.' is dropped and the remainder read as a leading decimal.
pub fn parse_threshold(requirement: &str) -> Option<f64> {
    let digits: String = requirement
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    parse_leading_decimal(&digits)
}

/// Reads the longest leading number after optional whitespace, ignoring
/// whatever follows: `[+-]digits[.digits][(e|E)[+-]digits]`, or a signed
/// `Infinity`. An exponent marker without digits is left unread. `None` when
/// no digit is present. Overflow yields an infinity.
pub fn parse_leading_decimal(input: &str) -> Option<f64> {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }
    if s[end..].starts_with("Infinity") {
        let negative = bytes.first() == Some(&b'-');
        return Some(if negative {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }

    let int_start = end;
    end = skip_digits(bytes, end);
    let mut digit_count = end - int_start;

    if bytes.get(end) == Some(&b'.') {
        let frac_end = skip_digits(bytes, end + 1);
        if frac_end > end + 1 || digit_count > 0 {
            digit_count += frac_end - (end + 1);
            end = frac_end;
        }
    }

    if digit_count == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e') | Some(b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+') | Some(b'-')) {
            exp += 1;
        }
        let exp_end = skip_digits(bytes, exp);
        if exp_end > exp {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok()
}

fn skip_digits(bytes: &[u8], mut at: usize) -> usize {
    while bytes.get(at).is_some_and(u8::is_ascii_digit) {
        at += 1;
    }
    at
}
