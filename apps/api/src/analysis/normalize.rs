//! Output normalization applied to every result, whichever backend produced it.
//!
//! Guarantees on the way out:
//! - `ats_score` is within 0 – 100
//! - skill lists hold no blanks and no duplicates (case-insensitive, first spelling wins)
//! - `matched_skills` and `missing_skills` are disjoint; matched takes precedence

use std::collections::HashSet;

use crate::models::analysis::AnalysisResult;

pub const MAX_SCORE: u32 = 100;

/// Rounds a fractional percentage half-up into 0 – 100.
/// Returns `None` for NaN or infinities.
pub fn score_from_f64(raw: f64) -> Option<u32> {
    if !raw.is_finite() {
        return None;
    }
    // Clamp first so `round` (half away from zero) behaves as half-up
    Some(raw.clamp(0.0, MAX_SCORE as f64).round() as u32)
}

pub fn normalize(mut result: AnalysisResult) -> AnalysisResult {
    result.ats_score = result.ats_score.min(MAX_SCORE);

    result.matched_skills = dedup_skills(result.matched_skills);
    let matched: HashSet<String> = result.matched_skills.iter().map(|s| skill_key(s)).collect();

    result.missing_skills = dedup_skills(result.missing_skills)
        .into_iter()
        .filter(|s| !matched.contains(&skill_key(s)))
        .collect();

    result
}

fn skill_key(skill: &str) -> String {
    skill.trim().to_lowercase()
}

fn dedup_skills(skills: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    skills
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty() && seen.insert(skill_key(s)))
        .collect()
}
