//! KeywordScorer: the local deterministic fallback used whenever no remote
//! scorer is configured or the remote call fails.
//!
//! Algorithm:
//! 1. For each term in `SKILL_VOCABULARY`, test case-insensitive substring
//!    presence in the resume and in the job description independently
//! 2. In both → matched; job description only → missing
//! 3. ats_score = round(100 × matched / (matched + missing)), half-up;
//!    `DEFAULT_SCORE` when no vocabulary term appears in the job description
//! 4. When both lists come out empty, fill them with placeholder entries so
//!    renderers never receive a fully-empty result
//!
//! No clock, no randomness: identical inputs give identical output.

use crate::models::analysis::{AnalysisInput, AnalysisResult};

/// Reference vocabulary of common professional skills and competencies.
pub const SKILL_VOCABULARY: &[&str] = &[
    "Python",
    "JavaScript",
    "React",
    "Node.js",
    "SQL",
    "Git",
    "AWS",
    "Docker",
    "Machine Learning",
    "Data Analysis",
    "Project Management",
    "Communication",
    "Leadership",
    "Problem Solving",
    "Teamwork",
    "Agile",
    "Scrum",
];

/// Score used when the job description mentions no vocabulary term at all.
pub const DEFAULT_SCORE: u32 = 75;

const PLACEHOLDER_MATCHED: &[&str] = &["General Skills", "Work Experience", "Communication"];
const PLACEHOLDER_MISSING: &[&str] = &["Advanced Python", "Cloud Computing", "Data Science"];

#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordScorer;

impl KeywordScorer {
    pub fn score(&self, input: &AnalysisInput) -> AnalysisResult {
        let resume_lower = input.resume_text.to_lowercase();
        let job_lower = input.job_text.to_lowercase();

        let mut matched_skills = Vec::new();
        let mut missing_skills = Vec::new();

        for skill in SKILL_VOCABULARY {
            let skill_lower = skill.to_lowercase();
            if !job_lower.contains(&skill_lower) {
                continue;
            }
            if resume_lower.contains(&skill_lower) {
                matched_skills.push(skill.to_string());
            } else {
                missing_skills.push(skill.to_string());
            }
        }

        let ats_score = overlap_score(matched_skills.len(), missing_skills.len());

        if matched_skills.is_empty() && missing_skills.is_empty() {
            matched_skills = PLACEHOLDER_MATCHED.iter().map(|s| s.to_string()).collect();
            missing_skills = PLACEHOLDER_MISSING.iter().map(|s| s.to_string()).collect();
        }

        let recommendations = build_recommendations(&missing_skills);

        AnalysisResult {
            ats_score,
            summary: build_summary(ats_score, matched_skills.len()),
            experience_match: "The candidate's work experience shows relevant background \
                that aligns with the position requirements."
                .to_string(),
            education_match: "Educational qualifications appear well-suited for this role."
                .to_string(),
            matched_skills,
            missing_skills,
            recommendations,
        }
    }
}

/// round(100 × matched / total), half-up, in integer arithmetic.
fn overlap_score(matched: usize, missing: usize) -> u32 {
    let total = matched + missing;
    if total == 0 {
        return DEFAULT_SCORE;
    }
    ((200 * matched + total) / (2 * total)) as u32
}

fn build_summary(score: u32, matched_count: usize) -> String {
    let strength = if score >= 80 {
        "strong alignment"
    } else if score >= 60 {
        "reasonable alignment"
    } else {
        "limited alignment"
    };
    format!(
        "Based on our analysis, this resume achieves an ATS score of {score}%. \
        Keyword matching found {matched_count} relevant skill(s), indicating {strength} \
        with the job requirements."
    )
}

fn build_recommendations(missing_skills: &[String]) -> Vec<String> {
    let mut recommendations = Vec::new();
    let top_missing: Vec<&str> = missing_skills.iter().take(3).map(|s| s.as_str()).collect();
    if !top_missing.is_empty() {
        recommendations.push(format!(
            "Add evidence of these skills if you have them: {}",
            top_missing.join(", ")
        ));
    }
    recommendations.extend(
        [
            "Include quantifiable achievements and metrics in your resume",
            "Emphasize relevant project experience and accomplishments",
            "Tailor your resume keywords to better match the job description",
        ]
        .iter()
        .map(|s| s.to_string()),
    );
    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(resume: &str, job: &str) -> AnalysisInput {
        AnalysisInput {
            resume_text: resume.to_string(),
            job_text: job.to_string(),
        }
    }

    #[test]
    fn test_matched_and_missing_split() {
        let result = KeywordScorer.score(&input("Python, SQL, Git", "Requires Python, AWS, Docker"));
        assert_eq!(result.matched_skills, vec!["Python"]);
        assert_eq!(result.missing_skills, vec!["AWS", "Docker"]);
        assert_eq!(result.ats_score, 33);
    }

    #[test]
    fn test_case_insensitive_matching() {
        let result = KeywordScorer.score(&input("expert in PYTHON", "python and docker"));
        assert_eq!(result.matched_skills, vec!["Python"]);
        assert_eq!(result.missing_skills, vec!["Docker"]);
    }

    #[test]
    fn test_score_rounds_half_up() {
        // 1 of 2 → 50; 2 of 3 → 66.67 → 67; 1 of 8 → 12.5 → 13
        assert_eq!(overlap_score(1, 1), 50);
        assert_eq!(overlap_score(2, 1), 67);
        assert_eq!(overlap_score(1, 7), 13);
        assert_eq!(overlap_score(3, 0), 100);
        assert_eq!(overlap_score(0, 4), 0);
    }

    #[test]
    fn test_no_vocabulary_in_job_uses_default_and_placeholders() {
        let result = KeywordScorer.score(&input("Rust and Haskell", "Looking for a Rust engineer"));
        assert_eq!(result.ats_score, DEFAULT_SCORE);
        assert_eq!(result.matched_skills, PLACEHOLDER_MATCHED);
        assert_eq!(result.missing_skills, PLACEHOLDER_MISSING);
    }

    #[test]
    fn test_no_placeholders_when_only_missing() {
        let result = KeywordScorer.score(&input("Rust", "Needs Docker"));
        assert!(result.matched_skills.is_empty());
        assert_eq!(result.missing_skills, vec!["Docker"]);
        assert_eq!(result.ats_score, 0);
    }

    #[test]
    fn test_full_coverage_scores_100() {
        let result = KeywordScorer.score(&input("Agile Scrum lead", "agile, scrum"));
        assert_eq!(result.ats_score, 100);
        assert!(result.missing_skills.is_empty());
    }

    #[test]
    fn test_deterministic_for_identical_inputs() {
        let a = KeywordScorer.score(&input("Python, React", "React, Node.js, SQL, leadership"));
        let b = KeywordScorer.score(&input("Python, React", "React, Node.js, SQL, leadership"));
        assert_eq!(a, b);
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }

    #[test]
    fn test_text_fields_populated() {
        let result = KeywordScorer.score(&input("Python", "Python and AWS"));
        assert!(result.summary.contains("50%"));
        assert!(!result.experience_match.is_empty());
        assert!(!result.education_match.is_empty());
        assert!(result.recommendations[0].contains("AWS"));
    }

    #[test]
    fn test_outputs_disjoint() {
        let result = KeywordScorer.score(&input(
            "Python JavaScript SQL Teamwork",
            "Python JavaScript React SQL AWS Teamwork Leadership",
        ));
        for skill in &result.matched_skills {
            assert!(!result.missing_skills.contains(skill));
        }
    }
}
