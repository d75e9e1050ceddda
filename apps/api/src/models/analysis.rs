use serde::{Deserialize, Serialize};

/// The two documents being compared. Both must be non-blank after trimming.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisInput {
    pub resume_text: String,
    pub job_text: String,
}

/// The single output contract shared by every scoring backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub ats_score: u32, // 0 – 100
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub summary: String,
    pub experience_match: String,
    pub education_match: String,
    pub recommendations: Vec<String>,
}

/// Which backend produced a result. Not part of `AnalysisResult` so the score
/// contract stays identical between backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoredBy {
    Remote,
    Local,
}

/// A normalized result tagged with the backend that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Analysis {
    pub result: AnalysisResult,
    pub scored_by: ScoredBy,
}

/// Coarse display band for an ATS score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    Strong,   // ≥ 80
    Moderate, // 60 – 79
    Weak,     // < 60
}

impl AnalysisResult {
    pub fn score_band(&self) -> ScoreBand {
        if self.ats_score >= 80 {
            ScoreBand::Strong
        } else if self.ats_score >= 60 {
            ScoreBand::Moderate
        } else {
            ScoreBand::Weak
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result_with_score(ats_score: u32) -> AnalysisResult {
        AnalysisResult {
            ats_score,
            matched_skills: vec![],
            missing_skills: vec![],
            summary: "Fine.".to_string(),
            experience_match: String::new(),
            education_match: String::new(),
            recommendations: vec![],
        }
    }

    #[test]
    fn test_score_band_thresholds() {
        assert_eq!(result_with_score(100).score_band(), ScoreBand::Strong);
        assert_eq!(result_with_score(80).score_band(), ScoreBand::Strong);
        assert_eq!(result_with_score(79).score_band(), ScoreBand::Moderate);
        assert_eq!(result_with_score(60).score_band(), ScoreBand::Moderate);
        assert_eq!(result_with_score(59).score_band(), ScoreBand::Weak);
        assert_eq!(result_with_score(0).score_band(), ScoreBand::Weak);
    }

    #[test]
    fn test_scored_by_serializes_snake_case() {
        assert_eq!(serde_json::to_string(&ScoredBy::Remote).unwrap(), r#""remote""#);
        assert_eq!(serde_json::to_string(&ScoredBy::Local).unwrap(), r#""local""#);
    }
}
