//! MatchAnalyzer: the single entry point for resume / job matching.
//!
//! Flow: validate input → remote scorer (bounded by a timeout, if configured)
//!       → on any remote failure, KeywordScorer → normalize → tagged result.
//!
//! A remote fault never fails the analysis. The fallback is reported through
//! `Analysis::scored_by` and a warn-level log line.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tracing::{info, warn};

use crate::analysis::keyword_scorer::KeywordScorer;
use crate::analysis::normalize::normalize;
use crate::analysis::remote_scorer::{MatchScorer, RemoteScoringError};
use crate::models::analysis::{Analysis, AnalysisInput, AnalysisResult, ScoredBy};

pub const DEFAULT_REMOTE_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("{0}")]
    InvalidInput(String),
}

#[derive(Clone)]
pub struct MatchAnalyzer {
    remote: Option<Arc<dyn MatchScorer>>,
    local: KeywordScorer,
    remote_timeout: Duration,
}

impl MatchAnalyzer {
    pub fn new(remote: Option<Arc<dyn MatchScorer>>, remote_timeout: Duration) -> Self {
        Self {
            remote,
            local: KeywordScorer,
            remote_timeout,
        }
    }

    /// Keyword scoring only.
    pub fn local_only() -> Self {
        Self::new(None, DEFAULT_REMOTE_TIMEOUT)
    }

    pub fn has_remote(&self) -> bool {
        self.remote.is_some()
    }

    pub async fn analyze(&self, resume_text: &str, job_text: &str) -> Result<Analysis, AnalysisError> {
        let input = validate_input(resume_text, job_text)?;

        let (result, scored_by) = match &self.remote {
            Some(remote) => match self.score_remote(remote.as_ref(), &input).await {
                Ok(result) => (result, ScoredBy::Remote),
                Err(e) => {
                    warn!("Remote scorer failed, falling back to keyword scoring: {e}");
                    (self.local.score(&input), ScoredBy::Local)
                }
            },
            None => (self.local.score(&input), ScoredBy::Local),
        };

        let result = normalize(result);
        info!(
            "Analysis complete: ats_score={} scored_by={:?} matched={} missing={}",
            result.ats_score,
            scored_by,
            result.matched_skills.len(),
            result.missing_skills.len()
        );

        Ok(Analysis { result, scored_by })
    }

    async fn score_remote(
        &self,
        remote: &dyn MatchScorer,
        input: &AnalysisInput,
    ) -> Result<AnalysisResult, RemoteScoringError> {
        tokio::time::timeout(self.remote_timeout, remote.score(input))
            .await
            .map_err(|_| RemoteScoringError::Timeout(self.remote_timeout.as_secs()))?
    }
}

/// Rejects blank documents before any scorer runs. Text is passed through
/// as-is; only the emptiness check trims.
pub fn validate_input(resume_text: &str, job_text: &str) -> Result<AnalysisInput, AnalysisError> {
    if resume_text.trim().is_empty() {
        return Err(AnalysisError::InvalidInput(
            "Please upload a resume file or paste resume text".to_string(),
        ));
    }
    if job_text.trim().is_empty() {
        return Err(AnalysisError::InvalidInput(
            "Please upload a job description file or paste job description text".to_string(),
        ));
    }
    Ok(AnalysisInput {
        resume_text: resume_text.to_string(),
        job_text: job_text.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::LlmError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Returns a fixed result and counts calls.
    struct FixedScorer {
        result: AnalysisResult,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl MatchScorer for FixedScorer {
        async fn score(&self, _input: &AnalysisInput) -> Result<AnalysisResult, RemoteScoringError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.result.clone())
        }
    }

    struct FailingScorer;

    #[async_trait]
    impl MatchScorer for FailingScorer {
        async fn score(&self, _input: &AnalysisInput) -> Result<AnalysisResult, RemoteScoringError> {
            Err(RemoteScoringError::Llm(LlmError::EmptyContent))
        }
    }

    struct SlowScorer;

    #[async_trait]
    impl MatchScorer for SlowScorer {
        async fn score(&self, input: &AnalysisInput) -> Result<AnalysisResult, RemoteScoringError> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(KeywordScorer.score(input))
        }
    }

    fn remote_result() -> AnalysisResult {
        AnalysisResult {
            ats_score: 88,
            matched_skills: vec!["Rust".to_string(), "rust".to_string(), "SQL".to_string()],
            missing_skills: vec!["SQL".to_string(), "Kafka".to_string()],
            summary: "Great fit.".to_string(),
            experience_match: "Senior".to_string(),
            education_match: "MSc".to_string(),
            recommendations: vec![],
        }
    }

    fn analyzer_with(remote: Arc<dyn MatchScorer>) -> MatchAnalyzer {
        MatchAnalyzer::new(Some(remote), DEFAULT_REMOTE_TIMEOUT)
    }

    fn lowercase(skills: &[String]) -> Vec<String> {
        skills.iter().map(|s| s.to_lowercase()).collect()
    }

    #[tokio::test]
    async fn test_remote_result_used_and_normalized() {
        let scorer = Arc::new(FixedScorer {
            result: remote_result(),
            calls: AtomicUsize::new(0),
        });
        let analysis = analyzer_with(scorer.clone())
            .analyze("Rust, SQL", "Rust, SQL, Kafka")
            .await
            .unwrap();

        assert_eq!(analysis.scored_by, ScoredBy::Remote);
        assert_eq!(analysis.result.ats_score, 88);
        assert_eq!(analysis.result.matched_skills, vec!["Rust", "SQL"]);
        assert_eq!(analysis.result.missing_skills, vec!["Kafka"]);
        assert_eq!(scorer.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failing_remote_falls_back_to_keywords() {
        let analysis = analyzer_with(Arc::new(FailingScorer))
            .analyze("Python, SQL, Git", "Requires Python, AWS, Docker")
            .await
            .unwrap();

        assert_eq!(analysis.scored_by, ScoredBy::Local);
        let matched = lowercase(&analysis.result.matched_skills);
        let missing = lowercase(&analysis.result.missing_skills);
        assert!(matched.contains(&"python".to_string()));
        assert!(missing.contains(&"aws".to_string()));
        assert!(missing.contains(&"docker".to_string()));
        assert_eq!(analysis.result.ats_score, 33);
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_remote_times_out_and_falls_back() {
        let analyzer = MatchAnalyzer::new(Some(Arc::new(SlowScorer)), Duration::from_secs(30));
        let analysis = analyzer
            .analyze("Python", "Python and AWS")
            .await
            .unwrap();

        assert_eq!(analysis.scored_by, ScoredBy::Local);
        assert_eq!(analysis.result.ats_score, 50);
    }

    #[tokio::test]
    async fn test_no_remote_uses_keywords() {
        let analyzer = MatchAnalyzer::local_only();
        assert!(!analyzer.has_remote());
        let analysis = analyzer.analyze("React developer", "React and Node.js").await.unwrap();
        assert_eq!(analysis.scored_by, ScoredBy::Local);
        assert_eq!(analysis.result.matched_skills, vec!["React"]);
        assert_eq!(analysis.result.missing_skills, vec!["Node.js"]);
    }

    #[tokio::test]
    async fn test_blank_input_rejected_before_scoring() {
        let scorer = Arc::new(FixedScorer {
            result: remote_result(),
            calls: AtomicUsize::new(0),
        });
        let analyzer = analyzer_with(scorer.clone());

        for (resume, job) in [("", "job"), ("resume", ""), ("  \n\t", "job"), ("resume", "   ")] {
            let err = analyzer.analyze(resume, job).await.unwrap_err();
            assert!(matches!(err, AnalysisError::InvalidInput(_)));
        }
        assert_eq!(scorer.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_score_always_within_bounds() {
        let mut wild = remote_result();
        wild.ats_score = 999;
        let scorer = Arc::new(FixedScorer {
            result: wild,
            calls: AtomicUsize::new(0),
        });
        let analysis = analyzer_with(scorer).analyze("a", "b").await.unwrap();
        assert!(analysis.result.ats_score <= 100);

        let pairs = [
            ("Python", "Python"),
            ("nothing relevant", "Agile Scrum SQL"),
            ("x", "y"),
            ("Leadership Communication Teamwork", "Leadership Communication Teamwork Git"),
        ];
        for (resume, job) in pairs {
            let analysis = MatchAnalyzer::local_only().analyze(resume, job).await.unwrap();
            assert!(analysis.result.ats_score <= 100);
            for skill in &analysis.result.matched_skills {
                assert!(!analysis.result.missing_skills.contains(skill));
            }
        }
    }

    #[test]
    fn test_validate_input_keeps_untrimmed_text() {
        let input = validate_input("  resume  ", " job ").unwrap();
        assert_eq!(input.resume_text, "  resume  ");
        assert_eq!(input.job_text, " job ");
    }
}
