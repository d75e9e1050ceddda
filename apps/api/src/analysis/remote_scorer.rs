//! Remote scoring: trait-based backends that delegate to a hosted model.
//!
//! `LlmMatchScorer` is the production backend. `MatchAnalyzer` holds an
//! `Option<Arc<dyn MatchScorer>>` and falls back to `KeywordScorer` on any error.

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

use crate::analysis::normalize::score_from_f64;
use crate::analysis::prompts::{render_ats_prompt, ATS_SYSTEM};
use crate::llm_client::{LlmClient, LlmError};
use crate::models::analysis::{AnalysisInput, AnalysisResult};

#[derive(Debug, Error)]
pub enum RemoteScoringError {
    #[error("LLM call failed: {0}")]
    Llm(#[from] LlmError),

    #[error("response did not match the result schema: {0}")]
    Schema(String),

    #[error("remote scorer timed out after {0}s")]
    Timeout(u64),
}

/// A remote scoring backend. Implement this to swap providers without
/// touching the analyzer or handlers.
#[async_trait]
pub trait MatchScorer: Send + Sync {
    async fn score(&self, input: &AnalysisInput) -> Result<AnalysisResult, RemoteScoringError>;
}

/// Wire shape expected back from the model. Every field is required and no
/// extra field is accepted; anything else is rejected rather than patched.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RemoteVerdict {
    ats_score: f64,
    matched_skills: Vec<String>,
    missing_skills: Vec<String>,
    summary: String,
    experience_match: String,
    education_match: String,
    recommendations: Vec<String>,
}

impl TryFrom<RemoteVerdict> for AnalysisResult {
    type Error = RemoteScoringError;

    fn try_from(verdict: RemoteVerdict) -> Result<Self, Self::Error> {
        let ats_score = score_from_f64(verdict.ats_score).ok_or_else(|| {
            RemoteScoringError::Schema(format!("ats_score is not finite: {}", verdict.ats_score))
        })?;

        if verdict.summary.trim().is_empty() {
            return Err(RemoteScoringError::Schema("summary is empty".to_string()));
        }

        Ok(AnalysisResult {
            ats_score,
            matched_skills: verdict.matched_skills,
            missing_skills: verdict.missing_skills,
            summary: verdict.summary,
            experience_match: verdict.experience_match,
            education_match: verdict.education_match,
            recommendations: verdict.recommendations,
        })
    }
}

/// Scores a resume / job pair with a single JSON-mode LLM call. No retries.
pub struct LlmMatchScorer(pub LlmClient);

#[async_trait]
impl MatchScorer for LlmMatchScorer {
    async fn score(&self, input: &AnalysisInput) -> Result<AnalysisResult, RemoteScoringError> {
        let prompt = render_ats_prompt(&input.resume_text, &input.job_text);
        let value: serde_json::Value = self.0.call_json(&prompt, ATS_SYSTEM).await?;
        parse_verdict(value)
    }
}

fn parse_verdict(value: serde_json::Value) -> Result<AnalysisResult, RemoteScoringError> {
    let verdict: RemoteVerdict =
        serde_json::from_value(value).map_err(|e| RemoteScoringError::Schema(e.to_string()))?;
    AnalysisResult::try_from(verdict)
}
