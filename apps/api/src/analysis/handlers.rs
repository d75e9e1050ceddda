//! Axum route handlers for the Analysis API.

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::extract::extract_text;
use crate::models::analysis::{Analysis, AnalysisResult, ScoreBand, ScoredBy};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub resume_text: String,
    pub job_text: String,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub result: AnalysisResult,
    pub scored_by: ScoredBy,
    pub score_band: ScoreBand,
}

impl From<Analysis> for AnalyzeResponse {
    fn from(analysis: Analysis) -> Self {
        Self {
            score_band: analysis.result.score_band(),
            result: analysis.result,
            scored_by: analysis.scored_by,
        }
    }
}

/// POST /api/v1/analyses
///
/// Scores pasted resume text against pasted job description text.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let analysis = state
        .analyzer
        .analyze(&request.resume_text, &request.job_text)
        .await?;
    Ok(Json(analysis.into()))
}

/// POST /api/v1/analyses/upload
///
/// Multipart form. For each document an uploaded file (`resume` / `job`)
/// takes precedence over pasted text (`resume_text` / `job_text`).
pub async fn handle_analyze_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let mut resume_file: Option<String> = None;
    let mut job_file: Option<String> = None;
    let mut resume_text = String::new();
    let mut job_text = String::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed upload: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Malformed upload: {e}")))?;

        match (name.as_str(), file_name) {
            ("resume", Some(file_name)) => {
                resume_file = Some(extract_text(&file_name, data).await?)
            }
            ("job", Some(file_name)) => job_file = Some(extract_text(&file_name, data).await?),
            ("resume_text", _) => resume_text = String::from_utf8_lossy(&data).into_owned(),
            ("job_text", _) => job_text = String::from_utf8_lossy(&data).into_owned(),
            _ => {}
        }
    }

    let resume = resume_file.unwrap_or(resume_text);
    let job = job_file.unwrap_or(job_text);

    let analysis = state.analyzer.analyze(&resume, &job).await?;
    Ok(Json(analysis.into()))
}
