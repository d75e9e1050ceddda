use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::learning::{Video, DEFAULT_MAX_RESULTS, SKILLS_PER_ANALYSIS};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LearningRequest {
    pub missing_skills: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct SkillVideos {
    pub skill: String,
    pub videos: Vec<Video>,
}

/// GET /api/v1/learning/:skill
pub async fn handle_skill_videos(
    State(state): State<AppState>,
    Path(skill): Path<String>,
) -> Result<Json<Vec<Video>>, AppError> {
    let skill = skill.trim();
    if skill.is_empty() {
        return Err(AppError::Validation("Skill must not be empty".to_string()));
    }
    Ok(Json(state.videos.recommend(skill, DEFAULT_MAX_RESULTS).await))
}

/// POST /api/v1/learning
///
/// Videos for the first few missing skills of an analysis, in order.
pub async fn handle_learning_for_missing(
    State(state): State<AppState>,
    Json(request): Json<LearningRequest>,
) -> Result<Json<Vec<SkillVideos>>, AppError> {
    let mut groups = Vec::new();
    for skill in request
        .missing_skills
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .take(SKILLS_PER_ANALYSIS)
    {
        groups.push(SkillVideos {
            skill: skill.to_string(),
            videos: state.videos.recommend(skill, DEFAULT_MAX_RESULTS).await,
        });
    }
    Ok(Json(groups))
}
