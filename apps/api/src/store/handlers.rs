//! Axum route handlers for saved analyses.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use tracing::info;

use crate::analysis::normalize::normalize;
use crate::errors::AppError;
use crate::models::analysis::AnalysisResult;
use crate::models::stored::StoredAnalysis;
use crate::session::SessionUser;
use crate::state::AppState;
use crate::store::export::export_csv;
use crate::store::{list_merged, ResultStore};

#[derive(Debug, Deserialize)]
pub struct SaveRequest {
    pub result: AnalysisResult,
    /// `false` keeps the record for this process only.
    #[serde(default = "default_persist")]
    pub persist: bool,
}

fn default_persist() -> bool {
    true
}

fn stores(state: &AppState) -> [&dyn ResultStore; 2] {
    [state.results.as_ref(), state.session_results.as_ref()]
}

/// Locates a record owned by `user` in either store. Records belonging to
/// someone else are reported as absent.
async fn find_owned(
    state: &AppState,
    user: &SessionUser,
    id: &str,
) -> Result<StoredAnalysis, AppError> {
    for store in stores(state) {
        if let Some(record) = store.get(id).await? {
            if record.user_email == user.email {
                return Ok(record);
            }
            break;
        }
    }
    Err(AppError::NotFound(format!("Saved analysis {id} not found")))
}

fn csv_response(body: String, file_name: &str) -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{file_name}\""),
            ),
        ],
        body,
    )
}

/// GET /api/v1/results
pub async fn handle_list_results(
    State(state): State<AppState>,
    user: SessionUser,
) -> Result<Json<Vec<StoredAnalysis>>, AppError> {
    let records = list_merged(&stores(&state), &user.email).await?;
    Ok(Json(records))
}

/// POST /api/v1/results
pub async fn handle_save_result(
    State(state): State<AppState>,
    user: SessionUser,
    Json(request): Json<SaveRequest>,
) -> Result<(StatusCode, Json<StoredAnalysis>), AppError> {
    let result = normalize(request.result);
    let record = if request.persist {
        state.results.save(&result, &user.email).await?
    } else {
        state.session_results.save(&result, &user.email).await?
    };

    info!(id = %record.id, origin = ?record.origin, "Saved analysis");
    Ok((StatusCode::CREATED, Json(record)))
}

/// DELETE /api/v1/results/:id
pub async fn handle_delete_result(
    State(state): State<AppState>,
    user: SessionUser,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    for store in stores(&state) {
        if store.delete_owned(&id, &user.email).await? {
            info!(%id, "Deleted saved analysis");
            return Ok(StatusCode::NO_CONTENT);
        }
    }
    Err(AppError::NotFound(format!("Saved analysis {id} not found")))
}

/// GET /api/v1/results/export
pub async fn handle_export_results(
    State(state): State<AppState>,
    user: SessionUser,
) -> Result<impl IntoResponse, AppError> {
    let records = list_merged(&stores(&state), &user.email).await?;
    let body = export_csv(&records)?;
    Ok(csv_response(body, "ats_analyses.csv"))
}

/// GET /api/v1/results/:id/export
pub async fn handle_export_result(
    State(state): State<AppState>,
    user: SessionUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let record = find_owned(&state, &user, &id).await?;
    let body = export_csv(std::slice::from_ref(&record))?;
    Ok(csv_response(body, &format!("{}.csv", record.id)))
}
