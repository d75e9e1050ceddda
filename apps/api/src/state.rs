use std::sync::Arc;

use crate::analysis::analyzer::MatchAnalyzer;
use crate::learning::VideoRecommender;
use crate::store::file_store::FileResultStore;
use crate::store::session::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
/// Per-user data lives in the stores, keyed by the request's `SessionUser`.
#[derive(Clone)]
pub struct AppState {
    pub analyzer: MatchAnalyzer,
    /// Persistent saved analyses.
    pub results: Arc<FileResultStore>,
    /// Session-only saved analyses.
    pub session_results: Arc<SessionStore>,
    pub videos: VideoRecommender,
}
