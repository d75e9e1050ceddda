use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::analysis::AnalysisResult;

/// Where a saved analysis lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Origin {
    Persistent,
    SessionOnly,
}

/// An immutable, user-owned snapshot of an analysis. Re-analysis produces a
/// new record; records are never edited in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredAnalysis {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub user_email: String,
    pub origin: Origin,
    #[serde(flatten)]
    pub result: AnalysisResult,
}

/// Orders records newest first. Ties on timestamp fall back to the id so the
/// order is total and stable.
pub fn sort_newest_first(records: &mut [StoredAnalysis]) {
    records.sort_by(|a, b| {
        b.timestamp
            .cmp(&a.timestamp)
            .then_with(|| b.id.cmp(&a.id))
    });
}
