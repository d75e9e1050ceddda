//! Saved-analysis storage.
//!
//! Two backends share the `ResultStore` contract:
//! - `FileResultStore`: persistent, one JSON file per record
//! - `SessionStore`: in-memory, lives as long as the process (session-only records)
//!
//! Both are append-only. Ownership is enforced by filtering on `user_email`
//! at query time.

pub mod export;
pub mod file_store;
pub mod handlers;
pub mod session;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::analysis::AnalysisResult;
use crate::models::stored::{sort_newest_first, StoredAnalysis};

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("record serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV export produced invalid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),

    #[error("no free record name for {0}")]
    NameExhausted(String),
}

#[async_trait]
pub trait ResultStore: Send + Sync {
    /// Appends a new record. Never overwrites an existing one.
    async fn save(
        &self,
        result: &AnalysisResult,
        user_email: &str,
    ) -> Result<StoredAnalysis, StorageError>;

    /// All records owned by `user_email`, newest first.
    async fn list(&self, user_email: &str) -> Result<Vec<StoredAnalysis>, StorageError>;

    async fn get(&self, id: &str) -> Result<Option<StoredAnalysis>, StorageError>;

    /// Returns `false` when no such record exists.
    async fn delete(&self, id: &str) -> Result<bool, StorageError>;

    /// Deletes `id` only if it belongs to `user_email`. Records owned by
    /// someone else are reported as absent.
    async fn delete_owned(&self, id: &str, user_email: &str) -> Result<bool, StorageError> {
        match self.get(id).await? {
            Some(record) if record.user_email == user_email => self.delete(id).await,
            _ => Ok(false),
        }
    }
}

/// Merges the listings of several stores, newest first.
pub async fn list_merged(
    stores: &[&dyn ResultStore],
    user_email: &str,
) -> Result<Vec<StoredAnalysis>, StorageError> {
    let mut records = Vec::new();
    for store in stores {
        records.extend(store.list(user_email).await?);
    }
    sort_newest_first(&mut records);
    Ok(records)
}

/// Record ids double as file stems, so they are limited to a safe alphabet.
pub fn is_valid_record_id(id: &str) -> bool {
    !id.is_empty()
        && !id.contains("..")
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '@' | '.' | '_' | '-' | '+'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::file_store::FileResultStore;
    use crate::store::session::SessionStore;

    fn result(score: u32) -> AnalysisResult {
        AnalysisResult {
            ats_score: score,
            matched_skills: vec!["Python".to_string()],
            missing_skills: vec!["AWS".to_string()],
            summary: "Summary.".to_string(),
            experience_match: "Experience".to_string(),
            education_match: "Education".to_string(),
            recommendations: vec![],
        }
    }

    #[test]
    fn test_record_id_validation() {
        assert!(is_valid_record_id("analysis_ada@example.com_20240101_120000_000"));
        assert!(is_valid_record_id("session_0b7c"));
        assert!(!is_valid_record_id(""));
        assert!(!is_valid_record_id("../etc/passwd"));
        assert!(!is_valid_record_id("a/b"));
        assert!(!is_valid_record_id("a\\b"));
        assert!(!is_valid_record_id(".."));
    }

    #[tokio::test]
    async fn test_list_merged_spans_both_stores_newest_first() {
        let dir = tempfile::tempdir().unwrap();
        let files = FileResultStore::new(dir.path().to_path_buf());
        let session = SessionStore::default();

        let persisted = files.save(&result(40), "ada@example.com").await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        let transient = session.save(&result(70), "ada@example.com").await.unwrap();
        session.save(&result(90), "bob@example.com").await.unwrap();

        let stores: [&dyn ResultStore; 2] = [&files, &session];
        let merged = list_merged(&stores, "ada@example.com").await.unwrap();
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].id, transient.id);
        assert_eq!(merged[1].id, persisted.id);
    }
}
