use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::models::analysis::AnalysisResult;
use crate::models::stored::{sort_newest_first, Origin, StoredAnalysis};
use crate::store::{ResultStore, StorageError};

/// Per-user limit on session-only records; saving past it evicts the oldest.
pub const MAX_RECORDS_PER_USER: usize = 50;

/// Session-only saved analyses, keyed by user email. Nothing survives a restart.
#[derive(Default)]
pub struct SessionStore {
    records: RwLock<HashMap<String, Vec<StoredAnalysis>>>,
}

#[async_trait]
impl ResultStore for SessionStore {
    async fn save(
        &self,
        result: &AnalysisResult,
        user_email: &str,
    ) -> Result<StoredAnalysis, StorageError> {
        let record = StoredAnalysis {
            id: format!("session_{}", Uuid::new_v4().simple()),
            timestamp: Utc::now(),
            user_email: user_email.to_string(),
            origin: Origin::SessionOnly,
            result: result.clone(),
        };

        let mut records = self.records.write().await;
        let user_records = records.entry(user_email.to_string()).or_default();
        user_records.push(record.clone());
        if user_records.len() > MAX_RECORDS_PER_USER {
            let evicted = user_records.len() - MAX_RECORDS_PER_USER;
            user_records.drain(..evicted);
            debug!("Evicted {evicted} session-only record(s) for {user_email}");
        }

        Ok(record)
    }

    async fn list(&self, user_email: &str) -> Result<Vec<StoredAnalysis>, StorageError> {
        let mut records = self
            .records
            .read()
            .await
            .get(user_email)
            .cloned()
            .unwrap_or_default();
        sort_newest_first(&mut records);
        Ok(records)
    }

    async fn get(&self, id: &str) -> Result<Option<StoredAnalysis>, StorageError> {
        Ok(self
            .records
            .read()
            .await
            .values()
            .flatten()
            .find(|r| r.id == id)
            .cloned())
    }

    async fn delete(&self, id: &str) -> Result<bool, StorageError> {
        let mut records = self.records.write().await;
        for user_records in records.values_mut() {
            if let Some(pos) = user_records.iter().position(|r| r.id == id) {
                user_records.remove(pos);
                return Ok(true);
            }
        }
        Ok(false)
    }
}
