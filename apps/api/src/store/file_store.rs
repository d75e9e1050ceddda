use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::io::AsyncWriteExt;
use tracing::{info, warn};

use crate::models::analysis::AnalysisResult;
use crate::models::stored::{sort_newest_first, Origin, StoredAnalysis};
use crate::store::{is_valid_record_id, ResultStore, StorageError};

/// Upper bound on the same-second collision counter.
const MAX_SUFFIX: u32 = 1000;

/// One pretty-printed JSON file per record:
/// `analysis_<email>_<YYYYmmdd_HHMMSS>_<nnn>.json`.
///
/// Files are created with create-new semantics; a name collision bumps the
/// `nnn` counter instead of overwriting.
pub struct FileResultStore {
    dir: PathBuf,
}

impl FileResultStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, id: &str) -> PathBuf {
        self.dir.join(format!("{id}.json"))
    }

    /// Saves with an explicit timestamp. `save` uses the current time.
    pub async fn save_at(
        &self,
        result: &AnalysisResult,
        user_email: &str,
        timestamp: DateTime<Utc>,
    ) -> Result<StoredAnalysis, StorageError> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let base = format!(
            "analysis_{}_{}",
            sanitize_email(user_email),
            timestamp.format("%Y%m%d_%H%M%S")
        );

        for suffix in 0..MAX_SUFFIX {
            let id = format!("{base}_{suffix:03}");
            let record = StoredAnalysis {
                id: id.clone(),
                timestamp,
                user_email: user_email.to_string(),
                origin: Origin::Persistent,
                result: result.clone(),
            };

            let body = serde_json::to_vec_pretty(&record)?;
            let path = self.path_for(&id);

            let file = tokio::fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await;

            let file = match file {
                Ok(f) => f,
                Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
                Err(e) => return Err(e.into()),
            };

            if let Err(e) = write_body(file, &body).await {
                // A failed write must not leave a partial record behind
                if let Err(cleanup) = tokio::fs::remove_file(&path).await {
                    warn!("Could not remove partial record {id}: {cleanup}");
                }
                return Err(e.into());
            }

            info!("Saved analysis {id} for {user_email}");
            return Ok(record);
        }

        Err(StorageError::NameExhausted(base))
    }

    async fn read_record(path: &Path) -> Result<StoredAnalysis, StorageError> {
        let bytes = tokio::fs::read(path).await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

async fn write_body(mut file: tokio::fs::File, body: &[u8]) -> std::io::Result<()> {
    file.write_all(body).await?;
    file.flush().await?;
    file.sync_all().await
}

#[async_trait]
impl ResultStore for FileResultStore {
    async fn save(
        &self,
        result: &AnalysisResult,
        user_email: &str,
    ) -> Result<StoredAnalysis, StorageError> {
        self.save_at(result, user_email, Utc::now()).await
    }

    async fn list(&self, user_email: &str) -> Result<Vec<StoredAnalysis>, StorageError> {
        let mut entries = match tokio::fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(vec![]),
            Err(e) => return Err(e.into()),
        };

        let prefix = format!("analysis_{}_", sanitize_email(user_email));
        let mut records = Vec::new();

        while let Some(entry) = entries.next_entry().await? {
            let name = entry.file_name();
            let Some(name) = name.to_str() else { continue };
            if !name.starts_with(&prefix) || !name.ends_with(".json") {
                continue;
            }

            match Self::read_record(&entry.path()).await {
                // Filename prefix is only a hint; ownership is the stored email
                Ok(record) if record.user_email == user_email => records.push(record),
                Ok(_) => {}
                Err(e) => warn!("Skipping unreadable record {name}: {e}"),
            }
        }

        sort_newest_first(&mut records);
        Ok(records)
    }

    async fn get(&self, id: &str) -> Result<Option<StoredAnalysis>, StorageError> {
        if !is_valid_record_id(id) {
            return Ok(None);
        }
        match Self::read_record(&self.path_for(id)).await {
            Ok(record) => Ok(Some(record)),
            Err(StorageError::Io(e)) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(StorageError::Serialization(e)) => {
                warn!("Record {id} is unreadable: {e}");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    async fn delete(&self, id: &str) -> Result<bool, StorageError> {
        if !is_valid_record_id(id) {
            return Ok(false);
        }
        match tokio::fs::remove_file(self.path_for(id)).await {
            Ok(()) => {
                info!("Deleted analysis {id}");
                Ok(true)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    async fn delete_owned(&self, id: &str, user_email: &str) -> Result<bool, StorageError> {
        match self.get(id).await? {
            Some(record) if record.user_email == user_email => self.delete(id).await,
            Some(_) => Ok(false),
            // Unreadable leftovers can only be matched to an owner by name
            None if is_named_for(id, user_email) => self.delete(id).await,
            None => Ok(false),
        }
    }
}

/// True when `id` has the exact shape of a record name saved for `user_email`:
/// `analysis_<email>_<YYYYmmdd>_<HHMMSS>_<nnn>`.
fn is_named_for(id: &str, user_email: &str) -> bool {
    let prefix = format!("analysis_{}_", sanitize_email(user_email));
    let Some(rest) = id.strip_prefix(&prefix) else {
        return false;
    };
    let parts: Vec<&str> = rest.split('_').collect();
    matches!(
        parts.as_slice(),
        [date, time, counter]
            if date.len() == 8
                && time.len() == 6
                && !counter.is_empty()
                && [date, time, counter]
                    .iter()
                    .all(|p| p.chars().all(|c| c.is_ascii_digit()))
    )
}

/// Maps an email onto the record-id alphabet.
fn sanitize_email(email: &str) -> String {
    email
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '@' | '.' | '-' | '+') {
                c
            } else {
                '_'
            }
        })
        .collect::<String>()
        .replace("..", "__")
}
