use crate::models::stored::StoredAnalysis;
use crate::store::StorageError;

pub const CSV_HEADERS: [&str; 9] = [
    "Timestamp",
    "ATS Score",
    "Matched Skills Count",
    "Missing Skills Count",
    "Matched Skills",
    "Missing Skills",
    "Summary",
    "Experience Match",
    "Education Match",
];

const SKILL_SEPARATOR: &str = ", ";

/// Flattens saved analyses into CSV, one row per record.
pub fn export_csv(records: &[StoredAnalysis]) -> Result<String, StorageError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(CSV_HEADERS)?;

    for record in records {
        let result = &record.result;
        writer.write_record([
            record.timestamp.to_rfc3339(),
            result.ats_score.to_string(),
            result.matched_skills.len().to_string(),
            result.missing_skills.len().to_string(),
            result.matched_skills.join(SKILL_SEPARATOR),
            result.missing_skills.join(SKILL_SEPARATOR),
            result.summary.clone(),
            result.experience_match.clone(),
            result.education_match.clone(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| StorageError::Io(e.into_error()))?;
    Ok(String::from_utf8(bytes)?)
}
