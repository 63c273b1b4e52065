use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use chrono::Utc;
use serde_json::Value;
use std::fs::File;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use super::types::{CalculationLog, CalculationRecord};
use crate::catalog::SystemId;

const LOG_VERSION: u32 = 1;

/// Get the default calculation log path (~/.config/medscore/calculations.json)
pub fn default_log_path() -> PathBuf {
    crate::config::get_config_dir().join("calculations.json")
}

/// Load the calculation log from a JSON file.
///
/// If the file doesn't exist, returns a new empty log.
/// If the file exists but has an unsupported version, returns an error.
pub fn load_log(path: &Path) -> Result<CalculationLog> {
    if !path.exists() {
        return Ok(CalculationLog::new());
    }

    let file = File::open(path)
        .with_context(|| format!("Failed to open calculation log at {}", path.display()))?;

    let log: CalculationLog =
        serde_json::from_reader(file).context("Failed to load calculation log")?;

    if log.version != LOG_VERSION {
        anyhow::bail!("Unsupported calculation log version: {}", log.version);
    }

    Ok(log)
}

/// Save the calculation log to a JSON file atomically.
///
/// Uses atomic-write-file so the log is never left in a corrupted state.
/// Creates the parent directory if it doesn't exist.
pub fn save_log(path: &Path, log: &CalculationLog) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;

    serde_json::to_writer_pretty(&mut file, log).context("Failed to serialize calculation log")?;

    file.commit().context("Failed to save calculation log")?;

    Ok(())
}

/// Append a calculation to the log at `path` and return the stored record.
///
/// The record gets a fresh UUID and the current timestamp. Load, prepend
/// and save run in one pass, so a failure leaves the existing file intact.
pub fn append_calculation(
    path: &Path,
    system_id: SystemId,
    input_parameters: Value,
    result: Value,
) -> Result<CalculationRecord> {
    let mut log = load_log(path)?;
    let record = CalculationRecord {
        id: Uuid::new_v4().to_string(),
        system_id,
        input_parameters,
        result,
        created_at: Utc::now(),
    };
    log.prepend(record.clone());
    save_log(path, &log)?;
    Ok(record)
}

/// The most recent `limit` records from the log at `path`, newest first.
pub fn recent_calculations(path: &Path, limit: usize) -> Result<Vec<CalculationRecord>> {
    let log = load_log(path)?;
    Ok(log.recent(limit).to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::env;

    #[test]
    fn test_load_missing_file_returns_empty() {
        let temp_path = env::temp_dir().join("medscore_test_missing.json");
        let _ = std::fs::remove_file(&temp_path);

        let log = load_log(&temp_path).unwrap();
        assert_eq!(log.version, 1);
        assert!(log.records.is_empty());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let temp_path = env::temp_dir().join("medscore_test_roundtrip.json");
        let _ = std::fs::remove_file(&temp_path);

        let mut log = CalculationLog::new();
        log.prepend(CalculationRecord {
            id: "11111111-1111-1111-1111-111111111111".to_string(),
            system_id: SystemId::ChildPugh,
            input_parameters: json!({ "bilirubin": 1.0 }),
            result: json!({ "total_score": 5 }),
            created_at: Utc::now(),
        });

        save_log(&temp_path, &log).unwrap();
        let loaded = load_log(&temp_path).unwrap();

        assert_eq!(loaded.version, 1);
        assert_eq!(loaded.records.len(), 1);
        assert_eq!(loaded.records[0].system_id, SystemId::ChildPugh);

        let _ = std::fs::remove_file(&temp_path);
    }

    #[test]
    fn test_unsupported_version_is_rejected() {
        let temp_path = env::temp_dir().join("medscore_test_version.json");
        std::fs::write(&temp_path, "{\"version\":2,\"records\":[]}").unwrap();

        let error = load_log(&temp_path).unwrap_err();
        assert!(error.to_string().contains("version"));

        let _ = std::fs::remove_file(&temp_path);
    }

    #[test]
    fn test_append_assigns_id_and_prepends() {
        let temp_path = env::temp_dir().join("medscore_test_append.json");
        let _ = std::fs::remove_file(&temp_path);

        let first = append_calculation(
            &temp_path,
            SystemId::Meld,
            json!({ "bilirubin": 2.0, "inr": 1.5, "creatinine": 1.2 }),
            json!({ "total_score": 14 }),
        )
        .unwrap();
        let second = append_calculation(
            &temp_path,
            SystemId::Sofa,
            json!({ "pao2fio2": 320.0 }),
            json!({ "total_score": 3 }),
        )
        .unwrap();

        assert!(!first.id.is_empty());
        assert_ne!(first.id, second.id);

        let log = load_log(&temp_path).unwrap();
        assert_eq!(log.records.len(), 2);
        assert_eq!(log.records[0].id, second.id);
        assert_eq!(log.records[0].system_id, SystemId::Sofa);
        assert_eq!(log.records[1].id, first.id);

        let _ = std::fs::remove_file(&temp_path);
    }

    #[test]
    fn test_recent_calculations_respects_limit() {
        let temp_path = env::temp_dir().join("medscore_test_recent.json");
        let _ = std::fs::remove_file(&temp_path);

        for score in 0..5 {
            append_calculation(
                &temp_path,
                SystemId::WellsDvt,
                json!({ "active_cancer": false }),
                json!({ "total_score": score }),
            )
            .unwrap();
        }

        let recent = recent_calculations(&temp_path, 3).unwrap();
        assert_eq!(recent.len(), 3);
        assert_eq!(recent[0].result["total_score"], json!(4));

        let _ = std::fs::remove_file(&temp_path);
    }

    #[test]
    fn test_corrupt_file_returns_error() {
        let temp_path = env::temp_dir().join("medscore_test_corrupt.json");
        std::fs::write(&temp_path, "not json").unwrap();

        assert!(load_log(&temp_path).is_err());

        let _ = std::fs::remove_file(&temp_path);
    }
}
