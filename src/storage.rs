use crate::errors::AppError;
use crate::models::AppData;
use std::path::Path;
use tokio::fs;
use tracing::{error, info};

pub async fn load_data(path: &Path) -> AppData {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice::<AppData>(&bytes) {
            Ok(data) => {
                info!("loaded {} records from {}", data.records.len(), path.display());
                data
            }
            Err(err) => {
                error!("failed to parse data file: {err}");
                AppData::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => AppData::default(),
        Err(err) => {
            error!("failed to read data file: {err}");
            AppData::default()
        }
    }
}

/// Writes a sibling temp file first so a crash never leaves a truncated snapshot.
pub async fn persist_data(path: &Path, data: &AppData) -> Result<(), AppError> {
    let payload = serde_json::to_vec_pretty(data).map_err(AppError::internal)?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, payload).await?;
    fs::rename(&tmp, path).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewRecord;
    use crate::store::RecordStore;

    fn temp_path(tag: &str) -> std::path::PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!("exercise_streaks_{tag}_{}.json", std::process::id()));
        path
    }

    #[tokio::test]
    async fn missing_file_loads_empty() {
        let data = load_data(&temp_path("missing")).await;
        assert!(data.records.is_empty());
    }

    #[tokio::test]
    async fn persisted_snapshot_loads_back() {
        let path = temp_path("roundtrip");
        let mut data = AppData::default();
        data.insert_record(NewRecord {
            user_id: 1,
            exercise: "running".to_string(),
            date: "2024-06-01".parse().unwrap(),
            quick_record: true,
            notes: Some("park loop".to_string()),
            created_at: "2024-06-01T07:00:00+09:00".to_string(),
        })
        .unwrap();

        persist_data(&path, &data).await.unwrap();
        let loaded = load_data(&path).await;
        let _ = fs::remove_file(&path).await;

        assert_eq!(loaded.records, data.records);
        assert_eq!(loaded.next_id, 1);
    }

    #[tokio::test]
    async fn corrupt_file_loads_empty() {
        let path = temp_path("corrupt");
        fs::write(&path, b"{not json").await.unwrap();
        let data = load_data(&path).await;
        let _ = fs::remove_file(&path).await;
        assert!(data.records.is_empty());
    }
}
