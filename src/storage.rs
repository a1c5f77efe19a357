use crate::models::Snapshot;
use std::path::Path;
use tokio::fs;
use tracing::{error, info, warn};

/// Reads the record snapshot. A missing or unreadable file yields an empty
/// snapshot so the dashboard still starts.
pub async fn load_snapshot(path: &Path) -> Snapshot {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice::<Snapshot>(&bytes) {
            Ok(snapshot) => {
                let rows: usize = snapshot.tables.values().map(Vec::len).sum();
                info!(
                    tables = snapshot.tables.len(),
                    rows,
                    "loaded snapshot from {}",
                    path.display()
                );
                snapshot
            }
            Err(err) => {
                error!("failed to parse snapshot file: {err}");
                Snapshot::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            warn!("snapshot file {} not found; starting empty", path.display());
            Snapshot::default()
        }
        Err(err) => {
            error!("failed to read snapshot file: {err}");
            Snapshot::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> std::path::PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!("flag_dashboard_{}_{name}", std::process::id()));
        path
    }

    #[tokio::test]
    async fn missing_file_is_empty() {
        let snapshot = load_snapshot(&temp_path("missing.json")).await;
        assert!(snapshot.tables.is_empty());
    }

    #[tokio::test]
    async fn corrupt_file_is_empty() {
        let path = temp_path("corrupt.json");
        fs::write(&path, b"{ not json").await.unwrap();
        let snapshot = load_snapshot(&path).await;
        assert!(snapshot.tables.is_empty());
        let _ = fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn accepts_camel_case_flag_type() {
        let path = temp_path("camel.json");
        let body = r#"{"tables":{"flags":[{"id":1,"timestamp":"2024-06-01T12:00:00","flagType":"Red Flag"}]}}"#;
        fs::write(&path, body).await.unwrap();
        let snapshot = load_snapshot(&path).await;
        assert_eq!(snapshot.tables["flags"][0].flag_type, "Red Flag");
        let _ = fs::remove_file(&path).await;
    }
}
