//! JSON run report written after `restore --report`.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use pastperfect::{summary_line, BatchReport, HandoffManifest};

use crate::error::ClientResult;

/// Everything known about one finished run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunRecord {
    pub generated_at: DateTime<Utc>,
    pub api_url: String,
    pub summary: String,
    pub manifest: HandoffManifest,
    pub report: BatchReport,
    /// Files written by the downloader, in result order.
    #[serde(default)]
    pub downloads: Vec<PathBuf>,
}

impl RunRecord {
    pub fn new(api_url: impl Into<String>, manifest: HandoffManifest, report: BatchReport) -> Self {
        Self {
            generated_at: Utc::now(),
            api_url: api_url.into(),
            summary: summary_line(&report),
            manifest,
            report,
            downloads: Vec::new(),
        }
    }

    pub fn with_downloads(mut self, downloads: Vec<PathBuf>) -> Self {
        self.downloads = downloads;
        self
    }

    pub fn write(&self, path: &Path) -> ClientResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn read(path: &Path) -> ClientResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pastperfect::{EnhancementSettings, FailedItem, Handoff, ItemId, PendingItem, ProcessedResult};
    use tempfile::TempDir;

    #[test]
    fn test_write_and_read_back() {
        let item = PendingItem {
            id: ItemId::from("a"),
            payload: PathBuf::from("a.jpg"),
            preview_url: "file:///a.jpg".into(),
            original_name: "a.jpg".into(),
            size_bytes: 10,
            mime_type: "image/jpeg".into(),
        };
        let failed_item = PendingItem {
            id: ItemId::from("b"),
            original_name: "b.jpg".into(),
            ..item.clone()
        };
        let handoff = Handoff::new(vec![item, failed_item], EnhancementSettings::default());

        let report = BatchReport {
            run_id: Some(handoff.run_id.clone()),
            total: 2,
            results: vec![ProcessedResult {
                id: ItemId::from("a"),
                original_reference: "file:///a.jpg".into(),
                restored_reference: "data:image/jpeg;base64,YQ==".into(),
                original_name: "a.jpg".into(),
                elapsed_seconds: 1.5,
                applied_improvements: vec!["Enhanced sharpness".into()],
            }],
            failures: vec![FailedItem {
                id: ItemId::from("b"),
                original_name: "b.jpg".into(),
                reason: "HTTP 500".into(),
                attempts: 2,
            }],
        };

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("reports").join("run.json");
        let record = RunRecord::new("http://localhost:8000", handoff.manifest(), report)
            .with_downloads(vec![dir.path().join("restored_a.jpg")]);
        record.write(&path).unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"generatedAt\""));
        assert!(raw.contains("\"appliedImprovements\""));

        let back = RunRecord::read(&path).unwrap();
        assert_eq!(back, record);
        assert_eq!(back.summary, "1 of 2 photos restored, 1 failed");
    }
}
