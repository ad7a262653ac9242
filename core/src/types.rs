//! Common types shared by every stage of the workflow.
//!
//! # Categories
//!
//! - **Identifiers** - [`ItemId`], [`RunId`]
//! - **Input Types** - [`FileCandidate`], [`PendingItem`]
//! - **Output Types** - [`ProcessedResult`], [`FailedItem`], [`BatchReport`]

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// =============================================================================
// Identifiers
// =============================================================================

/// Opaque identifier of one collected file.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    /// Fresh random identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Identifier of one handoff / processing run.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunId(String);

impl RunId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RunId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

// =============================================================================
// Input Types
// =============================================================================

/// A file offered to the collector (dropped or picked), not yet accepted.
///
/// `P` is the platform's handle to the binary content.
#[derive(Clone, Debug)]
pub struct FileCandidate<P> {
    pub payload: P,
    pub name: String,
    pub size_bytes: u64,
    /// Browser-reported or guessed MIME type; may be empty.
    pub mime_type: String,
}

impl<P> FileCandidate<P> {
    pub fn new(payload: P, name: impl Into<String>, size_bytes: u64, mime_type: impl Into<String>) -> Self {
        Self {
            payload,
            name: name.into(),
            size_bytes,
            mime_type: mime_type.into(),
        }
    }

    /// Lowercased extension of the file name, without the dot.
    pub fn extension(&self) -> Option<String> {
        let (stem, ext) = self.name.rsplit_once('.')?;
        if stem.is_empty() || ext.is_empty() {
            return None;
        }
        Some(ext.to_ascii_lowercase())
    }
}

/// A collected file awaiting restoration.
#[derive(Clone, Debug)]
pub struct PendingItem<P> {
    pub id: ItemId,
    pub payload: P,
    /// Local preview reference (object URL in the browser, `file://` natively).
    pub preview_url: String,
    pub original_name: String,
    pub size_bytes: u64,
    pub mime_type: String,
}

// =============================================================================
// Output Types
// =============================================================================

/// One successful remote restoration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedResult {
    pub id: ItemId,
    /// Echoed original from the backend, or the local preview.
    pub original_reference: String,
    /// URL or `data:` URL of the restored image.
    pub restored_reference: String,
    pub original_name: String,
    pub elapsed_seconds: f64,
    pub applied_improvements: Vec<String>,
}

/// One item whose remote restoration did not succeed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FailedItem {
    pub id: ItemId,
    pub original_name: String,
    pub reason: String,
    pub attempts: u32,
}

/// Terminal output of a processing run.
///
/// `results` and `failures` are both in submission order, and together they
/// account for every handed-off item exactly once.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchReport {
    pub run_id: Option<RunId>,
    pub total: usize,
    pub results: Vec<ProcessedResult>,
    pub failures: Vec<FailedItem>,
}

impl BatchReport {
    /// Number of items accounted for so far.
    pub fn processed(&self) -> usize {
        self.results.len() + self.failures.len()
    }

    pub fn is_complete(&self) -> bool {
        self.processed() == self.total
    }

    pub fn all_succeeded(&self) -> bool {
        self.failures.is_empty() && self.results.len() == self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_ids_are_unique() {
        let a = ItemId::new();
        let b = ItemId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn test_candidate_extension() {
        let c = FileCandidate::new((), "Grandma.JPG", 10, "");
        assert_eq!(c.extension().as_deref(), Some("jpg"));

        let c = FileCandidate::new((), ".hidden", 10, "");
        assert_eq!(c.extension(), None);

        let c = FileCandidate::new((), "noext", 10, "");
        assert_eq!(c.extension(), None);
    }

    #[test]
    fn test_result_serializes_camel_case() {
        let result = ProcessedResult {
            id: ItemId::from("abc"),
            original_reference: "blob:1".into(),
            restored_reference: "https://cdn/1.png".into(),
            original_name: "1.png".into(),
            elapsed_seconds: 1.5,
            applied_improvements: vec!["Reduced noise".into()],
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["id"], "abc");
        assert_eq!(json["restoredReference"], "https://cdn/1.png");
        assert_eq!(json["appliedImprovements"][0], "Reduced noise");
    }
}
