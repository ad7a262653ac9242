//! One-shot handoff of collected files and settings from the upload view to
//! the processing view.
//!
//! Binary handles stay in memory, keyed by [`RunId`]; only the run id travels
//! through navigation. A handoff can be taken exactly once.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::HandoffError;
use crate::settings::EnhancementSettings;
use crate::types::{ItemId, PendingItem, RunId};

/// Files and settings of one run.
#[derive(Clone, Debug)]
pub struct Handoff<P> {
    pub run_id: RunId,
    pub items: Vec<PendingItem<P>>,
    pub settings: EnhancementSettings,
}

impl<P> Handoff<P> {
    pub fn new(items: Vec<PendingItem<P>>, settings: EnhancementSettings) -> Self {
        Self {
            run_id: RunId::new(),
            items,
            settings,
        }
    }

    pub fn total_bytes(&self) -> u64 {
        self.items.iter().map(|item| item.size_bytes).sum()
    }

    /// Binary-free summary, safe to log or serialize.
    pub fn manifest(&self) -> HandoffManifest {
        HandoffManifest {
            run_id: self.run_id.clone(),
            settings: self.settings,
            items: self
                .items
                .iter()
                .map(|item| ManifestEntry {
                    id: item.id.clone(),
                    original_name: item.original_name.clone(),
                    size_bytes: item.size_bytes,
                    mime_type: item.mime_type.clone(),
                })
                .collect(),
        }
    }
}

/// Serializable description of a handoff.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandoffManifest {
    pub run_id: RunId,
    pub settings: EnhancementSettings,
    pub items: Vec<ManifestEntry>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestEntry {
    pub id: ItemId,
    pub original_name: String,
    pub size_bytes: u64,
    pub mime_type: String,
}

/// Single-writer / single-reader store of pending runs.
#[derive(Debug)]
pub struct HandoffStore<P> {
    pending: HashMap<RunId, Handoff<P>>,
}

impl<P> Default for HandoffStore<P> {
    fn default() -> Self {
        Self { pending: HashMap::new() }
    }
}

impl<P> HandoffStore<P> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a snapshot of the collected files and settings.
    pub fn submit(&mut self, items: Vec<PendingItem<P>>, settings: EnhancementSettings) -> RunId {
        let handoff = Handoff::new(items, settings);
        let run_id = handoff.run_id.clone();
        log::info!("Handoff {} ready ({} files)", run_id, handoff.items.len());
        self.pending.insert(run_id.clone(), handoff);
        run_id
    }

    /// Read a handoff once. Later calls for the same id return `None`.
    pub fn take(&mut self, run_id: &RunId) -> Option<Handoff<P>> {
        self.pending.remove(run_id)
    }

    /// Like [`take`](Self::take), as a `Result`.
    pub fn try_take(&mut self, run_id: &RunId) -> Result<Handoff<P>, HandoffError> {
        self.take(run_id)
            .ok_or_else(|| HandoffError::Missing(run_id.to_string()))
    }

    pub fn contains(&self, run_id: &RunId) -> bool {
        self.pending.contains_key(run_id)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

/// What the processing view does when it is entered.
#[derive(Debug)]
pub enum Entry<P> {
    /// Start processing this run.
    Process(Handoff<P>),
    /// No handoff: go back to the upload view without any network call.
    RedirectToUpload,
}

/// Decide how the processing view starts, consuming the handoff if present.
pub fn resolve_entry<P>(store: &mut HandoffStore<P>, run_id: Option<&RunId>) -> Entry<P> {
    match run_id.and_then(|id| store.take(id)) {
        Some(handoff) => Entry::Process(handoff),
        None => {
            log::info!("No pending run, redirecting to upload");
            Entry::RedirectToUpload
        }
    }
}
