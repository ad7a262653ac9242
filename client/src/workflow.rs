//! End-to-end restoration of local files.
//!
//! Paths go through the same stages as in the browser: the collector
//! filters them, the handoff store passes them to the processing step, the
//! orchestrator posts them to the backend.

use std::path::PathBuf;

use tracing::{info, warn};

use pastperfect::{
    resolve_entry, AcceptPolicy, BatchReport, Credits, EnhancementSettings, Entry, HandoffError,
    HandoffManifest, HandoffStore, Orchestrator, ProgressSink, UploadCollector,
};

use crate::config::ClientConfig;
use crate::error::ClientResult;
use crate::files::{candidate_from_path, FilePreviews};
use crate::http::HttpBackend;

/// Input of a restoration job.
#[derive(Clone, Debug)]
pub struct RestoreJob {
    pub paths: Vec<PathBuf>,
    pub policy: AcceptPolicy,
    pub credits: Credits,
    pub settings: EnhancementSettings,
}

impl RestoreJob {
    pub fn new(paths: Vec<PathBuf>, settings: EnhancementSettings) -> Self {
        Self {
            paths,
            policy: AcceptPolicy::photos(),
            credits: Credits::unlimited(),
            settings,
        }
    }
}

/// A path that never made it into the run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkippedFile {
    pub name: String,
    pub reason: String,
}

/// Output of a restoration job.
#[derive(Clone, Debug)]
pub struct JobOutcome {
    pub skipped: Vec<SkippedFile>,
    pub manifest: HandoffManifest,
    pub report: BatchReport,
}

/// Collect, hand off and process `job` against the configured backend.
pub async fn run_job<S>(config: &ClientConfig, job: RestoreJob, sink: &S) -> ClientResult<JobOutcome>
where
    S: ProgressSink + ?Sized,
{
    let mut collector = UploadCollector::new(job.policy, FilePreviews);
    let mut skipped = Vec::new();

    let mut candidates = Vec::with_capacity(job.paths.len());
    for path in &job.paths {
        match candidate_from_path(path) {
            Ok(candidate) => candidates.push(candidate),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Skipping unreadable file");
                skipped.push(SkippedFile {
                    name: path.display().to_string(),
                    reason: e.to_string(),
                });
            }
        }
    }

    let outcome = collector.offer(candidates);
    skipped.extend(outcome.rejected.into_iter().map(|r| SkippedFile {
        name: r.name,
        reason: r.reason.to_string(),
    }));
    info!(accepted = outcome.accepted.len(), skipped = skipped.len(), "Files collected");

    collector.check_submit(&job.credits)?;

    let mut store = HandoffStore::new();
    let run_id = store.submit(collector.into_items(), job.settings);

    let handoff = match resolve_entry(&mut store, Some(&run_id)) {
        Entry::Process(handoff) => handoff,
        Entry::RedirectToUpload => return Err(HandoffError::Missing(run_id.to_string()).into()),
    };
    let manifest = handoff.manifest();

    let orchestrator = Orchestrator::new(HttpBackend::new(config)?, config.processing_options());
    let report = orchestrator.run(&handoff, sink).await;

    Ok(JobOutcome { skipped, manifest, report })
}
