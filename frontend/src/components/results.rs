//! Results of a finished run.

use leptos::*;
use pastperfect::{download_file_name, summary_line, BatchReport, ProcessedResult, SharePlatform};

use crate::components::{ComparisonSlider, ShareButtons};
use crate::services::{download_all, trigger_download};

const BATCH_PLATFORMS: [SharePlatform; 3] = [
    SharePlatform::Facebook,
    SharePlatform::Twitter,
    SharePlatform::Instagram,
];

#[component]
pub fn ResultsSection(report: BatchReport) -> impl IntoView {
    let summary = summary_line(&report);
    let results = store_value(report.results);
    let failures = report.failures;

    let on_download_all = move |_| {
        results.with_value(|results| {
            log::info!("⬇️ Downloading {} restored photo(s)", results.len());
            download_all(results);
        });
    };

    view! {
        <section class="results-section">
            <div class="results-header">
                <div>
                    <h2>"Your Restored Photos"</h2>
                    <p class="results-summary">{summary}</p>
                </div>
                <div class="results-actions">
                    <ShareButtons platforms=BATCH_PLATFORMS.to_vec()/>
                    <button type="button" class="btn btn-primary" on:click=on_download_all>
                        "⬇️ Download All"
                    </button>
                </div>
            </div>

            {(!failures.is_empty()).then(|| view! {
                <div class="failures">
                    {failures
                        .into_iter()
                        .map(|f| view! {
                            <span class="failure-chip" title=f.reason.clone()>
                                "❌ " {f.original_name} ": " {f.reason}
                            </span>
                        })
                        .collect_view()}
                </div>
            })}

            <div class="result-list">
                {results.get_value().into_iter().map(|result| view! { <ResultCard result=result/> }).collect_view()}
            </div>
        </section>
    }
}

#[component]
fn ResultCard(result: ProcessedResult) -> impl IntoView {
    let file_name = download_file_name(&result);
    let href = result.restored_reference.clone();
    let improvements = result.applied_improvements.len();

    let on_download = move |_| {
        if let Err(e) = trigger_download(&href, &file_name) {
            log::error!("❌ {}", e);
        }
    };

    view! {
        <article class="card result-card">
            <div class="result-header">
                <div class="result-title">
                    <h3>{result.original_name.clone()}</h3>
                    <div class="result-meta">
                        <span>"⏱️ " {format!("{:.1}s", result.elapsed_seconds)}</span>
                        <span>"⚡ " {format!("{} improvements", improvements)}</span>
                    </div>
                </div>
                <button type="button" class="btn btn-secondary" on:click=on_download>
                    "⬇️ Download"
                </button>
            </div>

            <div class="improvements">
                {result
                    .applied_improvements
                    .iter()
                    .map(|label| view! { <span class="improvement-chip">{label.clone()}</span> })
                    .collect_view()}
            </div>

            <ComparisonSlider
                original=result.original_reference.clone()
                restored=result.restored_reference.clone()
                name=result.original_name.clone()
            />

            <ShareButtons file_name=result.original_name.clone()/>
        </article>
    }
}
