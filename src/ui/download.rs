// Download submission and per-format busy tracking.
//
// Each submission owns exactly one busy flag (its format id); jobs for
// different formats run concurrently without touching each other's state.

use std::sync::Arc;

use crate::api::client::Backend;
use crate::ui::errors::UiError;
use crate::ui::models::{DownloadJob, JobPhase};
use crate::ui::state::UiStore;

pub struct DownloadController {
    store: Arc<UiStore>,
    backend: Arc<dyn Backend>,
}

impl DownloadController {
    pub fn new(store: Arc<UiStore>, backend: Arc<dyn Backend>) -> Self {
        Self { store, backend }
    }

    /// Submit one format for download. The format's control is busy for the
    /// duration of the call and restored on every exit path; the returned
    /// job carries the result URL on success.
    pub async fn submit_download(&self, format_id: &str, source_url: &str) -> DownloadJob {
        let mut job = DownloadJob {
            format_id: format_id.to_string(),
            source_url: source_url.to_string(),
            phase: JobPhase::Pending,
            result_url: None,
        };

        let busy_id = format_id.to_string();
        self.store.update(|s| {
            s.busy_formats.insert(busy_id.clone());
        });
        eprintln!("[Download] Requesting format {} for {}", format_id, source_url);

        match self.backend.download(source_url, format_id).await {
            Ok(resp) if resp.success => {
                job.phase = JobPhase::Succeeded;
                job.result_url = resp.download_url;
                eprintln!("[Download] Ready: {}", job.result_url.as_deref().unwrap_or("?"));
            }
            Ok(resp) => {
                job.phase = JobPhase::Failed;
                let err = if resp.rate_limited.unwrap_or(false) {
                    UiError::RateLimited {
                        message: resp
                            .error
                            .unwrap_or_else(|| "Too many requests".to_string()),
                        details: resp.details,
                        using_proxy: resp.using_tor.unwrap_or(false),
                    }
                } else {
                    UiError::Extraction(
                        resp.error
                            .unwrap_or_else(|| "Error processing download".to_string()),
                    )
                };
                eprintln!("[Download] Failed: {}", err);
                self.store.apply_error(&err);
            }
            Err(e) => {
                job.phase = JobPhase::Failed;
                let err = UiError::Transport(format!("Error processing download: {}", e));
                eprintln!("[Download] Failed: {}", err);
                self.store.apply_error(&err);
            }
        }

        // Busy flag clears no matter how the request ended.
        let done_id = format_id.to_string();
        self.store.update(|s| {
            s.busy_formats.remove(&done_id);
        });
        job
    }
}
