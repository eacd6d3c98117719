// Search flow: input validation and the metadata fetch.
//
// One submission means one POST to /api/video-info; the separate
// validate-then-fetch round trip of the old frontend is gone. The local URL
// check applies the same acceptance rules the server uses (watch URLs,
// Shorts, youtu.be short links), so obviously broken input never hits the
// network.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use lazy_static::lazy_static;
use regex::Regex;

use crate::api::client::Backend;
use crate::api::models::ValidateResponse;
use crate::ui::errors::UiError;
use crate::ui::models::VideoInfo;
use crate::ui::proxy::ProxyStatusController;
use crate::ui::state::{UiPhase, UiStore};

lazy_static! {
    static ref WATCH_RE: Regex =
        Regex::new(r"^https?://(www\.)?youtube\.com/watch\?.*\bv=[\w-]{6,}").unwrap();
    static ref SHORTS_RE: Regex =
        Regex::new(r"^https?://(www\.)?youtube\.com/shorts/[\w-]{6,}").unwrap();
    static ref SHORT_LINK_RE: Regex = Regex::new(r"^https?://youtu\.be/[\w-]{6,}").unwrap();
}

/// Quick shape check for input that could be a YouTube video URL.
pub fn is_probable_youtube_url(url: &str) -> bool {
    WATCH_RE.is_match(url) || SHORTS_RE.is_match(url) || SHORT_LINK_RE.is_match(url)
}

/// Optional capability invoked when a search lands in the Result phase
/// (e.g. a visualization plugin). Resolved once at construction, never
/// probed at call time.
pub trait ResultHook: Send + Sync {
    fn on_result(&self, video: &VideoInfo);
}

pub struct SearchController {
    store: Arc<UiStore>,
    backend: Arc<dyn Backend>,
    /// Attached so a proxied metadata response refreshes the Tor panel.
    proxy_panel: Option<Arc<ProxyStatusController>>,
    hook: Option<Arc<dyn ResultHook>>,
    /// Bumped on every submission; responses carrying an older generation
    /// are stale and get dropped without touching the store.
    generation: AtomicU64,
}

impl SearchController {
    pub fn new(
        store: Arc<UiStore>,
        backend: Arc<dyn Backend>,
        proxy_panel: Option<Arc<ProxyStatusController>>,
        hook: Option<Arc<dyn ResultHook>>,
    ) -> Self {
        Self {
            store,
            backend,
            proxy_panel,
            hook,
            generation: AtomicU64::new(0),
        }
    }

    pub async fn submit_search(&self, raw_url: &str) -> Result<(), UiError> {
        let url = raw_url.trim().to_string();
        if url.is_empty() {
            let err = UiError::EmptyInput;
            self.store.apply_error(&err);
            return Err(err);
        }
        if !is_probable_youtube_url(&url) {
            eprintln!("[Search] Rejected non-YouTube input: {}", url);
            let err = UiError::InvalidUrl("Invalid YouTube URL".to_string());
            self.store.apply_error(&err);
            return Err(err);
        }

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.store.update(|s| s.enter(UiPhase::Loading));
        eprintln!("[Search] Fetching metadata for {}", url);

        let outcome = self.backend.video_info(&url).await;

        // A newer search started while this one was in flight; its response
        // owns the UI now.
        if self.generation.load(Ordering::SeqCst) != generation {
            eprintln!("[Search] Discarding stale response for {}", url);
            return Ok(());
        }

        let resp = match outcome {
            Ok(resp) => resp,
            Err(e) => {
                let err =
                    UiError::Transport(format!("Error retrieving video information: {}", e));
                self.store.apply_error(&err);
                return Err(err);
            }
        };

        if resp.success {
            let video = VideoInfo::from_response(&resp, &url);
            let using_proxy = video.using_proxy;
            if let Some(hook) = &self.hook {
                hook.on_result(&video);
            }
            self.store.update(|s| {
                s.enter(UiPhase::Result);
                s.video = Some(video);
            });
            if using_proxy {
                if let Some(panel) = &self.proxy_panel {
                    panel.refresh_status().await;
                }
            }
            return Ok(());
        }

        let err = if resp.rate_limited.unwrap_or(false) {
            UiError::RateLimited {
                message: resp
                    .error
                    .clone()
                    .unwrap_or_else(|| "Too many requests".to_string()),
                details: resp.details.clone(),
                using_proxy: resp.using_tor.unwrap_or(false),
            }
        } else {
            UiError::from_backend_message(
                resp.error
                    .as_deref()
                    .unwrap_or("Error retrieving video information"),
            )
        };
        self.store.apply_error(&err);
        Err(err)
    }

    /// Ask the backend for a validation verdict without fetching metadata.
    /// The main search flow does its own local check plus a single metadata
    /// call; this exists for callers that want the server-side verdict only.
    pub async fn validate(&self, raw_url: &str) -> Result<ValidateResponse, UiError> {
        let url = raw_url.trim();
        if url.is_empty() {
            return Err(UiError::EmptyInput);
        }
        Ok(self.backend.validate_url(url).await?)
    }
}
