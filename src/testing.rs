// Test support: a scriptable in-memory backend.
//
// Responses are queued per endpoint and popped in order; an exhausted queue
// yields a transport error so a test that forgot to script a call fails
// loudly instead of hanging. The optional gate and echo mode exist for the
// stale-response scenario.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;

use crate::api::client::{Backend, TransportError};
use crate::api::models::{
    DownloadResponse, TorRotateResponse, TorStatusResponse, TorToggleResponse, UpdateResponse,
    ValidateResponse, VideoInfoResponse,
};

type Scripted<T> = Mutex<VecDeque<Result<T, TransportError>>>;

pub struct MockBackend {
    validate_responses: Scripted<ValidateResponse>,
    info_responses: Scripted<VideoInfoResponse>,
    download_responses: Scripted<DownloadResponse>,
    update_responses: Scripted<UpdateResponse>,
    status_responses: Scripted<TorStatusResponse>,
    toggle_responses: Scripted<TorToggleResponse>,
    rotate_responses: Scripted<TorRotateResponse>,

    pub validate_calls: AtomicUsize,
    pub info_calls: AtomicUsize,
    pub download_calls: AtomicUsize,
    pub update_calls: AtomicUsize,
    pub status_calls: AtomicUsize,
    pub toggle_calls: AtomicUsize,
    pub rotate_calls: AtomicUsize,

    /// When set, the next video_info call blocks until notified (the gate is
    /// consumed by that call).
    info_gate: Mutex<Option<Arc<Notify>>>,
    /// When true, video_info answers success with the requested URL echoed
    /// back as the title instead of popping the queue.
    echo_info: AtomicBool,
}

impl MockBackend {
    pub fn new() -> Self {
        Self {
            validate_responses: Mutex::new(VecDeque::new()),
            info_responses: Mutex::new(VecDeque::new()),
            download_responses: Mutex::new(VecDeque::new()),
            update_responses: Mutex::new(VecDeque::new()),
            status_responses: Mutex::new(VecDeque::new()),
            toggle_responses: Mutex::new(VecDeque::new()),
            rotate_responses: Mutex::new(VecDeque::new()),
            validate_calls: AtomicUsize::new(0),
            info_calls: AtomicUsize::new(0),
            download_calls: AtomicUsize::new(0),
            update_calls: AtomicUsize::new(0),
            status_calls: AtomicUsize::new(0),
            toggle_calls: AtomicUsize::new(0),
            rotate_calls: AtomicUsize::new(0),
            info_gate: Mutex::new(None),
            echo_info: AtomicBool::new(false),
        }
    }

    pub fn push_validate(&self, resp: Result<ValidateResponse, TransportError>) {
        self.validate_responses.lock().unwrap().push_back(resp);
    }

    pub fn push_info(&self, resp: Result<VideoInfoResponse, TransportError>) {
        self.info_responses.lock().unwrap().push_back(resp);
    }

    pub fn push_download(&self, resp: Result<DownloadResponse, TransportError>) {
        self.download_responses.lock().unwrap().push_back(resp);
    }

    pub fn push_update(&self, resp: Result<UpdateResponse, TransportError>) {
        self.update_responses.lock().unwrap().push_back(resp);
    }

    pub fn push_status(&self, resp: Result<TorStatusResponse, TransportError>) {
        self.status_responses.lock().unwrap().push_back(resp);
    }

    pub fn push_toggle(&self, resp: Result<TorToggleResponse, TransportError>) {
        self.toggle_responses.lock().unwrap().push_back(resp);
    }

    pub fn push_rotate(&self, resp: Result<TorRotateResponse, TransportError>) {
        self.rotate_responses.lock().unwrap().push_back(resp);
    }

    pub fn set_info_gate(&self, gate: Arc<Notify>) {
        *self.info_gate.lock().unwrap() = Some(gate);
    }

    pub fn set_echo_info(&self, echo: bool) {
        self.echo_info.store(echo, Ordering::SeqCst);
    }

    fn pop<T>(queue: &Scripted<T>) -> Result<T, TransportError> {
        queue
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError("mock: no scripted response".to_string())))
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Backend for MockBackend {
    async fn validate_url(&self, _url: &str) -> Result<ValidateResponse, TransportError> {
        self.validate_calls.fetch_add(1, Ordering::SeqCst);
        Self::pop(&self.validate_responses)
    }

    async fn video_info(&self, url: &str) -> Result<VideoInfoResponse, TransportError> {
        self.info_calls.fetch_add(1, Ordering::SeqCst);

        let gate = self.info_gate.lock().unwrap().take();
        if let Some(gate) = gate {
            gate.notified().await;
        }

        if self.echo_info.load(Ordering::SeqCst) {
            return Ok(VideoInfoResponse {
                success: true,
                title: Some(url.to_string()),
                author: None,
                duration: None,
                views: None,
                thumbnail: None,
                url: Some(url.to_string()),
                formats: Vec::new(),
                using_tor: None,
                tor_ip: None,
                rate_limited: None,
                error: None,
                details: None,
            });
        }
        Self::pop(&self.info_responses)
    }

    async fn download(&self, _url: &str, _format: &str) -> Result<DownloadResponse, TransportError> {
        self.download_calls.fetch_add(1, Ordering::SeqCst);
        Self::pop(&self.download_responses)
    }

    async fn update_downloader(&self) -> Result<UpdateResponse, TransportError> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        Self::pop(&self.update_responses)
    }

    async fn tor_status(&self) -> Result<TorStatusResponse, TransportError> {
        self.status_calls.fetch_add(1, Ordering::SeqCst);
        Self::pop(&self.status_responses)
    }

    async fn tor_toggle(&self, _enable: bool) -> Result<TorToggleResponse, TransportError> {
        self.toggle_calls.fetch_add(1, Ordering::SeqCst);
        Self::pop(&self.toggle_responses)
    }

    async fn tor_rotate(&self) -> Result<TorRotateResponse, TransportError> {
        self.rotate_calls.fetch_add(1, Ordering::SeqCst);
        Self::pop(&self.rotate_responses)
    }
}
