// Application wiring: store + transport + controllers.

use std::sync::{Arc, Mutex};

use tokio::task::JoinHandle;

use crate::api::client::{Backend, HttpClient, TransportError};
use crate::config::ClientConfig;
use crate::ui::download::DownloadController;
use crate::ui::errors::UiError;
use crate::ui::proxy::ProxyStatusController;
use crate::ui::search::{ResultHook, SearchController};
use crate::ui::state::{UiState, UiStore};

pub struct App {
    store: Arc<UiStore>,
    backend: Arc<dyn Backend>,
    pub search: Arc<SearchController>,
    pub downloads: Arc<DownloadController>,
    pub tor: Arc<ProxyStatusController>,
    poll_handle: Mutex<Option<JoinHandle<()>>>,
}

impl App {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self::with_result_hook(backend, None)
    }

    /// Wire the controllers, optionally attaching a result hook. Capabilities
    /// are resolved here, once, instead of probed at call time.
    pub fn with_result_hook(backend: Arc<dyn Backend>, hook: Option<Arc<dyn ResultHook>>) -> Self {
        let store = Arc::new(UiStore::new());
        let tor = Arc::new(ProxyStatusController::new(
            Arc::clone(&store),
            Arc::clone(&backend),
        ));
        let search = Arc::new(SearchController::new(
            Arc::clone(&store),
            Arc::clone(&backend),
            Some(Arc::clone(&tor)),
            hook,
        ));
        let downloads = Arc::new(DownloadController::new(
            Arc::clone(&store),
            Arc::clone(&backend),
        ));
        Self {
            store,
            backend,
            search,
            downloads,
            tor,
            poll_handle: Mutex::new(None),
        }
    }

    /// Connect to a live backend described by `config`.
    pub fn connect(config: &ClientConfig) -> Result<Self, TransportError> {
        let client = HttpClient::new(config)?;
        Ok(Self::new(Arc::new(client)))
    }

    pub fn store(&self) -> &Arc<UiStore> {
        &self.store
    }

    /// Register a render callback invoked after every state change.
    pub fn subscribe(&self, listener: impl Fn(&UiState) + Send + Sync + 'static) {
        self.store.subscribe(listener);
    }

    /// Begin the recurring proxy status poll. Idempotent.
    pub fn start(&self) {
        let mut guard = self.poll_handle.lock().unwrap();
        if guard.is_none() {
            *guard = Some(Arc::clone(&self.tor).spawn_polling());
        }
    }

    /// Page teardown: cancel the poll task.
    pub fn shutdown(&self) {
        if let Some(handle) = self.poll_handle.lock().unwrap().take() {
            handle.abort();
        }
    }

    /// "Update downloader" action on the rate-limit panel.
    pub async fn update_downloader(&self) -> Result<(), UiError> {
        eprintln!("[App] Updating downloader tool");
        match self.backend.update_downloader().await {
            Ok(resp) if resp.success => {
                let notice = match resp.version {
                    Some(version) => format!("Downloader updated to {}", version),
                    None => "Downloader updated".to_string(),
                };
                self.store.update(|s| s.notice = Some(notice.clone()));
                Ok(())
            }
            Ok(resp) => {
                let err = UiError::Extraction(
                    resp.error.unwrap_or_else(|| "Update failed".to_string()),
                );
                self.store.apply_error(&err);
                Err(err)
            }
            Err(e) => {
                let err = UiError::Transport(format!("Update failed: {}", e));
                self.store.apply_error(&err);
                Err(err)
            }
        }
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.shutdown();
    }
}
