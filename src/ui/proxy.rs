// Tor panel: status polling, enable/disable, identity rotation.
//
// Status polling is advisory. Toggle and rotate are real user actions:
// their failures land in the error panel, and each control is disabled
// while its own request is in flight.

use std::sync::Arc;
use std::time::Duration;

use crate::api::client::Backend;
use crate::ui::errors::UiError;
use crate::ui::models::{ConnectionState, ProxyStatus};
use crate::ui::state::UiStore;

/// Recurring status poll cadence. The client poll is the single source of
/// truth for displayed status; server-side auto-rotation is simply observed
/// by the next tick.
pub const POLL_INTERVAL: Duration = Duration::from_secs(10);

/// How long the rotate control stays disabled (showing the confirmation)
/// after a successful rotation.
pub const ROTATE_COOLDOWN: Duration = Duration::from_secs(2);

pub struct ProxyStatusController {
    store: Arc<UiStore>,
    backend: Arc<dyn Backend>,
}

impl ProxyStatusController {
    pub fn new(store: Arc<UiStore>, backend: Arc<dyn Backend>) -> Self {
        Self { store, backend }
    }

    /// Fetch current proxy status. A transport failure hides the panel
    /// instead of surfacing an error.
    pub async fn refresh_status(&self) {
        match self.backend.tor_status().await {
            Ok(resp) => {
                let status = ProxyStatus {
                    enabled: resp.enabled,
                    connection_state: ConnectionState::parse(&resp.status),
                    external_ip: resp.ip,
                };
                self.store.update(|s| s.proxy = Some(status.clone()));
            }
            Err(e) => {
                eprintln!("[TorPanel] Status check failed: {}", e);
                self.store.update(|s| s.proxy = None);
            }
        }
    }

    /// Enable or disable the proxy. The toggle control is disabled for the
    /// call duration; a successful toggle refreshes status immediately.
    pub async fn set_enabled(&self, enable: bool) -> Result<(), UiError> {
        self.store.update(|s| s.proxy_toggle_busy = true);
        eprintln!("[TorPanel] Setting enabled={}", enable);

        let result = match self.backend.tor_toggle(enable).await {
            Ok(resp) if resp.success => Ok(()),
            Ok(resp) => Err(UiError::Proxy(
                resp.message
                    .unwrap_or_else(|| "Failed to update Tor state".to_string()),
            )),
            Err(e) => Err(UiError::Proxy(format!("Failed to update Tor state: {}", e))),
        };

        self.store.update(|s| s.proxy_toggle_busy = false);
        match &result {
            Ok(()) => self.refresh_status().await,
            Err(err) => self.store.apply_error(err),
        }
        result
    }

    /// Request a new Tor identity. On success the displayed IP updates and
    /// the control shows a transient confirmation until the cool-down ends;
    /// on failure the control re-enables immediately.
    pub async fn rotate_identity(&self) -> Result<(), UiError> {
        self.store.update(|s| s.rotate_busy = true);
        eprintln!("[TorPanel] Requesting new identity");

        match self.backend.tor_rotate().await {
            Ok(resp) if resp.success => {
                let new_ip = resp.ip;
                self.store.update(|s| {
                    if let Some(proxy) = s.proxy.as_mut() {
                        if new_ip.is_some() {
                            proxy.external_ip = new_ip.clone();
                        }
                    }
                    s.rotate_confirmed = true;
                });

                let store = Arc::clone(&self.store);
                tokio::spawn(async move {
                    tokio::time::sleep(ROTATE_COOLDOWN).await;
                    store.update(|s| {
                        s.rotate_busy = false;
                        s.rotate_confirmed = false;
                    });
                });
                Ok(())
            }
            Ok(resp) => {
                let err = UiError::Proxy(
                    resp.message
                        .unwrap_or_else(|| "Failed to rotate Tor identity".to_string()),
                );
                self.store.update(|s| s.rotate_busy = false);
                self.store.apply_error(&err);
                Err(err)
            }
            Err(e) => {
                let err = UiError::Proxy(format!("Failed to rotate Tor identity: {}", e));
                self.store.update(|s| s.rotate_busy = false);
                self.store.apply_error(&err);
                Err(err)
            }
        }
    }

    /// Recurring status poll for the lifetime of the page view. The caller
    /// aborts the returned handle on teardown.
    pub fn spawn_polling(self: Arc<Self>) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(POLL_INTERVAL);
            loop {
                ticker.tick().await;
                self.refresh_status().await;
            }
        })
    }
}
