// Observable UI state store.
//
// Single source of truth for what the page shows. Controllers mutate it
// through `update`; subscribed listeners (the renderer) run after every
// mutation with a snapshot. Phases are mutually exclusive: entering one
// clears the payloads owned by the others, so no two panels can ever be
// visible at once.

use std::collections::HashSet;
use std::sync::Mutex;

use crate::ui::errors::UiError;
use crate::ui::models::{ProxyStatus, RateLimitNotice, VideoInfo};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiPhase {
    Idle,
    Loading,
    Result,
    Error,
    RateLimited,
}

#[derive(Debug, Clone)]
pub struct UiState {
    pub phase: UiPhase,

    /// Payload of the Result phase.
    pub video: Option<VideoInfo>,
    /// Payload of the Error phase.
    pub error: Option<String>,
    /// Payload of the RateLimited phase.
    pub rate_limit: Option<RateLimitNotice>,

    /// Whether the technical-details region of the rate-limit panel is open.
    pub details_visible: bool,

    /// Format ids with a download currently in flight.
    pub busy_formats: HashSet<String>,

    /// Last known proxy status; None hides the panel entirely.
    pub proxy: Option<ProxyStatus>,
    pub proxy_toggle_busy: bool,
    pub rotate_busy: bool,
    /// Transient "Rotated" confirmation shown during the rotate cool-down.
    pub rotate_confirmed: bool,

    /// Transient informational banner (e.g. after a downloader update).
    pub notice: Option<String>,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            phase: UiPhase::Idle,
            video: None,
            error: None,
            rate_limit: None,
            details_visible: false,
            busy_formats: HashSet::new(),
            proxy: None,
            proxy_toggle_busy: false,
            rotate_busy: false,
            rotate_confirmed: false,
            notice: None,
        }
    }
}

impl UiState {
    /// Enter a phase, clearing the payloads owned by the other phases.
    pub fn enter(&mut self, phase: UiPhase) {
        self.phase = phase;
        match phase {
            UiPhase::Idle | UiPhase::Loading => {
                self.video = None;
                self.error = None;
                self.rate_limit = None;
                self.details_visible = false;
                self.notice = None;
            }
            UiPhase::Result => {
                self.error = None;
                self.rate_limit = None;
                self.details_visible = false;
            }
            UiPhase::Error => {
                self.video = None;
                self.rate_limit = None;
                self.details_visible = false;
            }
            UiPhase::RateLimited => {
                self.video = None;
                self.error = None;
                self.details_visible = false;
            }
        }
    }
}

type Listener = Box<dyn Fn(&UiState) + Send + Sync>;

pub struct UiStore {
    state: Mutex<UiState>,
    listeners: Mutex<Vec<Listener>>,
}

impl UiStore {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(UiState::default()),
            listeners: Mutex::new(Vec::new()),
        }
    }

    /// Register a listener invoked with a snapshot after every mutation.
    pub fn subscribe(&self, listener: impl Fn(&UiState) + Send + Sync + 'static) {
        self.listeners.lock().unwrap().push(Box::new(listener));
    }

    pub fn snapshot(&self) -> UiState {
        self.state.lock().unwrap().clone()
    }

    pub fn phase(&self) -> UiPhase {
        self.state.lock().unwrap().phase
    }

    /// Apply a mutation and notify listeners. The lock is released before
    /// listeners run.
    pub fn update(&self, f: impl FnOnce(&mut UiState)) {
        let snapshot = {
            let mut state = self.state.lock().unwrap();
            f(&mut state);
            state.clone()
        };
        for listener in self.listeners.lock().unwrap().iter() {
            listener(&snapshot);
        }
    }

    /// Flip the technical-details region of the rate-limit panel.
    pub fn toggle_details(&self) {
        self.update(|s| s.details_visible = !s.details_visible);
    }

    /// Route an error into the phase it belongs to.
    pub fn apply_error(&self, err: &UiError) {
        match err {
            UiError::RateLimited {
                message,
                details,
                using_proxy,
            } => {
                let notice = RateLimitNotice {
                    message: message.clone(),
                    details: details.clone(),
                    using_proxy: *using_proxy,
                };
                self.update(|s| {
                    s.enter(UiPhase::RateLimited);
                    s.rate_limit = Some(notice);
                });
            }
            other => {
                let message = other.message();
                self.update(|s| {
                    s.enter(UiPhase::Error);
                    s.error = Some(message);
                });
            }
        }
    }
}

impl Default for UiStore {
    fn default() -> Self {
        Self::new()
    }
}
