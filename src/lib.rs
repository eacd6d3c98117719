// Browser-style UI orchestration for a YouTube downloader web app.
//
// The crate talks to the Flask-style backend over HTTP, keeps every piece
// of page state in an observable store, and renders that state to HTML
// fragments. Controllers own the user-visible flows: search, per-format
// downloads, and the Tor proxy panel.

pub mod api;
pub mod app;
pub mod config;
pub mod ui;

#[cfg(test)]
mod testing;

pub use api::{Backend, HttpClient, TransportError};
pub use app::App;
pub use config::ClientConfig;
pub use ui::{
    render, ConnectionState, DownloadController, DownloadJob, Format, JobPhase,
    ProxyStatus, ProxyStatusController, RateLimitNotice, Rendered, ResultHook,
    SearchController, UiError, UiPhase, UiState, UiStore, VideoInfo,
};
