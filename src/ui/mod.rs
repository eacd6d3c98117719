// UI layer: observable state, controllers, and the HTML renderer.

pub mod download;
pub mod errors;
pub mod models;
pub mod proxy;
pub mod render;
pub mod search;
pub mod state;

pub use download::DownloadController;
pub use errors::UiError;
pub use models::{ConnectionState, DownloadJob, Format, JobPhase, ProxyStatus, RateLimitNotice, VideoInfo};
pub use proxy::ProxyStatusController;
pub use render::{render, Rendered};
pub use search::{ResultHook, SearchController};
pub use state::{UiPhase, UiState, UiStore};
