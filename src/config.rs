// Connection settings for reaching the downloader backend.

/// How the HTTP client reaches the backend API.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the backend (e.g. "http://127.0.0.1:5000").
    pub base_url: String,

    /// Optional SOCKS5 proxy for reaching the backend itself
    /// (e.g. "socks5h://127.0.0.1:1080").
    pub proxy: Option<String>,

    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: base_url_from_env(),
            proxy: std::env::var("YTDL_UI_PROXY").ok(),
            timeout_secs: 30,
        }
    }
}

// Allow overriding the backend address when the server runs on a non-default
// port. Example: export YTDL_UI_BASE_URL="http://127.0.0.1:8080"
fn base_url_from_env() -> String {
    std::env::var("YTDL_UI_BASE_URL").unwrap_or_else(|_| "http://127.0.0.1:5000".to_string())
}
