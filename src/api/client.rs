// HTTP transport for the backend API.
//
// Controllers reach the backend exclusively through the `Backend` trait so
// they can run against a scripted mock in tests. `HttpClient` is the real
// implementation: one pooled reqwest client, one method per endpoint, no
// business logic.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::api::models::{
    DownloadResponse, ToggleRequest, TorRotateResponse, TorStatusResponse, TorToggleResponse,
    UpdateResponse, UrlRequest, ValidateResponse, VideoInfoResponse,
};
use crate::config::ClientConfig;

/// Transport-level failure talking to the backend (connect, HTTP, decode).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportError(pub String);

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for TransportError {}

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        Self(e.to_string())
    }
}

/// The backend endpoints the UI layer consumes.
#[async_trait]
pub trait Backend: Send + Sync {
    async fn validate_url(&self, url: &str) -> Result<ValidateResponse, TransportError>;
    async fn video_info(&self, url: &str) -> Result<VideoInfoResponse, TransportError>;
    async fn download(&self, url: &str, format: &str) -> Result<DownloadResponse, TransportError>;
    async fn update_downloader(&self) -> Result<UpdateResponse, TransportError>;
    async fn tor_status(&self) -> Result<TorStatusResponse, TransportError>;
    async fn tor_toggle(&self, enable: bool) -> Result<TorToggleResponse, TransportError>;
    async fn tor_rotate(&self) -> Result<TorRotateResponse, TransportError>;
}

pub struct HttpClient {
    http: reqwest::Client,
    base_url: String,
}

impl HttpClient {
    pub fn new(config: &ClientConfig) -> Result<Self, TransportError> {
        let mut builder = reqwest::Client::builder().timeout(Duration::from_secs(config.timeout_secs));

        if let Some(proxy_url) = config.proxy.as_deref() {
            let proxy = reqwest::Proxy::all(proxy_url)
                .map_err(|e| TransportError(format!("Invalid proxy URL {}: {}", proxy_url, e)))?;
            builder = builder.proxy(proxy);
        }

        let http = builder.build().map_err(TransportError::from)?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn post_json<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, TransportError> {
        let resp = self.http.post(self.endpoint(path)).json(body).send().await?;
        Ok(resp.json::<T>().await?)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, TransportError> {
        let resp = self.http.get(self.endpoint(path)).send().await?;
        Ok(resp.json::<T>().await?)
    }
}

#[async_trait]
impl Backend for HttpClient {
    async fn validate_url(&self, url: &str) -> Result<ValidateResponse, TransportError> {
        self.post_json("/api/validate-url", &UrlRequest { url: url.to_string() })
            .await
    }

    async fn video_info(&self, url: &str) -> Result<VideoInfoResponse, TransportError> {
        self.post_json("/api/video-info", &UrlRequest { url: url.to_string() })
            .await
    }

    // The download endpoint takes a classic form post, not JSON.
    async fn download(&self, url: &str, format: &str) -> Result<DownloadResponse, TransportError> {
        let resp = self
            .http
            .post(self.endpoint("/download"))
            .form(&[("url", url), ("format", format)])
            .send()
            .await?;
        Ok(resp.json::<DownloadResponse>().await?)
    }

    async fn update_downloader(&self) -> Result<UpdateResponse, TransportError> {
        self.get_json("/update-yt-dlp").await
    }

    async fn tor_status(&self) -> Result<TorStatusResponse, TransportError> {
        self.get_json("/api/tor/status").await
    }

    async fn tor_toggle(&self, enable: bool) -> Result<TorToggleResponse, TransportError> {
        self.post_json("/api/tor/toggle", &ToggleRequest { enable }).await
    }

    async fn tor_rotate(&self) -> Result<TorRotateResponse, TransportError> {
        self.get_json("/api/tor/rotate").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_base_and_path() {
        let config = ClientConfig {
            base_url: "http://127.0.0.1:5000".to_string(),
            proxy: None,
            timeout_secs: 30,
        };
        let client = HttpClient::new(&config).unwrap();
        assert_eq!(client.endpoint("/api/video-info"), "http://127.0.0.1:5000/api/video-info");
    }

    #[test]
    fn test_endpoint_strips_trailing_slash() {
        let config = ClientConfig {
            base_url: "http://127.0.0.1:5000/".to_string(),
            proxy: None,
            timeout_secs: 30,
        };
        let client = HttpClient::new(&config).unwrap();
        assert_eq!(client.endpoint("/download"), "http://127.0.0.1:5000/download");
    }

    #[test]
    fn test_invalid_proxy_rejected() {
        let config = ClientConfig {
            base_url: "http://127.0.0.1:5000".to_string(),
            proxy: Some("not a proxy url".to_string()),
            timeout_secs: 30,
        };
        assert!(HttpClient::new(&config).is_err());
    }
}
