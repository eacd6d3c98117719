// Wire types for the backend HTTP contract.
//
// Field names match the JSON the server actually sends; optional fields
// default so a terse response ({"success": false, "error": "..."}) still
// deserializes.

use serde::{Deserialize, Serialize};

/// Request body shared by /api/validate-url and /api/video-info.
#[derive(Debug, Clone, Serialize)]
pub struct UrlRequest {
    pub url: String,
}

/// Request body for /api/tor/toggle.
#[derive(Debug, Clone, Serialize)]
pub struct ToggleRequest {
    pub enable: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ValidateResponse {
    pub valid: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub video_id: Option<String>,
}

/// One server-side download profile offered for a video.
#[derive(Debug, Clone, Deserialize)]
pub struct FormatEntry {
    pub id: String,
    pub name: String,
    pub quality: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VideoInfoResponse {
    pub success: bool,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub views: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub formats: Vec<FormatEntry>,
    #[serde(default)]
    pub using_tor: Option<bool>,
    #[serde(default)]
    pub tor_ip: Option<String>,
    #[serde(default)]
    pub rate_limited: Option<bool>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DownloadResponse {
    pub success: bool,
    #[serde(default)]
    pub download_url: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub rate_limited: Option<bool>,
    #[serde(default)]
    pub using_tor: Option<bool>,
    #[serde(default)]
    pub details: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateResponse {
    pub success: bool,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TorStatusResponse {
    pub enabled: bool,
    /// "connected", "error" or "disabled".
    pub status: String,
    #[serde(default)]
    pub ip: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TorToggleResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TorRotateResponse {
    pub success: bool,
    #[serde(default)]
    pub ip: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terse_error_response_deserializes() {
        let resp: VideoInfoResponse =
            serde_json::from_str(r#"{"success": false, "error": "Invalid YouTube URL"}"#).unwrap();
        assert!(!resp.success);
        assert_eq!(resp.error.as_deref(), Some("Invalid YouTube URL"));
        assert!(resp.formats.is_empty());
    }

    #[test]
    fn test_full_info_response_deserializes() {
        let resp: VideoInfoResponse = serde_json::from_str(
            r#"{
                "success": true,
                "title": "A video",
                "author": "Someone",
                "duration": "3:15",
                "views": "1,234",
                "thumbnail": "https://i.ytimg.com/vi/abc/hq720.jpg",
                "url": "https://www.youtube.com/watch?v=abcdefghijk",
                "formats": [{"id": "mp3", "name": "MP3", "quality": "Audio Only"}],
                "using_tor": true,
                "tor_ip": "10.0.0.1"
            }"#,
        )
        .unwrap();
        assert!(resp.success);
        assert_eq!(resp.formats.len(), 1);
        assert_eq!(resp.formats[0].id, "mp3");
        assert_eq!(resp.using_tor, Some(true));
    }

    #[test]
    fn test_rate_limited_download_response() {
        let resp: DownloadResponse = serde_json::from_str(
            r#"{"success": false, "rate_limited": true, "using_tor": false, "error": "Too many requests"}"#,
        )
        .unwrap();
        assert_eq!(resp.rate_limited, Some(true));
        assert_eq!(resp.using_tor, Some(false));
    }

    #[test]
    fn test_tor_status_without_ip() {
        let resp: TorStatusResponse =
            serde_json::from_str(r#"{"enabled": false, "status": "disabled"}"#).unwrap();
        assert!(!resp.enabled);
        assert!(resp.ip.is_none());
    }
}
