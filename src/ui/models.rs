// Domain models held by the UI state store.

use crate::api::models::VideoInfoResponse;

/// One download control: a named server-side download profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Format {
    pub id: String,
    pub display_name: String,
    pub quality_label: String,
}

/// Metadata for the currently displayed video. Immutable once stored;
/// replaced wholesale by the next search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoInfo {
    pub title: String,
    pub author: String,
    pub duration_label: String,
    pub views_label: String,
    pub thumbnail_url: String,
    pub source_url: String,
    pub formats: Vec<Format>,
    pub using_proxy: bool,
    pub proxy_ip: Option<String>,
}

impl VideoInfo {
    /// Build from a successful metadata response. Missing fields fall back
    /// to placeholders rather than failing the whole search.
    pub fn from_response(resp: &VideoInfoResponse, requested_url: &str) -> Self {
        Self {
            title: resp.title.clone().unwrap_or_else(|| "Unknown".to_string()),
            author: resp.author.clone().unwrap_or_else(|| "Unknown".to_string()),
            duration_label: resp.duration.clone().unwrap_or_default(),
            views_label: resp.views.clone().unwrap_or_default(),
            thumbnail_url: resp.thumbnail.clone().unwrap_or_default(),
            source_url: resp.url.clone().unwrap_or_else(|| requested_url.to_string()),
            formats: resp
                .formats
                .iter()
                .map(|f| Format {
                    id: f.id.clone(),
                    display_name: f.name.clone(),
                    quality_label: f.quality.clone(),
                })
                .collect(),
            using_proxy: resp.using_tor.unwrap_or(false),
            proxy_ip: resp.tor_ip.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobPhase {
    Pending,
    Succeeded,
    Failed,
}

/// Handle for one download submission. The caller triggers the actual
/// browser-level fetch-and-save from `result_url`.
#[derive(Debug, Clone)]
pub struct DownloadJob {
    pub format_id: String,
    pub source_url: String,
    pub phase: JobPhase,
    pub result_url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Connected,
    Error,
    Disabled,
}

impl ConnectionState {
    /// Map the wire status string. Anything unrecognized counts as an error
    /// state rather than a panic.
    pub fn parse(s: &str) -> Self {
        match s {
            "connected" => Self::Connected,
            "disabled" => Self::Disabled,
            _ => Self::Error,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Connected => "connected",
            Self::Error => "error",
            Self::Disabled => "disabled",
        }
    }
}

/// Last observed state of the anonymizing proxy subsystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyStatus {
    pub enabled: bool,
    pub connection_state: ConnectionState,
    pub external_ip: Option<String>,
}

/// Payload backing the rate-limit panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitNotice {
    pub message: String,
    pub details: Option<String>,
    pub using_proxy: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::FormatEntry;

    fn info_response() -> VideoInfoResponse {
        VideoInfoResponse {
            success: true,
            title: Some("A video".to_string()),
            author: None,
            duration: Some("3:15".to_string()),
            views: Some("1,234".to_string()),
            thumbnail: Some("https://i.ytimg.com/vi/abc/hq720.jpg".to_string()),
            url: None,
            formats: vec![FormatEntry {
                id: "mp4".to_string(),
                name: "Video".to_string(),
                quality: "720p".to_string(),
            }],
            using_tor: Some(true),
            tor_ip: Some("10.0.0.1".to_string()),
            rate_limited: None,
            error: None,
            details: None,
        }
    }

    #[test]
    fn test_from_response_maps_fields() {
        let video = VideoInfo::from_response(&info_response(), "https://youtu.be/abcdefghijk");
        assert_eq!(video.title, "A video");
        assert_eq!(video.author, "Unknown");
        assert_eq!(video.source_url, "https://youtu.be/abcdefghijk");
        assert_eq!(video.formats.len(), 1);
        assert_eq!(video.formats[0].display_name, "Video");
        assert!(video.using_proxy);
        assert_eq!(video.proxy_ip.as_deref(), Some("10.0.0.1"));
    }

    #[test]
    fn test_connection_state_parse() {
        assert_eq!(ConnectionState::parse("connected"), ConnectionState::Connected);
        assert_eq!(ConnectionState::parse("disabled"), ConnectionState::Disabled);
        assert_eq!(ConnectionState::parse("bootstrapping"), ConnectionState::Error);
    }
}
