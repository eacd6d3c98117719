// Pure state → markup mapping.
//
// The markup mirrors the page fragments of the original web UI. Every
// interpolated field is escaped; nothing here touches the network or the
// store.

use std::collections::HashSet;

use crate::ui::models::{Format, ProxyStatus, RateLimitNotice, VideoInfo};
use crate::ui::state::{UiPhase, UiState};

/// Rendered output for one state snapshot. At most one of the three content
/// panels is present; the spinner replaces them while loading.
#[derive(Debug, Clone, Default)]
pub struct Rendered {
    pub spinner_visible: bool,
    pub result_panel: Option<String>,
    pub error_panel: Option<String>,
    pub rate_limit_panel: Option<String>,
    /// Proxy status panel; independent of the content panels.
    pub proxy_panel: Option<String>,
    pub notice: Option<String>,
}

/// Escape text for interpolation into HTML.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn render(state: &UiState) -> Rendered {
    let mut out = Rendered {
        spinner_visible: state.phase == UiPhase::Loading,
        ..Default::default()
    };

    match state.phase {
        UiPhase::Idle | UiPhase::Loading => {}
        UiPhase::Result => {
            if let Some(video) = &state.video {
                out.result_panel = Some(render_result(video, &state.busy_formats));
            }
        }
        UiPhase::Error => {
            if let Some(message) = &state.error {
                out.error_panel = Some(render_error(message));
            }
        }
        UiPhase::RateLimited => {
            if let Some(notice) = &state.rate_limit {
                out.rate_limit_panel = Some(render_rate_limit(notice, state.details_visible));
            }
        }
    }

    out.proxy_panel = state.proxy.as_ref().map(|status| {
        render_proxy_panel(
            status,
            state.proxy_toggle_busy,
            state.rotate_busy,
            state.rotate_confirmed,
        )
    });
    out.notice = state.notice.as_deref().map(escape_html);
    out
}

fn render_result(video: &VideoInfo, busy_formats: &HashSet<String>) -> String {
    let mut buttons = String::new();
    for format in &video.formats {
        buttons.push_str(&render_format_button(format, busy_formats.contains(&format.id)));
    }

    let proxy_note = if video.using_proxy {
        let ip = video
            .proxy_ip
            .as_deref()
            .map(|ip| format!(" (exit IP {})", escape_html(ip)))
            .unwrap_or_default();
        format!("<p class=\"proxy-note\">Fetched via Tor{}</p>", ip)
    } else {
        String::new()
    };

    format!(
        "<div class=\"video-details\">\
            <div class=\"video-thumbnail\"><img src=\"{thumbnail}\" alt=\"{title}\" /></div>\
            <div class=\"video-metadata\">\
                <h3 class=\"video-title\">{title}</h3>\
                <p class=\"video-author\">By: {author}</p>\
                <p class=\"video-stats\">\
                    <span class=\"video-duration\">{duration}</span> \
                    <span class=\"video-views\">{views} views</span>\
                </p>\
                {proxy_note}\
            </div>\
        </div>\
        <div class=\"download-options\">\
            <h4>Download Options</h4>\
            <div class=\"format-buttons\">{buttons}</div>\
        </div>",
        thumbnail = escape_html(&video.thumbnail_url),
        title = escape_html(&video.title),
        author = escape_html(&video.author),
        duration = escape_html(&video.duration_label),
        views = escape_html(&video.views_label),
        proxy_note = proxy_note,
        buttons = buttons,
    )
}

/// One download control. Busy controls are disabled and relabelled for the
/// duration of the in-flight request.
pub fn render_format_button(format: &Format, busy: bool) -> String {
    let id = escape_html(&format.id);
    if busy {
        format!(
            "<button type=\"submit\" class=\"download-button\" data-format=\"{id}\" disabled>\
                <span class=\"spinner\"></span> Processing...\
            </button>",
            id = id,
        )
    } else {
        format!(
            "<button type=\"submit\" class=\"download-button\" data-format=\"{id}\">\
                <span class=\"format-name\">{name}</span>\
                <span class=\"format-quality\">{quality}</span>\
            </button>",
            id = id,
            name = escape_html(&format.display_name),
            quality = escape_html(&format.quality_label),
        )
    }
}

fn render_error(message: &str) -> String {
    format!("<div class=\"error-message\">{}</div>", escape_html(message))
}

fn render_rate_limit(notice: &RateLimitNotice, details_visible: bool) -> String {
    // Guidance depends on whether the throttled request already went through
    // the proxy: rotating helps in that case, enabling it helps otherwise.
    let guidance = if notice.using_proxy {
        "<div class=\"tor-guidance tor-active\">\
            <p>Tor is active but the current exit node is also being throttled.</p>\
            <button class=\"rotate-identity\">Get New Identity</button>\
        </div>"
    } else {
        "<div class=\"tor-guidance tor-inactive\">\
            <p>Enabling Tor routes requests through a different IP address.</p>\
            <button class=\"enable-tor\">Enable Tor</button>\
        </div>"
    };

    let details = match &notice.details {
        Some(text) => {
            let label = if details_visible { "Hide" } else { "Show" };
            let body = if details_visible {
                format!("<pre class=\"tech-details\">{}</pre>", escape_html(text))
            } else {
                String::new()
            };
            format!(
                "<button class=\"details-toggle\">{} technical details</button>{}",
                label, body
            )
        }
        None => String::new(),
    };

    format!(
        "<div class=\"rate-limit-panel\">\
            <p class=\"rate-limit-message\">{message}</p>\
            {guidance}\
            {details}\
            <button class=\"update-downloader\">Update downloader</button>\
        </div>",
        message = escape_html(&notice.message),
        guidance = guidance,
        details = details,
    )
}

fn render_proxy_panel(
    status: &ProxyStatus,
    toggle_busy: bool,
    rotate_busy: bool,
    rotate_confirmed: bool,
) -> String {
    let ip = status
        .external_ip
        .as_deref()
        .map(escape_html)
        .unwrap_or_else(|| "unknown".to_string());

    let rotate = if rotate_confirmed {
        "<button class=\"rotate-identity\" disabled>Rotated ✓</button>"
    } else if rotate_busy {
        "<button class=\"rotate-identity\" disabled>Rotating...</button>"
    } else {
        "<button class=\"rotate-identity\">New Identity</button>"
    };

    format!(
        "<div class=\"tor-panel\">\
            <label><input type=\"checkbox\" class=\"tor-toggle\"{checked}{toggle_disabled} /> Use Tor</label>\
            <span class=\"tor-state tor-{state}\">{state}</span>\
            <span class=\"tor-ip\">{ip}</span>\
            {rotate}\
        </div>",
        checked = if status.enabled { " checked" } else { "" },
        toggle_disabled = if toggle_busy { " disabled" } else { "" },
        state = status.connection_state.as_str(),
        ip = ip,
        rotate = rotate,
    )
}
