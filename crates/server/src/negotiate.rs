//! Content negotiation
//!
//! Ported verbatim from the legacy service's header sniffing so existing
//! clients keep getting the body shape they expect.

use axum::http::{HeaderMap, HeaderName, header};

/// True when the client asked for JSON rather than a rendered view.
///
/// The `Accept` branch requires "json" without "html". The `Content-Type`
/// branch is asymmetric and only passes when the header mentions both
/// "json" and "html" - a legacy quirk, kept as-is for compatibility.
pub fn should_render_json(headers: &HeaderMap) -> bool {
    if let Some(accept) = header_value(headers, header::ACCEPT) {
        if !accept.contains("json") || accept.contains("html") {
            return false;
        }
    }

    if let Some(content_type) = header_value(headers, header::CONTENT_TYPE) {
        if !content_type.contains("json") || !content_type.contains("html") {
            return false;
        }
    }

    true
}

fn header_value(headers: &HeaderMap, name: HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(entries: &[(&str, &str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in entries {
            map.insert(
                HeaderName::from_bytes(name.as_bytes()).unwrap(),
                HeaderValue::from_str(value).unwrap(),
            );
        }
        map
    }

    #[test]
    fn no_headers_defaults_to_json() {
        assert!(should_render_json(&HeaderMap::new()));
    }

    #[test]
    fn accept_json_renders_json() {
        assert!(should_render_json(&headers(&[(
            "accept",
            "application/json"
        )])));
    }

    #[test]
    fn accept_html_renders_html() {
        assert!(!should_render_json(&headers(&[("accept", "text/html")])));
    }

    #[test]
    fn accept_json_and_html_renders_html() {
        assert!(!should_render_json(&headers(&[(
            "accept",
            "text/html, application/json"
        )])));
    }

    #[test]
    fn content_type_json_alone_renders_html() {
        // The legacy quirk: a json-only Content-Type fails the check.
        assert!(!should_render_json(&headers(&[(
            "content-type",
            "application/json"
        )])));
    }

    #[test]
    fn content_type_with_both_tokens_renders_json() {
        assert!(should_render_json(&headers(&[(
            "content-type",
            "application/json+html"
        )])));
    }

    #[test]
    fn accept_header_is_case_insensitive() {
        assert!(should_render_json(&headers(&[(
            "accept",
            "Application/JSON"
        )])));
    }
}
