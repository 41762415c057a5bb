//! Response body classification
//!
//! The backend mostly speaks JSON, but error pages from proxies and the odd
//! plain-text body do show up. Classification happens once per response,
//! from the `Content-Type` header; everything downstream branches on the
//! resulting [`ContentKind`] instead of re-inspecting header strings.

use reqwest::header::{HeaderMap, CONTENT_TYPE};

/// How a response body should be interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    /// JSON body (`application/json` or a `+json` suffix type)
    Json,
    /// Textual body (`text/*`)
    Text,
    /// Anything else (images, octet streams)
    Binary,
}

impl ContentKind {
    /// Classify a response from its headers
    ///
    /// A missing or unreadable `Content-Type` is treated as opaque text.
    #[must_use]
    pub fn from_headers(headers: &HeaderMap) -> Self {
        headers
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map_or(Self::Text, Self::from_content_type)
    }

    /// Classify from a raw `Content-Type` value
    #[must_use]
    pub fn from_content_type(value: &str) -> Self {
        // Strip parameters like `; charset=utf-8` before matching
        let mime = value
            .split(';')
            .next()
            .unwrap_or("")
            .trim()
            .to_ascii_lowercase();

        if mime == "application/json" || mime.ends_with("+json") {
            Self::Json
        } else if mime.starts_with("text/") {
            Self::Text
        } else {
            Self::Binary
        }
    }

    /// Whether the body should be parsed as JSON
    #[must_use]
    pub fn is_json(self) -> bool {
        self == Self::Json
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    #[test]
    fn test_json_content_types() {
        assert_eq!(
            ContentKind::from_content_type("application/json"),
            ContentKind::Json
        );
        assert_eq!(
            ContentKind::from_content_type("application/json; charset=utf-8"),
            ContentKind::Json
        );
        assert_eq!(
            ContentKind::from_content_type("Application/JSON"),
            ContentKind::Json
        );
        assert_eq!(
            ContentKind::from_content_type("application/problem+json"),
            ContentKind::Json
        );
    }

    #[test]
    fn test_text_content_types() {
        assert_eq!(
            ContentKind::from_content_type("text/plain"),
            ContentKind::Text
        );
        assert_eq!(
            ContentKind::from_content_type("text/html; charset=utf-8"),
            ContentKind::Text
        );
    }

    #[test]
    fn test_binary_content_types() {
        assert_eq!(
            ContentKind::from_content_type("image/png"),
            ContentKind::Binary
        );
        assert_eq!(
            ContentKind::from_content_type("application/octet-stream"),
            ContentKind::Binary
        );
    }

    #[test]
    fn test_missing_header_is_text() {
        let headers = HeaderMap::new();
        assert_eq!(ContentKind::from_headers(&headers), ContentKind::Text);
    }

    #[test]
    fn test_from_headers_json() {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        assert_eq!(ContentKind::from_headers(&headers), ContentKind::Json);
        assert!(ContentKind::from_headers(&headers).is_json());
    }
}
