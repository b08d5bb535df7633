//! Content-type resolution for uploaded keys

/// Content type used when the extension is unknown
pub const FALLBACK_CONTENT_TYPE: &str = "text/plain";

/// Resolve the MIME type for an object key from its extension.
///
/// Always returns a value; unknown or missing extensions map to
/// [`FALLBACK_CONTENT_TYPE`].
pub fn resolve(key: &str) -> String {
    mime_guess::from_path(key)
        .first()
        .map(|m| m.essence_str().to_string())
        .unwrap_or_else(|| FALLBACK_CONTENT_TYPE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_web_types() {
        assert_eq!(resolve("index.html"), "text/html");
        assert_eq!(resolve("style.css"), "text/css");
        assert_eq!(resolve("img/logo.png"), "image/png");
        assert_eq!(resolve("photos/cat.jpg"), "image/jpeg");
    }

    #[test]
    fn test_resolve_fallback() {
        assert_eq!(resolve("data.unknownext"), "text/plain");
        assert_eq!(resolve("LICENSE"), "text/plain");
    }

    #[test]
    fn test_resolve_uses_last_extension() {
        assert_eq!(resolve("export.2024.json"), "application/json");
        assert_eq!(resolve("nested/dir.v2/page.html"), "text/html");
    }
}
