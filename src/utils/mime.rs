use std::path::Path;

/// MIME type a browser would declare for a picked file, judged by extension.
/// Unknown or missing extensions fall back to `application/octet-stream`.
pub fn mime_from_path(path: &Path) -> String {
    mime_guess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_string()
}
