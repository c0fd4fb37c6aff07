//! Error types for color extraction

use std::borrow::Cow;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ExtractError>;

/// Boxed platform error carried through without normalization.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Error, Debug)]
pub enum ExtractError {
    /// The image could not be fetched or decoded.
    #[error("Failed to load image {}: {source}", display_url(url))]
    ImageLoad {
        url: String,
        #[source]
        source: BoxError,
    },

    /// No drawing surface could be obtained for the image.
    #[error("Failed to rasterize image: {reason}")]
    Rasterization { reason: String },

    /// An options file could not be read or parsed.
    #[error("Invalid configuration in {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: BoxError,
    },
}

impl ExtractError {
    pub fn image_load<E>(url: impl Into<String>, source: E) -> Self
    where
        E: Into<BoxError>,
    {
        Self::ImageLoad {
            url: url.into(),
            source: source.into(),
        }
    }

    pub fn rasterization(reason: impl Into<String>) -> Self {
        Self::Rasterization {
            reason: reason.into(),
        }
    }

    pub fn config<E>(path: impl Into<PathBuf>, source: E) -> Self
    where
        E: Into<BoxError>,
    {
        Self::Config {
            path: path.into(),
            source: source.into(),
        }
    }
}

/// Everything after a case-insensitive `data:` prefix, if `url` is a data URL.
pub(crate) fn data_url_body(url: &str) -> Option<&str> {
    let scheme = url.get(..5)?;
    scheme.eq_ignore_ascii_case("data:").then(|| &url[5..])
}

/// Data URLs are shown as `data:<mime>,…` so payloads stay out of messages.
pub(crate) fn display_url(url: &str) -> Cow<'_, str> {
    match data_url_body(url) {
        Some(body) => {
            let meta = body.split_once(',').map_or(body, |(meta, _)| meta);
            let meta = meta.get(..64).unwrap_or(meta);
            Cow::Owned(format!("data:{meta},…"))
        }
        None => Cow::Borrowed(url),
    }
}

#[cfg(target_arch = "wasm32")]
impl From<ExtractError> for wasm_bindgen::JsValue {
    fn from(err: ExtractError) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_load_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = ExtractError::image_load("cover.png", io);
        assert!(err.to_string().contains("cover.png"));
        let source = std::error::Error::source(&err).map(|s| s.to_string());
        assert_eq!(source.as_deref(), Some("gone"));
    }

    #[test]
    fn string_sources_are_accepted() {
        let err = ExtractError::image_load("x", "unsupported scheme `ftp`");
        assert!(matches!(err, ExtractError::ImageLoad { .. }));
        assert!(err.to_string().ends_with("unsupported scheme `ftp`"));
    }

    #[test]
    fn data_url_payload_is_left_out_of_message() {
        let payload = "iVBORw0KGgo".repeat(200);
        let url = format!("data:image/png;base64,{payload}");
        let err = ExtractError::image_load(url.clone(), "Invalid padding");

        let message = err.to_string();
        assert_eq!(message, "Failed to load image data:image/png;base64,…: Invalid padding");
        // the full input is still available to callers
        assert!(matches!(err, ExtractError::ImageLoad { url: ref kept, .. } if *kept == url));
    }

    #[test]
    fn data_scheme_is_matched_case_insensitively() {
        assert_eq!(data_url_body("DATA:image/png;base64,AA"), Some("image/png;base64,AA"));
        assert_eq!(data_url_body("https://x/a.png"), None);
        assert_eq!(data_url_body("dat"), None);
        assert_eq!(display_url("cover.png"), "cover.png");
    }
}
