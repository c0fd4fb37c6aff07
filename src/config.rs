//! Options accepted by [`extract_colors`](crate::extract_colors).
//!
//! Keys are camelCase so the same JSON works for the browser binding
//! (`{ "crossOrigin": "anonymous" }`) and for option files given to the CLI.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{ExtractError, Result};

/// Largest surface, in pixels, the rasterizer will allocate.
pub const DEFAULT_MAX_SURFACE_PIXELS: u64 = 268_435_456;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExtractOptions {
    /// Cross-origin policy handed verbatim to the image loader
    /// (`"anonymous"`, `"use-credentials"`, or unset).
    pub cross_origin: Option<String>,

    pub max_surface_pixels: u64,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            cross_origin: None,
            max_surface_pixels: DEFAULT_MAX_SURFACE_PIXELS,
        }
    }
}

impl ExtractOptions {
    pub fn with_cross_origin(mut self, cross_origin: impl Into<String>) -> Self {
        self.cross_origin = Some(cross_origin.into());
        self
    }

    /// Load options from a JSON file. Missing keys keep their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| ExtractError::config(path, e))?;
        Self::from_json_str(&text).map_err(|e| match e {
            ExtractError::Config { source, .. } => ExtractError::config(path, source),
            other => other,
        })
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| ExtractError::config("<inline>", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_have_no_cross_origin() {
        let opts = ExtractOptions::default();
        assert_eq!(opts.cross_origin, None);
        assert_eq!(opts.max_surface_pixels, DEFAULT_MAX_SURFACE_PIXELS);
    }

    #[test]
    fn parses_camel_case_keys() {
        let opts = ExtractOptions::from_json_str(r#"{ "crossOrigin": "anonymous" }"#).unwrap();
        assert_eq!(opts.cross_origin.as_deref(), Some("anonymous"));
        assert_eq!(opts.max_surface_pixels, DEFAULT_MAX_SURFACE_PIXELS);
    }

    #[test]
    fn cross_origin_is_not_validated() {
        let opts = ExtractOptions::from_json_str(r#"{ "crossOrigin": "whatever" }"#).unwrap();
        assert_eq!(opts.cross_origin.as_deref(), Some("whatever"));
    }

    #[test]
    fn rejects_malformed_json() {
        let err = ExtractOptions::from_json_str("{ crossOrigin").unwrap_err();
        assert!(matches!(err, ExtractError::Config { .. }));
    }

    #[test]
    fn reads_options_file() {
        let path = std::env::temp_dir().join("cover_colors_options_test.json");
        std::fs::write(&path, r#"{ "maxSurfacePixels": 16 }"#).unwrap();
        let opts = ExtractOptions::from_json_file(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(opts.max_surface_pixels, 16);
        assert_eq!(opts.cross_origin, None);
    }

    #[test]
    fn missing_file_reports_path() {
        let path = Path::new("/definitely/not/here/options.json");
        let err = ExtractOptions::from_json_file(path).unwrap_err();
        assert!(err.to_string().contains("options.json"));
    }
}
