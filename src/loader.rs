//! Fetch and decode an image from a URL.
//!
//! Accepted sources:
//! - `http://` and `https://` URLs, fetched with a single GET
//! - `file://` URLs
//! - `data:<mime>;base64,<payload>` URLs
//! - anything else that is not an absolute URL, read as a filesystem path
//!
//! Each call makes exactly one attempt. There is no timeout, retry or
//! cancellation; a dropped future simply stops being polled.

use base64::Engine;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use image::{DynamicImage, GenericImageView};
use reqwest::Url;
use std::path::PathBuf;
use tracing::debug;

use crate::config::ExtractOptions;
use crate::error::{ExtractError, Result, data_url_body};

/// Standard alphabet, padding optional, as browsers accept in `data:` URLs.
const DATA_URL_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

#[derive(Debug, PartialEq, Eq)]
enum ImageSource<'a> {
    Http(Url),
    File(PathBuf),
    Data(&'a str),
}

fn resolve(image_url: &str) -> Result<ImageSource<'_>> {
    if let Some(rest) = data_url_body(image_url) {
        return Ok(ImageSource::Data(rest));
    }

    let url = match Url::parse(image_url) {
        Ok(url) => url,
        Err(_) => return Ok(ImageSource::File(PathBuf::from(image_url))),
    };

    match url.scheme() {
        "http" | "https" => Ok(ImageSource::Http(url)),
        "file" => url
            .to_file_path()
            .map(ImageSource::File)
            .map_err(|()| ExtractError::image_load(image_url, "file URL is not a local path")),
        // Windows drive letters parse as one-letter schemes.
        scheme if scheme.len() == 1 => Ok(ImageSource::File(PathBuf::from(image_url))),
        scheme => Err(ExtractError::image_load(
            image_url,
            format!("unsupported scheme `{scheme}`"),
        )),
    }
}

fn decode_data_url(image_url: &str, rest: &str) -> Result<Vec<u8>> {
    let (meta, payload) = rest
        .split_once(',')
        .ok_or_else(|| ExtractError::image_load(image_url, "data URL has no payload"))?;
    let is_base64 = meta
        .get(meta.len().saturating_sub(7)..)
        .is_some_and(|marker| marker.eq_ignore_ascii_case(";base64"));
    if !is_base64 {
        return Err(ExtractError::image_load(
            image_url,
            "only base64 data URLs are supported",
        ));
    }
    let payload: Vec<u8> = payload
        .bytes()
        .filter(|b| !b.is_ascii_whitespace())
        .collect();
    DATA_URL_ENGINE
        .decode(&payload)
        .map_err(|e| ExtractError::image_load(image_url, e))
}

async fn fetch(url: Url, image_url: &str) -> Result<Vec<u8>> {
    // A fresh client per call; nothing is shared between extractions.
    let client = reqwest::Client::new();
    let response = client
        .get(url)
        .send()
        .await
        .and_then(|r| r.error_for_status())
        .map_err(|e| ExtractError::image_load(image_url, e))?;
    let bytes = response
        .bytes()
        .await
        .map_err(|e| ExtractError::image_load(image_url, e))?;
    Ok(bytes.to_vec())
}

/// Load `image_url` and decode it into an image with known dimensions.
///
/// `options.cross_origin` is carried as-is. Native fetches never attach
/// ambient credentials, so the value only shows up in the logs here; the
/// browser binding hands it to the platform.
pub async fn load_image(image_url: &str, options: &ExtractOptions) -> Result<DynamicImage> {
    let bytes = match resolve(image_url)? {
        ImageSource::Http(url) => {
            debug!(%url, cross_origin = ?options.cross_origin, "fetching image");
            fetch(url, image_url).await?
        }
        ImageSource::File(path) => {
            debug!(path = %path.display(), "reading image");
            tokio::fs::read(&path)
                .await
                .map_err(|e| ExtractError::image_load(image_url, e))?
        }
        ImageSource::Data(rest) => decode_data_url(image_url, rest)?,
    };

    let img = image::load_from_memory(&bytes).map_err(|e| ExtractError::image_load(image_url, e))?;
    let (w, h) = img.dimensions();
    debug!(bytes = bytes.len(), width = w, height = h, "decoded image");
    Ok(img)
}
