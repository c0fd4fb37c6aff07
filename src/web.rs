//! Browser bindings.
//!
//! Loading and rasterizing go through the platform (`HtmlImageElement` and a
//! canvas 2D context) so the page's cross-origin rules apply. Sampling is the
//! same [`calculate_colors`] used natively.

use js_sys::{Array, Object, Promise, Reflect};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use crate::error::ExtractError;
use crate::sampler::{ColorSample, calculate_colors};

/// `extractColors(imageUrl, { crossOrigin })` → `Promise<ColorSample[]>`.
///
/// A load failure rejects with the platform's `error` event. A missing 2D
/// context rejects with an `Error`. A tainted canvas rejects with whatever
/// `getImageData` throws.
#[wasm_bindgen(js_name = extractColors)]
pub async fn extract_colors(image_url: String, options: JsValue) -> Result<Array, JsValue> {
    let cross_origin = read_cross_origin(&options)?;
    let img = load_image(&image_url, cross_origin.as_deref()).await?;
    let data = get_image_data(&img)?;
    samples_to_js(&calculate_colors(Some(data.as_slice())))
}

/// `calculateColors(data?: Uint8Array)` → `ColorSample[]`.
///
/// Passing `undefined` yields an empty array.
#[wasm_bindgen(js_name = calculateColors)]
pub fn calculate_colors_js(data: Option<Vec<u8>>) -> Result<Array, JsValue> {
    samples_to_js(&calculate_colors(data.as_deref()))
}

/// Read `options.crossOrigin`, stringifying non-string values the way the
/// `crossOrigin` attribute setter does. Only `undefined` and `null` mean unset.
fn read_cross_origin(options: &JsValue) -> Result<Option<String>, JsValue> {
    if options.is_undefined() || options.is_null() {
        return Ok(None);
    }
    let value = Reflect::get(options, &JsValue::from_str("crossOrigin"))?;
    if value.is_undefined() || value.is_null() {
        return Ok(None);
    }
    Ok(Some(match value.as_string() {
        Some(s) => s,
        None => String::from(value.unchecked_ref::<Object>().to_string()),
    }))
}

// ------------------------------------------------------------
// Loading
// ------------------------------------------------------------

async fn load_image(image_url: &str, cross_origin: Option<&str>) -> Result<HtmlImageElement, JsValue> {
    let img = HtmlImageElement::new()?;
    img.set_cross_origin(cross_origin);

    // Handlers are attached before `src` so a cached image cannot fire early.
    let loaded = Promise::new(&mut |resolve, reject| {
        img.set_onload(Some(&resolve));
        img.set_onerror(Some(&reject));
    });
    img.set_src(image_url);

    let result = JsFuture::from(loaded).await;
    img.set_onload(None);
    img.set_onerror(None);
    result?;

    tracing::debug!(
        url = image_url,
        width = img.natural_width(),
        height = img.natural_height(),
        "image loaded"
    );
    Ok(img)
}

// ------------------------------------------------------------
// Rasterizing
// ------------------------------------------------------------

fn get_image_data(img: &HtmlImageElement) -> Result<Vec<u8>, JsValue> {
    let (w, h) = (img.natural_width(), img.natural_height());

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| ExtractError::rasterization("no document to create a canvas in"))?;
    let canvas: HtmlCanvasElement = document.create_element("canvas")?.dyn_into()?;
    canvas.set_width(w);
    canvas.set_height(h);

    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or_else(|| ExtractError::rasterization("Failed to get 2D context"))?
        .dyn_into()?;

    ctx.draw_image_with_html_image_element(img, 0.0, 0.0)?;
    // Throws on a tainted canvas; passed through untouched.
    let data = ctx.get_image_data(0.0, 0.0, w as f64, h as f64)?;
    Ok(data.data().0)
}

// ------------------------------------------------------------
// JS conversion
// ------------------------------------------------------------

fn samples_to_js(samples: &[ColorSample]) -> Result<Array, JsValue> {
    let out = Array::new_with_length(samples.len() as u32);
    for (i, sample) in samples.iter().enumerate() {
        out.set(i as u32, sample_to_js(sample)?.into());
    }
    Ok(out)
}

fn sample_to_js(sample: &ColorSample) -> Result<Object, JsValue> {
    let rgb = Object::new();
    Reflect::set(&rgb, &"r".into(), &sample.rgb.r.into())?;
    Reflect::set(&rgb, &"g".into(), &sample.rgb.g.into())?;
    Reflect::set(&rgb, &"b".into(), &sample.rgb.b.into())?;

    let hsl = Array::of3(
        &sample.hsl[0].into(),
        &sample.hsl[1].into(),
        &sample.hsl[2].into(),
    );

    let obj = Object::new();
    Reflect::set(&obj, &"rgb".into(), &rgb)?;
    Reflect::set(&obj, &"hsl".into(), &hsl)?;
    Reflect::set(&obj, &"hex".into(), &JsValue::from_str(&sample.hex))?;
    Reflect::set(&obj, &"lightness".into(), &sample.lightness.into())?;
    Ok(obj)
}
