// Copyright (c) 2026 The hidemark-core Authors
// SPDX-License-Identifier: GPL-3.0-only
// hidemark-core: blind LSB text watermarking for pixel buffers

//! Browser binding (feature `wasm`).
//!
//! Takes RGBA pixel arrays as produced by `CanvasRenderingContext2D.getImageData`
//! and an optional JS progress function called with a single number in
//! `[0, 1]`. The callback's return value and any exception it throws are
//! ignored.

use wasm_bindgen::prelude::*;

use crate::mark::{self, ProgressSink};
use crate::pixels::{ChannelLayout, PixelBuffer};

struct JsProgress(Option<js_sys::Function>);

impl ProgressSink for JsProgress {
    fn report(&mut self, fraction: f64) {
        if let Some(ref f) = self.0 {
            let _ = f.call1(&JsValue::NULL, &JsValue::from_f64(fraction));
        }
    }
}

/// Embed `text` into an RGBA image and return the marked pixels.
#[wasm_bindgen(js_name = embedRgba)]
pub fn embed_rgba(
    pixels: Vec<u8>,
    width: u32,
    height: u32,
    text: &str,
    on_progress: Option<js_sys::Function>,
) -> Result<Vec<u8>, JsError> {
    let buffer = PixelBuffer::from_rgba(width, height, pixels)?;
    let marked = mark::embed_with_progress(&buffer, text, &mut JsProgress(on_progress))?;
    Ok(marked.into_samples())
}

/// Extract the watermark text from an RGBA image, or `undefined` if none.
#[wasm_bindgen(js_name = extractRgba)]
pub fn extract_rgba(
    pixels: Vec<u8>,
    width: u32,
    height: u32,
    on_progress: Option<js_sys::Function>,
) -> Result<Option<String>, JsError> {
    let buffer = PixelBuffer::from_rgba(width, height, pixels)?;
    Ok(mark::extract_with_progress(&buffer, &mut JsProgress(on_progress)))
}

/// Text capacity in bytes of a `width × height` image.
#[wasm_bindgen(js_name = capacityRgba)]
pub fn capacity_rgba(width: u32, height: u32) -> usize {
    mark::capacity_for(width, height, ChannelLayout::Rgba)
}
