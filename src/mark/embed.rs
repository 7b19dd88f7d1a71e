// Copyright (c) 2026 The hidemark-core Authors
// SPDX-License-Identifier: GPL-3.0-only
// hidemark-core: blind LSB text watermarking for pixel buffers

//! Watermark embedding.
//!
//! Writes the frame bitstream into the LSB of each carrier sample in scan
//! order and leaves everything after the last written bit byte-for-byte
//! untouched. Re-marking a buffer with a shorter text therefore leaves stale
//! bits of the older frame behind the new one; they are inert because the
//! extractor only reads as far as the new length prefix says.

use crate::mark::capacity::{capacity, frame_fits};
use crate::mark::error::MarkError;
use crate::mark::frame::{self, Payload};
use crate::mark::progress::{NoProgress, ProgressSink, Throttle};
use crate::mark::scan::{carrier_bits, ScanOrder};
use crate::pixels::PixelBuffer;

/// Embed `text` into a copy of `buffer`.
///
/// See [`embed_with_progress`].
pub fn embed(buffer: &PixelBuffer, text: &str) -> Result<PixelBuffer, MarkError> {
    embed_with_progress(buffer, text, &mut NoProgress)
}

/// Embed `text` into a copy of `buffer`, reporting progress to `progress`.
///
/// The caller's buffer is never modified. On success the sink has received
/// a final report of exactly 1.0.
///
/// # Errors
/// [`MarkError::PayloadTooLarge`] if the UTF-8 text exceeds
/// [`capacity`](crate::mark::capacity()) of `buffer`. This is the only failure.
pub fn embed_with_progress<P: ProgressSink + ?Sized>(
    buffer: &PixelBuffer,
    text: &str,
    progress: &mut P,
) -> Result<PixelBuffer, MarkError> {
    let requested = text.len();
    if !frame_fits(carrier_bits(buffer), requested) {
        let max_bytes = capacity(buffer);
        log::debug!("rejecting {requested}-byte text: capacity is {max_bytes} bytes");
        return Err(MarkError::PayloadTooLarge { max_bytes, requested });
    }

    let payload = Payload::from_text(text)?;
    let frame_bytes = payload.to_bytes();
    let total_bits = frame_bytes.len() * 8;
    log::debug!(
        "embedding {requested}-byte text as {total_bits}-bit frame into {}x{} carrier",
        buffer.width(),
        buffer.height()
    );

    let mut marked = buffer.clone();
    let mut throttle = Throttle::new(progress, total_bits);
    let samples = marked.samples_mut();
    let bits = frame::iter_bits(&frame_bytes);
    for (written, (bit, index)) in bits.zip(ScanOrder::new(buffer)).enumerate() {
        if let Some(sample) = samples.get_mut(index) {
            *sample = (*sample & 0xFE) | bit;
        }
        throttle.advance_to(written + 1);
    }
    throttle.finish();

    Ok(marked)
}
