// Copyright (c) 2026 The hidemark-core Authors
// SPDX-License-Identifier: GPL-3.0-only
// hidemark-core: blind LSB text watermarking for pixel buffers

//! Watermark capacity calculation.
//!
//! One bit per color sample, so a `W×H` carrier holds `W×H×3` bits
//! regardless of alpha. The usable text capacity is that raw byte count
//! minus the frame overhead, capped at the u16 length prefix.

use crate::mark::frame::{frame_len, FRAME_OVERHEAD, MAX_TEXT_BYTES};
use crate::mark::scan::{carrier_bits, COLOR_CHANNELS};
use crate::pixels::{ChannelLayout, PixelBuffer};

/// Breakdown of a buffer's embedding capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacityInfo {
    /// Carrier samples, one bit each.
    pub carrier_bits: usize,
    /// `carrier_bits / 8`, before frame overhead.
    pub raw_bytes: usize,
    /// Longest UTF-8 text (in bytes) that [`embed`](crate::mark::embed()) accepts.
    pub max_text_bytes: usize,
}

/// Maximum text size in bytes that can be embedded in `buffer`.
///
/// Returns 0 for buffers too small to hold even an empty frame; those
/// reject every embed.
pub fn capacity(buffer: &PixelBuffer) -> usize {
    max_text_bytes(carrier_bits(buffer))
}

/// Capacity for a buffer of the given shape, without building one.
///
/// Alpha never carries bits, so `_layout` does not change the result.
pub fn capacity_for(width: u32, height: u32, _layout: ChannelLayout) -> usize {
    let bits = (width as usize)
        .saturating_mul(height as usize)
        .saturating_mul(COLOR_CHANNELS);
    max_text_bytes(bits)
}

pub fn capacity_info(buffer: &PixelBuffer) -> CapacityInfo {
    let bits = carrier_bits(buffer);
    CapacityInfo {
        carrier_bits: bits,
        raw_bytes: bits / 8,
        max_text_bytes: max_text_bytes(bits),
    }
}

/// Whether `text` would be accepted by [`embed`](crate::mark::embed()).
pub fn fits(buffer: &PixelBuffer, text: &str) -> bool {
    frame_fits(carrier_bits(buffer), text.len())
}

/// Whether a frame for `text_len` bytes of text fits `carrier_bits` carriers.
pub(crate) fn frame_fits(carrier_bits: usize, text_len: usize) -> bool {
    text_len <= MAX_TEXT_BYTES && frame_len(text_len) * 8 <= carrier_bits
}

fn max_text_bytes(carrier_bits: usize) -> usize {
    (carrier_bits / 8)
        .saturating_sub(FRAME_OVERHEAD)
        .min(MAX_TEXT_BYTES)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rgb(width: u32, height: u32) -> PixelBuffer {
        PixelBuffer::filled(width, height, ChannelLayout::Rgb, 0).unwrap()
    }

    #[test]
    fn hundred_square_rgb() {
        // 30000 bits -> 3750 bytes - 6 overhead.
        assert_eq!(capacity(&rgb(100, 100)), 3744);
    }

    #[test]
    fn alpha_adds_nothing() {
        let rgba = PixelBuffer::filled(100, 100, ChannelLayout::Rgba, 0).unwrap();
        assert_eq!(capacity(&rgba), capacity(&rgb(100, 100)));
        assert_eq!(capacity_for(100, 100, ChannelLayout::Rgba), 3744);
        assert_eq!(capacity_for(100, 100, ChannelLayout::Rgb), 3744);
    }

    #[test]
    fn partial_byte_floors() {
        // 5x5x3 = 75 bits -> 9 bytes -> 3 bytes of text.
        assert_eq!(capacity(&rgb(5, 5)), 3);
    }

    #[test]
    fn too_small_is_zero() {
        assert_eq!(capacity(&rgb(1, 1)), 0);
        // 2x2x3 = 12 carriers = 1 raw byte, below the 6-byte overhead.
        assert_eq!(capacity(&rgb(2, 2)), 0);
        assert!(!fits(&rgb(2, 2), ""));
    }

    #[test]
    fn exactly_empty_frame() {
        // 4x4x3 = 48 bits = 6 bytes: room for the empty text only.
        let buf = rgb(4, 4);
        assert_eq!(capacity(&buf), 0);
        assert_eq!(capacity_info(&buf).raw_bytes, 6);
        assert!(fits(&buf, ""));
        assert!(!fits(&buf, "a"));
    }

    #[test]
    fn capped_at_length_prefix() {
        assert_eq!(capacity_for(1000, 1000, ChannelLayout::Rgb), MAX_TEXT_BYTES);
        assert_eq!(capacity_for(u32::MAX, u32::MAX, ChannelLayout::Rgba), MAX_TEXT_BYTES);
    }

    #[test]
    fn info_breakdown() {
        let info = capacity_info(&rgb(10, 10));
        assert_eq!(
            info,
            CapacityInfo {
                carrier_bits: 300,
                raw_bytes: 37,
                max_text_bytes: 31,
            }
        );
    }

    #[test]
    fn fits_matches_capacity() {
        let buf = rgb(10, 10);
        let cap = capacity(&buf);
        assert!(fits(&buf, &"a".repeat(cap)));
        assert!(!fits(&buf, &"a".repeat(cap + 1)));
    }
}
