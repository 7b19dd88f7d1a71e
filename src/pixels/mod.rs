// Copyright (c) 2026 The hidemark-core Authors
// SPDX-License-Identifier: GPL-3.0-only
// hidemark-core: blind LSB text watermarking for pixel buffers

//! Normalized in-memory pixel buffer (zero external dependencies).
//!
//! A [`PixelBuffer`] is the only image representation the watermark core
//! touches. Decoding a PNG (or any other container) into raw samples, and
//! encoding the result back, is the caller's job.
//!
//! Layout:
//! - 8-bit samples, row-major, channels interleaved per pixel
//! - RGB (3 channels) or RGBA (4 channels)
//! - Alpha, when present, is channel index 3 and is never modified by the
//!   watermark core
//!
//! Invariant: `samples.len() == width × height × channels`, checked once at
//! construction.

pub mod error;

use error::{PixelError, Result};

/// Channel arrangement of each pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelLayout {
    /// Red, green, blue.
    Rgb,
    /// Red, green, blue, alpha.
    Rgba,
}

impl ChannelLayout {
    /// Number of interleaved samples per pixel.
    pub const fn channels(self) -> usize {
        match self {
            Self::Rgb => 3,
            Self::Rgba => 4,
        }
    }

    pub const fn has_alpha(self) -> bool {
        matches!(self, Self::Rgba)
    }
}

/// A rectangular grid of 8-bit RGB or RGBA samples.
///
/// Created with [`PixelBuffer::new`] (or the [`from_rgb`](Self::from_rgb) /
/// [`from_rgba`](Self::from_rgba) shorthands). Samples are exclusively owned;
/// the watermark embedder never mutates a caller's buffer, it returns a new one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    layout: ChannelLayout,
    samples: Vec<u8>,
}

impl PixelBuffer {
    /// Wrap raw samples, validating dimensions against the sample count.
    ///
    /// # Errors
    /// - [`PixelError::ZeroDimension`] if `width` or `height` is zero.
    /// - [`PixelError::TooLarge`] if `width × height × channels` overflows.
    /// - [`PixelError::LengthMismatch`] if `samples` has the wrong length.
    pub fn new(width: u32, height: u32, layout: ChannelLayout, samples: Vec<u8>) -> Result<Self> {
        let expected = expected_len(width, height, layout)?;
        if samples.len() != expected {
            return Err(PixelError::LengthMismatch {
                expected,
                actual: samples.len(),
            });
        }
        Ok(Self {
            width,
            height,
            layout,
            samples,
        })
    }

    pub fn from_rgb(width: u32, height: u32, samples: Vec<u8>) -> Result<Self> {
        Self::new(width, height, ChannelLayout::Rgb, samples)
    }

    pub fn from_rgba(width: u32, height: u32, samples: Vec<u8>) -> Result<Self> {
        Self::new(width, height, ChannelLayout::Rgba, samples)
    }

    /// A buffer with every sample set to `value`.
    pub fn filled(width: u32, height: u32, layout: ChannelLayout, value: u8) -> Result<Self> {
        let len = expected_len(width, height, layout)?;
        Self::new(width, height, layout, vec![value; len])
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn layout(&self) -> ChannelLayout {
        self.layout
    }

    /// Samples per pixel (3 or 4).
    pub fn channels(&self) -> usize {
        self.layout.channels()
    }

    /// Number of pixels (`width × height`).
    pub fn pixel_count(&self) -> usize {
        self.samples.len() / self.channels()
    }

    /// All samples in row-major, channel-interleaved order.
    pub fn samples(&self) -> &[u8] {
        &self.samples
    }

    /// Samples of the pixel at column `x`, row `y`, or `None` if out of range.
    pub fn pixel(&self, x: u32, y: u32) -> Option<&[u8]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let c = self.channels();
        let start = (y as usize * self.width as usize + x as usize) * c;
        self.samples.get(start..start + c)
    }

    /// Consume the buffer and return its samples.
    pub fn into_samples(self) -> Vec<u8> {
        self.samples
    }

    /// Mutable sample access, restricted to the watermark core so the length
    /// invariant cannot be broken from outside.
    pub(crate) fn samples_mut(&mut self) -> &mut [u8] {
        &mut self.samples
    }
}

fn expected_len(width: u32, height: u32, layout: ChannelLayout) -> Result<usize> {
    if width == 0 || height == 0 {
        return Err(PixelError::ZeroDimension);
    }
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|p| p.checked_mul(layout.channels()))
        .ok_or(PixelError::TooLarge)
}
