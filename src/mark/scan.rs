// Copyright (c) 2026 The hidemark-core Authors
// SPDX-License-Identifier: GPL-3.0-only
// hidemark-core: blind LSB text watermarking for pixel buffers

//! Carrier scan order shared by embedder and extractor.
//!
//! Pixels are visited row-major (row 0 left to right, then row 1, ...).
//! Within a pixel only the color channels 0, 1, 2 are visited, in index
//! order; alpha is skipped. Each visited sample carries one bit in its LSB.
//!
//! Both sides of the codec go through [`ScanOrder`]. If the order ever
//! differs between them, every previously marked image becomes unreadable.

use core::iter::FusedIterator;

use crate::pixels::PixelBuffer;

/// Number of leading channels per pixel that carry watermark bits.
pub const COLOR_CHANNELS: usize = 3;

/// Number of carrier samples (= bits) in `buffer`.
pub fn carrier_bits(buffer: &PixelBuffer) -> usize {
    buffer.pixel_count() * COLOR_CHANNELS
}

/// Iterator over the indices (into [`PixelBuffer::samples`]) of carrier
/// samples, in scan order.
#[derive(Debug, Clone)]
pub struct ScanOrder {
    next: usize,
    end: usize,
    channels: usize,
}

impl ScanOrder {
    pub fn new(buffer: &PixelBuffer) -> Self {
        Self {
            next: 0,
            end: buffer.samples().len(),
            channels: buffer.channels(),
        }
    }

    /// Carrier samples strictly below sample index `n`.
    fn carriers_before(&self, n: usize) -> usize {
        (n / self.channels) * COLOR_CHANNELS + (n % self.channels).min(COLOR_CHANNELS)
    }
}

impl Iterator for ScanOrder {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        while self.next < self.end {
            let index = self.next;
            self.next += 1;
            if index % self.channels < COLOR_CHANNELS {
                return Some(index);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.carriers_before(self.end) - self.carriers_before(self.next);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for ScanOrder {}

impl FusedIterator for ScanOrder {}

/// Reads carrier LSBs in scan order, MSB-first into bytes.
pub(crate) struct LsbReader<'a> {
    samples: &'a [u8],
    order: ScanOrder,
    bits_read: usize,
}

impl<'a> LsbReader<'a> {
    pub(crate) fn new(buffer: &'a PixelBuffer) -> Self {
        Self {
            samples: buffer.samples(),
            order: ScanOrder::new(buffer),
            bits_read: 0,
        }
    }

    pub(crate) fn bits_read(&self) -> usize {
        self.bits_read
    }

    fn read_bit(&mut self) -> Option<u8> {
        let index = self.order.next()?;
        let sample = *self.samples.get(index)?;
        self.bits_read += 1;
        Some(sample & 1)
    }

    /// Next 8 carrier bits as a byte, or `None` once the carrier is exhausted.
    pub(crate) fn read_byte(&mut self) -> Option<u8> {
        let mut byte = 0u8;
        for _ in 0..8 {
            byte = (byte << 1) | self.read_bit()?;
        }
        Some(byte)
    }

    pub(crate) fn read_array<const N: usize>(&mut self) -> Option<[u8; N]> {
        let mut out = [0u8; N];
        for slot in out.iter_mut() {
            *slot = self.read_byte()?;
        }
        Some(out)
    }
}
