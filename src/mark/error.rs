// Copyright (c) 2026 The hidemark-core Authors
// SPDX-License-Identifier: GPL-3.0-only
// hidemark-core: blind LSB text watermarking for pixel buffers

//! Error types for the watermark pipeline.
//!
//! [`MarkError`] is what embedding can fail with. [`CorruptKind`] is the
//! full failure taxonomy of frame decoding; the public extractor collapses
//! it into `None` so callers cannot tell "never marked" from "damaged".

use core::fmt;

/// Errors that can occur while embedding a watermark.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkError {
    /// The UTF-8 text does not fit the carrier. `max_bytes` is the capacity
    /// of the buffer, `requested` the byte length of the rejected text.
    PayloadTooLarge { max_bytes: usize, requested: usize },
}

impl fmt::Display for MarkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PayloadTooLarge { max_bytes, requested } => write!(
                f,
                "text of {requested} bytes exceeds watermark capacity of {max_bytes} bytes"
            ),
        }
    }
}

impl std::error::Error for MarkError {}

/// Why a bitstream did not decode into a payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CorruptKind {
    /// The magic marker is absent. The normal result for an unmarked image.
    NoWatermark,
    /// Magic matched but the stored checksum disagrees with the data read.
    ChecksumFailed,
    /// Fewer bits remain than a declared field requires.
    Truncated,
}

impl fmt::Display for CorruptKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoWatermark => write!(f, "no watermark marker present"),
            Self::ChecksumFailed => write!(f, "watermark checksum mismatch"),
            Self::Truncated => write!(f, "watermark frame truncated"),
        }
    }
}

impl std::error::Error for CorruptKind {}
