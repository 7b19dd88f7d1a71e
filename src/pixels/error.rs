// Copyright (c) 2026 The hidemark-core Authors
// SPDX-License-Identifier: GPL-3.0-only
// hidemark-core: blind LSB text watermarking for pixel buffers

//! Error types for pixel buffer construction.

use std::fmt;

/// Errors that can occur while wrapping raw samples in a [`PixelBuffer`](super::PixelBuffer).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PixelError {
    /// Width or height is zero.
    ZeroDimension,
    /// The sample vector does not hold exactly `width × height × channels` bytes.
    LengthMismatch { expected: usize, actual: usize },
    /// `width × height × channels` overflows `usize`.
    TooLarge,
}

impl fmt::Display for PixelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroDimension => write!(f, "pixel buffer width and height must be at least 1"),
            Self::LengthMismatch { expected, actual } => {
                write!(f, "pixel buffer holds {actual} samples, expected {expected}")
            }
            Self::TooLarge => write!(f, "pixel buffer dimensions overflow the address space"),
        }
    }
}

impl std::error::Error for PixelError {}

pub type Result<T> = std::result::Result<T, PixelError>;
