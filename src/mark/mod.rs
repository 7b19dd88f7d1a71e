// Copyright (c) 2026 The hidemark-core Authors
// SPDX-License-Identifier: GPL-3.0-only
// hidemark-core: blind LSB text watermarking for pixel buffers

//! Blind LSB watermark embedding and extraction.
//!
//! A watermark is a small frame (magic, length, UTF-8 text, CRC-16) written
//! one bit per color sample into the least significant bits of a
//! [`PixelBuffer`](crate::pixels::PixelBuffer). Decoding needs only the marked
//! buffer: no original, no key.
//!
//! - [`embed`] / [`embed_with_progress`] return a marked copy of the buffer.
//! - [`extract`] / [`extract_with_progress`] return the text or `None`.
//! - [`capacity`] tells how many text bytes a buffer can take.
//!
//! The mark survives only lossless storage (PNG, BMP, raw). Lossy
//! re-encoding, scaling, or cropping destroys it; extraction then returns
//! `None`. The text is not encrypted.

pub mod capacity;
mod embed;
pub mod error;
mod extract;
pub mod frame;
pub mod progress;
pub mod scan;

pub use capacity::{capacity, capacity_for, capacity_info, fits, CapacityInfo};
pub use embed::{embed, embed_with_progress};
pub use error::{CorruptKind, MarkError};
pub use extract::{extract, extract_with_progress};
pub use frame::{Payload, FRAME_OVERHEAD, MAGIC, MAX_TEXT_BYTES};
pub use progress::{AtomicProgress, NoProgress, ProgressSink, PROGRESS_STEP};
pub use scan::{ScanOrder, COLOR_CHANNELS};
