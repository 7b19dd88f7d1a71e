// Copyright (c) 2026 The hidemark-core Authors
// SPDX-License-Identifier: GPL-3.0-only
// hidemark-core: blind LSB text watermarking for pixel buffers

//! # hidemark-core
//!
//! Pure-Rust blind watermarking: hide a short UTF-8 text in the least
//! significant bits of an image's color samples and read it back from the
//! marked image alone.
//!
//! The crate works on decoded pixels only ([`PixelBuffer`], 8-bit RGB or
//! RGBA). Loading and saving image files is left to the caller; only
//! lossless formats preserve the mark. Alpha is never modified.
//!
//! # Quick start
//!
//! ```rust
//! use hidemark_core::{embed, extract, capacity, PixelBuffer};
//!
//! let cover = PixelBuffer::from_rgb(100, 100, vec![128; 100 * 100 * 3]).unwrap();
//! assert_eq!(capacity(&cover), 3744);
//!
//! let marked = embed(&cover, "hello").unwrap();
//! assert_eq!(extract(&marked).as_deref(), Some("hello"));
//! assert_eq!(extract(&cover), None);
//! ```

pub mod mark;
pub mod pixels;
#[cfg(feature = "wasm")]
pub mod wasm;

pub use mark::{
    capacity, capacity_for, capacity_info, embed, embed_with_progress, extract,
    extract_with_progress, fits, progress, AtomicProgress, CapacityInfo, CorruptKind, MarkError,
    NoProgress, ProgressSink,
};
pub use pixels::error::PixelError;
pub use pixels::{ChannelLayout, PixelBuffer};
