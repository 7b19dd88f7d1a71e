// Copyright (c) 2026 The hidemark-core Authors
// SPDX-License-Identifier: GPL-3.0-only
// hidemark-core: blind LSB text watermarking for pixel buffers

//! Watermark frame construction and parsing.
//!
//! The frame is the binary container written into the carrier LSBs:
//!
//! ```text
//! [2 bytes] magic marker 0x57 0x4D ("WM")
//! [2 bytes] text length (big-endian u16)
//! [N bytes] UTF-8 text
//! [2 bytes] CRC-16/CCITT-FALSE of everything above (big-endian)
//! ```
//!
//! Total frame size = 6 + text length bytes. Bits are serialized MSB first
//! within each byte, bytes in the order above.

use crc::{Crc, CRC_16_IBM_3740};

use crate::mark::error::{CorruptKind, MarkError};

/// Fixed marker opening every frame.
pub const MAGIC: [u8; 2] = [0x57, 0x4D];

/// Magic + length prefix.
pub const HEADER_LEN: usize = MAGIC.len() + 2;

/// Trailing CRC-16.
pub const CHECKSUM_LEN: usize = 2;

/// Fixed overhead: magic(2) + length(2) + checksum(2) = 6 bytes.
pub const FRAME_OVERHEAD: usize = HEADER_LEN + CHECKSUM_LEN;

/// Largest text the u16 length prefix can describe.
pub const MAX_TEXT_BYTES: usize = u16::MAX as usize;

/// CRC-16/CCITT-FALSE (poly 0x1021, init 0xFFFF, no reflection, no final XOR).
static CRC16: Crc<u16> = Crc::<u16>::new(&CRC_16_IBM_3740);

/// Decoded watermark payload.
///
/// Holds the raw text bytes. The magic, length and checksum fields are
/// derived on serialization, so a `Payload` can never carry a stale checksum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payload {
    text: Vec<u8>,
}

impl Payload {
    /// Wrap text bytes.
    ///
    /// # Errors
    /// [`MarkError::PayloadTooLarge`] if `text` is longer than [`MAX_TEXT_BYTES`].
    pub fn new(text: Vec<u8>) -> Result<Self, MarkError> {
        if text.len() > MAX_TEXT_BYTES {
            return Err(MarkError::PayloadTooLarge {
                max_bytes: MAX_TEXT_BYTES,
                requested: text.len(),
            });
        }
        Ok(Self { text })
    }

    pub fn from_text(text: &str) -> Result<Self, MarkError> {
        Self::new(text.as_bytes().to_vec())
    }

    /// Only for bytes read back under a u16 length prefix.
    fn from_frame(text: Vec<u8>) -> Self {
        debug_assert!(text.len() <= MAX_TEXT_BYTES);
        Self { text }
    }

    pub fn text_bytes(&self) -> &[u8] {
        &self.text
    }

    pub fn into_text_bytes(self) -> Vec<u8> {
        self.text
    }

    pub fn text_len(&self) -> u16 {
        // Length bounded by the constructors.
        self.text.len() as u16
    }

    /// Magic followed by the big-endian length prefix.
    pub fn header(&self) -> [u8; HEADER_LEN] {
        let len = self.text_len().to_be_bytes();
        [MAGIC[0], MAGIC[1], len[0], len[1]]
    }

    /// CRC-16 over header and text.
    pub fn checksum(&self) -> u16 {
        frame_checksum(&self.header(), &self.text)
    }

    /// Serialized size in bytes.
    pub fn frame_len(&self) -> usize {
        frame_len(self.text.len())
    }

    /// Serialize the complete frame.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut frame = Vec::with_capacity(self.frame_len());
        frame.extend_from_slice(&self.header());
        frame.extend_from_slice(&self.text);
        frame.extend_from_slice(&self.checksum().to_be_bytes());
        frame
    }
}

/// Frame size in bytes for a text of `text_len` bytes.
pub fn frame_len(text_len: usize) -> usize {
    FRAME_OVERHEAD + text_len
}

/// CRC-16/CCITT-FALSE of `data`.
pub fn checksum(data: &[u8]) -> u16 {
    CRC16.checksum(data)
}

fn frame_checksum(header: &[u8; HEADER_LEN], text: &[u8]) -> u16 {
    let mut digest = CRC16.digest();
    digest.update(header);
    digest.update(text);
    digest.finalize()
}

/// Check the two magic bytes.
pub fn check_magic(magic: &[u8; 2]) -> Result<(), CorruptKind> {
    check_magic_byte(0, magic[0])?;
    check_magic_byte(1, magic[1])
}

/// Check one magic byte as soon as it is read.
pub fn check_magic_byte(index: usize, byte: u8) -> Result<(), CorruptKind> {
    match MAGIC.get(index) {
        Some(&expected) if expected == byte => Ok(()),
        _ => Err(CorruptKind::NoWatermark),
    }
}

/// Validate the magic and return the declared text length.
pub fn parse_header(header: &[u8; HEADER_LEN]) -> Result<u16, CorruptKind> {
    check_magic(&[header[0], header[1]])?;
    Ok(u16::from_be_bytes([header[2], header[3]]))
}

/// Recompute the checksum over what was actually read and compare.
pub(crate) fn verify(
    header: &[u8; HEADER_LEN],
    text: Vec<u8>,
    stored: u16,
) -> Result<Payload, CorruptKind> {
    if frame_checksum(header, &text) != stored {
        return Err(CorruptKind::ChecksumFailed);
    }
    Ok(Payload::from_frame(text))
}

/// Serialize a payload into its bitstream (one `u8` of value 0 or 1 per bit).
pub fn encode(payload: &Payload) -> Vec<u8> {
    bytes_to_bits(&payload.to_bytes())
}

/// Parse a bitstream back into a payload.
///
/// Reads the magic first and stops with [`CorruptKind::NoWatermark`] at the
/// first byte that does not match. Bits beyond the declared frame are ignored, so `bits` may
/// be any prefix-extended stream (e.g. every LSB of a carrier).
///
/// # Errors
/// - [`CorruptKind::NoWatermark`] if the magic marker is absent.
/// - [`CorruptKind::Truncated`] if a declared field runs past the end of `bits`.
/// - [`CorruptKind::ChecksumFailed`] if the stored CRC does not match.
pub fn decode(bits: &[u8]) -> Result<Payload, CorruptKind> {
    let mut bytes = bits.chunks_exact(8).map(pack_byte);

    let mut next = || bytes.next().ok_or(CorruptKind::Truncated);

    let first = next()?;
    check_magic_byte(0, first)?;
    let second = next()?;
    check_magic_byte(1, second)?;
    let magic = [first, second];
    let len = [next()?, next()?];
    let header = [magic[0], magic[1], len[0], len[1]];
    let text_len = parse_header(&header)? as usize;

    let text = (0..text_len).map(|_| next()).collect::<Result<Vec<u8>, _>>()?;
    let stored = u16::from_be_bytes([next()?, next()?]);
    verify(&header, text, stored)
}

/// Bits of `bytes`, MSB first within each byte.
pub fn iter_bits(bytes: &[u8]) -> impl Iterator<Item = u8> + '_ {
    bytes
        .iter()
        .flat_map(|&byte| (0..8).rev().map(move |shift| (byte >> shift) & 1))
}

/// Convert bytes to a bit vector (MSB first within each byte).
pub fn bytes_to_bits(bytes: &[u8]) -> Vec<u8> {
    iter_bits(bytes).collect()
}

/// Convert a bit vector (MSB first) back to bytes.
/// A trailing partial byte is zero-padded on the right.
pub fn bits_to_bytes(bits: &[u8]) -> Vec<u8> {
    bits.chunks(8)
        .map(|chunk| pack_byte(chunk) << (8 - chunk.len()))
        .collect()
}

fn pack_byte(bits: &[u8]) -> u8 {
    bits.iter().fold(0u8, |acc, &bit| (acc << 1) | (bit & 1))
}
