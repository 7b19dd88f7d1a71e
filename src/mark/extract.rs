// Copyright (c) 2026 The hidemark-core Authors
// SPDX-License-Identifier: GPL-3.0-only
// hidemark-core: blind LSB text watermarking for pixel buffers

//! Watermark extraction.
//!
//! Reads carrier LSBs in the same scan order the embedder wrote them:
//! magic first (unmarked images stop here after 16 samples), then the
//! length prefix, then exactly as many text and checksum bits as the
//! prefix declares. A declared length that cannot fit the carrier is
//! rejected before any of it is read.
//!
//! Every failure (no marker, bad checksum, truncation, invalid UTF-8)
//! collapses into `None`, so callers cannot tell an unmarked image from a
//! damaged one.

use crate::mark::error::CorruptKind;
use crate::mark::frame::{self, Payload, CHECKSUM_LEN, HEADER_LEN};
use crate::mark::progress::{NoProgress, ProgressSink, Throttle};
use crate::mark::scan::{carrier_bits, LsbReader};
use crate::pixels::PixelBuffer;

/// Recover the watermark text from `buffer`, if any.
pub fn extract(buffer: &PixelBuffer) -> Option<String> {
    extract_with_progress(buffer, &mut NoProgress)
}

/// Recover the watermark text, reporting progress to `progress`.
///
/// Progress is measured over the bits the frame needs, not the whole
/// buffer. It may stop short of 1.0 when extraction fails early.
pub fn extract_with_progress<P: ProgressSink + ?Sized>(
    buffer: &PixelBuffer,
    progress: &mut P,
) -> Option<String> {
    let payload = match read_payload(buffer, progress) {
        Ok(payload) => payload,
        Err(kind) => {
            log::debug!("no watermark recovered: {kind}");
            return None;
        }
    };
    match String::from_utf8(payload.into_text_bytes()) {
        Ok(text) => Some(text),
        Err(_) => {
            log::debug!("watermark checksum matched but text is not valid UTF-8");
            None
        }
    }
}

/// Read and verify the frame without collapsing the failure reason.
pub(crate) fn read_payload<P: ProgressSink + ?Sized>(
    buffer: &PixelBuffer,
    progress: &mut P,
) -> Result<Payload, CorruptKind> {
    let mut reader = LsbReader::new(buffer);

    let mut magic = [0u8; 2];
    for (index, slot) in magic.iter_mut().enumerate() {
        *slot = reader.read_byte().ok_or(CorruptKind::Truncated)?;
        frame::check_magic_byte(index, *slot)?;
    }
    let len: [u8; 2] = reader.read_array().ok_or(CorruptKind::Truncated)?;
    let header: [u8; HEADER_LEN] = [magic[0], magic[1], len[0], len[1]];
    let text_len = frame::parse_header(&header)? as usize;

    let total_bits = frame::frame_len(text_len) * 8;
    let available = carrier_bits(buffer);
    if total_bits > available {
        log::trace!("declared frame of {total_bits} bits exceeds {available} carrier bits");
        return Err(CorruptKind::Truncated);
    }
    log::trace!("reading {text_len}-byte watermark text");

    let mut throttle = Throttle::new(progress, total_bits);
    throttle.advance_to(reader.bits_read());

    let mut text = Vec::with_capacity(text_len);
    for _ in 0..text_len {
        text.push(reader.read_byte().ok_or(CorruptKind::Truncated)?);
        throttle.advance_to(reader.bits_read());
    }
    let stored: [u8; CHECKSUM_LEN] = reader.read_array().ok_or(CorruptKind::Truncated)?;
    throttle.advance_to(reader.bits_read());

    let payload = frame::verify(&header, text, u16::from_be_bytes(stored))?;
    throttle.finish();
    Ok(payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mark::embed::embed;
    use crate::pixels::ChannelLayout;

    fn cover(width: u32, height: u32) -> PixelBuffer {
        let len = (width * height * 3) as usize;
        let samples: Vec<u8> = (0..len).map(|i| (i * 31 % 251) as u8).collect();
        PixelBuffer::from_rgb(width, height, samples).unwrap()
    }

    /// Write raw frame bytes into the carrier LSBs, bypassing the embedder's checks.
    fn write_raw(buffer: &PixelBuffer, bytes: &[u8]) -> PixelBuffer {
        let mut out = buffer.clone();
        let order: Vec<usize> = crate::mark::scan::ScanOrder::new(buffer).collect();
        let samples = out.samples_mut();
        for (bit, index) in frame::iter_bits(bytes).zip(order) {
            samples[index] = (samples[index] & 0xFE) | bit;
        }
        out
    }

    #[test]
    fn roundtrip() {
        let marked = embed(&cover(20, 20), "round trip").unwrap();
        assert_eq!(extract(&marked).as_deref(), Some("round trip"));
    }

    #[test]
    fn unmarked_is_none() {
        let blank = PixelBuffer::filled(20, 20, ChannelLayout::Rgb, 0).unwrap();
        assert_eq!(read_payload(&blank, &mut NoProgress), Err(CorruptKind::NoWatermark));
        assert_eq!(extract(&blank), None);
    }

    #[test]
    fn unmarked_reports_no_progress() {
        let blank = PixelBuffer::filled(20, 20, ChannelLayout::Rgb, 0).unwrap();
        let mut seen = Vec::new();
        assert_eq!(extract_with_progress(&blank, &mut |f: f64| seen.push(f)), None);
        assert!(seen.is_empty());
    }

    #[test]
    fn tiny_carrier_is_truncated() {
        // 12 carriers: the first magic byte fits, the second does not.
        let tiny = write_raw(&PixelBuffer::filled(2, 2, ChannelLayout::Rgb, 0).unwrap(), &[0x57]);
        assert_eq!(read_payload(&tiny, &mut NoProgress), Err(CorruptKind::Truncated));
    }

    #[test]
    fn wrong_first_magic_byte_stops_after_eight_carriers() {
        // Too small for a full magic, but the first byte already rules it out.
        let tiny = PixelBuffer::filled(2, 2, ChannelLayout::Rgb, 0).unwrap();
        assert_eq!(read_payload(&tiny, &mut NoProgress), Err(CorruptKind::NoWatermark));
    }

    #[test]
    fn oversized_length_rejected_before_reading() {
        // Valid magic, length 0xFFFF in a 20x20 carrier (150 raw bytes).
        let forged = write_raw(&cover(20, 20), &[0x57, 0x4D, 0xFF, 0xFF]);
        let mut seen = Vec::new();
        assert_eq!(
            read_payload(&forged, &mut |f: f64| seen.push(f)),
            Err(CorruptKind::Truncated)
        );
        assert!(seen.is_empty());
    }

    #[test]
    fn length_exactly_filling_carrier_is_read() {
        // 4x4 RGB = 6 raw bytes: an empty-text frame uses every carrier.
        let marked = embed(&cover(4, 4), "").unwrap();
        assert_eq!(extract(&marked).as_deref(), Some(""));
    }

    #[test]
    fn checksum_mismatch_is_none() {
        let marked = embed(&cover(20, 20), "checksum").unwrap();
        let mut samples = marked.into_samples();
        // First text bit sits right after the 32 header carriers.
        samples[32] ^= 1;
        let tampered = PixelBuffer::from_rgb(20, 20, samples).unwrap();
        assert_eq!(read_payload(&tampered, &mut NoProgress), Err(CorruptKind::ChecksumFailed));
        assert_eq!(extract(&tampered), None);
    }

    #[test]
    fn invalid_utf8_with_valid_checksum_is_none() {
        let payload = Payload::new(vec![0xFF, 0xFE, 0x80]).unwrap();
        let forged = write_raw(&cover(20, 20), &payload.to_bytes());
        assert_eq!(read_payload(&forged, &mut NoProgress), Ok(payload));
        assert_eq!(extract(&forged), None);
    }

    #[test]
    fn progress_counts_frame_bits_only() {
        let marked = embed(&cover(100, 100), "short").unwrap();
        let mut seen = Vec::new();
        let text = extract_with_progress(&marked, &mut |f: f64| seen.push(f));
        assert_eq!(text.as_deref(), Some("short"));
        assert_eq!(*seen.last().unwrap(), 1.0);
        assert!(seen.windows(2).all(|w| w[0] <= w[1]));
        // The 32 header bits out of 88 are already past several steps.
        assert!(seen[0] >= 32.0 / 88.0 - 1e-9);
    }
}
