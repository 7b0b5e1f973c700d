//! Adapters around the PNG decoder and JPEG encoder.
//!
//! The codecs themselves come from the `image` crate; this module only
//! converts between their types and [`PixelBuffer`].

use std::time::Instant;

use image::codecs::jpeg::JpegEncoder;
use image::{ExtendedColorType, ImageEncoder, ImageFormat};

use crate::error::Error;
use crate::params::Quality;
use crate::pixels::{Dimensions, PixelBuffer, CHANNELS};
use crate::Result;

/// Start-of-frame marker for baseline DCT.
const SOF0: u8 = 0xC0;

const RAW_CHANNELS: usize = 4;

/// Header lengths written by `screencap` in front of a raw frame: width,
/// height and format words, plus a dataspace word on newer releases.
const SCREENCAP_HEADERS: [usize; 3] = [0, 12, 16];

/// Decode PNG bytes into an RGB buffer. Grayscale is expanded and alpha is
/// dropped.
pub fn decode_png(bytes: &[u8]) -> Result<PixelBuffer> {
    let start = Instant::now();
    let image =
        image::load_from_memory_with_format(bytes, ImageFormat::Png).map_err(Error::decode)?;
    let rgb = image.to_rgb8();
    let dimensions = Dimensions::new(rgb.width(), rgb.height());
    trace!("decoding {} took {:?}", dimensions, start.elapsed());
    PixelBuffer::new(rgb.into_raw(), dimensions)
}

/// Decode a raw RGBA8888 frame as dumped by `screencap`. Any bytes in
/// front of the `width * height * 4` pixel payload are taken to be the
/// header and skipped.
pub fn decode_raw_rgba(bytes: &[u8], dimensions: Dimensions) -> Result<PixelBuffer> {
    let Some(payload) = dimensions
        .pixel_count()
        .and_then(|n| n.checked_mul(RAW_CHANNELS))
    else {
        return Err(Error::decode(format!("raw frame {dimensions} is too large")));
    };
    if bytes.len() < payload {
        return Err(Error::decode(format!(
            "raw frame too short: {} bytes, {} RGBA needs {}",
            bytes.len(),
            dimensions,
            payload
        )));
    }
    let header = bytes.len() - payload;
    if !SCREENCAP_HEADERS.contains(&header) {
        warn!("skipping unexpected {} byte raw frame header", header);
    }

    let mut samples = Vec::with_capacity(payload / RAW_CHANNELS * CHANNELS);
    for px in bytes[header..].chunks_exact(RAW_CHANNELS) {
        samples.extend_from_slice(&px[..CHANNELS]);
    }
    PixelBuffer::new(samples, dimensions)
}

/// Encode `buffer` as a baseline JPEG. `destination` only names the target
/// in error messages.
pub fn encode_jpeg(buffer: &PixelBuffer, quality: Quality, destination: &str) -> Result<Vec<u8>> {
    let start = Instant::now();
    let mut jpeg = Vec::new();
    JpegEncoder::new_with_quality(&mut jpeg, quality.get())
        .write_image(
            buffer.samples(),
            buffer.width(),
            buffer.height(),
            ExtendedColorType::Rgb8,
        )
        .map_err(|e| Error::encode(destination, e))?;
    verify_baseline(&jpeg).map_err(|reason| Error::encode(destination, reason))?;
    trace!(
        "encoding {} at quality {} took {:?}",
        buffer.dimensions(),
        quality,
        start.elapsed()
    );
    Ok(jpeg)
}

fn verify_baseline(jpeg: &[u8]) -> std::result::Result<(), String> {
    let parsed = img_parts::jpeg::Jpeg::from_bytes(jpeg.to_vec().into())
        .map_err(|e| format!("encoder produced an unreadable stream: {e}"))?;
    if parsed.segments().iter().any(|s| s.marker() == SOF0) {
        Ok(())
    } else {
        Err("encoder did not produce a baseline frame".to_string())
    }
}
