//! Nearest-neighbour downsampling by an integer factor.

use crate::params::DownsampleFactor;
use crate::pixels::{Dimensions, PixelBuffer, CHANNELS};

/// Shrink `buffer` by `factor` on both axes.
///
/// Output dimensions are rounded up, so a trailing partial block of source
/// pixels still gets a destination pixel. Each destination pixel copies the
/// source pixel at `(min(x * factor, width - 1), min(y * factor, height - 1))`.
/// With a factor of 1 the buffer is handed back untouched.
pub fn downsample(buffer: PixelBuffer, factor: DownsampleFactor) -> PixelBuffer {
    if factor == DownsampleFactor::One {
        return buffer;
    }
    let step = factor.get();
    let src = buffer.dimensions();
    let dst = Dimensions::new(src.width.div_ceil(step), src.height.div_ceil(step));

    let samples = buffer.samples();
    let mut out = Vec::with_capacity(dst.byte_len().unwrap_or_default());
    for y in 0..dst.height {
        let src_y = source_coordinate(y, step, src.height) as usize;
        let row = src_y * src.width as usize;
        for x in 0..dst.width {
            let src_x = source_coordinate(x, step, src.width) as usize;
            let offset = (row + src_x) * CHANNELS;
            out.extend_from_slice(&samples[offset..offset + CHANNELS]);
        }
    }
    trace!("downsampled {} -> {} (factor {})", src, dst, step);

    PixelBuffer::from_parts(out, dst)
}

fn source_coordinate(dst: u32, step: u32, extent: u32) -> u32 {
    dst.saturating_mul(step).min(extent - 1)
}
