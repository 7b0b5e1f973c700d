use crate::error::Error;
use crate::Result;

/// Samples per pixel. Buffers are always RGB without alpha.
pub const CHANNELS: usize = 3;

/// Largest width or height a baseline JPEG frame header can carry.
pub const MAX_DIMENSION: u32 = u16::MAX as u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// `None` when the count does not fit in memory addressing.
    pub fn pixel_count(&self) -> Option<usize> {
        (self.width as usize).checked_mul(self.height as usize)
    }

    pub fn byte_len(&self) -> Option<usize> {
        self.pixel_count()?.checked_mul(CHANNELS)
    }

    /// Both sides non-zero and within what a JPEG can describe.
    pub fn is_encodable(&self) -> bool {
        (1..=MAX_DIMENSION).contains(&self.width) && (1..=MAX_DIMENSION).contains(&self.height)
    }
}

impl std::fmt::Display for Dimensions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Row-major RGB samples together with the dimensions they describe.
///
/// The length of `samples` always equals `width * height * 3`; the only
/// way to build one is through [`PixelBuffer::new`], which checks it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    samples: Vec<u8>,
    dimensions: Dimensions,
}

impl PixelBuffer {
    pub fn new(samples: Vec<u8>, dimensions: Dimensions) -> Result<Self> {
        if dimensions.width == 0 || dimensions.height == 0 {
            return Err(Error::decode(format!("image has no pixels ({dimensions})")));
        }
        if dimensions.byte_len() != Some(samples.len()) {
            return Err(Error::decode(format!(
                "pixel buffer holds {} bytes, which does not match {}",
                samples.len(),
                dimensions
            )));
        }
        Ok(Self {
            samples,
            dimensions,
        })
    }

    /// For producers that size the buffer from `dimensions` themselves.
    pub(crate) fn from_parts(samples: Vec<u8>, dimensions: Dimensions) -> Self {
        debug_assert_eq!(Some(samples.len()), dimensions.byte_len());
        Self {
            samples,
            dimensions,
        }
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    pub fn width(&self) -> u32 {
        self.dimensions.width
    }

    pub fn height(&self) -> u32 {
        self.dimensions.height
    }

    pub fn samples(&self) -> &[u8] {
        &self.samples
    }

    /// The three channel bytes of the pixel at (`x`, `y`).
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        let offset = (y as usize * self.width() as usize + x as usize) * CHANNELS;
        let px = &self.samples[offset..offset + CHANNELS];
        Some([px[0], px[1], px[2]])
    }
}
