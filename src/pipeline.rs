//! Decode, downsample, encode.

use std::fs;
use std::io::{Read, Write};
use std::path::PathBuf;

use crate::codec;
use crate::downsample::downsample;
use crate::error::Error;
use crate::input::Source;
use crate::params::{DownsampleFactor, Quality};
use crate::pixels::Dimensions;
use crate::Result;

/// How the input bytes are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Png,
    /// Headerless or `screencap`-style RGBA8888 of known size.
    RawRgba { width: u32, height: u32 },
}

/// Where the JPEG goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    File(PathBuf),
    Stdout,
}

impl std::fmt::Display for Destination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Stdout => f.write_str("stdout"),
        }
    }
}

/// One conversion as requested on the command line. Quality and factor are
/// kept as given; [`convert`] applies the parameter policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub source: Source,
    pub format: InputFormat,
    pub destination: Destination,
    pub quality: i64,
    pub downsample: i64,
}

/// Outcome of a successful conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub source: String,
    pub destination: String,
    pub dimensions: Dimensions,
    pub quality: Quality,
    pub downsample: DownsampleFactor,
    pub encoded_len: usize,
}

impl std::fmt::Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Converted: {} -> {} ({}, quality={}, downsample_factor={})",
            self.source, self.destination, self.dimensions, self.quality, self.downsample
        )
    }
}

/// Run one conversion. `stdin` is read only when the source is standard
/// input and `stdout` is written only when the destination is standard
/// output.
///
/// Parameters are checked before any input is consumed, and the output file
/// is created only after encoding succeeded.
pub fn convert(request: &Request, stdin: impl Read, mut stdout: impl Write) -> Result<Report> {
    let quality = Quality::clamped(request.quality);
    let factor = DownsampleFactor::try_from(request.downsample)?;
    if let InputFormat::RawRgba { width, height } = request.format {
        if !Dimensions::new(width, height).is_encodable() {
            return Err(Error::invalid_parameter(format!(
                "Invalid raw frame size: {}x{}",
                width, height
            )));
        }
    }

    let bytes = request.source.read_all(stdin)?;
    let decoded = match request.format {
        InputFormat::Png => codec::decode_png(&bytes)?,
        InputFormat::RawRgba { width, height } => {
            codec::decode_raw_rgba(&bytes, Dimensions::new(width, height))?
        }
    };
    drop(bytes);
    debug!("decoded {} image from {}", decoded.dimensions(), request.source);

    let image = downsample(decoded, factor);
    let destination = request.destination.to_string();
    let jpeg = codec::encode_jpeg(&image, quality, &destination)?;
    debug!("encoded {} bytes for {}", jpeg.len(), destination);

    match &request.destination {
        Destination::File(path) => {
            fs::write(path, &jpeg).map_err(|e| Error::encode(&destination, e))?
        }
        Destination::Stdout => stdout
            .write_all(&jpeg)
            .and_then(|()| stdout.flush())
            .map_err(|e| Error::encode(&destination, e))?,
    }

    Ok(Report {
        source: request.source.to_string(),
        destination,
        dimensions: image.dimensions(),
        quality,
        downsample: factor,
        encoded_len: jpeg.len(),
    })
}
