#[macro_use]
extern crate log;

pub mod codec;
pub mod downsample;
mod error;
pub mod input;
pub mod params;
pub mod pipeline;
pub mod pixels;

pub use downsample::downsample;
pub use error::{Error, ErrorKind, InputUnavailable, Result};
pub use input::Source;
pub use params::{DownsampleFactor, Quality};
pub use pipeline::{convert, Destination, InputFormat, Report, Request};
pub use pixels::{Dimensions, PixelBuffer};
