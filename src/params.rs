//! Conversion parameters and the policy applied to them.
//!
//! Quality is tunable and silently clamped into range. The downsample
//! factor changes the output geometry, so anything outside the supported
//! set is rejected.

use crate::error::Error;
use crate::Result;

/// JPEG quality on the usual 1 (worst) to 100 (best) scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(u8);

impl Quality {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 100;

    pub fn clamped(value: i64) -> Self {
        let clamped = value.clamp(Self::MIN as i64, Self::MAX as i64) as u8;
        if clamped as i64 != value {
            debug!("quality {} clamped to {}", value, clamped);
        }
        Self(clamped)
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(85)
    }
}

impl std::fmt::Display for Quality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Integer shrink factor applied on both axes before encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DownsampleFactor {
    #[default]
    One,
    Two,
    Four,
}

impl DownsampleFactor {
    pub fn get(self) -> u32 {
        match self {
            Self::One => 1,
            Self::Two => 2,
            Self::Four => 4,
        }
    }
}

impl TryFrom<i64> for DownsampleFactor {
    type Error = Error;

    fn try_from(value: i64) -> Result<Self> {
        match value {
            1 => Ok(Self::One),
            2 => Ok(Self::Two),
            4 => Ok(Self::Four),
            other => Err(Error::invalid_parameter(format!(
                "Invalid downsample factor: {}. Supported values are 1, 2, 4.",
                other
            ))),
        }
    }
}

impl std::fmt::Display for DownsampleFactor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.get())
    }
}
