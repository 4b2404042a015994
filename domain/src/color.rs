use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{DomainError, DomainResult};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Pixel {
    pub const BLACK: Self = Self::new(0, 0, 0);

    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Builds a pixel from channels parsed wider than a byte, rejecting
    /// anything above 255 instead of wrapping.
    pub fn from_wide(r: u64, g: u64, b: u64) -> DomainResult<Self> {
        Ok(Self {
            r: narrow_channel(r)?,
            g: narrow_channel(g)?,
            b: narrow_channel(b)?,
        })
    }

    #[must_use]
    pub fn to_packed(&self) -> u32 {
        pack_rgb(self.r, self.g, self.b)
    }

    #[must_use]
    pub fn from_packed(rgb: u32) -> Self {
        Self {
            r: ((rgb >> 16) & 0xFF) as u8,
            g: ((rgb >> 8) & 0xFF) as u8,
            b: (rgb & 0xFF) as u8,
        }
    }
}

impl fmt::Display for Pixel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.r, self.g, self.b)
    }
}

pub fn narrow_channel(value: u64) -> DomainResult<u8> {
    u8::try_from(value).map_err(|_| DomainError::ChannelOutOfRange { value })
}

#[inline]
#[must_use]
pub fn pack_rgb(r: u8, g: u8, b: u8) -> u32 {
    (u32::from(r) << 16) | (u32::from(g) << 8) | u32::from(b)
}
