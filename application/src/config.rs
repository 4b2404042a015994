use domain::buffer::pixel_count;
use domain::error::{DomainError, DomainResult};

use crate::infrastructure_config::LimitsConfig;

/// Resource caps shared by the codecs and the image store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CodecLimits {
    pub max_input_bytes: Option<u64>,
    pub max_pixels: Option<u64>,
}

impl CodecLimits {
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_max_pixels(mut self, max: u64) -> Self {
        self.max_pixels = Some(max);
        self
    }

    #[must_use]
    pub fn with_max_input_bytes(mut self, max: u64) -> Self {
        self.max_input_bytes = Some(max);
        self
    }

    /// Header-time check, run before the pixel buffer is allocated.
    pub fn check_dimensions(&self, width: u32, height: u32) -> DomainResult<usize> {
        let count = pixel_count(width, height)?;
        if let Some(max) = self.max_pixels {
            if count as u64 > max {
                return Err(DomainError::LimitExceeded(format!(
                    "{width}x{height} is {count} pixels, limit is {max}"
                )));
            }
        }
        Ok(count)
    }

    pub fn check_input_size(&self, bytes: u64) -> DomainResult<()> {
        if let Some(max) = self.max_input_bytes {
            if bytes > max {
                return Err(DomainError::LimitExceeded(format!(
                    "input is {bytes} bytes, limit is {max}"
                )));
            }
        }
        Ok(())
    }
}

impl From<&LimitsConfig> for CodecLimits {
    fn from(config: &LimitsConfig) -> Self {
        Self {
            max_input_bytes: (config.max_input_bytes != 0).then_some(config.max_input_bytes),
            max_pixels: (config.max_pixels != 0).then_some(config.max_pixels),
        }
    }
}
