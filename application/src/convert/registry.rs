use std::collections::HashMap;
use std::sync::Arc;

use domain::buffer::PixelBuffer;
use tracing::{debug, instrument};

use crate::{
    error::{AppError, AppResult},
    format::ImageFormat,
    ports::outgoing::image_codec::DynImageCodecPort,
};

/// Codec lookup keyed by on-disk format.
#[derive(Clone, Default)]
pub struct CodecRegistry {
    codecs: HashMap<ImageFormat, DynImageCodecPort>,
}

impl CodecRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `codec` under the format it reports, replacing any previous
    /// codec for that format.
    #[must_use]
    pub fn with_codec(mut self, codec: DynImageCodecPort) -> Self {
        self.codecs.insert(codec.format(), codec);
        self
    }

    pub fn codec(&self, format: ImageFormat) -> AppResult<&DynImageCodecPort> {
        self.codecs.get(&format).ok_or_else(|| AppError::CodecMissing {
            format: format.to_string(),
        })
    }

    #[must_use]
    pub fn formats(&self) -> Vec<ImageFormat> {
        ImageFormat::ALL
            .into_iter()
            .filter(|format| self.codecs.contains_key(format))
            .collect()
    }

    #[instrument(skip(self, data), fields(bytes = data.len()))]
    pub fn decode(&self, data: &[u8], format: ImageFormat) -> AppResult<PixelBuffer> {
        let buffer = self.codec(format)?.decode(data)?;
        debug!(
            "Decoded {} image {}x{}",
            format,
            buffer.width(),
            buffer.height()
        );
        Ok(buffer)
    }

    #[instrument(skip(self, buffer), fields(width = buffer.width(), height = buffer.height()))]
    pub fn encode(&self, buffer: &PixelBuffer, format: ImageFormat) -> AppResult<Vec<u8>> {
        let bytes = self.codec(format)?.encode(buffer)?;
        debug!("Encoded {} image: {} bytes", format, bytes.len());
        Ok(bytes)
    }
}

pub type SharedCodecRegistry = Arc<CodecRegistry>;
