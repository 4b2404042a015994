use crate::{error::AppResult, format::ImageFormat};
use domain::buffer::PixelBuffer;
use std::sync::Arc;

/// Whole-image codec for one on-disk format. A failed decode returns no
/// buffer; a failed encode returns no bytes.
pub trait ImageCodecPort: Send + Sync {
    fn format(&self) -> ImageFormat;
    fn decode(&self, data: &[u8]) -> AppResult<PixelBuffer>;
    fn encode(&self, buffer: &PixelBuffer) -> AppResult<Vec<u8>>;
}

pub type DynImageCodecPort = Arc<dyn ImageCodecPort>;
