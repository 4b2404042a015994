use tracing::debug;

use domain::{
    buffer::PixelBuffer,
    region::{self, CropRegion, PastePoint},
};

use crate::error::{AppError, AppResult};

/// Applies the crop/paste pair of a command to a decoded source.
///
/// A crop alone yields the cropped region. A crop with a paste point copies
/// the crop out of `source` and pastes it back into `source` at the point.
pub fn apply_region_edits(
    source: PixelBuffer,
    crop: Option<CropRegion>,
    paste: Option<PastePoint>,
) -> AppResult<PixelBuffer> {
    match (crop, paste) {
        (None, None) => Ok(source),
        (Some(crop), None) => {
            let cropped = region::extract(&source, crop)?;
            debug!("Cropped {}", crop);
            Ok(cropped)
        }
        (Some(crop), Some(point)) => {
            let copied = region::extract(&source, crop)?;
            let composite = region::paste(&source, &copied, point)?;
            debug!("Copied {} and pasted at {}", crop, point);
            Ok(composite)
        }
        (None, Some(point)) => Err(AppError::ValidationError {
            message: format!("paste at {point} requires a copy region"),
        }),
    }
}
