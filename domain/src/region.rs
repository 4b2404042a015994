use serde::{Deserialize, Serialize};
use std::fmt;

use crate::buffer::PixelBuffer;
use crate::error::{DomainError, DomainResult};

/// Rectangle addressed by its top-left corner and extent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CropRegion {
    pub row: u32,
    pub col: u32,
    pub width: u32,
    pub height: u32,
}

impl CropRegion {
    #[must_use]
    pub fn new(row: u32, col: u32, width: u32, height: u32) -> Self {
        Self {
            row,
            col,
            width,
            height,
        }
    }

    /// Checks the rectangle lies entirely inside a `width x height` image.
    pub fn validate_within(&self, width: u32, height: u32) -> DomainResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(DomainError::RegionOutOfBounds(format!(
                "region {self} has an empty extent"
            )));
        }

        let fits_rows = self
            .row
            .checked_add(self.height)
            .is_some_and(|bottom| bottom <= height);
        let fits_cols = self
            .col
            .checked_add(self.width)
            .is_some_and(|right| right <= width);

        if !fits_rows || !fits_cols {
            return Err(DomainError::RegionOutOfBounds(format!(
                "region {self} exceeds image {width}x{height}"
            )));
        }
        Ok(())
    }
}

impl fmt::Display for CropRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}x{} at ({}, {})",
            self.width, self.height, self.row, self.col
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PastePoint {
    pub row: u32,
    pub col: u32,
}

impl PastePoint {
    #[must_use]
    pub fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for PastePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Copies `region` out of `src` into a new buffer. Never clamps.
pub fn extract(src: &PixelBuffer, region: CropRegion) -> DomainResult<PixelBuffer> {
    region.validate_within(src.width(), src.height())?;

    let col_start = region.col as usize;
    let col_end = col_start + region.width as usize;
    let mut pixels = Vec::with_capacity(region.width as usize * region.height as usize);

    for row in src
        .rows()
        .skip(region.row as usize)
        .take(region.height as usize)
    {
        let span = row.get(col_start..col_end).ok_or_else(|| {
            DomainError::RegionOutOfBounds(format!("columns of region {region} not addressable"))
        })?;
        pixels.extend_from_slice(span);
    }

    PixelBuffer::new(region.width, region.height, pixels)
}

/// Returns a copy of `dst` with `region` written at `at`.
pub fn paste(dst: &PixelBuffer, region: &PixelBuffer, at: PastePoint) -> DomainResult<PixelBuffer> {
    let target = CropRegion::new(at.row, at.col, region.width(), region.height());
    target.validate_within(dst.width(), dst.height())?;

    let mut out = dst.clone();
    let span = region.width() as usize;

    for (offset, source_row) in region.rows().enumerate() {
        let start = out.index_of(at.row + offset as u32, at.col);
        let dest = out
            .pixels_mut()
            .get_mut(start..start + span)
            .ok_or_else(|| {
                DomainError::RegionOutOfBounds(format!("paste target {target} not addressable"))
            })?;
        dest.copy_from_slice(source_row);
    }

    Ok(out)
}
