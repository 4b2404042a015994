use std::slice::ChunksExact;

use crate::color::Pixel;
use crate::error::{DomainError, DomainResult};

/// Row-major RGB raster. The pixel count always equals `width * height`;
/// both dimensions are non-zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Pixel>,
}

impl PixelBuffer {
    pub fn new(width: u32, height: u32, pixels: Vec<Pixel>) -> DomainResult<Self> {
        let expected = pixel_count(width, height)?;
        if pixels.len() != expected {
            return Err(DomainError::PixelCountMismatch {
                expected,
                got: pixels.len(),
            });
        }

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn filled(width: u32, height: u32, pixel: Pixel) -> DomainResult<Self> {
        let count = pixel_count(width, height)?;
        Self::new(width, height, vec![pixel; count])
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[must_use]
    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    #[must_use]
    pub fn get(&self, row: u32, col: u32) -> Option<Pixel> {
        if row >= self.height || col >= self.width {
            return None;
        }
        self.pixels.get(self.index_of(row, col)).copied()
    }

    pub fn rows(&self) -> ChunksExact<'_, Pixel> {
        self.pixels.chunks_exact(self.width as usize)
    }

    pub(crate) fn index_of(&self, row: u32, col: u32) -> usize {
        row as usize * self.width as usize + col as usize
    }

    pub(crate) fn pixels_mut(&mut self) -> &mut [Pixel] {
        &mut self.pixels
    }
}

/// `width * height` as a `usize`, rejecting zero dimensions and any count
/// whose pixel storage could never be allocated.
pub fn pixel_count(width: u32, height: u32) -> DomainResult<usize> {
    if width == 0 || height == 0 {
        return Err(DomainError::InvalidDimensions { width, height });
    }
    (width as usize)
        .checked_mul(height as usize)
        .filter(|&count| {
            count
                .checked_mul(size_of::<Pixel>())
                .is_some_and(|bytes| bytes <= isize::MAX.unsigned_abs())
        })
        .ok_or(DomainError::InvalidDimensions { width, height })
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Pixel = Pixel::new(255, 0, 0);

    #[test]
    fn rejects_pixel_count_mismatch() {
        let result = PixelBuffer::new(2, 2, vec![RED; 3]);
        assert_eq!(
            result,
            Err(DomainError::PixelCountMismatch {
                expected: 4,
                got: 3
            })
        );
    }

    #[test]
    fn rejects_zero_dimensions() {
        assert_eq!(
            PixelBuffer::filled(0, 3, RED),
            Err(DomainError::InvalidDimensions {
                width: 0,
                height: 3
            })
        );
        assert!(PixelBuffer::new(3, 0, Vec::new()).is_err());
    }

    #[test]
    fn unallocatable_counts_are_invalid() {
        assert_eq!(
            pixel_count(u32::MAX, u32::MAX),
            Err(DomainError::InvalidDimensions {
                width: u32::MAX,
                height: u32::MAX
            })
        );
        assert_eq!(pixel_count(100_000, 100_000), Ok(10_000_000_000));
    }

    #[test]
    fn get_addresses_row_major() {
        let pixels = (0..6).map(|i| Pixel::new(i, 0, 0)).collect();
        let buffer = PixelBuffer::new(3, 2, pixels).unwrap();

        assert_eq!(buffer.get(1, 0), Some(Pixel::new(3, 0, 0)));
        assert_eq!(buffer.get(0, 2), Some(Pixel::new(2, 0, 0)));
        assert_eq!(buffer.get(2, 0), None);
        assert_eq!(buffer.get(0, 3), None);
    }

    #[test]
    fn rows_yield_width_sized_chunks() {
        let buffer = PixelBuffer::filled(4, 3, RED).unwrap();
        let rows: Vec<_> = buffer.rows().collect();
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|row| row.len() == 4));
    }
}
