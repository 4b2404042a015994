use std::collections::HashMap;
use std::collections::hash_map::Entry;

use crate::buffer::PixelBuffer;
use crate::color::Pixel;
use crate::error::{DomainError, DomainResult};

/// Indices are stored on disk as a single byte.
pub const MAX_PALETTE_ENTRIES: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Palette {
    entries: Vec<Pixel>,
}

impl Palette {
    /// Wraps entries read from an encoded file. Entries are taken verbatim,
    /// in file order.
    pub fn from_entries(entries: Vec<Pixel>) -> DomainResult<Self> {
        if entries.len() > MAX_PALETTE_ENTRIES {
            return Err(DomainError::PaletteOverflow {
                max: MAX_PALETTE_ENTRIES,
            });
        }
        Ok(Self { entries })
    }

    #[must_use]
    pub fn entries(&self) -> &[Pixel] {
        &self.entries
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<Pixel> {
        self.entries.get(index).copied()
    }

    /// Looks up an index as it appears in an index stream.
    pub fn resolve(&self, index: u64) -> DomainResult<Pixel> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.get(i))
            .ok_or(DomainError::PaletteIndexOutOfRange {
                index,
                palette_len: self.entries.len(),
            })
    }
}

/// A buffer split into its palette and one palette index per pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedImage {
    pub width: u32,
    pub height: u32,
    pub palette: Palette,
    pub indices: Vec<u8>,
}

#[derive(Debug, Default)]
pub struct PaletteBuilder {
    entries: Vec<Pixel>,
    lookup: HashMap<u32, u8>,
}

impl PaletteBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the palette index for `pixel`, appending it on first sight.
    pub fn index_of(&mut self, pixel: Pixel) -> DomainResult<u8> {
        match self.lookup.entry(pixel.to_packed()) {
            Entry::Occupied(slot) => Ok(*slot.get()),
            Entry::Vacant(slot) => {
                let index =
                    u8::try_from(self.entries.len()).map_err(|_| DomainError::PaletteOverflow {
                        max: MAX_PALETTE_ENTRIES,
                    })?;
                self.entries.push(pixel);
                slot.insert(index);
                Ok(index)
            }
        }
    }

    #[must_use]
    pub fn finish(self) -> Palette {
        Palette {
            entries: self.entries,
        }
    }

    /// Scans `buffer` in row-major order, assigning palette indices in order
    /// of first occurrence.
    pub fn build(buffer: &PixelBuffer) -> DomainResult<IndexedImage> {
        let mut builder = Self::new();
        let indices = buffer
            .pixels()
            .iter()
            .map(|&pixel| builder.index_of(pixel))
            .collect::<DomainResult<Vec<u8>>>()?;

        Ok(IndexedImage {
            width: buffer.width(),
            height: buffer.height(),
            palette: builder.finish(),
            indices,
        })
    }
}
