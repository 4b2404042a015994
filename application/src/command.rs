use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use domain::region::{CropRegion, PastePoint};

use crate::format::ImageFormat;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageLocation {
    pub path: PathBuf,
    pub format: ImageFormat,
}

impl ImageLocation {
    pub fn new(path: impl Into<PathBuf>, format: ImageFormat) -> Self {
        Self {
            path: path.into(),
            format,
        }
    }
}

/// Text overlay request. Carried through validation but never rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stamp {
    pub message: String,
    pub font_path: PathBuf,
    pub font_size: u8,
    pub row: u32,
    pub col: u32,
}

/// A fully validated conversion request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command {
    pub input: ImageLocation,
    pub output: ImageLocation,
    pub crop: Option<CropRegion>,
    pub paste: Option<PastePoint>,
    pub stamp: Option<Stamp>,
}

impl Command {
    #[must_use]
    pub fn convert(input: ImageLocation, output: ImageLocation) -> Self {
        Self {
            input,
            output,
            crop: None,
            paste: None,
            stamp: None,
        }
    }

    #[must_use]
    pub fn with_crop(mut self, crop: CropRegion) -> Self {
        self.crop = Some(crop);
        self
    }

    #[must_use]
    pub fn with_paste(mut self, paste: PastePoint) -> Self {
        self.paste = Some(paste);
        self
    }

    #[must_use]
    pub fn with_stamp(mut self, stamp: Stamp) -> Self {
        self.stamp = Some(stamp);
        self
    }
}
