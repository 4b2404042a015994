use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::AppError;

/// On-disk image representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImageFormat {
    /// ASCII `P3` RGB triples.
    #[serde(rename = "ppm")]
    Plain,
    /// `SBU` palette plus run-length index stream.
    #[serde(rename = "sbu")]
    Indexed,
}

impl ImageFormat {
    pub const ALL: [Self; 2] = [Self::Plain, Self::Indexed];

    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Plain => "ppm",
            Self::Indexed => "sbu",
        }
    }

    #[must_use]
    pub fn magic(self) -> &'static str {
        match self {
            Self::Plain => "P3",
            Self::Indexed => "SBU",
        }
    }

    /// Resolves the format from a file extension, case-insensitively.
    pub fn from_path(path: &Path) -> Result<Self, AppError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| AppError::UnsupportedFormat {
                message: format!("'{}' has no file extension", path.display()),
            })?;
        extension.parse()
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ImageFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ppm" | "p3" => Ok(Self::Plain),
            "sbu" => Ok(Self::Indexed),
            other => Err(AppError::UnsupportedFormat {
                message: format!("unknown format '{other}', expected 'ppm' or 'sbu'"),
            }),
        }
    }
}
