use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Malformed header: {0}")]
    MalformedHeader(String),

    #[error("Malformed data: {0}")]
    MalformedData(String),

    #[error("Unsupported max channel value {0}, only 255 is supported")]
    UnsupportedMaxValue(u64),

    #[error("Truncated pixel data: expected {expected} pixels, got {got}")]
    TruncatedData { expected: usize, got: usize },

    #[error("Truncated palette: expected {expected} entries, got {got}")]
    TruncatedPalette { expected: usize, got: usize },

    #[error("Channel value {value} exceeds 255")]
    ChannelOutOfRange { value: u64 },

    #[error("Palette index {index} out of range for palette of {palette_len} entries")]
    PaletteIndexOutOfRange { index: u64, palette_len: usize },

    #[error("Palette overflow: image has more than {max} distinct colors")]
    PaletteOverflow { max: usize },

    #[error("Region out of bounds: {0}")]
    RegionOutOfBounds(String),

    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Pixel count mismatch: expected {expected}, got {got}")]
    PixelCountMismatch { expected: usize, got: usize },

    #[error("Limit exceeded: {0}")]
    LimitExceeded(String),
}

pub type DomainResult<T> = Result<T, DomainError>;
