use std::fmt;
use std::iter;

use domain::{
    buffer::PixelBuffer,
    color::Pixel,
    error::{DomainError, DomainResult},
    palette::{MAX_PALETTE_ENTRIES, Palette, PaletteBuilder},
};
use sbu_application::{
    config::CodecLimits, error::AppResult, format::ImageFormat,
    ports::outgoing::image_codec::ImageCodecPort,
};
use tracing::{debug, instrument, trace};

use super::TextCodecConfig;
use super::tokens::{
    Tokens, expect_magic, header_dimension, header_value, lossy, next_pixel, parse_decimal,
};

const MAGIC: &str = "SBU";
const RUN_MARKER: u8 = b'*';

/// One token of the index stream: a bare index for a single pixel, or
/// `*count index` for a run of at least two.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run {
    pub index: u8,
    pub count: usize,
}

impl fmt::Display for Run {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.count == 1 {
            write!(f, "{}", self.index)
        } else {
            write!(f, "*{} {}", self.count, self.index)
        }
    }
}

/// Groups consecutive equal indices in row-major order.
pub fn runs(indices: &[u8]) -> impl Iterator<Item = Run> + '_ {
    indices.chunk_by(|a, b| a == b).filter_map(|group| {
        group.first().map(|&index| Run {
            index,
            count: group.len(),
        })
    })
}

/// Palette plus run-length index stream codec.
///
/// ```text
/// SBU
/// {width} {height} {palette entries}
/// {r} {g} {b}            one line per palette entry
/// {index} | *{count} {index} ...
/// ```
#[derive(Clone)]
pub struct IndexedSbuCodec {
    limits: CodecLimits,
}

impl IndexedSbuCodec {
    pub fn new(config: TextCodecConfig) -> Self {
        Self {
            limits: config.limits,
        }
    }

    #[instrument(skip(self, data), fields(bytes = data.len()))]
    fn decode_impl(&self, data: &[u8]) -> DomainResult<PixelBuffer> {
        let mut tokens = Tokens::new(data);
        expect_magic(&mut tokens, MAGIC)?;
        let width = header_dimension(&mut tokens, "width")?;
        let height = header_dimension(&mut tokens, "height")?;
        let entry_count = read_entry_count(&mut tokens)?;
        let palette = read_palette(&mut tokens, entry_count)?;

        let expected = self.limits.check_dimensions(width, height)?;
        let pixels = read_index_stream(&mut tokens, &palette, expected, data.len())?;

        debug!(
            "Decoded SBU {}x{} with {} palette entries",
            width,
            height,
            palette.entries().len()
        );
        PixelBuffer::new(width, height, pixels)
    }
}

fn read_entry_count(tokens: &mut Tokens<'_>) -> DomainResult<usize> {
    let count = header_value(tokens, "palette entry count")?;
    usize::try_from(count)
        .ok()
        .filter(|&count| count <= MAX_PALETTE_ENTRIES)
        .ok_or_else(|| {
            DomainError::MalformedHeader(format!(
                "palette entry count {count} exceeds {MAX_PALETTE_ENTRIES}"
            ))
        })
}

fn read_palette(tokens: &mut Tokens<'_>, expected: usize) -> DomainResult<Palette> {
    let mut entries = Vec::with_capacity(expected);
    while entries.len() < expected {
        let Some(entry) = next_pixel(tokens)? else {
            return Err(DomainError::TruncatedPalette {
                expected,
                got: entries.len(),
            });
        };
        entries.push(entry);
    }
    Palette::from_entries(entries)
}

fn read_index_stream(
    tokens: &mut Tokens<'_>,
    palette: &Palette,
    expected: usize,
    input_len: usize,
) -> DomainResult<Vec<Pixel>> {
    let mut pixels = Vec::with_capacity(expected.min(input_len));

    while pixels.len() < expected {
        let Some(token) = tokens.next() else {
            break;
        };

        match token.split_first() {
            Some((&RUN_MARKER, attached)) => {
                let count_token = if attached.is_empty() {
                    tokens.next().ok_or(DomainError::TruncatedData {
                        expected,
                        got: pixels.len(),
                    })?
                } else {
                    attached
                };
                let count = parse_stream_value(count_token, "run length")?;
                if count == 0 {
                    return Err(DomainError::MalformedData("zero-length run".to_string()));
                }
                let index_token = tokens.next().ok_or(DomainError::TruncatedData {
                    expected,
                    got: pixels.len(),
                })?;
                let pixel = palette.resolve(parse_stream_value(index_token, "palette index")?)?;

                let remaining = expected - pixels.len();
                let count = usize::try_from(count).unwrap_or(usize::MAX).min(remaining);
                pixels.try_reserve(count).map_err(|_| {
                    DomainError::LimitExceeded(format!("run of {count} pixels cannot be allocated"))
                })?;
                trace!("Run of {} x {}", count, pixel);
                pixels.extend(iter::repeat_n(pixel, count));
            }
            _ => {
                let pixel = palette.resolve(parse_stream_value(token, "palette index")?)?;
                pixels.push(pixel);
            }
        }
    }

    if pixels.len() < expected {
        return Err(DomainError::TruncatedData {
            expected,
            got: pixels.len(),
        });
    }
    Ok(pixels)
}

fn parse_stream_value(token: &[u8], what: &str) -> DomainResult<u64> {
    parse_decimal(token)
        .ok_or_else(|| DomainError::MalformedData(format!("invalid {what} '{}'", lossy(token))))
}

/// Fails with `PaletteOverflow` before producing any output when the buffer
/// has more than 256 distinct colors.
pub fn encode_indexed(buffer: &PixelBuffer) -> DomainResult<Vec<u8>> {
    let indexed = PaletteBuilder::build(buffer)?;

    let mut out = format!(
        "{MAGIC}\n{} {} {}\n",
        indexed.width,
        indexed.height,
        indexed.palette.entries().len()
    );
    for entry in indexed.palette.entries() {
        out.push_str(&entry.to_string());
        out.push('\n');
    }

    let stream = runs(&indexed.indices)
        .map(|run| run.to_string())
        .collect::<Vec<_>>()
        .join(" ");
    out.push_str(&stream);
    out.push('\n');

    Ok(out.into_bytes())
}

impl ImageCodecPort for IndexedSbuCodec {
    fn format(&self) -> ImageFormat {
        ImageFormat::Indexed
    }

    fn decode(&self, data: &[u8]) -> AppResult<PixelBuffer> {
        Ok(self.decode_impl(data)?)
    }

    fn encode(&self, buffer: &PixelBuffer) -> AppResult<Vec<u8>> {
        Ok(encode_indexed(buffer)?)
    }
}
