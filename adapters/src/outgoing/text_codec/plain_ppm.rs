use domain::{
    buffer::PixelBuffer,
    error::{DomainError, DomainResult},
};
use sbu_application::{
    config::CodecLimits, error::AppResult, format::ImageFormat,
    ports::outgoing::image_codec::ImageCodecPort,
};
use tracing::{debug, instrument};

use super::TextCodecConfig;
use super::tokens::{Tokens, expect_magic, header_dimension, header_value, next_pixel};

const MAGIC: &str = "P3";
const MAX_VALUE: u64 = 255;

/// ASCII `P3` codec: header `P3 width height 255`, then one decimal
/// `r g b` triple per pixel.
#[derive(Clone)]
pub struct PlainPpmCodec {
    limits: CodecLimits,
}

impl PlainPpmCodec {
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
        let max_value = header_value(&mut tokens, "max value")?;
        if max_value != MAX_VALUE {
            return Err(DomainError::UnsupportedMaxValue(max_value));
        }

        let expected = self.limits.check_dimensions(width, height)?;
        // Every pixel takes at least one byte of input, so a header larger
        // than the data can only end in truncation.
        let mut pixels = Vec::with_capacity(expected.min(data.len()));
        while pixels.len() < expected {
            let Some(pixel) = next_pixel(&mut tokens)? else {
                return Err(DomainError::TruncatedData {
                    expected,
                    got: pixels.len(),
                });
            };
            pixels.push(pixel);
        }

        debug!("Decoded P3 {}x{}", width, height);
        PixelBuffer::new(width, height, pixels)
    }
}

/// Canonical layout: channels separated by spaces, pixels by tabs, one line
/// per row.
pub fn encode_plain(buffer: &PixelBuffer) -> Vec<u8> {
    let mut out = format!("{MAGIC}\n{} {}\n{MAX_VALUE}\n", buffer.width(), buffer.height());
    for row in buffer.rows() {
        let line = row
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\t");
        out.push_str(&line);
        out.push('\n');
    }
    out.into_bytes()
}

impl ImageCodecPort for PlainPpmCodec {
    fn format(&self) -> ImageFormat {
        ImageFormat::Plain
    }

    fn decode(&self, data: &[u8]) -> AppResult<PixelBuffer> {
        Ok(self.decode_impl(data)?)
    }

    fn encode(&self, buffer: &PixelBuffer) -> AppResult<Vec<u8>> {
        Ok(encode_plain(buffer))
    }
}
