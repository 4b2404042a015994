use std::borrow::Cow;

use domain::color::Pixel;
use domain::error::{DomainError, DomainResult};

/// Splits a byte stream into runs of non-whitespace bytes. Any run of
/// space, tab, CR, LF, VT or FF separates tokens.
#[derive(Debug, Clone)]
pub struct Tokens<'a> {
    rest: &'a [u8],
}

impl<'a> Tokens<'a> {
    #[must_use]
    pub fn new(data: &'a [u8]) -> Self {
        Self { rest: data }
    }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<Self::Item> {
        let start = self.rest.iter().position(|b| !is_separator(*b))?;
        let tail = self.rest.get(start..)?;
        let len = tail
            .iter()
            .position(|b| is_separator(*b))
            .unwrap_or(tail.len());
        let (token, rest) = tail.split_at(len);
        self.rest = rest;
        Some(token)
    }
}

fn is_separator(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | b'\r' | 0x0B | 0x0C)
}

/// Parses an unsigned decimal token. Values past `u64::MAX` saturate so that
/// oversized channels still report as out of range.
#[must_use]
pub fn parse_decimal(token: &[u8]) -> Option<u64> {
    if token.is_empty() || !token.iter().all(u8::is_ascii_digit) {
        return None;
    }
    Some(token.iter().fold(0u64, |acc, digit| {
        acc.saturating_mul(10)
            .saturating_add(u64::from(digit - b'0'))
    }))
}

pub(crate) fn lossy(token: &[u8]) -> Cow<'_, str> {
    String::from_utf8_lossy(token)
}

pub(crate) fn expect_magic(tokens: &mut Tokens<'_>, magic: &str) -> DomainResult<()> {
    match tokens.next() {
        Some(token) if token == magic.as_bytes() => Ok(()),
        Some(token) => Err(DomainError::MalformedHeader(format!(
            "expected magic '{magic}', found '{}'",
            lossy(token)
        ))),
        None => Err(DomainError::MalformedHeader(format!(
            "missing magic '{magic}'"
        ))),
    }
}

pub(crate) fn header_value(tokens: &mut Tokens<'_>, field: &str) -> DomainResult<u64> {
    let token = tokens
        .next()
        .ok_or_else(|| DomainError::MalformedHeader(format!("missing {field}")))?;
    parse_decimal(token).ok_or_else(|| {
        DomainError::MalformedHeader(format!("invalid {field} '{}'", lossy(token)))
    })
}

/// Reads a width or height: a positive decimal that fits in `u32`.
pub(crate) fn header_dimension(tokens: &mut Tokens<'_>, field: &str) -> DomainResult<u32> {
    let value = header_value(tokens, field)?;
    match u32::try_from(value) {
        Ok(dimension) if dimension > 0 => Ok(dimension),
        _ => Err(DomainError::MalformedHeader(format!(
            "{field} must be between 1 and {}, got {value}",
            u32::MAX
        ))),
    }
}

pub(crate) fn channel_value(token: &[u8]) -> DomainResult<u64> {
    parse_decimal(token).ok_or_else(|| {
        DomainError::MalformedData(format!("invalid channel value '{}'", lossy(token)))
    })
}

/// Reads one `r g b` triple. `Ok(None)` means the stream ended before a
/// complete triple.
pub(crate) fn next_pixel(tokens: &mut Tokens<'_>) -> DomainResult<Option<Pixel>> {
    let (Some(r), Some(g), Some(b)) = (tokens.next(), tokens.next(), tokens.next()) else {
        return Ok(None);
    };
    Pixel::from_wide(channel_value(r)?, channel_value(g)?, channel_value(b)?).map(Some)
}
