use std::iter;

use domain::{buffer::PixelBuffer, color::Pixel, error::DomainError, palette::PaletteBuilder};
use proptest::prelude::*;
use sbu_adapters::outgoing::text_codec::{
    TextCodecConfig, indexed_sbu::IndexedSbuCodec, plain_ppm::PlainPpmCodec,
};
use sbu_application::{
    error::AppError, format::ImageFormat, ports::outgoing::image_codec::ImageCodecPort,
};

const RED: Pixel = Pixel::new(255, 0, 0);
const BLUE: Pixel = Pixel::new(0, 0, 255);

fn indexed() -> IndexedSbuCodec {
    IndexedSbuCodec::new(TextCodecConfig::default())
}

fn plain() -> PlainPpmCodec {
    PlainPpmCodec::new(TextCodecConfig::default())
}

fn arb_buffer(max_colors: usize) -> impl Strategy<Value = PixelBuffer> {
    (
        1u32..=12,
        1u32..=12,
        prop::collection::vec(any::<(u8, u8, u8)>(), 1..=max_colors),
    )
        .prop_flat_map(|(width, height, colors)| {
            let count = (width * height) as usize;
            (
                Just(width),
                Just(height),
                prop::collection::vec(prop::sample::select(colors), count),
            )
        })
        .prop_map(|(width, height, channels)| {
            let pixels = channels
                .into_iter()
                .map(|(r, g, b)| Pixel::new(r, g, b))
                .collect();
            PixelBuffer::new(width, height, pixels).unwrap()
        })
}

proptest! {
    #[test]
    fn plain_roundtrip(buffer in arb_buffer(64)) {
        let encoded = plain().encode(&buffer).unwrap();
        prop_assert_eq!(plain().decode(&encoded).unwrap(), buffer);
    }

    #[test]
    fn indexed_roundtrip(buffer in arb_buffer(6)) {
        let encoded = indexed().encode(&buffer).unwrap();
        prop_assert_eq!(indexed().decode(&encoded).unwrap(), buffer);
    }

    #[test]
    fn cross_format_roundtrip(buffer in arb_buffer(12)) {
        let as_sbu = indexed().encode(&buffer).unwrap();
        let via_sbu = indexed().decode(&as_sbu).unwrap();
        let as_ppm = plain().encode(&via_sbu).unwrap();
        prop_assert_eq!(plain().decode(&as_ppm).unwrap(), buffer);
    }

    #[test]
    fn palette_build_is_deterministic(buffer in arb_buffer(40)) {
        prop_assert_eq!(
            PaletteBuilder::build(&buffer).unwrap(),
            PaletteBuilder::build(&buffer).unwrap()
        );
    }

    #[test]
    fn decoders_never_panic_on_noise(data in prop::collection::vec(any::<u8>(), 0..256)) {
        let _plain = plain().decode(&data);
        let _indexed = indexed().decode(&data);
    }

    #[test]
    fn large_declared_dimensions_fail_cleanly(
        width in 1000u32..,
        height in 1000u32..,
        supplied in 0usize..8,
    ) {
        let body = "1 2 3 ".repeat(supplied);
        let ppm = format!("P3 {width} {height} 255 {body}");
        prop_assert!(plain().decode(ppm.as_bytes()).is_err());

        let sbu = format!("SBU {width} {height} 1 1 2 3 {}*{} 0", "0 ".repeat(supplied), supplied + 1);
        prop_assert!(indexed().decode(sbu.as_bytes()).is_err());
    }
}

#[test]
fn maximal_headers_without_limits_are_errors() {
    let cases: [(&[u8], &str); 4] = [
        (b"P3 4294967295 4294967295 255", "ppm max"),
        (b"P3 100000 100000 255", "ppm large"),
        (b"SBU 4294967295 4294967295 1 0 0 0 0", "sbu max"),
        (b"SBU 100000 100000 1 0 0 0 *7 0", "sbu large"),
    ];
    for (data, label) in cases {
        let result = if data.starts_with(b"P3") {
            plain().decode(data)
        } else {
            indexed().decode(data)
        };
        assert!(
            matches!(
                result,
                Err(AppError::Domain(
                    DomainError::TruncatedData { .. } | DomainError::InvalidDimensions { .. }
                ))
            ),
            "{label}"
        );
    }
}

#[test]
fn run_lengths_survive_roundtrip() {
    for k in [1usize, 2, 255, 10_000] {
        let mut pixels = vec![BLUE];
        pixels.extend(iter::repeat_n(RED, k));
        pixels.push(BLUE);
        let buffer = PixelBuffer::new(k as u32 + 2, 1, pixels).unwrap();

        let encoded = indexed().encode(&buffer).unwrap();
        let text = String::from_utf8(encoded.clone()).unwrap();
        let stream = text.lines().last().unwrap();
        let expected = if k == 1 {
            "0 1 0".to_string()
        } else {
            format!("0 *{k} 1 0")
        };
        assert_eq!(stream, expected);

        let decoded = indexed().decode(&encoded).unwrap();
        assert_eq!(decoded, buffer, "run of {k}");
        assert!(decoded.pixels()[1..=k].iter().all(|&p| p == RED));
    }
}

#[test]
fn overflow_is_rejected_without_output() {
    let pixels = (0..257u32).map(Pixel::from_packed).collect();
    let buffer = PixelBuffer::new(257, 1, pixels).unwrap();

    let result = indexed().encode(&buffer);
    assert!(matches!(
        result,
        Err(AppError::Domain(DomainError::PaletteOverflow { .. }))
    ));
}

#[test]
fn two_by_two_red_scenario() {
    let buffer = PixelBuffer::filled(2, 2, RED).unwrap();
    let encoded = indexed().encode(&buffer).unwrap();
    let text = String::from_utf8(encoded.clone()).unwrap();

    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("SBU"));
    assert_eq!(lines.next(), Some("2 2 1"));
    assert_eq!(lines.next(), Some("255 0 0"));
    assert_eq!(lines.next(), Some("*4 0"));
    assert_eq!(lines.next(), None);

    assert_eq!(indexed().decode(&encoded).unwrap(), buffer);
}

#[test]
fn codecs_report_their_format() {
    assert_eq!(plain().format(), ImageFormat::Plain);
    assert_eq!(indexed().format(), ImageFormat::Indexed);
}

#[test]
fn hand_written_sbu_with_mixed_whitespace_decodes() {
    let data = b"SBU\t3 2\n2\r\n10 20 30\n40 50 60\n*2 1\n0\t\t*3 1";
    let buffer = indexed().decode(data).unwrap();
    let a = Pixel::new(10, 20, 30);
    let b = Pixel::new(40, 50, 60);
    assert_eq!(buffer.pixels(), &[b, b, a, b, b, b]);
}
