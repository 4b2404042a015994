use std::fs::{self, File, OpenOptions};
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

use clap::error::ErrorKind;
use domain::region::{CropRegion, PastePoint};
use sbu_application::{
    command::{Command, ImageLocation, Stamp},
    format::ImageFormat,
};
use thiserror::Error;

use super::args::{Flag, Occurrence};
use super::exit_code;

const MAX_STAMP_FIELD_LEN: usize = 256;
const STAMP_FONT_SIZES: RangeInclusive<i64> = 1..=10;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArgumentError {
    #[error("Missing required argument {0}")]
    Missing(&'static str),

    #[error("Unrecognized argument: {0}")]
    Unrecognized(String),

    #[error("Argument given more than once: {0}")]
    Duplicate(String),

    #[error("Input file missing or unreadable: {}", .0.display())]
    InputFileMissing(PathBuf),

    #[error("Output file not writable: {}", .0.display())]
    OutputFileUnwritable(PathBuf),

    #[error("-p requires -c")]
    CopyRegionMissing,

    #[error("Invalid -c argument '{0}': expected row,col,width,height with row,col >= 0 and width,height > 0")]
    InvalidCopyRegion(String),

    #[error("Invalid -p argument '{0}': expected row,col with row,col >= 0")]
    InvalidPastePoint(String),

    #[error("Invalid -r argument '{0}': {1}")]
    InvalidStamp(String, String),
}

impl ArgumentError {
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Missing(_) => exit_code::MISSING_ARGUMENT,
            Self::Unrecognized(_) => exit_code::UNRECOGNIZED_ARGUMENT,
            Self::Duplicate(_) => exit_code::DUPLICATE_ARGUMENT,
            Self::InputFileMissing(_) => exit_code::INPUT_FILE_MISSING,
            Self::OutputFileUnwritable(_) => exit_code::OUTPUT_FILE_UNWRITABLE,
            Self::CopyRegionMissing => exit_code::C_ARGUMENT_MISSING,
            Self::InvalidCopyRegion(_) => exit_code::C_ARGUMENT_INVALID,
            Self::InvalidPastePoint(_) => exit_code::P_ARGUMENT_INVALID,
            Self::InvalidStamp(..) => exit_code::R_ARGUMENT_INVALID,
        }
    }

    /// Maps a clap parse failure. `None` for help and version output, which
    /// are not failures. Repeats and missing paths are left to `validate`, so
    /// anything else clap rejects is an unrecognized argument.
    #[must_use]
    pub fn from_clap(error: &clap::Error) -> Option<Self> {
        match error.kind() {
            ErrorKind::DisplayHelp
            | ErrorKind::DisplayVersion
            | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => None,
            _ => Some(Self::Unrecognized(
                error.to_string().lines().next().unwrap_or_default().to_string(),
            )),
        }
    }
}

/// Validates flag occurrences in command-line order: a repeated flag, a
/// malformed `-c`/`-p`/`-r`, or a `-p` with no earlier `-c` stops at that
/// occurrence. Required paths and file access are checked afterwards.
pub fn validate(occurrences: &[Occurrence]) -> Result<Command, ArgumentError> {
    let mut input = None;
    let mut output = None;
    let mut crop = None;
    let mut paste = None;
    let mut stamp = None;
    let mut input_format = None;
    let mut output_format = None;

    for Occurrence { flag, value } in occurrences {
        match flag {
            Flag::Input => set_once(&mut input, *flag, value.as_str())?,
            Flag::Output => set_once(&mut output, *flag, value.as_str())?,
            Flag::InputFormat => set_once(&mut input_format, *flag, value.as_str())?,
            Flag::OutputFormat => set_once(&mut output_format, *flag, value.as_str())?,
            Flag::Copy => {
                ensure_first(crop.is_some(), *flag)?;
                crop = Some(parse_copy_region(value)?);
            }
            Flag::Paste => {
                ensure_first(paste.is_some(), *flag)?;
                if crop.is_none() {
                    return Err(ArgumentError::CopyRegionMissing);
                }
                paste = Some(parse_paste_point(value)?);
            }
            Flag::Stamp => {
                ensure_first(stamp.is_some(), *flag)?;
                stamp = Some(parse_stamp(value)?);
            }
        }
    }

    let input = input.ok_or(ArgumentError::Missing("-i"))?;
    let output = output.ok_or(ArgumentError::Missing("-o"))?;

    let input = ImageLocation::new(input, resolve_format(Path::new(input), input_format)?);
    let output = ImageLocation::new(output, resolve_format(Path::new(output), output_format)?);

    if !is_readable(&input.path) {
        return Err(ArgumentError::InputFileMissing(input.path));
    }
    if !is_writable(&output.path) {
        return Err(ArgumentError::OutputFileUnwritable(output.path));
    }

    Ok(Command {
        input,
        output,
        crop,
        paste,
        stamp,
    })
}

fn ensure_first(seen: bool, flag: Flag) -> Result<(), ArgumentError> {
    if seen {
        return Err(ArgumentError::Duplicate(flag.to_string()));
    }
    Ok(())
}

fn set_once<'a>(
    slot: &mut Option<&'a str>,
    flag: Flag,
    value: &'a str,
) -> Result<(), ArgumentError> {
    ensure_first(slot.is_some(), flag)?;
    *slot = Some(value);
    Ok(())
}

pub fn parse_copy_region(raw: &str) -> Result<CropRegion, ArgumentError> {
    let invalid = || ArgumentError::InvalidCopyRegion(raw.to_string());
    let [row, col, width, height] = parse_fields::<4>(raw).ok_or_else(invalid)?;
    if width <= 0 || height <= 0 {
        return Err(invalid());
    }
    Ok(CropRegion::new(
        to_u32(row).ok_or_else(invalid)?,
        to_u32(col).ok_or_else(invalid)?,
        to_u32(width).ok_or_else(invalid)?,
        to_u32(height).ok_or_else(invalid)?,
    ))
}

pub fn parse_paste_point(raw: &str) -> Result<PastePoint, ArgumentError> {
    let invalid = || ArgumentError::InvalidPastePoint(raw.to_string());
    let [row, col] = parse_fields::<2>(raw).ok_or_else(invalid)?;
    Ok(PastePoint::new(
        to_u32(row).ok_or_else(invalid)?,
        to_u32(col).ok_or_else(invalid)?,
    ))
}

pub fn parse_stamp(raw: &str) -> Result<Stamp, ArgumentError> {
    let invalid = |reason: &str| ArgumentError::InvalidStamp(raw.to_string(), reason.to_string());

    let (message, rest) = raw
        .split_once(',')
        .ok_or_else(|| invalid("missing font path"))?;
    let (font_path, rest) = rest
        .split_once(',')
        .ok_or_else(|| invalid("missing font size, row and col"))?;

    if message.len() >= MAX_STAMP_FIELD_LEN {
        return Err(invalid("message is too long"));
    }
    if font_path.len() >= MAX_STAMP_FIELD_LEN {
        return Err(invalid("font path is too long"));
    }

    let [font_size, row, col] =
        parse_fields::<3>(rest).ok_or_else(|| invalid("expected font_size,row,col"))?;
    if !STAMP_FONT_SIZES.contains(&font_size) {
        return Err(invalid("font size must be between 1 and 10"));
    }
    let row = to_u32(row).ok_or_else(|| invalid("row must be >= 0"))?;
    let col = to_u32(col).ok_or_else(|| invalid("col must be >= 0"))?;

    if !is_readable(Path::new(font_path)) {
        return Err(invalid("font file not found"));
    }

    Ok(Stamp {
        message: message.to_string(),
        font_path: PathBuf::from(font_path),
        font_size: font_size as u8,
        row,
        col,
    })
}

fn resolve_format(path: &Path, explicit: Option<&str>) -> Result<ImageFormat, ArgumentError> {
    explicit
        .map_or_else(|| ImageFormat::from_path(path), str::parse)
        .map_err(|e| ArgumentError::Unrecognized(e.to_string()))
}

fn parse_fields<const N: usize>(raw: &str) -> Option<[i64; N]> {
    let fields = raw
        .split(',')
        .map(|field| field.trim().parse::<i64>().ok())
        .collect::<Option<Vec<_>>>()?;
    fields.try_into().ok()
}

fn to_u32(value: i64) -> Option<u32> {
    u32::try_from(value).ok()
}

fn is_readable(path: &Path) -> bool {
    File::open(path).is_ok_and(|file| file.metadata().is_ok_and(|m| m.is_file()))
}

/// Probes write access without truncating an existing file. A file created
/// only for the probe is removed again.
fn is_writable(path: &Path) -> bool {
    let existed = path.exists();
    let opened = OpenOptions::new().append(true).create(true).open(path).is_ok();
    if opened && !existed {
        return fs::remove_file(path).is_ok();
    }
    opened
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::incoming::cli::args::CliArgs;
    use std::iter;

    fn args(list: &[&str]) -> Vec<Occurrence> {
        CliArgs::parse_occurrences(iter::once("sbu-convert").chain(list.iter().copied())).unwrap()
    }

    #[test]
    fn copy_region_parsing() {
        assert_eq!(parse_copy_region("1,2,3,4"), Ok(CropRegion::new(1, 2, 3, 4)));
        assert_eq!(parse_copy_region(" 0, 0 ,1,1"), Ok(CropRegion::new(0, 0, 1, 1)));
        for bad in ["1,2,3", "1,2,3,4,5", "-1,0,1,1", "0,0,0,1", "0,0,1,-2", "a,b,c,d", ""] {
            assert_eq!(
                parse_copy_region(bad),
                Err(ArgumentError::InvalidCopyRegion(bad.to_string())),
                "{bad}"
            );
        }
    }

    #[test]
    fn paste_point_parsing() {
        assert_eq!(parse_paste_point("0,7"), Ok(PastePoint::new(0, 7)));
        assert!(parse_paste_point("0,-7").is_err());
        assert!(parse_paste_point("3").is_err());
    }

    #[test]
    fn stamp_parsing() {
        let dir = tempfile::tempdir().unwrap();
        let font = dir.path().join("font.txt");
        fs::write(&font, b"glyphs").unwrap();
        let font = font.display().to_string();

        let stamp = parse_stamp(&format!("hello,{font},3,4,5")).unwrap();
        assert_eq!(stamp.message, "hello");
        assert_eq!(stamp.font_size, 3);
        assert_eq!((stamp.row, stamp.col), (4, 5));

        for bad in [
            format!("hello,{font},0,4,5"),
            format!("hello,{font},11,4,5"),
            format!("hello,{font},3,-4,5"),
            format!("hello,{font},3,4"),
            format!("hello,{font}"),
            "hello".to_string(),
            format!("{},{font},3,4,5", "x".repeat(256)),
            "hello,/definitely/not/a/font,3,4,5".to_string(),
        ] {
            assert!(
                matches!(parse_stamp(&bad), Err(ArgumentError::InvalidStamp(..))),
                "{bad}"
            );
        }
    }

    #[test]
    fn paste_without_copy_wins_over_missing_paths() {
        assert_eq!(
            validate(&args(&["-p", "0,0"])),
            Err(ArgumentError::CopyRegionMissing)
        );
    }

    #[test]
    fn invalid_copy_wins_over_missing_paths() {
        assert_eq!(
            validate(&args(&["-c", "-1,0,1,1"])).map_err(|e| e.exit_code()),
            Err(exit_code::C_ARGUMENT_INVALID)
        );
    }

    #[test]
    fn missing_paths() {
        assert_eq!(validate(&args(&[])), Err(ArgumentError::Missing("-i")));
        assert_eq!(
            validate(&args(&["-i", "a.ppm"])),
            Err(ArgumentError::Missing("-o"))
        );
    }

    #[test]
    fn missing_input_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("absent.ppm").display().to_string();
        let output = dir.path().join("out.sbu").display().to_string();

        assert!(matches!(
            validate(&args(&["-i", &input, "-o", &output])),
            Err(ArgumentError::InputFileMissing(_))
        ));
    }

    #[test]
    fn unwritable_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.ppm");
        fs::write(&input, b"P3 1 1 255 0 0 0").unwrap();
        let output = dir.path().join("missing-dir").join("out.sbu");

        assert!(matches!(
            validate(&args(&[
                "-i",
                &input.display().to_string(),
                "-o",
                &output.display().to_string()
            ])),
            Err(ArgumentError::OutputFileUnwritable(_))
        ));
    }

    #[test]
    fn unknown_extension_is_unrecognized() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.png");
        fs::write(&input, b"").unwrap();

        let result = validate(&args(&["-i", &input.display().to_string(), "-o", "out.sbu"]));
        assert!(matches!(result, Err(ArgumentError::Unrecognized(_))));
    }

    #[test]
    fn builds_command_and_leaves_no_probe_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.img");
        fs::write(&input, b"P3 1 1 255 0 0 0").unwrap();
        let output = dir.path().join("out.sbu");

        let command = validate(&args(&[
            "-i",
            &input.display().to_string(),
            "--from",
            "ppm",
            "-o",
            &output.display().to_string(),
            "-c",
            "0,0,1,1",
            "-p",
            "0,0",
        ]))
        .unwrap();

        assert_eq!(command.input.format, ImageFormat::Plain);
        assert_eq!(command.output.format, ImageFormat::Indexed);
        assert_eq!(command.crop, Some(CropRegion::new(0, 0, 1, 1)));
        assert_eq!(command.paste, Some(PastePoint::new(0, 0)));
        assert!(!output.exists());
    }

    #[test]
    fn paste_before_copy_is_missing_copy() {
        assert_eq!(
            validate(&args(&["-p", "0,0", "-c", "0,0,1,1", "-i", "a.ppm", "-o", "b.sbu"])),
            Err(ArgumentError::CopyRegionMissing)
        );
    }

    #[test]
    fn flag_errors_surface_in_command_line_order() {
        assert_eq!(
            validate(&args(&["-c", "bad", "-i", "a.ppm", "-i", "b.ppm"])),
            Err(ArgumentError::InvalidCopyRegion("bad".to_string()))
        );
        assert_eq!(
            validate(&args(&["-i", "a.ppm", "-i", "b.ppm", "-c", "bad"])),
            Err(ArgumentError::Duplicate("-i".to_string()))
        );
        assert_eq!(
            validate(&args(&["-p", "x", "-c", "0,0,1,1"])),
            Err(ArgumentError::CopyRegionMissing)
        );
        assert_eq!(
            validate(&args(&["-c", "0,0,1,1", "-p", "x", "-r", "bad"])),
            Err(ArgumentError::InvalidPastePoint("x".to_string()))
        );
    }

    #[test]
    fn repeated_copy_is_duplicate() {
        assert_eq!(
            validate(&args(&["-c", "0,0,1,1", "-c", "0,0,2,2"])).map_err(|e| e.exit_code()),
            Err(exit_code::DUPLICATE_ARGUMENT)
        );
        assert_eq!(
            validate(&args(&["--to", "sbu", "--to", "ppm"])),
            Err(ArgumentError::Duplicate("--to".to_string()))
        );
    }

    #[test]
    fn clap_errors_map_to_exit_codes() {
        let unknown = CliArgs::parse_occurrences(["sbu-convert", "-z"]).unwrap_err();
        assert_eq!(
            ArgumentError::from_clap(&unknown).map(|e| e.exit_code()),
            Some(exit_code::UNRECOGNIZED_ARGUMENT)
        );

        let dangling = CliArgs::parse_occurrences(["sbu-convert", "-i"]).unwrap_err();
        assert_eq!(
            ArgumentError::from_clap(&dangling).map(|e| e.exit_code()),
            Some(exit_code::UNRECOGNIZED_ARGUMENT)
        );

        let help = CliArgs::parse_occurrences(["sbu-convert", "--help"]).unwrap_err();
        assert_eq!(ArgumentError::from_clap(&help), None);
    }
}
