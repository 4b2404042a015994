//! Raw command-line surface. Values stay strings here; `validation` walks
//! them in command-line order so each malformed flag maps to its own exit
//! code.

use std::ffi::OsString;
use std::fmt;

use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser};

/// Convert and edit images between the P3 (.ppm) and SBU (.sbu) formats.
///
/// Every flag collects all of its occurrences; giving one twice is reported
/// during validation, at the position of the second occurrence.
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "sbu-convert", version, about)]
pub struct CliArgs {
    /// Input image path (.ppm or .sbu)
    #[arg(short = 'i', value_name = "INPUT")]
    pub input: Vec<String>,

    /// Output image path (.ppm or .sbu)
    #[arg(short = 'o', value_name = "OUTPUT")]
    pub output: Vec<String>,

    /// Copy region: row,col,width,height
    #[arg(short = 'c', value_name = "ROW,COL,WIDTH,HEIGHT", allow_hyphen_values = true)]
    pub copy: Vec<String>,

    /// Paste the copied region at row,col (requires an earlier -c)
    #[arg(short = 'p', value_name = "ROW,COL", allow_hyphen_values = true)]
    pub paste: Vec<String>,

    /// Stamp text: message,font_path,font_size,row,col
    #[arg(short = 'r', value_name = "MESSAGE,FONT,SIZE,ROW,COL", allow_hyphen_values = true)]
    pub stamp: Vec<String>,

    /// Input format, overriding the file extension (ppm or sbu)
    #[arg(long = "from", value_name = "FORMAT")]
    pub input_format: Vec<String>,

    /// Output format, overriding the file extension (ppm or sbu)
    #[arg(long = "to", value_name = "FORMAT")]
    pub output_format: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flag {
    Input,
    Output,
    Copy,
    Paste,
    Stamp,
    InputFormat,
    OutputFormat,
}

impl Flag {
    pub const ALL: [Self; 7] = [
        Self::Input,
        Self::Output,
        Self::Copy,
        Self::Paste,
        Self::Stamp,
        Self::InputFormat,
        Self::OutputFormat,
    ];

    fn id(self) -> &'static str {
        match self {
            Self::Input => "input",
            Self::Output => "output",
            Self::Copy => "copy",
            Self::Paste => "paste",
            Self::Stamp => "stamp",
            Self::InputFormat => "input_format",
            Self::OutputFormat => "output_format",
        }
    }
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Input => "-i",
            Self::Output => "-o",
            Self::Copy => "-c",
            Self::Paste => "-p",
            Self::Stamp => "-r",
            Self::InputFormat => "--from",
            Self::OutputFormat => "--to",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occurrence {
    pub flag: Flag,
    pub value: String,
}

impl CliArgs {
    /// Parses `args` (program name first) into flag occurrences, ordered as
    /// they appeared on the command line.
    pub fn parse_occurrences<I, T>(args: I) -> Result<Vec<Occurrence>, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = Self::command().try_get_matches_from(args)?;
        let parsed = Self::from_arg_matches(&matches)?;
        Ok(parsed.into_occurrences(&matches))
    }

    fn values(&self, flag: Flag) -> &[String] {
        match flag {
            Flag::Input => &self.input,
            Flag::Output => &self.output,
            Flag::Copy => &self.copy,
            Flag::Paste => &self.paste,
            Flag::Stamp => &self.stamp,
            Flag::InputFormat => &self.input_format,
            Flag::OutputFormat => &self.output_format,
        }
    }

    fn into_occurrences(self, matches: &ArgMatches) -> Vec<Occurrence> {
        let mut positioned = Vec::new();
        for flag in Flag::ALL {
            let indices = matches.indices_of(flag.id()).into_iter().flatten();
            for (index, value) in indices.zip(self.values(flag)) {
                positioned.push((
                    index,
                    Occurrence {
                        flag,
                        value: value.clone(),
                    },
                ));
            }
        }
        positioned.sort_by_key(|(index, _)| *index);
        positioned
            .into_iter()
            .map(|(_, occurrence)| occurrence)
            .collect()
    }
}
