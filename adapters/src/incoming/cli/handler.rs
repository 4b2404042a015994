use std::ffi::OsString;

use sbu_application::ports::incoming::convert::ConvertImageUseCase;
use tracing::{error, info};

use super::args::CliArgs;
use super::exit_code;
use super::validation::{ArgumentError, validate};

/// Parses, validates and runs one invocation. Returns the process exit code.
pub fn handle<I, T>(args: I, converter: &dyn ConvertImageUseCase) -> u8
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let occurrences = match CliArgs::parse_occurrences(args) {
        Ok(occurrences) => occurrences,
        Err(e) => return handle_parse_error(&e),
    };

    let command = match validate(&occurrences) {
        Ok(command) => command,
        Err(e) => {
            error!("{}", e);
            return e.exit_code();
        }
    };

    match converter.convert(&command) {
        Ok(summary) => {
            info!(
                "Converted {} {}x{} -> {} {}x{}",
                summary.input_format,
                summary.input_dimensions.0,
                summary.input_dimensions.1,
                summary.output_format,
                summary.output_dimensions.0,
                summary.output_dimensions.1
            );
            exit_code::SUCCESS
        }
        Err(e) => exit_code::for_app_error(&e),
    }
}

fn handle_parse_error(e: &clap::Error) -> u8 {
    if let Err(io) = e.print() {
        error!("Failed to write usage output: {}", io);
    }
    ArgumentError::from_clap(e).map_or(exit_code::SUCCESS, |arg_error| arg_error.exit_code())
}
