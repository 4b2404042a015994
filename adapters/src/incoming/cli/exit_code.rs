use sbu_application::error::AppError;
use tracing::{debug, error};

pub const SUCCESS: u8 = 0;
pub const MISSING_ARGUMENT: u8 = 1;
pub const UNRECOGNIZED_ARGUMENT: u8 = 2;
pub const DUPLICATE_ARGUMENT: u8 = 3;
pub const INPUT_FILE_MISSING: u8 = 4;
pub const OUTPUT_FILE_UNWRITABLE: u8 = 5;
pub const C_ARGUMENT_MISSING: u8 = 6;
pub const C_ARGUMENT_INVALID: u8 = 7;
pub const P_ARGUMENT_INVALID: u8 = 8;
pub const R_ARGUMENT_INVALID: u8 = 9;
pub const CONVERSION_FAILED: u8 = 10;
pub const SETUP_FAILED: u8 = 11;

/// Logs a failed conversion and picks the process exit code for it.
pub fn for_app_error(app_error: &AppError) -> u8 {
    let code = match app_error {
        AppError::ConfigError { .. } | AppError::CodecMissing { .. } => SETUP_FAILED,
        AppError::Domain(_)
        | AppError::ValidationError { .. }
        | AppError::UnsupportedFormat { .. }
        | AppError::IoError { .. } => CONVERSION_FAILED,
    };

    if code == SETUP_FAILED {
        error!("Setup error: {}", app_error);
    } else {
        error!("Conversion failed: {}", app_error);
    }
    debug!("{:?}", app_error);

    code
}
