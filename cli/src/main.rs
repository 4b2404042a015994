use std::env;
use std::process::ExitCode;

use sbu_adapters::incoming::cli::{exit_code, handler::handle};
use sbu_application::infrastructure_config::Config;
use tracing::{debug, error};

use sbu_cli::bootstrap::state::AppState;
use sbu_cli::config_loader;
use sbu_cli::observability;

fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let config = match config_loader::load_config() {
        Ok(config) => config,
        Err(e) => {
            if observability::tracing::setup_logging(&Config::default()).is_ok() {
                error!("{}", e);
            }
            return ExitCode::from(exit_code::SETUP_FAILED);
        }
    };

    if observability::tracing::setup_logging(&config).is_err() {
        return ExitCode::from(exit_code::SETUP_FAILED);
    }

    debug!("Configuration loaded successfully");
    observability::run_info::log_run_info(&config);

    let state = match AppState::new(&config) {
        Ok(state) => state,
        Err(e) => return ExitCode::from(exit_code::for_app_error(&e)),
    };

    ExitCode::from(handle(env::args_os(), state.convert_service.as_ref()))
}
