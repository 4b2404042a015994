use sbu_application::infrastructure_config::{Config, LimitsConfig, LogFormat};
use tracing::debug;

pub fn log_run_info(config: &Config) {
    log_logging_configuration(config);
    log_limits(&config.limits);
}

fn log_logging_configuration(config: &Config) {
    let format = match config.logging.format {
        LogFormat::Json => "json",
        LogFormat::Pretty => "pretty",
    };
    debug!(
        "Logging: level {}, format {}, location {}",
        config.logging.level, format, config.logging.include_location
    );
}

fn log_limits(limits: &LimitsConfig) {
    debug!(
        "Limits: input {}, pixels {}",
        describe_limit(limits.max_input_bytes, "bytes"),
        describe_limit(limits.max_pixels, "px")
    );
}

fn describe_limit(value: u64, unit: &str) -> String {
    if value == 0 {
        "unlimited".to_string()
    } else {
        format!("{value} {unit}")
    }
}
