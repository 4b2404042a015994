use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Json, Serialized, Toml},
};
use sbu_application::error::{AppError, AppResult};
use sbu_application::infrastructure_config::Config;

pub const ENV_PREFIX: &str = "SBU_";

pub fn load_config() -> AppResult<Config> {
    load_config_from(Path::new("."))
}

/// Defaults, then `sbu.toml` and `sbu.json` in `dir` when present, then
/// `SBU_`-prefixed environment variables (`SBU_LOGGING__LEVEL=debug`).
pub fn load_config_from(dir: &Path) -> AppResult<Config> {
    let mut figment = Figment::from(Serialized::defaults(Config::default()));

    let toml_file = dir.join("sbu.toml");
    if toml_file.exists() {
        figment = figment.merge(Toml::file(toml_file));
    }

    let json_file = dir.join("sbu.json");
    if json_file.exists() {
        figment = figment.merge(Json::file(json_file));
    }

    let config: Config = figment
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
        .extract()
        .map_err(|e| AppError::ConfigError {
            message: format!("Failed to load configuration: {e}"),
        })?;

    config.validate()?;
    Ok(config)
}
