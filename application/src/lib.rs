#[cfg(any(feature = "adapters", feature = "clap", feature = "figment"))]
compile_error!("application must not depend on adapters/framework crates");

pub mod command;
pub mod config;
pub mod convert;
pub mod error;
pub mod format;
pub mod infrastructure_config;
pub mod ports;
