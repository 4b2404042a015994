pub mod run_info;
pub mod tracing;
