pub mod args;
pub mod exit_code;
pub mod handler;
pub mod validation;
