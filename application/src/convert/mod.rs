pub mod edits;
pub mod registry;
pub mod service;
