pub mod buffer;
pub mod color;
pub mod error;
pub mod palette;
pub mod region;
