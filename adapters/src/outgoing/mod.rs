pub mod filesystem;
pub mod text_codec;
