pub mod image_codec;
pub mod image_store;
