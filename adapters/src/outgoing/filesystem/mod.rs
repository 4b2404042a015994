pub mod image_store_fs;
