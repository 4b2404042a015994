use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use sbu_application::{
    config::CodecLimits,
    error::{AppError, AppResult},
    ports::outgoing::image_store::ImageStorePort,
};
use tracing::{debug, instrument, warn};

#[derive(Copy, Clone, Default)]
pub struct FsImageStoreConfig {
    pub limits: CodecLimits,
}

/// Reads whole files; writes through a sibling temp file and a rename so a
/// failed write never leaves a partial image at the destination.
#[derive(Clone)]
pub struct FsImageStore {
    limits: CodecLimits,
}

impl FsImageStore {
    pub fn new(config: FsImageStoreConfig) -> Self {
        Self {
            limits: config.limits,
        }
    }

    #[instrument(skip(self))]
    fn read_impl(&self, path: &Path) -> AppResult<Vec<u8>> {
        let metadata = fs::metadata(path).map_err(|e| AppError::io(path, e))?;
        self.limits.check_input_size(metadata.len())?;

        let data = fs::read(path).map_err(|e| AppError::io(path, e))?;
        debug!("Read {} bytes", data.len());
        Ok(data)
    }

    #[instrument(skip(self, data), fields(bytes = data.len()))]
    fn write_impl(&self, path: &Path, data: &[u8]) -> AppResult<()> {
        let staging = staging_path(path);
        fs::write(&staging, data).map_err(|e| AppError::io(&staging, e))?;

        if let Err(e) = fs::rename(&staging, path) {
            if let Err(cleanup) = fs::remove_file(&staging) {
                warn!(
                    "Failed to remove staging file {}: {}",
                    staging.display(),
                    cleanup
                );
            }
            return Err(AppError::io(path, e));
        }

        debug!("Wrote {} bytes", data.len());
        Ok(())
    }
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(".");
    name.push(path.file_name().unwrap_or_default());
    name.push(".partial");
    path.with_file_name(name)
}

impl ImageStorePort for FsImageStore {
    fn read(&self, path: &Path) -> AppResult<Vec<u8>> {
        self.read_impl(path)
    }

    fn write(&self, path: &Path, data: &[u8]) -> AppResult<()> {
        self.write_impl(path, data)
    }
}
