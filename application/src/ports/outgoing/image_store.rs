use crate::error::AppResult;
use std::path::Path;
use std::sync::Arc;

pub trait ImageStorePort: Send + Sync {
    fn read(&self, path: &Path) -> AppResult<Vec<u8>>;
    fn write(&self, path: &Path, data: &[u8]) -> AppResult<()>;
}

pub type DynImageStorePort = Arc<dyn ImageStorePort>;
