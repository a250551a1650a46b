use std::path::Path;

use crate::shared::raster::Raster;

/// Errors cross worker threads, so they must be `Send + Sync`.
pub type WriteResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

/// Writes a raster to an image file.
pub trait ImageWriter: Send + Sync {
    fn write(&self, path: &Path, raster: &Raster) -> WriteResult;
}
