use std::path::Path;

use image::ImageFormat;

use crate::image_io::domain::image_writer::{ImageWriter, WriteResult};
use crate::shared::raster::Raster;

/// Encodes rasters as PNG, whatever the output path's extension.
pub struct PngFileWriter;

impl PngFileWriter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PngFileWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageWriter for PngFileWriter {
    fn write(&self, path: &Path, raster: &Raster) -> WriteResult {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let img = raster
            .clone()
            .into_rgba_image()
            .ok_or("Failed to create image from raster data")?;
        img.save_with_format(path, ImageFormat::Png)?;
        Ok(())
    }
}
