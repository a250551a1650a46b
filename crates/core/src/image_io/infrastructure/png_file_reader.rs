use std::path::{Path, PathBuf};

use image::ImageFormat;
use thiserror::Error;

use crate::image_io::domain::image_reader::ImageReader;
use crate::shared::raster::Raster;

#[derive(Error, Debug)]
pub enum ImageReadError {
    #[error("failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{path} is not a png image")]
    NotPng { path: PathBuf },
    #[error("failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Reads PNG files with the `image` crate.
///
/// The format is sniffed from the file contents, not the extension, and
/// anything other than PNG is rejected before decoding.
pub struct PngFileReader;

impl PngFileReader {
    pub fn new() -> Self {
        Self
    }

    fn decode(path: &Path) -> Result<Raster, ImageReadError> {
        let open_error = |source| ImageReadError::Open {
            path: path.to_path_buf(),
            source,
        };
        let reader = image::ImageReader::open(path)
            .map_err(open_error)?
            .with_guessed_format()
            .map_err(open_error)?;

        if reader.format() != Some(ImageFormat::Png) {
            return Err(ImageReadError::NotPng {
                path: path.to_path_buf(),
            });
        }

        let decoded = reader.decode().map_err(|source| ImageReadError::Decode {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Raster::from_rgba_image(decoded.to_rgba8(), 0))
    }
}

impl Default for PngFileReader {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageReader for PngFileReader {
    fn read(&self, path: &Path) -> Result<Raster, Box<dyn std::error::Error>> {
        Ok(Self::decode(path)?)
    }
}
