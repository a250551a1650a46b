use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::cropping::domain::cropper::{self, CropError};
use crate::cropping::domain::padding::PaddingSpec;
use crate::image_io::domain::image_writer::ImageWriter;
use crate::scanning::domain::boundary_scanner::BoundaryScanner;
use crate::shared::bounding_box::BoundingBox;
use crate::shared::raster::Raster;

#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("file {0} already exists")]
    OutputExists(PathBuf),
    #[error("file {0} is a directory")]
    InputIsDirectory(PathBuf),
    #[error("{path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Crop(#[from] CropError),
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl ProcessError {
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// A cropped image together with the region it was cut from.
#[derive(Clone, Debug)]
pub struct Cropped {
    pub raster: Raster,
    pub bounds: BoundingBox,
}

/// Single-image pipeline: scan → crop → write.
///
/// Holds only immutable configuration, so one instance can be shared by
/// several worker threads.
pub struct CropImageUseCase {
    scanner: Box<dyn BoundaryScanner>,
    writer: Box<dyn ImageWriter>,
    tolerance: u8,
    padding: PaddingSpec,
}

impl CropImageUseCase {
    pub fn new(
        scanner: Box<dyn BoundaryScanner>,
        writer: Box<dyn ImageWriter>,
        tolerance: u8,
        padding: PaddingSpec,
    ) -> Self {
        Self {
            scanner,
            writer,
            tolerance,
            padding,
        }
    }

    pub fn scanner_name(&self) -> &'static str {
        self.scanner.name()
    }

    /// Finds the visible region of `source` and cuts it out with padding.
    pub fn crop(&self, source: &Raster) -> Result<Cropped, CropError> {
        let bounds = self.scanner.find_bounding_box(source, self.tolerance);
        let raster = cropper::crop(source, &bounds, &self.padding)?;
        Ok(Cropped { raster, bounds })
    }

    pub fn write(&self, cropped: &Cropped, output: &Path) -> Result<(), ProcessError> {
        self.writer
            .write(output, &cropped.raster)
            .map_err(|source| ProcessError::Write {
                path: output.to_path_buf(),
                source,
            })
    }

    /// Crops `source` and writes the result to `output`, returning the
    /// region that was kept.
    pub fn execute(&self, source: &Raster, output: &Path) -> Result<BoundingBox, ProcessError> {
        let cropped = self.crop(source)?;
        self.write(&cropped, output)?;
        Ok(cropped.bounds)
    }
}
