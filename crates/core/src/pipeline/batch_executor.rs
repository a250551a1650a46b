use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use crate::pipeline::batch_logger::BatchLogger;
use crate::pipeline::batch_source::BatchSource;
use crate::pipeline::crop_image_use_case::CropImageUseCase;

/// Configuration for a batch run.
#[derive(Clone, Debug, Default)]
pub struct BatchConfig {
    /// Abort on the first failed item instead of skipping it.
    pub stop_at_first_error: bool,
    pub cancelled: Arc<AtomicBool>,
}

/// Counts reported at the end of a batch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub processed: usize,
    pub failed: usize,
}

impl BatchSummary {
    pub fn total(&self) -> usize {
        self.processed + self.failed
    }
}

/// Abstracts how a batch of images is pushed through the crop use case.
///
/// This is a port (application-layer interface). Infrastructure provides
/// concrete implementations.
pub trait BatchExecutor: Send {
    fn execute(
        &self,
        source: Box<dyn BatchSource>,
        use_case: Arc<CropImageUseCase>,
        logger: &mut dyn BatchLogger,
        config: BatchConfig,
    ) -> Result<BatchSummary, Box<dyn std::error::Error>>;
}
