use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Instant;

use crossbeam_channel::{Receiver, Sender};

use crate::pipeline::batch_executor::{BatchConfig, BatchExecutor, BatchSummary};
use crate::pipeline::batch_logger::BatchLogger;
use crate::pipeline::batch_source::{BatchItem, BatchSource, SendError};
use crate::pipeline::crop_image_use_case::CropImageUseCase;

const DEFAULT_CHANNEL_CAPACITY: usize = 8;

type Job = (BatchItem, f64);

struct StageTimings {
    decode_ms: f64,
    crop_ms: f64,
    write_ms: f64,
}

struct Outcome {
    label: String,
    output: PathBuf,
    result: Result<StageTimings, SendError>,
}

/// Executes a batch with one decode thread and a pool of crop workers.
///
/// Layout: `reader → workers [scan/crop/write] → main [log/count]`
///
/// Images are independent, so workers finish in any order; only the counts
/// and the first error are meaningful across items.
pub struct ThreadedBatchExecutor {
    workers: usize,
    channel_capacity: usize,
}

impl ThreadedBatchExecutor {
    pub fn new(workers: usize) -> Self {
        Self {
            workers: workers.max(1),
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }

    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        self.channel_capacity = capacity.max(1);
        self
    }

    pub fn workers(&self) -> usize {
        self.workers
    }
}

impl Default for ThreadedBatchExecutor {
    fn default() -> Self {
        let workers = std::thread::available_parallelism().map_or(1, |n| n.get());
        Self::new(workers)
    }
}

impl BatchExecutor for ThreadedBatchExecutor {
    fn execute(
        &self,
        source: Box<dyn BatchSource>,
        use_case: Arc<CropImageUseCase>,
        logger: &mut dyn BatchLogger,
        config: BatchConfig,
    ) -> Result<BatchSummary, Box<dyn std::error::Error>> {
        let total = source.len_hint();
        let cap = self.channel_capacity;
        log::debug!(
            "Starting batch: {} workers, {} scanner, {} images",
            self.workers,
            use_case.scanner_name(),
            total.map_or_else(|| "unknown".to_string(), |n| n.to_string())
        );

        let (job_tx, job_rx) = crossbeam_channel::bounded::<Job>(cap);
        let (outcome_tx, outcome_rx) = crossbeam_channel::bounded::<Outcome>(cap);

        let reader_handle = spawn_reader(source, job_tx, config.cancelled.clone());
        let worker_handles: Vec<_> = (0..self.workers)
            .map(|_| {
                spawn_worker(
                    use_case.clone(),
                    job_rx.clone(),
                    outcome_tx.clone(),
                    config.cancelled.clone(),
                )
            })
            .collect();
        drop(job_rx);
        drop(outcome_tx);

        let (summary, main_error) = run_main_loop(outcome_rx, logger, total, &config);

        join_threads(reader_handle, worker_handles, main_error)?;

        if config.cancelled.load(Ordering::Relaxed) && !config.stop_at_first_error {
            logger.info("Batch cancelled");
        }
        logger.summary();
        Ok(summary)
    }
}

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

fn spawn_reader(
    mut source: Box<dyn BatchSource>,
    job_tx: Sender<Job>,
    cancelled: Arc<AtomicBool>,
) -> JoinHandle<()> {
    std::thread::spawn(move || {
        let mut items = source.items();
        loop {
            if cancelled.load(Ordering::Relaxed) {
                break;
            }
            let start = Instant::now();
            let Some(item) = items.next() else {
                break;
            };
            if job_tx.send((item, elapsed_ms(start))).is_err() {
                break;
            }
        }
    })
}

fn spawn_worker(
    use_case: Arc<CropImageUseCase>,
    job_rx: Receiver<Job>,
    outcome_tx: Sender<Outcome>,
    cancelled: Arc<AtomicBool>,
) -> JoinHandle<()> {
    std::thread::spawn(move || {
        for (item, decode_ms) in job_rx {
            if cancelled.load(Ordering::Relaxed) {
                break;
            }
            if outcome_tx.send(process(&use_case, item, decode_ms)).is_err() {
                break;
            }
        }
    })
}

fn process(use_case: &CropImageUseCase, item: BatchItem, decode_ms: f64) -> Outcome {
    let BatchItem {
        index,
        label,
        output,
        image,
    } = item;

    let result = image.and_then(|raster| {
        let start = Instant::now();
        let cropped = use_case.crop(&raster)?;
        let crop_ms = elapsed_ms(start);
        log::debug!("Image {index} ({label}): keeping {:?}", cropped.bounds);

        let start = Instant::now();
        use_case.write(&cropped, &output)?;
        Ok(StageTimings {
            decode_ms,
            crop_ms,
            write_ms: elapsed_ms(start),
        })
    });

    Outcome {
        label,
        output,
        result,
    }
}

/// Receives worker outcomes until every worker has exited, logging and
/// counting them. Keeps draining after a stop so no worker blocks on send.
fn run_main_loop(
    outcome_rx: Receiver<Outcome>,
    logger: &mut dyn BatchLogger,
    total: Option<usize>,
    config: &BatchConfig,
) -> (BatchSummary, Option<Box<dyn std::error::Error>>) {
    let mut summary = BatchSummary::default();
    let mut first_error: Option<Box<dyn std::error::Error>> = None;

    for outcome in outcome_rx {
        match outcome.result {
            Ok(timings) => {
                logger.timing("decode", timings.decode_ms);
                logger.timing("crop", timings.crop_ms);
                logger.timing("write", timings.write_ms);
                logger.passed(&outcome.label, &outcome.output);
                summary.processed += 1;
            }
            Err(e) => {
                logger.failed(&outcome.label, &e.to_string());
                summary.failed += 1;
                if config.stop_at_first_error && first_error.is_none() {
                    config.cancelled.store(true, Ordering::Relaxed);
                    first_error =
                        Some(format!("ERROR while processing {}: {e}", outcome.label).into());
                }
            }
        }
        logger.progress(summary.total(), total);
    }

    (summary, first_error)
}

/// Joins all batch threads and coalesces the first error encountered.
fn join_threads(
    reader_handle: JoinHandle<()>,
    worker_handles: Vec<JoinHandle<()>>,
    mut first_error: Option<Box<dyn std::error::Error>>,
) -> Result<(), Box<dyn std::error::Error>> {
    fn set_if_none(slot: &mut Option<Box<dyn std::error::Error>>, err: Box<dyn std::error::Error>) {
        if slot.is_none() {
            *slot = Some(err);
        }
    }

    if reader_handle.join().is_err() {
        set_if_none(&mut first_error, "Reader thread panicked".into());
    }

    for handle in worker_handles {
        if handle.join().is_err() {
            set_if_none(&mut first_error, "Worker thread panicked".into());
        }
    }

    match first_error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
