use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;

use clap::Parser;

use alphacrop_core::cropping::domain::padding::{PaddingArg, PaddingSpec};
use alphacrop_core::image_io::infrastructure::png_file_reader::PngFileReader;
use alphacrop_core::image_io::infrastructure::png_file_writer::PngFileWriter;
use alphacrop_core::pipeline::batch_executor::{BatchConfig, BatchExecutor, BatchSummary};
use alphacrop_core::pipeline::batch_logger::LogBatchLogger;
use alphacrop_core::pipeline::batch_source::{BatchSource, FileBatchSource, StreamBatchSource};
use alphacrop_core::pipeline::crop_image_use_case::CropImageUseCase;
use alphacrop_core::pipeline::infrastructure::threaded_batch_executor::ThreadedBatchExecutor;
use alphacrop_core::scanning::infrastructure::scanner_factory::{create_scanner, ScanStrategy};
use alphacrop_core::shared::constants::{DEFAULT_OUTPUT_DIR, DEFAULT_TOLERANCE};

/// Center images by cropping out transparent pixels.
#[derive(Parser, Debug)]
#[command(name = "alphacrop")]
struct Cli {
    /// PNG files to process.
    files: Vec<PathBuf>,

    /// Padding for all 4 sides, in pixels ("12") or percent of the cropped size ("10%").
    #[arg(short = 'p', long)]
    padding: Option<PaddingArg>,

    /// Padding for the left and right sides.
    #[arg(long)]
    px: Option<PaddingArg>,

    /// Padding for the top and bottom sides.
    #[arg(long)]
    py: Option<PaddingArg>,

    /// Padding for the top side.
    #[arg(long)]
    pt: Option<PaddingArg>,

    /// Padding for the right side.
    #[arg(long)]
    pr: Option<PaddingArg>,

    /// Padding for the bottom side.
    #[arg(long)]
    pb: Option<PaddingArg>,

    /// Padding for the left side.
    #[arg(long)]
    pl: Option<PaddingArg>,

    /// Tolerance for detecting transparent pixels (0-255, 0 being exact).
    #[arg(short = 't', long, default_value_t = DEFAULT_TOLERANCE)]
    tolerance: u8,

    /// Output folder.
    #[arg(short = 'o', long, default_value = DEFAULT_OUTPUT_DIR)]
    out: PathBuf,

    /// Stop at the first error instead of skipping the file.
    #[arg(short = 's', long)]
    stop_at_first_error: bool,

    /// Overwrite existing output files.
    #[arg(short = 'f', long)]
    force: bool,

    /// Read concatenated PNG images from stdin.
    #[arg(long)]
    stdin: bool,

    /// Number of crop workers (default: available parallelism).
    #[arg(short = 'j', long)]
    jobs: Option<usize>,

    /// Boundary scan strategy: ring or naive.
    #[arg(long, default_value = "ring")]
    strategy: ScanStrategy,
}

fn main() {
    env_logger::init();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    validate(&cli)?;

    let use_case = CropImageUseCase::new(
        create_scanner(cli.strategy),
        Box::new(PngFileWriter::new()),
        cli.tolerance,
        padding_spec(&cli),
    );

    std::fs::create_dir_all(&cli.out)
        .map_err(|e| format!("Failed to create {}: {e}", cli.out.display()))?;

    let source = build_source(&cli);
    let executor = match cli.jobs {
        Some(jobs) => ThreadedBatchExecutor::new(jobs),
        None => ThreadedBatchExecutor::default(),
    };
    let config = BatchConfig {
        stop_at_first_error: cli.stop_at_first_error,
        ..BatchConfig::default()
    };

    let mut logger = LogBatchLogger::new();
    let summary = executor.execute(source, Arc::new(use_case), &mut logger, config)?;
    report(&summary, &cli.out);
    Ok(())
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if cli.files.is_empty() && !cli.stdin {
        return Err("Empty input. Please specify at least one file to process.".into());
    }
    if cli.stdin && !cli.files.is_empty() {
        return Err("--stdin cannot be combined with input files".into());
    }
    if cli.jobs == Some(0) {
        return Err("Jobs must be at least 1".into());
    }
    Ok(())
}

/// Later, narrower flags override earlier, wider ones.
fn padding_spec(cli: &Cli) -> PaddingSpec {
    let mut spec = PaddingSpec::default();
    if let Some(p) = cli.padding {
        spec = spec.with_all(p);
    }
    if let Some(p) = cli.px {
        spec = spec.with_horizontal(p);
    }
    if let Some(p) = cli.py {
        spec = spec.with_vertical(p);
    }
    if let Some(p) = cli.pt {
        spec = spec.with_top(p);
    }
    if let Some(p) = cli.pr {
        spec = spec.with_right(p);
    }
    if let Some(p) = cli.pb {
        spec = spec.with_bottom(p);
    }
    if let Some(p) = cli.pl {
        spec = spec.with_left(p);
    }
    spec
}

fn build_source(cli: &Cli) -> Box<dyn BatchSource> {
    if cli.stdin {
        Box::new(StreamBatchSource::new(
            std::io::stdin(),
            cli.out.clone(),
            cli.force,
        ))
    } else {
        Box::new(FileBatchSource::new(
            cli.files.clone(),
            cli.out.clone(),
            cli.force,
            Box::new(PngFileReader::new()),
        ))
    }
}

fn report(summary: &BatchSummary, out: &Path) {
    eprintln!(
        "Processed {} of {} images into {}",
        summary.processed,
        summary.total(),
        out.display()
    );
    if summary.failed > 0 {
        eprintln!("{} images skipped", summary.failed);
    }
}
