use std::str::FromStr;

use thiserror::Error;

use crate::scanning::domain::boundary_scanner::BoundaryScanner;

use super::naive_scanner::NaiveScanner;
use super::ring_scanner::RingScanner;

/// Which bounding-box search to run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ScanStrategy {
    /// Perimeter walk with early termination.
    #[default]
    Ring,
    /// Full raster scan.
    Naive,
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("unknown scan strategy '{0}', expected 'ring' or 'naive'")]
pub struct ScanStrategyError(pub String);

impl FromStr for ScanStrategy {
    type Err = ScanStrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ring" => Ok(ScanStrategy::Ring),
            "naive" => Ok(ScanStrategy::Naive),
            other => Err(ScanStrategyError(other.to_string())),
        }
    }
}

pub fn create_scanner(strategy: ScanStrategy) -> Box<dyn BoundaryScanner> {
    log::debug!("Using {:?} bounding-box scanner", strategy);
    match strategy {
        ScanStrategy::Ring => Box::new(RingScanner::new()),
        ScanStrategy::Naive => Box::new(NaiveScanner::new()),
    }
}
