//! Module containing the universal error type
use thiserror::Error;

/// Universal error type for eversion evaluation
#[derive(Error, Debug)]
pub enum Error {
    /// Output grid has the wrong number of cells for the sample ranges
    #[error("grid is {0}x{1} points, but sample ranges require {2}x{3}")]
    BadGridSize(usize, usize, usize, usize),

    /// Strip count must be at least 1
    #[error("strip count must be at least 1")]
    BadStripCount,

    /// Phase thresholds must be strictly increasing within `[0, 1)`
    #[error("phase thresholds {0:?} are not strictly increasing in [0, 1)")]
    UnorderedSchedule([f64; 5]),

    /// IO error; see inner code for details
    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),
}
