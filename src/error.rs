use std::path::PathBuf;

use thiserror::Error;

/// Everything a counting run can fail with.
///
/// Malformed rows are deliberately not here: a row without a first
/// field is skipped by the map phase, never raised. A missing input
/// file gets its own variant so callers can tell "nothing to count"
/// apart from "nothing to read".
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("input file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("failed to read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV in {path}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("worker pool rejected a chunk: all workers are gone")]
    PoolClosed,

    #[error("map phase delivered {received} of {expected} chunk counts")]
    MissingCounts { expected: usize, received: usize },
}
