use std::path::PathBuf;

use tracing::debug;

use crate::common::{CountMap, CountPipeline};
use crate::count::RowPolicy;
use crate::error::PipelineError;
use crate::parallel::PooledPipeline;

/// Outcome of the secondary cross-check run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validation {
    /// Secondary counts matched the primary result.
    Verified,
    /// Secondary counts differ from the primary result.
    Mismatch,
    /// Secondary file is missing; nothing was checked.
    Skipped,
}

/// Re-runs the whole pipeline on `path` with its own worker pool and
/// compares the outcome against `reference`.
///
/// Only a missing file is tolerated (that is [`Validation::Skipped`]);
/// any other failure of the secondary run propagates. The primary
/// result is never altered either way.
pub async fn cross_check(
    reference: &CountMap,
    path: PathBuf,
    policy: RowPolicy,
    workers: usize,
) -> Result<Validation, PipelineError> {
    let counts = match PooledPipeline::new(path, policy, workers).run().await {
        Ok(counts) => counts,
        Err(PipelineError::NotFound { path }) => {
            debug!("validation input {} does not exist", path.display());
            return Ok(Validation::Skipped);
        }
        Err(err) => return Err(err),
    };

    if same_counts(&counts, reference) {
        Ok(Validation::Verified)
    } else {
        Ok(Validation::Mismatch)
    }
}

/// Equality on the non-zero view: a key counted zero times and an
/// absent key are the same thing.
pub fn same_counts(a: &CountMap, b: &CountMap) -> bool {
    let live = |map: &CountMap| {
        map.iter()
            .filter(|&(_, &count)| count != 0)
            .map(|(id, &count)| (id.clone(), count))
            .collect::<CountMap>()
    };
    live(a) == live(b)
}
