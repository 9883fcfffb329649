mod worker_pool;

use std::path::PathBuf;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::common::{CountMap, CountPipeline};
use crate::count::{self, RowPolicy};
use crate::error::PipelineError;
use crate::loader;
use crate::partition;

use worker_pool::WorkerPool;

/// Chunked run: the input is split into contiguous chunks, counted by a
/// pool of map workers, and reduced once every per-chunk map is back.
pub struct PooledPipeline {
    input: PathBuf,
    policy: RowPolicy,
    workers: usize,
}

impl PooledPipeline {
    /// `workers` is the target chunk count; the pool itself is sized to
    /// the chunks actually produced, which can be fewer on short input.
    pub fn new(input: PathBuf, policy: RowPolicy, workers: usize) -> Self {
        assert!(workers > 0);
        Self {
            input,
            policy,
            workers,
        }
    }
}

#[async_trait]
impl CountPipeline for PooledPipeline {
    async fn run(self) -> Result<CountMap, PipelineError> {
        let rows = loader::load_rows(&self.input)?;
        let total = rows.len();
        let chunks = partition::split_rows(rows, self.workers);
        if chunks.is_empty() {
            return Ok(CountMap::new());
        }

        let expected = chunks.len();
        info!("map phase: {total} rows across {expected} chunks");

        let pool = WorkerPool::new(expected);
        let (tx, rx) = async_channel::bounded(expected);

        for (seq, chunk) in chunks.into_iter().enumerate() {
            let tx = tx.clone();
            let policy = self.policy.clone();
            pool.submit(move |worker| {
                let counts = count::count_chunk(&chunk, &policy);
                debug!("worker {worker} counted chunk {seq} ({} rows)", chunk.len());
                let _ = tx.send_blocking(counts);
            })
            .await?;
        }
        // the jobs hold the clones; this handle has to go or the gather
        // loop below never sees the channel close
        drop(tx);

        let mut partials = Vec::with_capacity(expected);
        while let Ok(counts) = rx.recv().await {
            partials.push(counts);
        }
        if partials.len() != expected {
            return Err(PipelineError::MissingCounts {
                expected,
                received: partials.len(),
            });
        }

        Ok(count::merge_counts(partials))
    }
}
