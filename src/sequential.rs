use std::path::PathBuf;

use async_trait::async_trait;

use crate::common::{CountMap, CountPipeline};
use crate::count::{self, RowPolicy};
use crate::error::PipelineError;
use crate::loader;

/// Single-pass baseline: the whole input is counted as one chunk.
///
/// This is the reference the chunked run has to agree with, and the
/// simpler of the two dispatch variants.
pub struct SequentialPipeline {
    input: PathBuf,
    policy: RowPolicy,
}

impl SequentialPipeline {
    pub fn new(input: PathBuf, policy: RowPolicy) -> Self {
        Self { input, policy }
    }

    pub fn run_sync(self) -> Result<CountMap, PipelineError> {
        let rows = loader::load_rows(&self.input)?;
        Ok(count::count_chunk(&rows, &self.policy))
    }
}

#[async_trait]
impl CountPipeline for SequentialPipeline {
    async fn run(self) -> Result<CountMap, PipelineError> {
        self.run_sync()
    }
}
