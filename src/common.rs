use std::collections::HashMap;

use async_trait::async_trait;

use crate::error::PipelineError;

/// One CSV record; only field 0 (the passenger id) carries meaning.
pub type Row = csv::StringRecord;
/// Contiguous run of rows handed to one map worker.
pub type Chunk = Vec<Row>;
/// {passenger id: flight count}
pub type CountMap = HashMap<String, u64>;

/// One full load, partition, map and reduce pass over an input file.
///
/// Implementations differ only in how the map phase is dispatched; the
/// counts they return must be identical for identical input and policy.
#[async_trait]
pub trait CountPipeline {
    async fn run(self) -> Result<CountMap, PipelineError>;
}
