//! Flight-count map/reduce: counts CSV flight records per passenger in
//! parallel chunks, reports the busiest passenger(s), and optionally
//! cross-checks the totals against a second dataset.

pub mod common;
pub mod count;
pub mod error;
pub mod loader;
pub mod parallel;
pub mod partition;
pub mod sequential;
pub mod validate;

pub use common::{Chunk, CountMap, CountPipeline, Row};
pub use count::RowPolicy;
pub use error::PipelineError;
pub use parallel::PooledPipeline;
pub use sequential::SequentialPipeline;
pub use validate::{cross_check, same_counts, Validation};
