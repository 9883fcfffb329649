use std::fs::File;
use std::io;
use std::path::Path;

use tracing::debug;

use crate::common::Row;
use crate::error::PipelineError;

/// Reads the whole file into an ordered row vector.
///
/// No schema checks and no header handling happen here: every record
/// becomes a [`Row`], ragged field counts included. Header rows are the
/// map policy's concern, so the reader is told there are none.
pub fn load_rows(path: &Path) -> Result<Vec<Row>, PipelineError> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(source) if source.kind() == io::ErrorKind::NotFound => {
            return Err(PipelineError::NotFound {
                path: path.to_path_buf(),
            });
        }
        Err(source) => {
            return Err(PipelineError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(file);

    let mut rows = Vec::new();
    for record in reader.records() {
        let row = record.map_err(|source| PipelineError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        rows.push(row);
    }

    debug!("loaded {} rows from {}", rows.len(), path.display());
    Ok(rows)
}
