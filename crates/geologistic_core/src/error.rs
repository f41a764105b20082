use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read {} as CSV: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{} is missing required columns: {}", path.display(), missing.join(", "))]
    MissingColumns { path: PathBuf, missing: Vec<String> },

    #[error("no rows in {}", path.display())]
    Empty { path: PathBuf },

    #[error("no order files found under {}", dir.display())]
    NoOrderFiles { dir: PathBuf },

    #[error("failed to write parquet to {}: {source}", path.display())]
    Parquet {
        path: PathBuf,
        #[source]
        source: parquet::errors::ParquetError,
    },

    #[error("waypoint indices are not a permutation of 0..{expected}")]
    InvalidWaypoints { expected: usize },
}
