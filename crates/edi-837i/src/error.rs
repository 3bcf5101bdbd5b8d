use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EdiError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to write document {path}: {source}")]
    WriteDocument {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, EdiError>;
