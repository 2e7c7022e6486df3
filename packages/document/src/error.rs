//! Error types for loading and saving documents

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Duplicate node id: {0}")]
    DuplicateId(String),

    #[error("Column {column_id} has invalid width {width}")]
    InvalidWidth { column_id: String, width: f64 },
}
