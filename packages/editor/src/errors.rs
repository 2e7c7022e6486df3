//! Error types for the editor

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Mutation error: {0}")]
    Mutation(#[from] signet_document::MutationError),

    #[error("Document error: {0}")]
    Document(#[from] signet_document::DocumentError),

    #[error("Invalid mutation payload: {0}")]
    Payload(#[from] serde_json::Error),
}
