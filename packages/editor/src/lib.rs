//! # Signet Editor
//!
//! Editing engine for signature documents.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ document: model + Mutation + style resolver │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: History + Pipeline                  │
//! │  - Record every edit as a snapshot          │
//! │  - Undo/redo, batched gestures              │
//! │  - Re-render and push live previews         │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ compiler-html: document → email HTML        │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Documents are values**: every edit produces a new document
//! 2. **Snapshots, not inverses**: undo restores a previous value exactly
//! 3. **One writer**: a `History` serializes all edits for one session
//!
//! ## Usage
//!
//! ```rust
//! use signet_editor::{Mutation, Pipeline, SignatureDocument};
//!
//! let mut pipeline = Pipeline::new(SignatureDocument::new("jane"));
//! pipeline.set_sink(|version: u64, html: &str| {
//!     println!("preview v{version}: {} bytes", html.len());
//! });
//!
//! let result = pipeline.apply_mutation(&Mutation::InsertRow { index: 0 })?;
//! assert_eq!(result.version, 1);
//!
//! pipeline.undo();
//! assert!(pipeline.document().rows().is_empty());
//! # Ok::<(), signet_editor::EditorError>(())
//! ```

mod errors;
mod history;
mod pipeline;

pub use errors::EditorError;
pub use history::{History, DEFAULT_MAX_LEVELS};
pub use pipeline::{Pipeline, PipelineResult, PreviewSink};

pub use signet_document::{
    ClearStaleSelection, Mutation, MutationError, MutationResult, NodeId, PostEffect,
    PostEffectEngine, SignatureDocument,
};
