//! # Signet Document
//!
//! Structured model of an email signature and the operations that edit it.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ document: SignatureDocument                 │
//! │  rows → columns → elements (Arc-shared)     │
//! │  global styles + selection                  │
//! └─────────────────────────────────────────────┘
//!                     ↑ Mutation::apply (pure)
//! ┌─────────────────────────────────────────────┐
//! │ editor: history (undo/redo) + preview       │
//! └─────────────────────────────────────────────┘
//!                     ↓ StyleResolver
//! ┌─────────────────────────────────────────────┐
//! │ compiler-html: table-based email HTML       │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use signet_document::{ElementKind, Mutation, SignatureDocument};
//!
//! let doc = SignatureDocument::new("work");
//! let result = doc.apply(&Mutation::InsertRow { index: 0 }).unwrap();
//! let row_id = result.created.unwrap();
//!
//! let result = result.document.apply(&Mutation::InsertColumn {
//!     row_id,
//!     index: 0,
//!     width_percent: 100.0,
//! }).unwrap();
//! let column_id = result.created.unwrap();
//!
//! let doc = result.document.apply(&Mutation::InsertElement {
//!     column_id,
//!     index: 0,
//!     kind: ElementKind::Text,
//!     content: "Jane Doe".to_string(),
//! }).unwrap().document;
//!
//! assert_eq!(doc.node_count(), 3);
//! ```

mod document;
mod error;
mod id_generator;
mod mutations;
mod post_effects;
pub mod resolver;
mod style;
pub mod visitor;

pub use document::{
    Column, Element, ElementBody, ElementKind, NodeId, NodeKind, Row, Selection,
    SignatureDocument, SocialLink,
};
pub use error::DocumentError;
pub use id_generator::{get_document_seed, IDGenerator};
pub use mutations::{Mutation, MutationError, MutationResult};
pub use post_effects::{ClearStaleSelection, PostEffect, PostEffectEngine};
pub use resolver::{resolve, ConcreteStyle, Dimension, Edges, NodeRole, StyleResolver};
pub use style::{
    Border, BorderStyle, FontStyle, FontWeight, GlobalStyles, Style, TextAlign, TextDecoration,
    TextTransform, VerticalAlign,
};
