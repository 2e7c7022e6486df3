//! # Signet HTML Codec
//!
//! Turns a [`SignatureDocument`](signet_document::SignatureDocument) into a
//! self-contained, table-based HTML fragment that survives being pasted into
//! third-party mail composers: nested presentation tables, inline styles
//! only, no scripts or linked stylesheets.
//!
//! ```
//! use signet_compiler_html::render;
//! use signet_document::{ElementKind, Mutation, SignatureDocument};
//!
//! let doc = SignatureDocument::new("demo");
//! let r = doc.apply(&Mutation::InsertRow { index: 0 }).unwrap();
//! let row_id = r.created.unwrap();
//! let r = r.document.apply(&Mutation::InsertColumn {
//!     row_id,
//!     index: 0,
//!     width_percent: 100.0,
//! }).unwrap();
//! let column_id = r.created.unwrap();
//! let doc = r.document.apply(&Mutation::InsertElement {
//!     column_id,
//!     index: 0,
//!     kind: ElementKind::Text,
//!     content: "Jane <Doe>".to_string(),
//! }).unwrap().document;
//!
//! let html = render(&doc);
//! assert!(html.contains("Jane &lt;Doe&gt;"));
//! assert!(html.contains(r#"width="100%""#));
//! ```

mod compiler;
mod css;
mod layout;
mod links;

pub use compiler::{escape_html, render, render_with_options, RenderOptions};
pub use css::{sanitize_value, InlineStyle};
pub use layout::normalize_widths;
pub use links::{validate_image_src, validate_link, InvalidLink, Link};
