//! # Editing Pipeline
//!
//! Coordinates the edit lifecycle: Mutate → Record → Render → Preview
//!
//! The Pipeline owns a [`History`] and re-renders the document after every
//! successful change (apply, undo, redo), handing the fresh HTML to a
//! [`PreviewSink`]. There is no debouncing here; a sink that wants it does
//! it itself.

use crate::{EditorError, History};
use signet_compiler_html::{render_with_options, RenderOptions};
use signet_document::{Mutation, NodeId, SignatureDocument};
use tracing::{debug, instrument};

/// Receives preview HTML after every change
pub trait PreviewSink {
    fn preview(&mut self, version: u64, html: &str);
}

impl<F> PreviewSink for F
where
    F: FnMut(u64, &str),
{
    fn preview(&mut self, version: u64, html: &str) {
        self(version, html)
    }
}

/// Result of pipeline execution
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineResult {
    /// New version number
    pub version: u64,

    /// Rendered (unstamped) HTML
    pub html: String,

    /// Node created by the mutation, if any
    pub created: Option<NodeId>,

    /// Whether the HTML differs from the previous render
    pub html_changed: bool,
}

/// Manages the full edit → render pipeline
pub struct Pipeline {
    history: History,
    options: RenderOptions,
    version: u64,
    last_html: Option<String>,
    sink: Option<Box<dyn PreviewSink>>,
}

impl Pipeline {
    /// Create pipeline for document
    pub fn new(document: SignatureDocument) -> Self {
        Self::with_options(document, RenderOptions::default())
    }

    pub fn with_options(document: SignatureDocument, options: RenderOptions) -> Self {
        Self {
            history: History::new(document),
            options,
            version: 0,
            last_html: None,
            sink: None,
        }
    }

    /// Load a serialized document
    pub fn from_json(json: &str) -> Result<Self, EditorError> {
        Ok(Self::new(SignatureDocument::from_json(json)?))
    }

    /// Install the live-preview collaborator
    pub fn set_sink(&mut self, sink: impl PreviewSink + 'static) {
        self.sink = Some(Box::new(sink));
    }

    /// Apply mutation and re-render
    #[instrument(skip(self), fields(mutation = mutation.name()))]
    pub fn apply_mutation(&mut self, mutation: &Mutation) -> Result<PipelineResult, EditorError> {
        let created = self.history.apply(mutation)?;
        Ok(self.publish(created))
    }

    /// Apply a mutation given as JSON (the shape external collaborators send)
    pub fn apply_json(&mut self, json: &str) -> Result<PipelineResult, EditorError> {
        let mutation: Mutation = serde_json::from_str(json)?;
        self.apply_mutation(&mutation)
    }

    /// Undo and re-render; `None` when there was nothing to undo
    pub fn undo(&mut self) -> Option<PipelineResult> {
        self.history.undo().then(|| self.publish(None))
    }

    /// Redo and re-render; `None` when there was nothing to redo
    pub fn redo(&mut self) -> Option<PipelineResult> {
        self.history.redo().then(|| self.publish(None))
    }

    pub fn begin_batch(&mut self, description: impl Into<String>) {
        self.history.begin_batch();
        self.history.set_batch_description(description);
    }

    pub fn end_batch(&mut self) {
        self.history.end_batch();
    }

    /// Full re-render without a version bump (initial render, resync)
    pub fn full_render(&mut self) -> String {
        let html = render_with_options(self.history.current(), &self.options);
        self.last_html = Some(html.clone());
        html
    }

    fn publish(&mut self, created: Option<NodeId>) -> PipelineResult {
        self.version += 1;

        let html = render_with_options(self.history.current(), &self.options);
        let html_changed = self.last_html.as_deref() != Some(html.as_str());
        debug!(version = self.version, html_changed, "Publishing preview");

        if let Some(sink) = &mut self.sink {
            sink.preview(self.version, &html);
        }
        self.last_html = Some(html.clone());

        PipelineResult {
            version: self.version,
            html,
            created,
            html_changed,
        }
    }

    /// Get current document
    pub fn document(&self) -> &SignatureDocument {
        self.history.current()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Get last rendered HTML (if any)
    pub fn last_html(&self) -> Option<&str> {
        self.last_html.as_deref()
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("history", &self.history)
            .field("version", &self.version)
            .field("has_sink", &self.sink.is_some())
            .finish()
    }
}
