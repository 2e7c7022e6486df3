//! # History
//!
//! Snapshot-based undo/redo over [`SignatureDocument`].
//!
//! ## Design
//!
//! - Every edit pushes the **pre-edit** document onto `past` and clears
//!   `future`
//! - Undo swaps the current document with the most recent `past` snapshot,
//!   pushing the current one onto `future`; redo is the mirror image
//! - Snapshots are whole documents, but rows/columns/elements are shared
//!   behind `Arc`, so a snapshot only costs the nodes an edit touched
//! - Selection lives inside the document, so undo/redo restores it too
//! - Batches (begin/end) turn a whole gesture into one undo step
//!
//! ## Example
//!
//! ```rust
//! use signet_document::{Mutation, SignatureDocument};
//! use signet_editor::History;
//!
//! let mut history = History::new(SignatureDocument::new("demo"));
//! history.apply(&Mutation::InsertRow { index: 0 }).unwrap();
//! assert_eq!(history.current().rows().len(), 1);
//!
//! assert!(history.undo());
//! assert!(history.current().rows().is_empty());
//!
//! assert!(history.redo());
//! assert_eq!(history.current().rows().len(), 1);
//! ```

use signet_document::{Mutation, MutationError, NodeId, SignatureDocument};
use std::collections::VecDeque;
use std::mem;
use tracing::debug;

/// Default number of undo levels kept
pub const DEFAULT_MAX_LEVELS: usize = 100;

/// A document state plus a label for the edit that left it
#[derive(Debug, Clone)]
struct Snapshot {
    document: SignatureDocument,
    description: Option<String>,
}

/// An open batch: the state before its first edit
#[derive(Debug, Clone)]
struct Batch {
    before: SignatureDocument,
    description: Option<String>,
    changed: bool,
}

/// Undo/redo history owning the current document
#[derive(Debug, Clone)]
pub struct History {
    current: SignatureDocument,

    /// Earlier states (most recent last)
    past: VecDeque<Snapshot>,

    /// Undone states (most recent last)
    future: Vec<Snapshot>,

    /// Maximum number of undo levels (0 = unlimited)
    max_levels: usize,

    batch: Option<Batch>,
}

impl History {
    /// Create a history with default max levels (100)
    pub fn new(document: SignatureDocument) -> Self {
        Self::with_max_levels(document, DEFAULT_MAX_LEVELS)
    }

    /// Create a history with custom max levels
    pub fn with_max_levels(document: SignatureDocument, max_levels: usize) -> Self {
        Self {
            current: document,
            past: VecDeque::new(),
            future: Vec::new(),
            max_levels,
            batch: None,
        }
    }

    /// The visible document
    pub fn current(&self) -> &SignatureDocument {
        &self.current
    }

    /// Apply a mutation and record it for undo. Returns the id of the node
    /// the mutation created, if any.
    ///
    /// A failed mutation leaves both the document and the history untouched.
    pub fn apply(&mut self, mutation: &Mutation) -> Result<Option<NodeId>, MutationError> {
        let result = mutation.apply(&self.current)?;
        self.commit(result.document, Some(mutation.name().to_string()));
        Ok(result.created)
    }

    /// Run an arbitrary edit function against the current document and
    /// record its result
    pub fn apply_edit<F, E>(&mut self, edit: F) -> Result<(), E>
    where
        F: FnOnce(&SignatureDocument) -> Result<SignatureDocument, E>,
    {
        let next = edit(&self.current)?;
        self.commit(next, None);
        Ok(())
    }

    fn commit(&mut self, next: SignatureDocument, description: Option<String>) {
        let previous = mem::replace(&mut self.current, next);

        match &mut self.batch {
            Some(batch) => batch.changed = true,
            None => self.push_past(Snapshot {
                document: previous,
                description,
            }),
        }

        // New edit invalidates anything undone
        self.future.clear();
    }

    fn push_past(&mut self, snapshot: Snapshot) {
        self.past.push_back(snapshot);

        if self.max_levels > 0 && self.past.len() > self.max_levels {
            self.past.pop_front();
        }
    }

    /// Start a batch; every edit until [`end_batch`](Self::end_batch) is
    /// one undo step
    pub fn begin_batch(&mut self) {
        self.end_batch();
        self.batch = Some(Batch {
            before: self.current.clone(),
            description: None,
            changed: false,
        });
    }

    /// Close the current batch. An empty batch leaves no undo step.
    pub fn end_batch(&mut self) {
        if let Some(batch) = self.batch.take() {
            if batch.changed {
                self.push_past(Snapshot {
                    document: batch.before,
                    description: batch.description,
                });
            }
        }
    }

    /// Set description for current batch (if batching)
    pub fn set_batch_description(&mut self, description: impl Into<String>) {
        if let Some(batch) = &mut self.batch {
            batch.description = Some(description.into());
        }
    }

    /// Restore the previous state. Returns `false` when there is nothing to
    /// undo; an open batch is closed first.
    pub fn undo(&mut self) -> bool {
        self.end_batch();

        let Some(snapshot) = self.past.pop_back() else {
            debug!("Nothing to undo");
            return false;
        };

        let current = mem::replace(&mut self.current, snapshot.document);
        self.future.push(Snapshot {
            document: current,
            description: snapshot.description,
        });
        true
    }

    /// Re-apply the most recently undone state. Returns `false` when there
    /// is nothing to redo.
    pub fn redo(&mut self) -> bool {
        self.end_batch();

        let Some(snapshot) = self.future.pop() else {
            debug!("Nothing to redo");
            return false;
        };

        let current = mem::replace(&mut self.current, snapshot.document);
        self.past.push_back(Snapshot {
            document: current,
            description: snapshot.description,
        });
        true
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    pub fn undo_levels(&self) -> usize {
        self.past.len()
    }

    pub fn redo_levels(&self) -> usize {
        self.future.len()
    }

    pub fn max_levels(&self) -> usize {
        self.max_levels
    }

    /// Drop all undo/redo history, keeping the current document
    pub fn clear(&mut self) {
        self.past.clear();
        self.future.clear();
        self.batch = None;
    }

    /// Description of the step the next undo reverts
    pub fn undo_description(&self) -> Option<&str> {
        self.past
            .back()
            .and_then(|snapshot| snapshot.description.as_deref())
    }

    /// Description of the step the next redo re-applies
    pub fn redo_description(&self) -> Option<&str> {
        self.future
            .last()
            .and_then(|snapshot| snapshot.description.as_deref())
    }

    /// Consume the history, keeping only the current document
    pub fn into_document(self) -> SignatureDocument {
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use signet_document::{ElementKind, NodeKind};

    fn history_with_text() -> (History, NodeId) {
        let mut history = History::new(SignatureDocument::new("history"));
        let row_id = history.apply(&Mutation::InsertRow { index: 0 }).unwrap().unwrap();
        let column_id = history
            .apply(&Mutation::InsertColumn {
                row_id,
                index: 0,
                width_percent: 100.0,
            })
            .unwrap()
            .unwrap();
        let text_id = history
            .apply(&Mutation::InsertElement {
                column_id,
                index: 0,
                kind: ElementKind::Text,
                content: "Hello".to_string(),
            })
            .unwrap()
            .unwrap();
        history.clear();
        (history, text_id)
    }

    fn update_text(id: &str, content: &str) -> Mutation {
        Mutation::UpdateElementContent {
            element_id: id.to_string(),
            content: content.to_string(),
        }
    }

    #[test]
    fn test_history_creation() {
        let history = History::new(SignatureDocument::new("empty"));
        assert_eq!(history.undo_levels(), 0);
        assert_eq!(history.redo_levels(), 0);
        assert!(!history.can_undo());
        assert!(!history.can_redo());
        assert_eq!(history.max_levels(), DEFAULT_MAX_LEVELS);
    }

    #[test]
    fn test_apply_and_undo() {
        let (mut history, text_id) = history_with_text();
        let before = history.current().clone();

        history.apply(&update_text(&text_id, "World")).unwrap();
        assert_eq!(history.undo_levels(), 1);
        assert_eq!(history.undo_description(), Some("update_element_content"));

        assert!(history.undo());
        assert_eq!(history.current(), &before);
        assert_eq!(history.redo_levels(), 1);

        assert!(history.redo());
        assert_eq!(
            history.current().find_element(&text_id).unwrap().content(),
            Some("World")
        );
    }

    #[test]
    fn test_empty_history_is_a_silent_no_op() {
        let (mut history, _) = history_with_text();
        let before = history.current().clone();

        assert!(!history.undo());
        assert!(!history.redo());
        assert_eq!(history.current(), &before);
    }

    #[test]
    fn test_failed_mutation_is_not_recorded() {
        let (mut history, _) = history_with_text();

        let err = history.apply(&update_text("missing", "x")).unwrap_err();
        assert_eq!(err, MutationError::NotFound("missing".to_string()));
        assert_eq!(history.undo_levels(), 0);
    }

    #[test]
    fn test_batched_edits_are_one_step() {
        let (mut history, text_id) = history_with_text();
        let before = history.current().clone();

        history.begin_batch();
        history.set_batch_description("Type greeting");
        history.apply(&update_text(&text_id, "W")).unwrap();
        history.apply(&update_text(&text_id, "Wo")).unwrap();
        history.apply(&update_text(&text_id, "World")).unwrap();
        history.end_batch();

        assert_eq!(history.undo_levels(), 1);
        assert_eq!(history.undo_description(), Some("Type greeting"));

        history.undo();
        assert_eq!(history.current(), &before);
        assert_eq!(history.redo_description(), Some("Type greeting"));
    }

    #[test]
    fn test_empty_batch_leaves_no_step() {
        let (mut history, _) = history_with_text();
        history.begin_batch();
        history.end_batch();
        assert!(!history.can_undo());
    }

    #[test]
    fn test_new_edit_clears_redo() {
        let (mut history, text_id) = history_with_text();

        history.apply(&update_text(&text_id, "World")).unwrap();
        history.undo();
        assert_eq!(history.redo_levels(), 1);

        history.apply(&update_text(&text_id, "Everyone")).unwrap();
        assert_eq!(history.redo_levels(), 0);
        assert!(!history.redo());
    }

    #[test]
    fn test_max_levels_enforced() {
        let (history, text_id) = history_with_text();
        let mut history = History::with_max_levels(history.into_document(), 2);

        for i in 0..3 {
            history.apply(&update_text(&text_id, &format!("Text {i}"))).unwrap();
        }

        assert_eq!(history.undo_levels(), 2);
        history.undo();
        history.undo();
        assert!(!history.undo());
        assert_eq!(
            history.current().find_element(&text_id).unwrap().content(),
            Some("Text 0")
        );
    }

    #[test]
    fn test_oldest_step_is_dropped_at_the_cap() {
        let (history, text_id) = history_with_text();
        let mut history = History::with_max_levels(history.into_document(), 3);

        for i in 0..10 {
            history
                .apply(&update_text(&text_id, &format!("Text {i}")))
                .unwrap();
        }
        assert_eq!(history.undo_levels(), 3);

        while history.undo() {}
        assert_eq!(
            history.current().find_element(&text_id).unwrap().content(),
            Some("Text 6")
        );

        while history.redo() {}
        assert_eq!(history.undo_levels(), 3);
        assert_eq!(
            history.current().find_element(&text_id).unwrap().content(),
            Some("Text 9")
        );
    }

    #[test]
    fn test_undo_restores_selection() {
        let (mut history, text_id) = history_with_text();

        history
            .apply(&Mutation::SetSelection {
                node_id: text_id.clone(),
                kind: NodeKind::Element,
            })
            .unwrap();
        history
            .apply(&Mutation::DeleteElement {
                element_id: text_id.clone(),
            })
            .unwrap();
        assert!(history.current().selection().is_none());

        history.undo();
        assert_eq!(history.current().selection().id(), Some(text_id.as_str()));
    }

    #[test]
    fn test_apply_edit_closure() {
        let (mut history, text_id) = history_with_text();

        history
            .apply_edit(|doc| {
                let doc = doc.apply(&update_text(&text_id, "One"))?.document;
                doc.apply(&update_text(&text_id, "Two")).map(|r| r.document)
            })
            .unwrap();

        assert_eq!(history.undo_levels(), 1);
        assert_eq!(history.undo_description(), None);
        history.undo();
        assert_eq!(
            history.current().find_element(&text_id).unwrap().content(),
            Some("Hello")
        );
    }
}
