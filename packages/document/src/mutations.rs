//! # Edit Operations
//!
//! Named, serializable operations over a [`SignatureDocument`]. These are the
//! only way a document changes, which is what lets the history engine capture
//! every edit.
//!
//! ## Semantics
//!
//! - **Pure**: `apply` takes the document by reference and returns a new
//!   document value; the input is never modified.
//! - **Kind-checked**: an id that does not name a node of the expected kind
//!   fails with [`MutationError::NotFound`].
//! - **Clamping**: out-of-range insert and move indices are clamped to the
//!   nearest valid position instead of failing.
//! - **Post effects**: after the primary change, [`PostEffectEngine`] runs
//!   (deleting the selected node clears the selection).

use crate::document::{
    Column, Element, ElementBody, ElementKind, NodeId, NodeKind, Row, Selection,
    SignatureDocument, SocialLink,
};
use crate::post_effects::PostEffectEngine;
use crate::style::{GlobalStyles, Style, VerticalAlign};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Semantic edit operations
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Mutation {
    /// Insert an empty row at index
    #[serde(rename_all = "camelCase")]
    InsertRow { index: usize },

    /// Remove a row with all its columns and elements
    #[serde(rename_all = "camelCase")]
    DeleteRow { row_id: NodeId },

    /// Move a row to a new position
    #[serde(rename_all = "camelCase")]
    MoveRow { row_id: NodeId, index: usize },

    /// Insert an empty column into a row
    #[serde(rename_all = "camelCase")]
    InsertColumn {
        row_id: NodeId,
        index: usize,
        width_percent: f64,
    },

    /// Remove a column with its elements
    #[serde(rename_all = "camelCase")]
    DeleteColumn { column_id: NodeId },

    /// Change a column's raw width share
    #[serde(rename_all = "camelCase")]
    ResizeColumn {
        column_id: NodeId,
        width_percent: f64,
    },

    /// Change where a column's content sits vertically
    #[serde(rename_all = "camelCase")]
    SetVerticalAlign {
        column_id: NodeId,
        align: VerticalAlign,
    },

    /// Insert a new element into a column
    #[serde(rename_all = "camelCase")]
    InsertElement {
        column_id: NodeId,
        index: usize,
        kind: ElementKind,
        content: String,
    },

    /// Remove an element
    #[serde(rename_all = "camelCase")]
    DeleteElement { element_id: NodeId },

    /// Move an element to a column at index (same or different column)
    #[serde(rename_all = "camelCase")]
    MoveElement {
        element_id: NodeId,
        column_id: NodeId,
        index: usize,
    },

    /// Copy an element (with a fresh id) right after the original
    #[serde(rename_all = "camelCase")]
    DuplicateElement { element_id: NodeId },

    /// Replace text, image source or button label (ignored for social)
    #[serde(rename_all = "camelCase")]
    UpdateElementContent { element_id: NodeId, content: String },

    /// Set or clear the hyperlink target
    #[serde(rename_all = "camelCase")]
    UpdateElementUrl {
        element_id: NodeId,
        url: Option<String>,
    },

    /// Set the alternative text of an image
    #[serde(rename_all = "camelCase")]
    UpdateImageAlt { element_id: NodeId, alt: String },

    /// Replace the links of a social element
    #[serde(rename_all = "camelCase")]
    UpdateSocialLinks {
        element_id: NodeId,
        links: Vec<SocialLink>,
    },

    /// Merge into an element's override layer
    #[serde(rename_all = "camelCase")]
    UpdateElementStyle { element_id: NodeId, style: Style },

    /// Merge into a row's override layer
    #[serde(rename_all = "camelCase")]
    UpdateRowStyle { row_id: NodeId, style: Style },

    /// Merge into a column's override layer
    #[serde(rename_all = "camelCase")]
    UpdateColumnStyle { column_id: NodeId, style: Style },

    /// Select one node
    #[serde(rename_all = "camelCase")]
    SetSelection { node_id: NodeId, kind: NodeKind },

    /// Drop the selection
    ClearSelection,

    /// Merge into the document-wide style layer
    UpdateGlobalStyles { styles: GlobalStyles },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("Node not found: {0}")]
    NotFound(NodeId),

    #[error("Column width must be a positive number, got {0}")]
    InvalidWidth(f64),

    #[error("Element {element_id} is {kind:?}, which does not support this edit")]
    UnsupportedForKind {
        element_id: NodeId,
        kind: ElementKind,
    },
}

/// Result of applying a mutation
#[derive(Debug, Clone)]
pub struct MutationResult {
    /// The edited document
    pub document: SignatureDocument,

    /// Id of the node created by an insert or duplicate
    pub created: Option<NodeId>,
}

impl Mutation {
    /// Apply to a document, returning the edited copy
    pub fn apply(&self, doc: &SignatureDocument) -> Result<MutationResult, MutationError> {
        PostEffectEngine::default().apply_with_effects(self, doc)
    }

    /// Apply this mutation alone, without post effects
    pub(crate) fn apply_primary(
        &self,
        doc: &mut SignatureDocument,
    ) -> Result<Option<NodeId>, MutationError> {
        debug!(mutation = self.name(), "Applying mutation");

        match self {
            Mutation::InsertRow { index } => Ok(Some(Self::apply_insert_row(doc, *index))),

            Mutation::DeleteRow { row_id } => {
                let ri = Self::row_index(doc, row_id)?;
                doc.rows.remove(ri);
                Ok(None)
            }

            Mutation::MoveRow { row_id, index } => {
                let ri = Self::row_index(doc, row_id)?;
                let row = doc.rows.remove(ri);
                let insert_index = (*index).min(doc.rows.len());
                doc.rows.insert(insert_index, row);
                Ok(None)
            }

            Mutation::InsertColumn {
                row_id,
                index,
                width_percent,
            } => {
                Self::check_width(*width_percent)?;
                let ri = Self::row_index(doc, row_id)?;
                let id = doc.next_id();
                let row = doc.row_mut(ri);
                let insert_index = (*index).min(row.columns.len());
                row.columns
                    .insert(insert_index, Arc::new(Column::new(id.clone(), *width_percent)));
                Ok(Some(id))
            }

            Mutation::DeleteColumn { column_id } => {
                let (ri, ci) = Self::column_position(doc, column_id)?;
                doc.row_mut(ri).columns.remove(ci);
                Ok(None)
            }

            Mutation::ResizeColumn {
                column_id,
                width_percent,
            } => {
                Self::check_width(*width_percent)?;
                let (ri, ci) = Self::column_position(doc, column_id)?;
                doc.column_mut(ri, ci).width_percent = *width_percent;
                Ok(None)
            }

            Mutation::SetVerticalAlign { column_id, align } => {
                let (ri, ci) = Self::column_position(doc, column_id)?;
                doc.column_mut(ri, ci).vertical_align = *align;
                Ok(None)
            }

            Mutation::InsertElement {
                column_id,
                index,
                kind,
                content,
            } => {
                let (ri, ci) = Self::column_position(doc, column_id)?;
                let id = doc.next_id();
                let element = Element::new(id.clone(), ElementBody::new(*kind, content.as_str()));
                let column = doc.column_mut(ri, ci);
                let insert_index = (*index).min(column.elements.len());
                column.elements.insert(insert_index, Arc::new(element));
                Ok(Some(id))
            }

            Mutation::DeleteElement { element_id } => {
                let (ri, ci, ei) = Self::element_position(doc, element_id)?;
                doc.column_mut(ri, ci).elements.remove(ei);
                Ok(None)
            }

            Mutation::MoveElement {
                element_id,
                column_id,
                index,
            } => {
                Self::apply_move_element(doc, element_id, column_id, *index)?;
                Ok(None)
            }

            Mutation::DuplicateElement { element_id } => {
                let (ri, ci, ei) = Self::element_position(doc, element_id)?;
                let id = doc.next_id();
                let column = doc.column_mut(ri, ci);
                let mut copy = column.elements[ei].as_ref().clone();
                copy.id = id.clone();
                column.elements.insert(ei + 1, Arc::new(copy));
                Ok(Some(id))
            }

            Mutation::UpdateElementContent {
                element_id,
                content,
            } => {
                let (ri, ci, ei) = Self::element_position(doc, element_id)?;
                if !doc.element_mut(ri, ci, ei).body.set_content(content) {
                    debug!(element_id = %element_id, "Social elements have no content; ignoring");
                }
                Ok(None)
            }

            Mutation::UpdateElementUrl { element_id, url } => {
                let (ri, ci, ei) = Self::element_position(doc, element_id)?;
                let url = url
                    .as_deref()
                    .map(str::trim)
                    .filter(|u| !u.is_empty())
                    .map(str::to_string);
                doc.element_mut(ri, ci, ei).url = url;
                Ok(None)
            }

            Mutation::UpdateImageAlt { element_id, alt } => {
                let (ri, ci, ei) = Self::element_position(doc, element_id)?;
                let element = doc.element_mut(ri, ci, ei);
                match &mut element.body {
                    ElementBody::Image { alt: current, .. } => {
                        *current = alt.clone();
                        Ok(None)
                    }
                    other => Err(MutationError::UnsupportedForKind {
                        element_id: element_id.clone(),
                        kind: other.kind(),
                    }),
                }
            }

            Mutation::UpdateSocialLinks { element_id, links } => {
                let (ri, ci, ei) = Self::element_position(doc, element_id)?;
                let element = doc.element_mut(ri, ci, ei);
                match &mut element.body {
                    ElementBody::Social { links: current } => {
                        *current = links.clone();
                        Ok(None)
                    }
                    other => Err(MutationError::UnsupportedForKind {
                        element_id: element_id.clone(),
                        kind: other.kind(),
                    }),
                }
            }

            Mutation::UpdateElementStyle { element_id, style } => {
                let (ri, ci, ei) = Self::element_position(doc, element_id)?;
                doc.element_mut(ri, ci, ei).style.merge(style);
                Ok(None)
            }

            Mutation::UpdateRowStyle { row_id, style } => {
                let ri = Self::row_index(doc, row_id)?;
                doc.row_mut(ri).style.merge(style);
                Ok(None)
            }

            Mutation::UpdateColumnStyle { column_id, style } => {
                let (ri, ci) = Self::column_position(doc, column_id)?;
                doc.column_mut(ri, ci).style.merge(style);
                Ok(None)
            }

            Mutation::SetSelection { node_id, kind } => {
                if !doc.contains(node_id, *kind) {
                    return Err(MutationError::NotFound(node_id.clone()));
                }
                doc.selection = Selection::new(node_id.clone(), *kind);
                Ok(None)
            }

            Mutation::ClearSelection => {
                doc.selection = Selection::None;
                Ok(None)
            }

            Mutation::UpdateGlobalStyles { styles } => {
                doc.global_styles.merge(styles);
                Ok(None)
            }
        }
    }

    fn apply_insert_row(doc: &mut SignatureDocument, index: usize) -> NodeId {
        let id = doc.next_id();
        let insert_index = index.min(doc.rows.len());
        doc.rows.insert(insert_index, Arc::new(Row::new(id.clone())));
        id
    }

    fn apply_move_element(
        doc: &mut SignatureDocument,
        element_id: &str,
        column_id: &str,
        index: usize,
    ) -> Result<(), MutationError> {
        let (ri, ci, ei) = Self::element_position(doc, element_id)?;
        // Validate the target before detaching anything
        Self::column_position(doc, column_id)?;

        let element = doc.column_mut(ri, ci).elements.remove(ei);

        // Positions may have shifted if source and target share a column
        let (tri, tci) = Self::column_position(doc, column_id)?;
        let target = doc.column_mut(tri, tci);
        let insert_index = index.min(target.elements.len());
        target.elements.insert(insert_index, element);
        Ok(())
    }

    fn check_width(width_percent: f64) -> Result<(), MutationError> {
        if width_percent.is_finite() && width_percent > 0.0 {
            Ok(())
        } else {
            Err(MutationError::InvalidWidth(width_percent))
        }
    }

    fn row_index(doc: &SignatureDocument, id: &str) -> Result<usize, MutationError> {
        doc.row_index(id)
            .ok_or_else(|| MutationError::NotFound(id.to_string()))
    }

    fn column_position(doc: &SignatureDocument, id: &str) -> Result<(usize, usize), MutationError> {
        doc.column_position(id)
            .ok_or_else(|| MutationError::NotFound(id.to_string()))
    }

    fn element_position(
        doc: &SignatureDocument,
        id: &str,
    ) -> Result<(usize, usize, usize), MutationError> {
        doc.element_position(id)
            .ok_or_else(|| MutationError::NotFound(id.to_string()))
    }

    /// Get a debug name for this mutation
    pub fn name(&self) -> &'static str {
        match self {
            Mutation::InsertRow { .. } => "insert_row",
            Mutation::DeleteRow { .. } => "delete_row",
            Mutation::MoveRow { .. } => "move_row",
            Mutation::InsertColumn { .. } => "insert_column",
            Mutation::DeleteColumn { .. } => "delete_column",
            Mutation::ResizeColumn { .. } => "resize_column",
            Mutation::SetVerticalAlign { .. } => "set_vertical_align",
            Mutation::InsertElement { .. } => "insert_element",
            Mutation::DeleteElement { .. } => "delete_element",
            Mutation::MoveElement { .. } => "move_element",
            Mutation::DuplicateElement { .. } => "duplicate_element",
            Mutation::UpdateElementContent { .. } => "update_element_content",
            Mutation::UpdateElementUrl { .. } => "update_element_url",
            Mutation::UpdateImageAlt { .. } => "update_image_alt",
            Mutation::UpdateSocialLinks { .. } => "update_social_links",
            Mutation::UpdateElementStyle { .. } => "update_element_style",
            Mutation::UpdateRowStyle { .. } => "update_row_style",
            Mutation::UpdateColumnStyle { .. } => "update_column_style",
            Mutation::SetSelection { .. } => "set_selection",
            Mutation::ClearSelection => "clear_selection",
            Mutation::UpdateGlobalStyles { .. } => "update_global_styles",
        }
    }

    /// Whether this mutation removes nodes from the tree
    pub fn is_deletion(&self) -> bool {
        matches!(
            self,
            Mutation::DeleteRow { .. } | Mutation::DeleteColumn { .. } | Mutation::DeleteElement { .. }
        )
    }
}

impl SignatureDocument {
    /// Apply a mutation to this document, returning the edited copy
    pub fn apply(&self, mutation: &Mutation) -> Result<MutationResult, MutationError> {
        mutation.apply(self)
    }
}
