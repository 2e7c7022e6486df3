//! # Signature Document
//!
//! The owned tree behind one signature: rows → columns → elements, the
//! global style layer and the current selection.
//!
//! ## Sharing
//!
//! ```text
//! SignatureDocument
//!   rows: [Arc<Row>]
//!            columns: [Arc<Column>]
//!                        elements: [Arc<Element>]
//! ```
//!
//! Cloning a document only bumps the reference counts of its rows. Edits go
//! through `Arc::make_mut`, which copies just the path from the root to the
//! touched node, so every older clone (an undo snapshot) stays intact.
//!
//! Fields are private: the only way to change a document is a
//! [`crate::Mutation`].

use crate::error::DocumentError;
use crate::id_generator::IDGenerator;
use crate::style::{GlobalStyles, Style, VerticalAlign};
use crate::visitor::{walk_column, walk_row, Visitor};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::warn;

/// Opaque node identifier (`"{seed}-{n}"`)
pub type NodeId = String;

/// Which structural level an id refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Row,
    Column,
    Element,
}

/// Current selection, at most one node
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Selection {
    #[default]
    None,
    Row {
        id: NodeId,
    },
    Column {
        id: NodeId,
    },
    Element {
        id: NodeId,
    },
}

impl Selection {
    pub fn new(id: impl Into<NodeId>, kind: NodeKind) -> Self {
        let id = id.into();
        match kind {
            NodeKind::Row => Selection::Row { id },
            NodeKind::Column => Selection::Column { id },
            NodeKind::Element => Selection::Element { id },
        }
    }

    pub fn id(&self) -> Option<&str> {
        match self {
            Selection::None => None,
            Selection::Row { id } | Selection::Column { id } | Selection::Element { id } => {
                Some(id)
            }
        }
    }

    pub fn kind(&self) -> Option<NodeKind> {
        match self {
            Selection::None => None,
            Selection::Row { .. } => Some(NodeKind::Row),
            Selection::Column { .. } => Some(NodeKind::Column),
            Selection::Element { .. } => Some(NodeKind::Element),
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Selection::None)
    }
}

/// Element variant, used when inserting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Text,
    Image,
    Button,
    Social,
}

/// One entry of a social element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialLink {
    pub network: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
}

impl SocialLink {
    pub fn new(network: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            network: network.into(),
            url: url.into(),
            icon_url: None,
        }
    }

    pub fn with_icon(mut self, icon_url: impl Into<String>) -> Self {
        self.icon_url = Some(icon_url.into());
        self
    }
}

/// Variant payload of an element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ElementBody {
    Text {
        text: String,
    },
    Image {
        src: String,
        #[serde(default)]
        alt: String,
    },
    Button {
        label: String,
    },
    Social {
        #[serde(default)]
        links: Vec<SocialLink>,
    },
}

impl ElementBody {
    /// Build a fresh payload; `content` is ignored for social elements
    pub fn new(kind: ElementKind, content: impl Into<String>) -> Self {
        let content = content.into();
        match kind {
            ElementKind::Text => ElementBody::Text { text: content },
            ElementKind::Image => ElementBody::Image {
                src: content,
                alt: String::new(),
            },
            ElementKind::Button => ElementBody::Button { label: content },
            ElementKind::Social => ElementBody::Social { links: Vec::new() },
        }
    }

    pub fn kind(&self) -> ElementKind {
        match self {
            ElementBody::Text { .. } => ElementKind::Text,
            ElementBody::Image { .. } => ElementKind::Image,
            ElementBody::Button { .. } => ElementKind::Button,
            ElementBody::Social { .. } => ElementKind::Social,
        }
    }

    /// Semantic content: text, image source or button label
    pub fn content(&self) -> Option<&str> {
        match self {
            ElementBody::Text { text } => Some(text),
            ElementBody::Image { src, .. } => Some(src),
            ElementBody::Button { label } => Some(label),
            ElementBody::Social { .. } => None,
        }
    }

    /// Replace the semantic content. Returns `false` for social elements,
    /// which carry links instead.
    pub(crate) fn set_content(&mut self, content: &str) -> bool {
        match self {
            ElementBody::Text { text } => *text = content.to_string(),
            ElementBody::Image { src, .. } => *src = content.to_string(),
            ElementBody::Button { label } => *label = content.to_string(),
            ElementBody::Social { .. } => return false,
        }
        true
    }
}

/// Leaf content node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub(crate) id: NodeId,
    #[serde(flatten)]
    pub(crate) body: ElementBody,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) url: Option<String>,
    #[serde(default, skip_serializing_if = "Style::is_empty")]
    pub(crate) style: Style,
}

impl Element {
    pub(crate) fn new(id: NodeId, body: ElementBody) -> Self {
        Self {
            id,
            body,
            url: None,
            style: Style::default(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn body(&self) -> &ElementBody {
        &self.body
    }

    pub fn kind(&self) -> ElementKind {
        self.body.kind()
    }

    pub fn content(&self) -> Option<&str> {
        self.body.content()
    }

    /// Hyperlink target, unvalidated
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn style(&self) -> &Style {
        &self.style
    }
}

/// Vertical stack of elements with a share of the row width
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub(crate) id: NodeId,
    pub(crate) width_percent: f64,
    #[serde(default)]
    pub(crate) vertical_align: VerticalAlign,
    #[serde(default)]
    pub(crate) elements: Vec<Arc<Element>>,
    #[serde(default, skip_serializing_if = "Style::is_empty")]
    pub(crate) style: Style,
}

impl Column {
    pub(crate) fn new(id: NodeId, width_percent: f64) -> Self {
        Self {
            id,
            width_percent,
            vertical_align: VerticalAlign::default(),
            elements: Vec::new(),
            style: Style::default(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Raw, un-normalized width share
    pub fn width_percent(&self) -> f64 {
        self.width_percent
    }

    pub fn vertical_align(&self) -> VerticalAlign {
        self.vertical_align
    }

    pub fn elements(&self) -> &[Arc<Element>] {
        &self.elements
    }

    pub fn style(&self) -> &Style {
        &self.style
    }
}

/// Horizontal band of columns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub(crate) id: NodeId,
    #[serde(default)]
    pub(crate) columns: Vec<Arc<Column>>,
    #[serde(default, skip_serializing_if = "Style::is_empty")]
    pub(crate) style: Style,
}

impl Row {
    pub(crate) fn new(id: NodeId) -> Self {
        Self {
            id,
            columns: Vec::new(),
            style: Style::default(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn columns(&self) -> &[Arc<Column>] {
        &self.columns
    }

    pub fn style(&self) -> &Style {
        &self.style
    }
}

/// Root of one editing session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignatureDocument {
    pub(crate) name: String,
    pub(crate) ids: IDGenerator,
    #[serde(default)]
    pub(crate) rows: Vec<Arc<Row>>,
    #[serde(default)]
    pub(crate) global_styles: GlobalStyles,
    #[serde(default)]
    pub(crate) selection: Selection,
}

impl SignatureDocument {
    /// Create an empty document
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            ids: IDGenerator::new(&name),
            name,
            rows: Vec::new(),
            global_styles: GlobalStyles::default(),
            selection: Selection::None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rows(&self) -> &[Arc<Row>] {
        &self.rows
    }

    pub fn global_styles(&self) -> &GlobalStyles {
        &self.global_styles
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn find_row(&self, id: &str) -> Option<&Row> {
        self.row_index(id).map(|ri| self.rows[ri].as_ref())
    }

    pub fn find_column(&self, id: &str) -> Option<&Column> {
        self.column_position(id)
            .map(|(ri, ci)| self.rows[ri].columns[ci].as_ref())
    }

    pub fn find_element(&self, id: &str) -> Option<&Element> {
        self.element_position(id)
            .map(|(ri, ci, ei)| self.rows[ri].columns[ci].elements[ei].as_ref())
    }

    /// Whether `id` resolves to a node of the given kind
    pub fn contains(&self, id: &str, kind: NodeKind) -> bool {
        match kind {
            NodeKind::Row => self.row_index(id).is_some(),
            NodeKind::Column => self.column_position(id).is_some(),
            NodeKind::Element => self.element_position(id).is_some(),
        }
    }

    /// Whether the current selection still resolves
    pub fn selection_is_valid(&self) -> bool {
        match (self.selection.id(), self.selection.kind()) {
            (Some(id), Some(kind)) => self.contains(id, kind),
            _ => true,
        }
    }

    /// Number of rows, columns and elements
    pub fn node_count(&self) -> usize {
        let mut collector = IdCollector::default();
        collector.visit_document(self);
        collector.ids.len()
    }

    pub fn to_json(&self) -> Result<String, DocumentError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, DocumentError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load a saved document and check its structural invariants
    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        let mut doc: SignatureDocument = serde_json::from_str(json)?;
        doc.validate()?;
        Ok(doc)
    }

    fn validate(&mut self) -> Result<(), DocumentError> {
        let mut collector = IdCollector::default();
        collector.visit_document(self);

        if let Some(id) = collector.duplicates.into_iter().next() {
            return Err(DocumentError::DuplicateId(id));
        }
        if let Some((column_id, width)) = collector.bad_widths.into_iter().next() {
            return Err(DocumentError::InvalidWidth { column_id, width });
        }

        for (id, _) in &collector.ids {
            self.ids.observe(id);
        }

        if !self.selection_is_valid() {
            warn!(selection = ?self.selection, "Dropping selection that no longer resolves");
            self.selection = Selection::None;
        }

        Ok(())
    }

    pub(crate) fn next_id(&mut self) -> NodeId {
        self.ids.new_id()
    }

    pub(crate) fn row_index(&self, id: &str) -> Option<usize> {
        self.rows.iter().position(|row| row.id == id)
    }

    pub(crate) fn column_position(&self, id: &str) -> Option<(usize, usize)> {
        self.rows.iter().enumerate().find_map(|(ri, row)| {
            row.columns
                .iter()
                .position(|column| column.id == id)
                .map(|ci| (ri, ci))
        })
    }

    pub(crate) fn element_position(&self, id: &str) -> Option<(usize, usize, usize)> {
        for (ri, row) in self.rows.iter().enumerate() {
            for (ci, column) in row.columns.iter().enumerate() {
                if let Some(ei) = column.elements.iter().position(|el| el.id == id) {
                    return Some((ri, ci, ei));
                }
            }
        }
        None
    }

    pub(crate) fn row_mut(&mut self, ri: usize) -> &mut Row {
        Arc::make_mut(&mut self.rows[ri])
    }

    pub(crate) fn column_mut(&mut self, ri: usize, ci: usize) -> &mut Column {
        Arc::make_mut(&mut self.row_mut(ri).columns[ci])
    }

    pub(crate) fn element_mut(&mut self, ri: usize, ci: usize, ei: usize) -> &mut Element {
        Arc::make_mut(&mut self.column_mut(ri, ci).elements[ei])
    }
}

/// Collects every id in the tree, noting duplicates and invalid widths
#[derive(Default)]
struct IdCollector {
    ids: Vec<(NodeId, NodeKind)>,
    seen: HashSet<NodeId>,
    duplicates: Vec<NodeId>,
    bad_widths: Vec<(NodeId, f64)>,
}

impl IdCollector {
    fn record(&mut self, id: &str, kind: NodeKind) {
        if !self.seen.insert(id.to_string()) {
            self.duplicates.push(id.to_string());
        }
        self.ids.push((id.to_string(), kind));
    }
}

impl Visitor for IdCollector {
    fn visit_row(&mut self, row: &Row) {
        self.record(&row.id, NodeKind::Row);
        walk_row(self, row);
    }

    fn visit_column(&mut self, column: &Column) {
        self.record(&column.id, NodeKind::Column);
        if !(column.width_percent.is_finite() && column.width_percent > 0.0) {
            self.bad_widths
                .push((column.id.clone(), column.width_percent));
        }
        walk_column(self, column);
    }

    fn visit_element(&mut self, element: &Element) {
        self.record(&element.id, NodeKind::Element);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_document_is_empty() {
        let doc = SignatureDocument::new("work");
        assert!(doc.is_empty());
        assert!(doc.selection().is_none());
        assert_eq!(doc.node_count(), 0);
    }

    #[test]
    fn test_selection_accessors() {
        let selection = Selection::new("abc-1", NodeKind::Column);
        assert_eq!(selection.id(), Some("abc-1"));
        assert_eq!(selection.kind(), Some(NodeKind::Column));
        assert_eq!(Selection::None.id(), None);
    }

    #[test]
    fn test_element_body_content() {
        let body = ElementBody::new(ElementKind::Button, "Book a call");
        assert_eq!(body.content(), Some("Book a call"));

        let social = ElementBody::new(ElementKind::Social, "ignored");
        assert_eq!(social.content(), None);
        assert_eq!(social, ElementBody::Social { links: vec![] });
    }

    #[test]
    fn test_from_json_rejects_duplicate_ids() {
        let json = r#"{
            "name": "dup",
            "ids": { "seed": "s", "count": 2 },
            "rows": [
                { "id": "s-1", "columns": [] },
                { "id": "s-1", "columns": [] }
            ]
        }"#;

        match SignatureDocument::from_json(json) {
            Err(DocumentError::DuplicateId(id)) => assert_eq!(id, "s-1"),
            other => panic!("expected duplicate id error, got {:?}", other),
        }
    }

    #[test]
    fn test_from_json_rejects_zero_width() {
        let json = r#"{
            "name": "w",
            "ids": { "seed": "s", "count": 2 },
            "rows": [
                { "id": "s-1", "columns": [ { "id": "s-2", "widthPercent": 0 } ] }
            ]
        }"#;

        assert!(matches!(
            SignatureDocument::from_json(json),
            Err(DocumentError::InvalidWidth { .. })
        ));
    }

    #[test]
    fn test_from_json_clears_dangling_selection_and_advances_ids() {
        let json = r#"{
            "name": "w",
            "ids": { "seed": "s", "count": 0 },
            "rows": [ { "id": "s-5", "columns": [] } ],
            "selection": { "kind": "element", "id": "s-9" }
        }"#;

        let mut doc = SignatureDocument::from_json(json).unwrap();
        assert!(doc.selection().is_none());
        assert_eq!(doc.next_id(), "s-6");
    }
}
