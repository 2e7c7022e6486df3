use crate::document::{Column, Element, Row, SignatureDocument};

/// Visitor pattern for traversing a signature document immutably
///
/// This trait provides default implementations that walk the entire tree.
/// Override specific visit_* methods to perform custom actions on nodes.
pub trait Visitor: Sized {
    fn visit_document(&mut self, doc: &SignatureDocument) {
        walk_document(self, doc);
    }

    fn visit_row(&mut self, row: &Row) {
        walk_row(self, row);
    }

    fn visit_column(&mut self, column: &Column) {
        walk_column(self, column);
    }

    fn visit_element(&mut self, _element: &Element) {
        // Leaf node, no children to walk
    }
}

// Default walk implementations

pub fn walk_document<V: Visitor>(visitor: &mut V, doc: &SignatureDocument) {
    for row in doc.rows() {
        visitor.visit_row(row);
    }
}

pub fn walk_row<V: Visitor>(visitor: &mut V, row: &Row) {
    for column in row.columns() {
        visitor.visit_column(column);
    }
}

pub fn walk_column<V: Visitor>(visitor: &mut V, column: &Column) {
    for element in column.elements() {
        visitor.visit_element(element);
    }
}
