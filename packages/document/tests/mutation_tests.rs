//! Behavioural tests for document edit operations

use signet_document::{
    ElementBody, ElementKind, FontWeight, GlobalStyles, Mutation, MutationError, NodeKind,
    SignatureDocument, SocialLink, Style, VerticalAlign,
};
use std::sync::Arc;

/// Apply a mutation that is expected to succeed
fn apply(doc: &SignatureDocument, mutation: Mutation) -> (SignatureDocument, Option<String>) {
    let result = doc.apply(&mutation).expect("mutation should apply");
    (result.document, result.created)
}

fn add_row(doc: &SignatureDocument, index: usize) -> (SignatureDocument, String) {
    let (doc, id) = apply(doc, Mutation::InsertRow { index });
    (doc, id.unwrap())
}

fn add_column(doc: &SignatureDocument, row_id: &str, width: f64) -> (SignatureDocument, String) {
    let (doc, id) = apply(
        doc,
        Mutation::InsertColumn {
            row_id: row_id.to_string(),
            index: usize::MAX,
            width_percent: width,
        },
    );
    (doc, id.unwrap())
}

fn add_text(doc: &SignatureDocument, column_id: &str, text: &str) -> (SignatureDocument, String) {
    let (doc, id) = apply(
        doc,
        Mutation::InsertElement {
            column_id: column_id.to_string(),
            index: usize::MAX,
            kind: ElementKind::Text,
            content: text.to_string(),
        },
    );
    (doc, id.unwrap())
}

fn element_texts(doc: &SignatureDocument, column_id: &str) -> Vec<String> {
    doc.find_column(column_id)
        .unwrap()
        .elements()
        .iter()
        .map(|el| el.content().unwrap_or_default().to_string())
        .collect()
}

#[test]
fn test_insert_element_index_is_clamped() {
    let doc = SignatureDocument::new("clamp");
    let (doc, row) = add_row(&doc, 0);
    let (doc, column) = add_column(&doc, &row, 100.0);
    let (doc, _) = add_text(&doc, &column, "first");
    let (doc, _) = add_text(&doc, &column, "second");

    let (doc, created) = apply(
        &doc,
        Mutation::InsertElement {
            column_id: column.clone(),
            index: 5,
            kind: ElementKind::Text,
            content: "third".to_string(),
        },
    );

    let column_ref = doc.find_column(&column).unwrap();
    assert_eq!(column_ref.elements().len(), 3);
    assert_eq!(column_ref.elements()[2].id(), created.unwrap());
    assert_eq!(element_texts(&doc, &column), vec!["first", "second", "third"]);
}

#[test]
fn test_deleting_selected_column_clears_selection() {
    let doc = SignatureDocument::new("select");
    let (doc, row) = add_row(&doc, 0);
    let (doc, column) = add_column(&doc, &row, 50.0);
    let (doc, _) = apply(
        &doc,
        Mutation::SetSelection {
            node_id: column.clone(),
            kind: NodeKind::Column,
        },
    );
    assert_eq!(doc.selection().id(), Some(column.as_str()));

    let (doc, _) = apply(&doc, Mutation::DeleteColumn { column_id: column });

    assert!(doc.selection().is_none());
}

#[test]
fn test_id_of_wrong_kind_is_not_found() {
    let doc = SignatureDocument::new("kinds");
    let (doc, row) = add_row(&doc, 0);

    let err = doc
        .apply(&Mutation::DeleteColumn {
            column_id: row.clone(),
        })
        .unwrap_err();
    assert_eq!(err, MutationError::NotFound(row.clone()));

    let err = doc
        .apply(&Mutation::SetSelection {
            node_id: row.clone(),
            kind: NodeKind::Element,
        })
        .unwrap_err();
    assert_eq!(err, MutationError::NotFound(row));
}

#[test]
fn test_move_row_clamps_to_end() {
    let doc = SignatureDocument::new("rows");
    let (doc, first) = add_row(&doc, 0);
    let (doc, second) = add_row(&doc, 1);
    let (doc, third) = add_row(&doc, 2);

    let (doc, _) = apply(
        &doc,
        Mutation::MoveRow {
            row_id: first.clone(),
            index: 99,
        },
    );

    let order: Vec<&str> = doc.rows().iter().map(|r| r.id()).collect();
    assert_eq!(order, vec![second.as_str(), third.as_str(), first.as_str()]);
}

#[test]
fn test_insert_row_and_column_clamp() {
    let doc = SignatureDocument::new("insert");
    let (doc, a) = add_row(&doc, 0);
    let (doc, b) = add_row(&doc, 40);
    let order: Vec<&str> = doc.rows().iter().map(|r| r.id()).collect();
    assert_eq!(order, vec![a.as_str(), b.as_str()]);

    let (doc, left) = add_column(&doc, &a, 30.0);
    let (doc, right) = apply(
        &doc,
        Mutation::InsertColumn {
            row_id: a.clone(),
            index: 7,
            width_percent: 30.0,
        },
    );
    let row = doc.find_row(&a).unwrap();
    assert_eq!(row.columns()[0].id(), left);
    assert_eq!(row.columns()[1].id(), right.unwrap());
}

#[test]
fn test_move_element_between_columns() {
    let doc = SignatureDocument::new("move");
    let (doc, row) = add_row(&doc, 0);
    let (doc, left) = add_column(&doc, &row, 50.0);
    let (doc, right) = add_column(&doc, &row, 50.0);
    let (doc, a) = add_text(&doc, &left, "a");
    let (doc, _) = add_text(&doc, &left, "b");
    let (doc, _) = add_text(&doc, &right, "c");

    let (doc, _) = apply(
        &doc,
        Mutation::MoveElement {
            element_id: a,
            column_id: right.clone(),
            index: 1,
        },
    );

    assert_eq!(element_texts(&doc, &left), vec!["b"]);
    assert_eq!(element_texts(&doc, &right), vec!["c", "a"]);
}

#[test]
fn test_move_element_within_column() {
    let doc = SignatureDocument::new("reorder");
    let (doc, row) = add_row(&doc, 0);
    let (doc, column) = add_column(&doc, &row, 100.0);
    let (doc, a) = add_text(&doc, &column, "a");
    let (doc, _) = add_text(&doc, &column, "b");
    let (doc, _) = add_text(&doc, &column, "c");

    let (doc, _) = apply(
        &doc,
        Mutation::MoveElement {
            element_id: a,
            column_id: column.clone(),
            index: 100,
        },
    );

    assert_eq!(element_texts(&doc, &column), vec!["b", "c", "a"]);
}

#[test]
fn test_move_element_to_missing_column_leaves_document_intact() {
    let doc = SignatureDocument::new("move-missing");
    let (doc, row) = add_row(&doc, 0);
    let (doc, column) = add_column(&doc, &row, 100.0);
    let (doc, a) = add_text(&doc, &column, "a");

    let err = doc
        .apply(&Mutation::MoveElement {
            element_id: a,
            column_id: "missing".to_string(),
            index: 0,
        })
        .unwrap_err();

    assert_eq!(err, MutationError::NotFound("missing".to_string()));
    assert_eq!(element_texts(&doc, &column), vec!["a"]);
}

#[test]
fn test_style_updates_merge() {
    let doc = SignatureDocument::new("style");
    let (doc, row) = add_row(&doc, 0);
    let (doc, column) = add_column(&doc, &row, 100.0);
    let (doc, el) = add_text(&doc, &column, "Name");

    let (doc, _) = apply(
        &doc,
        Mutation::UpdateElementStyle {
            element_id: el.clone(),
            style: Style {
                color: Some("#123456".to_string()),
                ..Default::default()
            },
        },
    );
    let (doc, _) = apply(
        &doc,
        Mutation::UpdateElementStyle {
            element_id: el.clone(),
            style: Style {
                font_weight: Some(FontWeight::Bold),
                ..Default::default()
            },
        },
    );

    let style = doc.find_element(&el).unwrap().style();
    assert_eq!(style.color.as_deref(), Some("#123456"));
    assert_eq!(style.font_weight, Some(FontWeight::Bold));

    let (doc, _) = apply(
        &doc,
        Mutation::UpdateRowStyle {
            row_id: row.clone(),
            style: Style {
                padding: Some(6),
                ..Default::default()
            },
        },
    );
    let (doc, _) = apply(
        &doc,
        Mutation::UpdateColumnStyle {
            column_id: column.clone(),
            style: Style {
                background_color: Some("#eee".to_string()),
                ..Default::default()
            },
        },
    );
    assert_eq!(doc.find_row(&row).unwrap().style().padding, Some(6));
    assert_eq!(
        doc.find_column(&column).unwrap().style().background_color.as_deref(),
        Some("#eee")
    );
}

#[test]
fn test_global_styles_merge() {
    let doc = SignatureDocument::new("globals");
    let (doc, _) = apply(
        &doc,
        Mutation::UpdateGlobalStyles {
            styles: GlobalStyles {
                theme_color: Some("#ff0000".to_string()),
                ..Default::default()
            },
        },
    );
    let (doc, _) = apply(
        &doc,
        Mutation::UpdateGlobalStyles {
            styles: GlobalStyles {
                font_size: Some(12),
                ..Default::default()
            },
        },
    );

    assert_eq!(doc.global_styles().theme_color.as_deref(), Some("#ff0000"));
    assert_eq!(doc.global_styles().font_size, Some(12));
}

#[test]
fn test_content_updates_per_variant() {
    let doc = SignatureDocument::new("content");
    let (doc, row) = add_row(&doc, 0);
    let (doc, column) = add_column(&doc, &row, 100.0);
    let (doc, social) = apply(
        &doc,
        Mutation::InsertElement {
            column_id: column.clone(),
            index: 0,
            kind: ElementKind::Social,
            content: "ignored".to_string(),
        },
    );
    let social = social.unwrap();

    // Content is ignored for social elements
    let (doc, _) = apply(
        &doc,
        Mutation::UpdateElementContent {
            element_id: social.clone(),
            content: "still ignored".to_string(),
        },
    );
    assert_eq!(
        doc.find_element(&social).unwrap().body(),
        &ElementBody::Social { links: vec![] }
    );

    let links = vec![SocialLink::new("LinkedIn", "https://linkedin.com/in/jane")];
    let (doc, _) = apply(
        &doc,
        Mutation::UpdateSocialLinks {
            element_id: social.clone(),
            links: links.clone(),
        },
    );
    assert_eq!(
        doc.find_element(&social).unwrap().body(),
        &ElementBody::Social { links }
    );

    let err = doc
        .apply(&Mutation::UpdateImageAlt {
            element_id: social.clone(),
            alt: "logo".to_string(),
        })
        .unwrap_err();
    assert!(matches!(err, MutationError::UnsupportedForKind { .. }));
}

#[test]
fn test_url_is_trimmed_and_cleared() {
    let doc = SignatureDocument::new("url");
    let (doc, row) = add_row(&doc, 0);
    let (doc, column) = add_column(&doc, &row, 100.0);
    let (doc, el) = add_text(&doc, &column, "site");

    let (doc, _) = apply(
        &doc,
        Mutation::UpdateElementUrl {
            element_id: el.clone(),
            url: Some("  https://example.com  ".to_string()),
        },
    );
    assert_eq!(doc.find_element(&el).unwrap().url(), Some("https://example.com"));

    let (doc, _) = apply(
        &doc,
        Mutation::UpdateElementUrl {
            element_id: el.clone(),
            url: Some("   ".to_string()),
        },
    );
    assert_eq!(doc.find_element(&el).unwrap().url(), None);
}

#[test]
fn test_duplicate_element_gets_fresh_id() {
    let doc = SignatureDocument::new("dup");
    let (doc, row) = add_row(&doc, 0);
    let (doc, column) = add_column(&doc, &row, 100.0);
    let (doc, el) = add_text(&doc, &column, "copy me");

    let (doc, copy) = apply(
        &doc,
        Mutation::DuplicateElement {
            element_id: el.clone(),
        },
    );
    let copy = copy.unwrap();

    assert_ne!(copy, el);
    assert_eq!(element_texts(&doc, &column), vec!["copy me", "copy me"]);
    assert_eq!(doc.find_column(&column).unwrap().elements()[1].id(), copy);
}

#[test]
fn test_resize_and_vertical_align() {
    let doc = SignatureDocument::new("resize");
    let (doc, row) = add_row(&doc, 0);
    let (doc, column) = add_column(&doc, &row, 30.0);

    let (doc, _) = apply(
        &doc,
        Mutation::ResizeColumn {
            column_id: column.clone(),
            width_percent: 45.5,
        },
    );
    let (doc, _) = apply(
        &doc,
        Mutation::SetVerticalAlign {
            column_id: column.clone(),
            align: VerticalAlign::Middle,
        },
    );

    let column_ref = doc.find_column(&column).unwrap();
    assert_eq!(column_ref.width_percent(), 45.5);
    assert_eq!(column_ref.vertical_align(), VerticalAlign::Middle);

    let err = doc
        .apply(&Mutation::ResizeColumn {
            column_id: column,
            width_percent: 0.0,
        })
        .unwrap_err();
    assert_eq!(err, MutationError::InvalidWidth(0.0));
}

#[test]
fn test_untouched_rows_are_shared_between_versions() {
    let doc = SignatureDocument::new("sharing");
    let (doc, first) = add_row(&doc, 0);
    let (doc, second) = add_row(&doc, 1);
    let (doc, column) = add_column(&doc, &second, 100.0);
    let (before, _) = add_text(&doc, &column, "x");

    let (after, _) = apply(
        &before,
        Mutation::UpdateRowStyle {
            row_id: second.clone(),
            style: Style {
                padding: Some(2),
                ..Default::default()
            },
        },
    );

    assert_eq!(before.rows()[0].id(), first);
    assert!(Arc::ptr_eq(&before.rows()[0], &after.rows()[0]));
    assert!(!Arc::ptr_eq(&before.rows()[1], &after.rows()[1]));
    // the edited row still shares its untouched column
    assert!(Arc::ptr_eq(
        &before.rows()[1].columns()[0],
        &after.rows()[1].columns()[0]
    ));
}

#[test]
fn test_json_round_trip_keeps_ids_fresh() {
    let doc = SignatureDocument::new("persist");
    let (doc, row) = add_row(&doc, 0);
    let (doc, column) = add_column(&doc, &row, 100.0);
    let (doc, _) = add_text(&doc, &column, "Jane <Doe>");
    let (doc, _) = apply(
        &doc,
        Mutation::SetSelection {
            node_id: row.clone(),
            kind: NodeKind::Row,
        },
    );

    let json = doc.to_json().unwrap();
    let loaded = SignatureDocument::from_json(&json).unwrap();
    assert_eq!(loaded, doc);

    let (loaded, new_row) = add_row(&loaded, 0);
    assert_eq!(loaded.node_count(), 4);
    assert_ne!(new_row, row);
}
