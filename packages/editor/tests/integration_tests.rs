//! End-to-end tests: JSON mutations in, preview HTML out

use signet_editor::{EditorError, Mutation, Pipeline, SignatureDocument};
use std::cell::RefCell;
use std::rc::Rc;

fn build_card(pipeline: &mut Pipeline) -> anyhow::Result<String> {
    let row_id = pipeline
        .apply_json(r#"{"type": "insertRow", "index": 0}"#)?
        .created
        .ok_or_else(|| anyhow::anyhow!("no row created"))?;

    let column_id = pipeline
        .apply_json(&format!(
            r#"{{"type": "insertColumn", "rowId": "{row_id}", "index": 0, "widthPercent": 100}}"#
        ))?
        .created
        .ok_or_else(|| anyhow::anyhow!("no column created"))?;

    let element_id = pipeline
        .apply_json(&format!(
            r#"{{"type": "insertElement", "columnId": "{column_id}", "index": 0, "kind": "text", "content": "Jane Doe"}}"#
        ))?
        .created
        .ok_or_else(|| anyhow::anyhow!("no element created"))?;

    Ok(element_id)
}

#[test]
fn test_json_mutations_drive_preview() -> anyhow::Result<()> {
    let previews = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&previews);

    let mut pipeline = Pipeline::new(SignatureDocument::new("integration"));
    pipeline.set_sink(move |version: u64, html: &str| {
        sink.borrow_mut().push((version, html.to_string()));
    });

    let element_id = build_card(&mut pipeline)?;
    let result = pipeline.apply_json(&format!(
        r#"{{"type": "updateElementContent", "elementId": "{element_id}", "content": "Jane & John"}}"#
    ))?;

    assert_eq!(result.version, 4);
    assert!(result.html.contains("Jane &amp; John"));

    let previews = previews.borrow();
    let versions: Vec<u64> = previews.iter().map(|(v, _)| *v).collect();
    assert_eq!(versions, vec![1, 2, 3, 4]);
    assert!(previews[2].1.contains("Jane Doe"));
    Ok(())
}

#[test]
fn test_undo_redo_republish() -> anyhow::Result<()> {
    let mut pipeline = Pipeline::new(SignatureDocument::new("integration"));
    let element_id = build_card(&mut pipeline)?;

    pipeline.apply_mutation(&Mutation::UpdateElementContent {
        element_id,
        content: "Changed".to_string(),
    })?;

    let undone = pipeline.undo().expect("history has entries");
    assert!(undone.html.contains("Jane Doe"));
    assert!(undone.html_changed);
    assert_eq!(undone.version, 5);

    let redone = pipeline.redo().expect("redo available");
    assert!(redone.html.contains("Changed"));
    assert_eq!(redone.version, 6);
    Ok(())
}

#[test]
fn test_selection_only_change_keeps_html() -> anyhow::Result<()> {
    let mut pipeline = Pipeline::new(SignatureDocument::new("integration"));
    let element_id = build_card(&mut pipeline)?;

    let result = pipeline.apply_json(&format!(
        r#"{{"type": "setSelection", "nodeId": "{element_id}", "kind": "element"}}"#
    ))?;

    assert!(!result.html_changed);
    Ok(())
}

#[test]
fn test_batched_gesture_is_one_undo_step() -> anyhow::Result<()> {
    let mut pipeline = Pipeline::new(SignatureDocument::new("integration"));
    build_card(&mut pipeline)?;
    let column_id = pipeline.document().rows()[0].columns()[0].id().to_string();

    pipeline.begin_batch("Resize column");
    for width in [90.0, 80.0, 70.0] {
        pipeline.apply_mutation(&Mutation::ResizeColumn {
            column_id: column_id.clone(),
            width_percent: width,
        })?;
    }
    pipeline.end_batch();

    assert_eq!(pipeline.history().undo_description(), Some("Resize column"));
    pipeline.undo();
    assert_eq!(
        pipeline.document().find_column(&column_id).map(|c| c.width_percent()),
        Some(100.0)
    );
    Ok(())
}

#[test]
fn test_bad_payloads_are_reported() {
    let mut pipeline = Pipeline::new(SignatureDocument::new("integration"));

    let err = pipeline.apply_json(r#"{"type": "explode"}"#).unwrap_err();
    assert!(matches!(err, EditorError::Payload(_)));

    let err = pipeline
        .apply_json(r#"{"type": "deleteRow", "rowId": "missing"}"#)
        .unwrap_err();
    assert!(matches!(err, EditorError::Mutation(_)));
    assert_eq!(pipeline.version(), 0);
}

#[test]
fn test_round_trip_through_persistence() -> anyhow::Result<()> {
    let mut pipeline = Pipeline::new(SignatureDocument::new("integration"));
    build_card(&mut pipeline)?;
    let json = pipeline.document().to_json()?;

    let mut reloaded = Pipeline::from_json(&json)?;
    assert_eq!(reloaded.document(), pipeline.document());
    assert!(!reloaded.history().can_undo());
    assert_eq!(reloaded.full_render(), pipeline.full_render());
    Ok(())
}
