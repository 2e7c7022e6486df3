//! Stamping rendered signatures the way the export path does

use chrono::{TimeZone, Utc};
use signet_compiler_html::render;
use signet_document::{ElementKind, Mutation, SignatureDocument};
use signet_stamp::{sha256_hex, Stamper, Verification};

fn rendered_signature(text: &str) -> String {
    let doc = SignatureDocument::new("export");
    let r = doc.apply(&Mutation::InsertRow { index: 0 }).unwrap();
    let row_id = r.created.unwrap();
    let r = r
        .document
        .apply(&Mutation::InsertColumn {
            row_id,
            index: 0,
            width_percent: 100.0,
        })
        .unwrap();
    let column_id = r.created.unwrap();
    let doc = r
        .document
        .apply(&Mutation::InsertElement {
            column_id,
            index: 0,
            kind: ElementKind::Text,
            content: text.to_string(),
        })
        .unwrap()
        .document;
    render(&doc)
}

#[test]
fn test_hash_covers_unstamped_render_only() {
    let html = rendered_signature("Jane Doe");
    let stamp = Stamper::new().stamp(&html, "Jane Doe").unwrap();

    assert_eq!(stamp.hash, sha256_hex(html.as_bytes()));
    assert_ne!(stamp.hash, sha256_hex(stamp.augmented_html.as_bytes()));
    assert!(stamp.augmented_html.starts_with(&html));
}

#[test]
fn test_stamps_at_different_times_share_hash() {
    let html = rendered_signature("Jane Doe");
    let stamper = Stamper::new();
    let morning = Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap();
    let evening = Utc.with_ymd_and_hms(2024, 5, 1, 20, 0, 0).unwrap();

    let a = stamper.stamp_at(&html, "Jane Doe", morning).unwrap();
    let b = stamper.stamp_at(&html, "Jane Doe", evening).unwrap();

    assert_eq!(a.hash, b.hash);
    assert_ne!(a.timestamp, b.timestamp);
    assert_ne!(a.message, b.message);
    assert_ne!(a.augmented_html, b.augmented_html);
}

#[test]
fn test_edited_signature_fails_verification() {
    let stamper = Stamper::new();
    let stamp = stamper
        .stamp(&rendered_signature("Jane Doe"), "Jane Doe")
        .unwrap();

    let edited = stamp.augmented_html.replacen("Jane Doe", "Eve", 1);

    match stamper.verify(&edited).unwrap() {
        Verification::Tampered { recorded, actual } => {
            assert_eq!(recorded, stamp.hash);
            assert_ne!(actual, stamp.hash);
        }
        other => panic!("expected tampering to be detected, got {other:?}"),
    }
}
