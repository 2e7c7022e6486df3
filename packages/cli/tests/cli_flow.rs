//! Drives the `signet` binary through init → render → export → verify

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

fn signet(cwd: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_signet"))
        .args(args)
        .current_dir(cwd)
        .env("RUST_LOG", "off")
        .output()
        .expect("failed to run signet")
}

#[test]
fn test_init_render_export_verify() {
    let dir = tempfile::tempdir().unwrap();
    let cwd = dir.path();

    let out = signet(cwd, &["init", "--name", "jane", "--author", "Jane Doe"]);
    assert!(out.status.success());
    assert!(cwd.join("signet.config.json").exists());
    assert!(cwd.join("jane.json").exists());

    let out = signet(cwd, &["render", "jane.json"]);
    assert!(out.status.success());
    let preview = fs::read_to_string(cwd.join("dist/jane.html")).unwrap();
    assert!(preview.contains("Acme &amp; Co"));
    assert!(!preview.contains("data-signet-stamp"));

    let out = signet(cwd, &["export", "jane.json", "--out", "signed.html"]);
    assert!(out.status.success());
    let signed = fs::read_to_string(cwd.join("signed.html")).unwrap();
    assert!(signed.starts_with(&preview));
    assert!(signed.contains("Signed by Jane Doe on"));

    let out = signet(cwd, &["verify", "signed.html"]);
    assert!(out.status.success());

    fs::write(cwd.join("signed.html"), signed.replace("Jane Doe", "Eve")).unwrap();
    let out = signet(cwd, &["verify", "signed.html"]);
    assert!(!out.status.success());
}

#[test]
fn test_export_without_stamp_to_stdout() {
    let dir = tempfile::tempdir().unwrap();
    let cwd = dir.path();
    signet(cwd, &["init"]);

    let out = signet(cwd, &["export", "signature.json", "--no-stamp", "--stdout"]);
    assert!(out.status.success());

    let html = String::from_utf8(out.stdout).unwrap();
    assert!(html.starts_with("<table"));
    assert!(!html.contains("data-signet-stamp"));
}

#[test]
fn test_missing_document_fails() {
    let dir = tempfile::tempdir().unwrap();

    let out = signet(dir.path(), &["render", "nope.json"]);

    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("Cannot read document"));
}
