pub mod export;
pub mod init;
pub mod render;
pub mod verify;

pub use export::{export, ExportArgs};
pub use init::{init, InitArgs};
pub use render::{render, RenderArgs};
pub use verify::{verify, VerifyArgs};

use anyhow::{Context, Result};
use signet_document::SignatureDocument;
use std::fs;
use std::path::{Path, PathBuf};

/// Read and validate a saved signature document
pub(crate) fn load_document(path: &Path) -> Result<SignatureDocument> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Cannot read document {}", path.display()))?;
    SignatureDocument::from_json(&json)
        .with_context(|| format!("Invalid document {}", path.display()))
}

/// `{out_dir}/{document stem}.html`, unless an explicit path was given
pub(crate) fn output_path(
    document: &Path,
    explicit: Option<&str>,
    out_dir: PathBuf,
    cwd: &Path,
) -> PathBuf {
    match explicit {
        Some(path) => cwd.join(path),
        None => {
            let stem = document
                .file_stem()
                .map(|s| s.to_string_lossy().to_string())
                .unwrap_or_else(|| "signature".to_string());
            out_dir.join(format!("{stem}.html"))
        }
    }
}

pub(crate) fn write_output(path: &Path, html: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, html).with_context(|| format!("Cannot write {}", path.display()))
}
