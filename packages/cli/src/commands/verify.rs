use anyhow::{anyhow, Context, Result};
use clap::Args;
use colored::Colorize;
use signet_stamp::{Stamper, Verification};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct VerifyArgs {
    /// Exported HTML file
    pub file: PathBuf,
}

/// Check an exported signature against its integrity stamp
pub fn verify(args: VerifyArgs, cwd: &Path) -> Result<()> {
    let path = cwd.join(&args.file);
    let html = fs::read_to_string(&path)
        .with_context(|| format!("Cannot read {}", path.display()))?;
    // editors tend to add a final newline on save
    let html = html.strip_suffix('\n').unwrap_or(&html);

    match Stamper::new().verify(html)? {
        Verification::Valid { hash } => {
            println!("{} {}", "✅ Stamp verified".green().bold(), args.file.display());
            println!("    sha256 {}", hash.dimmed());
            Ok(())
        }
        Verification::Tampered { recorded, actual } => Err(anyhow!(
            "content changed after stamping (recorded {recorded}, actual {actual})"
        )),
        Verification::Unstamped => Err(anyhow!("{} has no integrity stamp", args.file.display())),
    }
}
