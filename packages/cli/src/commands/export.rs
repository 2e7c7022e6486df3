use super::{load_document, output_path, write_output};
use crate::config::Config;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use signet_compiler_html::render_with_options;
use signet_stamp::Stamper;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Signature document (JSON)
    pub document: PathBuf,

    /// Author named in the stamp (overrides config)
    #[arg(short, long)]
    pub author: Option<String>,

    /// Skip the integrity stamp
    #[arg(long)]
    pub no_stamp: bool,

    /// Output to stdout instead of a file
    #[arg(long)]
    pub stdout: bool,

    /// Output file (overrides config outDir)
    #[arg(short, long)]
    pub out: Option<String>,
}

/// Render and stamp a signature for pasting into a mail client
pub fn export(args: ExportArgs, cwd: &Path) -> Result<()> {
    let config = Config::load(cwd)?;
    let document = load_document(&cwd.join(&args.document))?;
    let html = render_with_options(&document, &config.render_options());

    let stamp = if config.stamp && !args.no_stamp {
        let author = args
            .author
            .clone()
            .or_else(|| config.author.clone())
            .unwrap_or_default();
        let stamp = Stamper::new().stamp(&html, &author)?;
        info!(hash = %stamp.hash, "Signature stamped");
        Some(stamp)
    } else {
        None
    };

    let output = stamp
        .as_ref()
        .map(|s| s.augmented_html.as_str())
        .unwrap_or(html.as_str());

    if args.stdout {
        println!("{output}");
        return Ok(());
    }

    let path = output_path(
        &args.document,
        args.out.as_deref(),
        config.get_out_dir(cwd),
        cwd,
    );
    write_output(&path, output)?;

    println!("{}", "📤 Exported signature".bright_blue().bold());
    println!("  {} {}", "✓".green(), path.display());
    if let Some(stamp) = &stamp {
        println!("  {} {}", "✓".green(), stamp.message);
        println!("    sha256 {}", stamp.hash.dimmed());
    }
    Ok(())
}
