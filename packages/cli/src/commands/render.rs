use super::{load_document, output_path, write_output};
use crate::config::Config;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use signet_compiler_html::render_with_options;
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Signature document (JSON)
    pub document: PathBuf,

    /// Output to stdout instead of a file
    #[arg(long)]
    pub stdout: bool,

    /// Output file (overrides config outDir)
    #[arg(short, long)]
    pub out: Option<String>,

    /// Pretty print HTML (overrides config)
    #[arg(long)]
    pub pretty: bool,
}

/// Render the live-preview HTML (no stamp)
pub fn render(args: RenderArgs, cwd: &Path) -> Result<()> {
    let config = Config::load(cwd)?;
    let document_path = cwd.join(&args.document);
    let document = load_document(&document_path)?;

    let mut options = config.render_options();
    options.pretty |= args.pretty;
    let html = render_with_options(&document, &options);

    if args.stdout {
        println!("{html}");
        return Ok(());
    }

    let path = output_path(
        &args.document,
        args.out.as_deref(),
        config.get_out_dir(cwd),
        cwd,
    );
    write_output(&path, &html)?;

    println!(
        "  {} {} → {}",
        "✓".green(),
        args.document.display(),
        path.display()
    );
    Ok(())
}
