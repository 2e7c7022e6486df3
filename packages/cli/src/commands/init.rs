use crate::config::{Config, DEFAULT_CONFIG_NAME};
use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use signet_document::{
    ElementKind, FontWeight, GlobalStyles, Mutation, SignatureDocument, SocialLink, Style,
};
use std::fs;
use std::path::Path;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Name of the example signature document
    #[arg(short, long, default_value = "signature")]
    pub name: String,

    /// Default author for integrity stamps
    #[arg(short, long)]
    pub author: Option<String>,

    /// Force overwrite existing config
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &Path) -> Result<()> {
    let config_path = cwd.join(DEFAULT_CONFIG_NAME);

    // Check if config already exists
    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    println!("{}", "📝 Initializing Signet project...".bright_blue().bold());

    // Create example document
    let document_file = cwd.join(format!("{}.json", args.name));
    if !document_file.exists() || args.force {
        let document = example_document(&args.name)?;
        fs::write(&document_file, document.to_json_pretty()?)?;
        println!("  {} Created {}.json", "✓".green(), args.name);
    }

    // Create config
    let config = Config {
        author: args.author.clone(),
        ..Config::default()
    };

    // Write config file
    let config_json = serde_json::to_string_pretty(&config)?;
    fs::write(&config_path, config_json)?;

    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);
    println!();
    println!("{}", "✅ Project initialized!".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Edit {}.json", args.name);
    println!("  2. Run: signet export {}.json", args.name);
    println!("  3. Paste {}/{}.html into your mail client", config.out_dir, args.name);

    Ok(())
}

/// A two-column starter card: name and contact details next to a call to action
pub fn example_document(name: &str) -> Result<SignatureDocument> {
    fn apply(doc: &mut SignatureDocument, mutation: Mutation) -> Result<Option<String>> {
        let result = doc.apply(&mutation)?;
        *doc = result.document;
        Ok(result.created)
    }

    fn created(id: Option<String>) -> Result<String> {
        id.ok_or_else(|| anyhow!("expected a new node"))
    }

    let mut doc = SignatureDocument::new(name);

    apply(
        &mut doc,
        Mutation::UpdateGlobalStyles {
            styles: GlobalStyles {
                font_family: Some("Helvetica, Arial, sans-serif".to_string()),
                theme_color: Some("#2563eb".to_string()),
                ..Default::default()
            },
        },
    )?;

    let row_id = created(apply(&mut doc, Mutation::InsertRow { index: 0 })?)?;
    let details = created(apply(
        &mut doc,
        Mutation::InsertColumn {
            row_id: row_id.clone(),
            index: 0,
            width_percent: 65.0,
        },
    )?)?;
    let actions = created(apply(
        &mut doc,
        Mutation::InsertColumn {
            row_id,
            index: 1,
            width_percent: 35.0,
        },
    )?)?;

    let full_name = created(apply(
        &mut doc,
        Mutation::InsertElement {
            column_id: details.clone(),
            index: 0,
            kind: ElementKind::Text,
            content: "Jane Doe".to_string(),
        },
    )?)?;
    apply(
        &mut doc,
        Mutation::UpdateElementStyle {
            element_id: full_name,
            style: Style {
                font_size: Some(18),
                font_weight: Some(FontWeight::Bold),
                ..Default::default()
            },
        },
    )?;

    apply(
        &mut doc,
        Mutation::InsertElement {
            column_id: details.clone(),
            index: 1,
            kind: ElementKind::Text,
            content: "Head of Engineering\nAcme & Co".to_string(),
        },
    )?;

    let email = created(apply(
        &mut doc,
        Mutation::InsertElement {
            column_id: details.clone(),
            index: 2,
            kind: ElementKind::Text,
            content: "jane@example.com".to_string(),
        },
    )?)?;
    apply(
        &mut doc,
        Mutation::UpdateElementUrl {
            element_id: email,
            url: Some("mailto:jane@example.com".to_string()),
        },
    )?;

    let social = created(apply(
        &mut doc,
        Mutation::InsertElement {
            column_id: details,
            index: 3,
            kind: ElementKind::Social,
            content: String::new(),
        },
    )?)?;
    apply(
        &mut doc,
        Mutation::UpdateSocialLinks {
            element_id: social,
            links: vec![
                SocialLink::new("LinkedIn", "https://www.linkedin.com/in/janedoe"),
                SocialLink::new("GitHub", "https://github.com/janedoe"),
            ],
        },
    )?;

    let button = created(apply(
        &mut doc,
        Mutation::InsertElement {
            column_id: actions,
            index: 0,
            kind: ElementKind::Button,
            content: "Book a call".to_string(),
        },
    )?)?;
    apply(
        &mut doc,
        Mutation::UpdateElementUrl {
            element_id: button,
            url: Some("https://example.com/meet".to_string()),
        },
    )?;

    Ok(doc)
}
