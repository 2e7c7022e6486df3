use crate::css::InlineStyle;
use crate::layout::normalize_widths;
use crate::links::{validate_image_src, validate_link, Link};
use signet_document::{
    Column, ConcreteStyle, Element, ElementBody, Row, SignatureDocument, SocialLink,
    StyleResolver, TextDecoration,
};
use tracing::{debug, instrument, warn};

/// Options for HTML rendering
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Pretty print HTML (one tag per line)
    pub pretty: bool,
    /// Indentation string used when pretty printing
    pub indent: String,
    /// Width of the outer table in pixels
    pub table_width: u32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            pretty: false,
            indent: "  ".to_string(),
            table_width: 600,
        }
    }
}

const TABLE_ATTRS: &str = r#"role="presentation" cellpadding="0" cellspacing="0" border="0""#;

struct Context<'a> {
    options: &'a RenderOptions,
    resolver: StyleResolver<'a>,
    depth: usize,
    buffer: String,
}

impl<'a> Context<'a> {
    fn new(options: &'a RenderOptions, resolver: StyleResolver<'a>) -> Self {
        Self {
            options,
            resolver,
            depth: 0,
            buffer: String::new(),
        }
    }

    fn add(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    fn add_line(&mut self, text: &str) {
        if self.options.pretty {
            self.add_indent();
        }
        self.add(text);
        if self.options.pretty {
            self.add("\n");
        }
    }

    fn add_indent(&mut self) {
        for _ in 0..self.depth {
            self.buffer.push_str(&self.options.indent);
        }
    }

    fn open(&mut self, tag: &str) {
        self.add_line(tag);
        self.depth += 1;
    }

    fn close(&mut self, tag: &str) {
        if self.depth > 0 {
            self.depth -= 1;
        }
        self.add_line(tag);
    }

    fn get_output(self) -> String {
        self.buffer
    }
}

/// Render a signature document to a self-contained HTML fragment
pub fn render(document: &SignatureDocument) -> String {
    render_with_options(document, &RenderOptions::default())
}

/// Render with explicit options. Never fails: bad links and image sources
/// are dropped (and logged) instead of aborting the render.
#[instrument(skip_all, fields(document = document.name(), rows = document.rows().len()))]
pub fn render_with_options(document: &SignatureDocument, options: &RenderOptions) -> String {
    let resolver = StyleResolver::new(document.global_styles());
    let mut ctx = Context::new(options, resolver);

    let root = resolver.root();
    let mut style = InlineStyle::new();
    style
        .push("table-layout", "fixed")
        .push("border-collapse", "collapse")
        .push("width", format!("{}px", options.table_width))
        .typography(&root)
        .box_model(&root);

    ctx.open(&format!(
        r#"<table {TABLE_ATTRS} width="{}" style="{}">"#,
        options.table_width,
        style.to_attribute()
    ));
    for row in document.rows() {
        render_row(row, &mut ctx);
    }
    ctx.close("</table>");

    let html = ctx.get_output();
    debug!(bytes = html.len(), "Rendered signature");
    html
}

fn render_row(row: &Row, ctx: &mut Context) {
    let resolved = ctx.resolver.row(row);
    let mut style = InlineStyle::new();
    style.box_model(&resolved);

    ctx.open("<tr>");
    ctx.open(&cell_tag(&style));

    if !row.columns().is_empty() {
        let raw: Vec<f64> = row.columns().iter().map(|c| c.width_percent()).collect();
        let widths = normalize_widths(&raw);

        ctx.open(&format!(
            r#"<table {TABLE_ATTRS} width="100%" style="table-layout:fixed;border-collapse:collapse;width:100%">"#
        ));
        ctx.open("<tr>");
        for (column, width) in row.columns().iter().zip(widths) {
            render_column(column, row, width, ctx);
        }
        ctx.close("</tr>");
        ctx.close("</table>");
    }

    ctx.close("</td>");
    ctx.close("</tr>");
}

fn cell_tag(style: &InlineStyle) -> String {
    if style.is_empty() {
        "<td>".to_string()
    } else {
        format!(r#"<td style="{}">"#, style.to_attribute())
    }
}

fn render_column(column: &Column, row: &Row, width: u32, ctx: &mut Context) {
    let resolved = ctx.resolver.column(column, row);
    let valign = column.vertical_align().as_css();

    let mut style = InlineStyle::new();
    style
        .push("width", format!("{width}%"))
        .push("vertical-align", valign)
        .box_model(&resolved);

    ctx.open(&format!(
        r#"<td width="{width}%" valign="{valign}" style="{}">"#,
        style.to_attribute()
    ));
    for element in column.elements() {
        render_element(element, column, row, ctx);
    }
    ctx.close("</td>");
}

fn render_element(element: &Element, column: &Column, row: &Row, ctx: &mut Context) {
    let resolved = ctx.resolver.element(element, column, row);
    let link = element.url().and_then(|raw| checked_link(element.id(), raw));

    match element.body() {
        ElementBody::Text { text } => render_text(text, &resolved, link.as_ref(), ctx),
        ElementBody::Button { label } => render_button(label, &resolved, link.as_ref(), ctx),
        ElementBody::Image { src, alt } => {
            render_image(element.id(), src, alt, &resolved, link.as_ref(), ctx)
        }
        ElementBody::Social { links } => render_social(element.id(), links, &resolved, ctx),
    }
}

fn checked_link(element_id: &str, raw: &str) -> Option<Link> {
    match validate_link(raw) {
        Ok(link) => Some(link),
        Err(err) => {
            warn!(element = element_id, error = %err, "Rendering element without its link");
            None
        }
    }
}

fn render_text(text: &str, resolved: &ConcreteStyle, link: Option<&Link>, ctx: &mut Context) {
    let mut style = InlineStyle::new();
    style.typography(resolved);
    if resolved.text_decoration != TextDecoration::None {
        style.push("text-decoration", resolved.text_decoration.as_css());
    }
    style.box_model(resolved).dimensions(resolved);

    let content = escape_text(text);
    let inner = match link {
        Some(link) => format!(
            "{}{content}</a>",
            anchor_open(link, &anchor_style(resolved))
        ),
        None => content,
    };

    ctx.add_line(&format!(
        r#"<div style="{}">{inner}</div>"#,
        style.to_attribute()
    ));
}

fn render_button(label: &str, resolved: &ConcreteStyle, link: Option<&Link>, ctx: &mut Context) {
    let mut container = InlineStyle::new();
    container.push("text-align", resolved.text_align.as_css());

    let mut face = InlineStyle::new();
    face.push("display", "inline-block")
        .typography(resolved)
        .push("text-decoration", resolved.text_decoration.as_css())
        .box_model(resolved)
        .dimensions(resolved);

    let button = format!(
        r#"<span style="{}">{}</span>"#,
        face.to_attribute(),
        escape_text(label)
    );
    let inner = match link {
        Some(link) => format!("{}{button}</a>", anchor_open(link, "text-decoration:none")),
        None => button,
    };

    ctx.add_line(&format!(
        r#"<div style="{}">{inner}</div>"#,
        container.to_attribute()
    ));
}

fn render_image(
    element_id: &str,
    src: &str,
    alt: &str,
    resolved: &ConcreteStyle,
    link: Option<&Link>,
    ctx: &mut Context,
) {
    let src = match validate_image_src(src) {
        Ok(src) => src,
        Err(err) => {
            warn!(element = element_id, error = %err, "Skipping image with unusable source");
            return;
        }
    };

    let (width, height) = image_size(resolved);

    let mut style = InlineStyle::new();
    style.push("display", "inline-block");
    if resolved.border.top.is_none() && resolved.border.is_uniform() {
        style.push("border", "0");
    }
    style.box_model(resolved).dimensions(resolved);

    let img = format!(
        r#"<img src="{}" alt="{}" width="{width}" height="{height}" style="{}" />"#,
        escape_html(&src),
        escape_html(alt),
        style.to_attribute()
    );
    let inner = match link {
        Some(link) => format!("{}{img}</a>", anchor_open(link, "text-decoration:none")),
        None => img,
    };

    ctx.add_line(&format!(
        r#"<div style="text-align:{}">{inner}</div>"#,
        resolved.text_align.as_css()
    ));
}

fn image_size(resolved: &ConcreteStyle) -> (u32, u32) {
    use signet_document::resolver::fallback;

    let width = resolved.width.px().unwrap_or(fallback::IMAGE_SIZE);
    let height = resolved.height.px().unwrap_or(width);
    (width, height)
}

fn render_social(
    element_id: &str,
    links: &[SocialLink],
    resolved: &ConcreteStyle,
    ctx: &mut Context,
) {
    if links.is_empty() {
        debug!(element = element_id, "Social element has no links");
        return;
    }

    let mut container = InlineStyle::new();
    container.typography(resolved).box_model(resolved);

    let (width, height) = image_size(resolved);
    let items: Vec<String> = links
        .iter()
        .map(|entry| {
            let affordance = social_affordance(entry, width, height, resolved);
            match checked_link(element_id, &entry.url) {
                Some(link) => format!(
                    "{}{affordance}</a>",
                    anchor_open(&link, &anchor_style(resolved))
                ),
                None => affordance,
            }
        })
        .collect();

    ctx.add_line(&format!(
        r#"<div style="{}">{}</div>"#,
        container.to_attribute(),
        items.join("&nbsp;&nbsp;")
    ));
}

fn social_affordance(
    entry: &SocialLink,
    width: u32,
    height: u32,
    resolved: &ConcreteStyle,
) -> String {
    let icon = entry
        .icon_url
        .as_deref()
        .and_then(|raw| validate_image_src(raw).ok());

    match icon {
        Some(src) => format!(
            r#"<img src="{}" alt="{}" width="{width}" height="{height}" style="display:inline-block;border:0;width:{width}px;height:{height}px" />"#,
            escape_html(&src),
            escape_html(&entry.network),
        ),
        None => {
            let mut style = InlineStyle::new();
            style.push_user("color", &resolved.color);
            format!(
                r#"<span style="{}">{}</span>"#,
                style.to_attribute(),
                escape_html(&entry.network)
            )
        }
    }
}

fn anchor_style(resolved: &ConcreteStyle) -> String {
    let mut style = InlineStyle::new();
    style
        .push_user("color", &resolved.color)
        .push("text-decoration", resolved.text_decoration.as_css());
    style.to_attribute()
}

fn anchor_open(link: &Link, style: &str) -> String {
    let target = if link.external {
        r#" target="_blank" rel="noopener noreferrer""#
    } else {
        ""
    };
    format!(
        r#"<a href="{}"{target} style="{style}">"#,
        escape_html(&link.href)
    )
}

/// Escape user text and keep its line breaks
fn escape_text(text: &str) -> String {
    escape_html(&text.replace("\r\n", "\n")).replace('\n', "<br />")
}

/// Escape the five HTML-significant characters
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
