//! Inline `style` attribute builder.
//!
//! Email clients strip `<style>` blocks and class selectors, so every
//! resolved property ends up inline. Values that come from user input are
//! sanitized before they reach the attribute.

use signet_document::{
    Border, ConcreteStyle, Dimension, Edges, FontStyle, FontWeight, TextTransform,
};

/// Remove anything that could break out of a declaration or the attribute.
///
/// Values containing `&` are dropped whole: the browser decodes character
/// references in attribute values, so `&#59;` would come back as `;`.
pub fn sanitize_value(value: &str) -> String {
    if value.contains('&') {
        return String::new();
    }

    let cleaned: String = value
        .chars()
        .filter(|c| !matches!(c, ';' | '{' | '}' | '<' | '>' | '"' | '\\') && !c.is_control())
        .collect();

    let lowered = cleaned.to_ascii_lowercase();
    if lowered.contains("expression(") || lowered.contains("url(") || lowered.contains("javascript:")
    {
        return String::new();
    }

    cleaned.trim().to_string()
}

/// Ordered list of `property:value` declarations
#[derive(Debug, Default, Clone)]
pub struct InlineStyle {
    declarations: Vec<(&'static str, String)>,
}

impl InlineStyle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a trusted declaration
    pub fn push(&mut self, property: &'static str, value: impl Into<String>) -> &mut Self {
        self.declarations.push((property, value.into()));
        self
    }

    /// Add a declaration whose value came from the document; dropped if
    /// nothing survives sanitization
    pub fn push_user(&mut self, property: &'static str, value: &str) -> &mut Self {
        let value = sanitize_value(value);
        if !value.is_empty() {
            self.declarations.push((property, value));
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// Typography: font, color, alignment, decoration
    pub fn typography(&mut self, style: &ConcreteStyle) -> &mut Self {
        self.push_user("font-family", &style.font_family);
        self.push("font-size", format!("{}px", style.font_size));
        self.push_user("color", &style.color);
        self.push("line-height", format_number(style.line_height));
        if style.font_weight != FontWeight::Normal {
            self.push("font-weight", style.font_weight.as_css());
        }
        if style.font_style != FontStyle::Normal {
            self.push("font-style", style.font_style.as_css());
        }
        if style.letter_spacing != 0.0 && style.letter_spacing.is_finite() {
            self.push(
                "letter-spacing",
                format!("{}px", format_number(style.letter_spacing)),
            );
        }
        self.push("text-align", style.text_align.as_css());
        if style.text_transform != TextTransform::None {
            self.push("text-transform", style.text_transform.as_css());
        }
        self
    }

    /// Box: background, padding, margin, border, radius
    pub fn box_model(&mut self, style: &ConcreteStyle) -> &mut Self {
        if style.background_color != "transparent" {
            self.push_user("background-color", &style.background_color);
        }
        self.edges("padding", &style.padding);
        self.edges("margin", &style.margin);
        self.borders(&style.border);
        if style.border_radius > 0 {
            self.push("border-radius", format!("{}px", style.border_radius));
        }
        self
    }

    pub fn dimensions(&mut self, style: &ConcreteStyle) -> &mut Self {
        if let Dimension::Px(width) = style.width {
            self.push("width", format!("{width}px"));
        }
        if let Dimension::Px(height) = style.height {
            self.push("height", format!("{height}px"));
        }
        self
    }

    fn edges(&mut self, property: &'static str, edges: &Edges<u32>) {
        if *edges == Edges::uniform(0) {
            return;
        }
        if edges.is_uniform() {
            self.push(property, format!("{}px", edges.top));
        } else {
            self.push(
                property,
                format!(
                    "{}px {}px {}px {}px",
                    edges.top, edges.right, edges.bottom, edges.left
                ),
            );
        }
    }

    fn borders(&mut self, border: &Edges<Border>) {
        if border.is_uniform() {
            if let Some(value) = border_value(&border.top) {
                self.push("border", value);
            }
            return;
        }
        let sides = [
            ("border-top", &border.top),
            ("border-right", &border.right),
            ("border-bottom", &border.bottom),
            ("border-left", &border.left),
        ];
        for (property, side) in sides {
            if let Some(value) = border_value(side) {
                self.push(property, value);
            }
        }
    }

    /// Render as the content of a `style` attribute
    pub fn to_attribute(&self) -> String {
        self.declarations
            .iter()
            .map(|(property, value)| format!("{property}:{value}"))
            .collect::<Vec<_>>()
            .join(";")
    }
}

fn border_value(border: &Border) -> Option<String> {
    if border.is_none() {
        return None;
    }
    let color = sanitize_value(&border.color);
    let color = if color.is_empty() { "currentColor".to_string() } else { color };
    Some(format!("{}px {} {}", border.width, border.style.as_css(), color))
}

/// Format without a trailing `.0`
fn format_number(value: f32) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}
