//! # Style Resolution
//!
//! Collapses the sparse layers (own override → ancestor overrides → global
//! styles → builtin fallback) into a [`ConcreteStyle`] with every property
//! populated. Each property is resolved on its own.
//!
//! Typographic properties cascade through ancestors the way CSS inherits
//! them. Box properties (background, padding, margin, border, radius, size)
//! belong to the box that declares them and skip the ancestor layers, so a
//! row's padding is not applied again to every cell and element inside it.
//!
//! Resolution is pure and allocation-light; it runs on every render.

use crate::document::{Column, Element, ElementKind, Row};
use crate::style::{
    Border, FontStyle, FontWeight, GlobalStyles, Style, TextAlign, TextDecoration, TextTransform,
};

/// Builtin values used when no layer sets a property
pub mod fallback {
    pub const FONT_FAMILY: &str = "Arial, Helvetica, sans-serif";
    pub const FONT_SIZE: u32 = 14;
    pub const TEXT_COLOR: &str = "#333333";
    pub const THEME_COLOR: &str = "#2563eb";
    pub const BUTTON_TEXT_COLOR: &str = "#ffffff";
    pub const BACKGROUND: &str = "transparent";
    pub const LINE_HEIGHT: f32 = 1.4;
    pub const BUTTON_PADDING_Y: u32 = 8;
    pub const BUTTON_PADDING_X: u32 = 16;
    pub const BUTTON_RADIUS: u32 = 4;
    pub const IMAGE_SIZE: u32 = 80;
    pub const SOCIAL_ICON_SIZE: u32 = 24;
}

/// What kind of box a style is being resolved for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeRole {
    /// The outer table
    Root,
    Row,
    Column,
    Text,
    Image,
    Button,
    Social,
}

impl From<ElementKind> for NodeRole {
    fn from(kind: ElementKind) -> Self {
        match kind {
            ElementKind::Text => NodeRole::Text,
            ElementKind::Image => NodeRole::Image,
            ElementKind::Button => NodeRole::Button,
            ElementKind::Social => NodeRole::Social,
        }
    }
}

/// Four-sided value
#[derive(Debug, Clone, PartialEq)]
pub struct Edges<T> {
    pub top: T,
    pub right: T,
    pub bottom: T,
    pub left: T,
}

impl<T: Clone + PartialEq> Edges<T> {
    pub fn uniform(value: T) -> Self {
        Self {
            top: value.clone(),
            right: value.clone(),
            bottom: value.clone(),
            left: value,
        }
    }

    pub fn is_uniform(&self) -> bool {
        self.top == self.right && self.top == self.bottom && self.top == self.left
    }
}

/// Explicit size or "let the client decide"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Auto,
    Px(u32),
}

impl Dimension {
    pub fn px(&self) -> Option<u32> {
        match self {
            Dimension::Auto => None,
            Dimension::Px(px) => Some(*px),
        }
    }
}

/// Fully specified style for one node
#[derive(Debug, Clone, PartialEq)]
pub struct ConcreteStyle {
    pub color: String,
    pub background_color: String,
    pub font_family: String,
    pub font_size: u32,
    pub font_weight: FontWeight,
    pub font_style: FontStyle,
    pub line_height: f32,
    pub letter_spacing: f32,
    pub text_align: TextAlign,
    pub text_decoration: TextDecoration,
    pub text_transform: TextTransform,
    pub padding: Edges<u32>,
    pub margin: Edges<u32>,
    pub border: Edges<Border>,
    pub border_radius: u32,
    pub width: Dimension,
    pub height: Dimension,
}

/// Resolve one node's style.
///
/// `ancestors` is ordered nearest first (for an element: column, then row).
pub fn resolve(
    own: &Style,
    ancestors: &[&Style],
    globals: &GlobalStyles,
    role: NodeRole,
) -> ConcreteStyle {
    let layers = Layers { own, ancestors };

    let color = match role {
        NodeRole::Button => own
            .color
            .clone()
            .unwrap_or_else(|| fallback::BUTTON_TEXT_COLOR.to_string()),
        NodeRole::Social => own
            .color
            .clone()
            .or_else(|| globals.theme_color.clone())
            .unwrap_or_else(|| fallback::THEME_COLOR.to_string()),
        _ => layers
            .inherit(|s| s.color.clone())
            .or_else(|| globals.text_color.clone())
            .unwrap_or_else(|| fallback::TEXT_COLOR.to_string()),
    };

    let background_color = match role {
        NodeRole::Root => globals.background_color.clone(),
        NodeRole::Button => own
            .background_color
            .clone()
            .or_else(|| globals.theme_color.clone())
            .or_else(|| Some(fallback::THEME_COLOR.to_string())),
        _ => own.background_color.clone(),
    }
    .unwrap_or_else(|| fallback::BACKGROUND.to_string());

    let text_decoration = match role {
        NodeRole::Button | NodeRole::Social => own.text_decoration,
        _ => layers.inherit(|s| s.text_decoration),
    }
    .unwrap_or(TextDecoration::None);

    let font_weight = layers.inherit(|s| s.font_weight).unwrap_or(match role {
        NodeRole::Button => FontWeight::Bold,
        _ => FontWeight::Normal,
    });

    let (pad_y, pad_x) = match role {
        NodeRole::Button => (fallback::BUTTON_PADDING_Y, fallback::BUTTON_PADDING_X),
        _ => (0, 0),
    };
    let padding = Edges {
        top: own.padding_top.or(own.padding).unwrap_or(pad_y),
        right: own.padding_right.or(own.padding).unwrap_or(pad_x),
        bottom: own.padding_bottom.or(own.padding).unwrap_or(pad_y),
        left: own.padding_left.or(own.padding).unwrap_or(pad_x),
    };

    let margin = Edges {
        top: own.margin_top.or(own.margin).unwrap_or(0),
        right: own.margin_right.or(own.margin).unwrap_or(0),
        bottom: own.margin_bottom.or(own.margin).unwrap_or(0),
        left: own.margin_left.or(own.margin).unwrap_or(0),
    };

    let border_side = |side: &Option<Border>| {
        side.as_ref()
            .or(own.border.as_ref())
            .cloned()
            .unwrap_or_else(Border::none)
    };
    let border = Edges {
        top: border_side(&own.border_top),
        right: border_side(&own.border_right),
        bottom: border_side(&own.border_bottom),
        left: border_side(&own.border_left),
    };

    let border_radius = own.border_radius.unwrap_or(match role {
        NodeRole::Button => fallback::BUTTON_RADIUS,
        _ => 0,
    });

    let default_size = match role {
        NodeRole::Image => Dimension::Px(fallback::IMAGE_SIZE),
        NodeRole::Social => Dimension::Px(fallback::SOCIAL_ICON_SIZE),
        _ => Dimension::Auto,
    };

    ConcreteStyle {
        color,
        background_color,
        font_family: layers
            .inherit(|s| s.font_family.clone())
            .or_else(|| globals.font_family.clone())
            .unwrap_or_else(|| fallback::FONT_FAMILY.to_string()),
        font_size: layers
            .inherit(|s| s.font_size)
            .or(globals.font_size)
            .unwrap_or(fallback::FONT_SIZE),
        font_weight,
        font_style: layers.inherit(|s| s.font_style).unwrap_or(FontStyle::Normal),
        line_height: layers
            .inherit(|s| s.line_height)
            .unwrap_or(fallback::LINE_HEIGHT),
        letter_spacing: layers.inherit(|s| s.letter_spacing).unwrap_or(0.0),
        text_align: layers.inherit(|s| s.text_align).unwrap_or(TextAlign::Left),
        text_decoration,
        text_transform: layers
            .inherit(|s| s.text_transform)
            .unwrap_or(TextTransform::None),
        padding,
        margin,
        border,
        border_radius,
        width: own.width.map(Dimension::Px).unwrap_or(default_size),
        height: own.height.map(Dimension::Px).unwrap_or(default_size),
    }
}

struct Layers<'a> {
    own: &'a Style,
    ancestors: &'a [&'a Style],
}

impl Layers<'_> {
    /// First value found walking own → nearest ancestor → outermost
    fn inherit<T>(&self, pick: impl Fn(&Style) -> Option<T>) -> Option<T> {
        pick(self.own).or_else(|| self.ancestors.iter().find_map(|layer| pick(*layer)))
    }
}

/// Resolves styles for the nodes of one document
#[derive(Debug, Clone, Copy)]
pub struct StyleResolver<'a> {
    globals: &'a GlobalStyles,
}

impl<'a> StyleResolver<'a> {
    pub fn new(globals: &'a GlobalStyles) -> Self {
        Self { globals }
    }

    /// Style of the outer table (global layer and fallbacks only)
    pub fn root(&self) -> ConcreteStyle {
        resolve(&Style::default(), &[], self.globals, NodeRole::Root)
    }

    pub fn row(&self, row: &Row) -> ConcreteStyle {
        resolve(row.style(), &[], self.globals, NodeRole::Row)
    }

    pub fn column(&self, column: &Column, row: &Row) -> ConcreteStyle {
        resolve(column.style(), &[row.style()], self.globals, NodeRole::Column)
    }

    pub fn element(&self, element: &Element, column: &Column, row: &Row) -> ConcreteStyle {
        resolve(
            element.style(),
            &[column.style(), row.style()],
            self.globals,
            NodeRole::from(element.kind()),
        )
    }
}
