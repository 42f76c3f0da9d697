//! The rendering-engine surface the placement engine consumes.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Rect};

/// A document the engine can measure and restyle.
///
/// Coordinates returned by [`Host::viewport`] are document-relative; those
/// returned by [`Host::bounding_client_rect`] are relative to the visible
/// viewport, like `getBoundingClientRect()`.
pub trait Host {
    type Node: Clone + PartialEq + fmt::Debug;

    /// Visible area of the document, scroll offsets included.
    fn viewport(&self) -> Rect;

    fn scroll_offset(&self) -> Point;

    /// Rendered box of `node`; `{0,0,0,0}` when it has no box.
    fn bounding_client_rect(&self, node: &Self::Node) -> Rect;

    fn computed_style(&self, node: &Self::Node) -> ComputedStyle;

    fn inline_style(&self, node: &Self::Node) -> InlineStyle;

    fn set_inline_style(&mut self, node: &Self::Node, style: InlineStyle);

    fn parent(&self, node: &Self::Node) -> Option<Self::Node>;

    fn first_element_child(&self, node: &Self::Node) -> Option<Self::Node>;

    fn body(&self) -> Self::Node;

    /// Move `node` to be the last child of the body.
    fn append_to_body(&mut self, node: &Self::Node);

    fn element_by_id(&self, id: &str) -> Option<Self::Node>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    #[default]
    Static,
    Relative,
    Absolute,
    Fixed,
    Sticky,
}

impl Position {
    /// `relative` or `absolute`: establishes an offset parent for the
    /// coordinates we write.
    pub fn is_offset_parent(self) -> bool {
        matches!(self, Position::Relative | Position::Absolute)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Overflow {
    #[default]
    Visible,
    Hidden,
    Auto,
    Scroll,
    Clip,
}

impl Overflow {
    /// Whether descendants are cut to this element's box by a scroll
    /// container.
    pub fn clips(self) -> bool {
        matches!(self, Overflow::Hidden | Overflow::Auto | Overflow::Scroll)
    }
}

/// The subset of computed style the engine reads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ComputedStyle {
    pub position: Position,
    pub overflow: Overflow,
    pub border_top_width: f32,
    pub border_bottom_width: f32,
    pub margin_top: f32,
    pub margin_left: f32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Display {
    /// No inline value; the stylesheet decides.
    #[default]
    Unset,
    None,
    Block,
    Inline,
    InlineBlock,
    Flex,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Unset,
    Visible,
    Hidden,
}

/// Inline length for `top`/`left`/`right`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Offset {
    #[default]
    Unset,
    Auto,
    Px(f32),
}

impl Offset {
    pub fn px(self) -> Option<f32> {
        match self {
            Offset::Px(value) => Some(value),
            Offset::Unset | Offset::Auto => None,
        }
    }
}

impl fmt::Display for Offset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Offset::Unset => Ok(()),
            Offset::Auto => f.write_str("auto"),
            Offset::Px(value) => write!(f, "{value}px"),
        }
    }
}

/// The inline style properties the engine writes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InlineStyle {
    pub display: Display,
    pub visibility: Visibility,
    pub position: Option<Position>,
    pub top: Offset,
    pub left: Offset,
    pub right: Offset,
}
