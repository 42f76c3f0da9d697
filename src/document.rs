//! An in-memory document that implements [`Host`].
//!
//! Element `0` is always the body. Geometry is static: each element reports
//! the box it was built with, except that inline `top`/`left` offsets
//! written by the engine move it.

use serde::{Deserialize, Serialize};

use crate::error::PlaceError;
use crate::geometry::{Point, Rect, Size};
use crate::host::{ComputedStyle, Display, Host, InlineStyle, Position};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub usize);

impl NodeId {
    pub const BODY: NodeId = NodeId(0);
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Element {
    pub id: Option<String>,
    /// `None` for the body and for detached elements.
    pub parent: Option<NodeId>,
    /// Box relative to the visible viewport.
    pub rect: Rect,
    pub computed: ComputedStyle,
    pub inline: InlineStyle,
}

impl Element {
    pub fn new(rect: Rect) -> Self {
        Self {
            rect,
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_parent(mut self, parent: NodeId) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn with_computed(mut self, computed: ComputedStyle) -> Self {
        self.computed = computed;
        self
    }

    pub fn with_inline(mut self, inline: InlineStyle) -> Self {
        self.inline = inline;
        self
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DocumentFile {
    viewport: Rect,
    #[serde(default)]
    elements: Vec<Element>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "DocumentFile")]
pub struct StaticDocument {
    /// Document-relative visible box; its origin is the scroll offset.
    pub viewport: Rect,
    pub elements: Vec<Element>,
}

impl TryFrom<DocumentFile> for StaticDocument {
    type Error = PlaceError;

    fn try_from(file: DocumentFile) -> Result<Self, Self::Error> {
        let mut elements = file.elements;
        if elements.is_empty() {
            elements.push(Element::default());
        }
        let doc = Self {
            viewport: file.viewport,
            elements,
        };
        doc.validate_parents()?;
        Ok(doc)
    }
}

impl StaticDocument {
    pub fn new(viewport: Rect) -> Self {
        Self {
            viewport,
            elements: vec![Element::new(Rect::new(
                -viewport.x,
                -viewport.y,
                viewport.w,
                viewport.h,
            ))],
        }
    }

    pub fn insert(&mut self, element: Element) -> NodeId {
        self.elements.push(element);
        NodeId(self.elements.len() - 1)
    }

    pub fn element(&self, node: NodeId) -> Option<&Element> {
        self.elements.get(node.0)
    }

    pub fn element_mut(&mut self, node: NodeId) -> Option<&mut Element> {
        self.elements.get_mut(node.0)
    }

    pub fn set_size(&mut self, node: NodeId, size: Size) {
        if let Some(el) = self.element_mut(node) {
            el.rect.w = size.w;
            el.rect.h = size.h;
        }
    }

    /// Look an element up by `id`, falling back to a numeric index.
    pub fn resolve(&self, reference: &str) -> Option<NodeId> {
        self.element_by_id(reference).or_else(|| {
            reference
                .parse::<usize>()
                .ok()
                .filter(|idx| *idx < self.elements.len())
                .map(NodeId)
        })
    }

    /// Reject `parent` links that point outside the document or form a cycle.
    pub fn validate_parents(&self) -> Result<(), PlaceError> {
        let len = self.elements.len();
        for (idx, el) in self.elements.iter().enumerate() {
            if let Some(parent) = el.parent {
                if parent.0 >= len {
                    return Err(PlaceError::InvalidDocument(format!(
                        "element {idx} has parent {} but the document has {len} elements",
                        parent.0
                    )));
                }
            }
        }
        for start in 0..len {
            let mut current = self.elements[start].parent;
            let mut steps = 0;
            while let Some(id) = current {
                steps += 1;
                if id.0 == start || steps > len {
                    return Err(PlaceError::InvalidDocument(format!(
                        "the parent chain of element {start} is cyclic"
                    )));
                }
                current = self.elements[id.0].parent;
            }
        }
        Ok(())
    }

    /// Whether `node` or one of its ancestors has inline `display: none`.
    pub fn is_hidden(&self, node: NodeId) -> bool {
        let mut current = Some(node);
        // parent links come from user input; bound the walk
        for _ in 0..=self.elements.len() {
            let Some(id) = current else {
                return false;
            };
            let Some(el) = self.element(id) else {
                return false;
            };
            if el.inline.display == Display::None {
                return true;
            }
            current = el.parent;
        }
        false
    }
}

impl Host for StaticDocument {
    type Node = NodeId;

    fn viewport(&self) -> Rect {
        self.viewport
    }

    fn scroll_offset(&self) -> Point {
        Point::new(self.viewport.x, self.viewport.y)
    }

    fn bounding_client_rect(&self, node: &NodeId) -> Rect {
        let Some(el) = self.element(*node) else {
            return Rect::default();
        };
        if self.is_hidden(*node) {
            return Rect::default();
        }
        let scroll = self.scroll_offset();
        match (el.inline.left.px(), el.inline.top.px()) {
            (Some(left), Some(top)) if el.inline.position == Some(Position::Fixed) => {
                Rect::new(left, top, el.rect.w, el.rect.h)
            }
            (Some(left), Some(top)) => {
                Rect::new(left - scroll.x, top - scroll.y, el.rect.w, el.rect.h)
            }
            _ => el.rect,
        }
    }

    fn computed_style(&self, node: &NodeId) -> ComputedStyle {
        self.element(*node)
            .map(|el| el.computed)
            .unwrap_or_default()
    }

    fn inline_style(&self, node: &NodeId) -> InlineStyle {
        self.element(*node).map(|el| el.inline).unwrap_or_default()
    }

    fn set_inline_style(&mut self, node: &NodeId, style: InlineStyle) {
        if let Some(el) = self.element_mut(*node) {
            el.inline = style;
        }
    }

    fn parent(&self, node: &NodeId) -> Option<NodeId> {
        self.element(*node).and_then(|el| el.parent)
    }

    fn first_element_child(&self, node: &NodeId) -> Option<NodeId> {
        self.elements
            .iter()
            .enumerate()
            .find(|(idx, el)| *idx != node.0 && el.parent == Some(*node))
            .map(|(idx, _)| NodeId(idx))
    }

    fn body(&self) -> NodeId {
        NodeId::BODY
    }

    fn append_to_body(&mut self, node: &NodeId) {
        if *node == NodeId::BODY {
            return;
        }
        if let Some(el) = self.element_mut(*node) {
            el.parent = Some(NodeId::BODY);
        }
    }

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.elements
            .iter()
            .position(|el| el.id.as_deref() == Some(id))
            .map(NodeId)
    }
}
