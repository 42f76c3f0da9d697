//! Popup placement: pick the corner alignment that keeps a node most
//! visible inside the viewport, then write it as pixel offsets.
//!
//! Every entry point funnels into one routine that walks an ordered list
//! of [`Candidate`]s. Each candidate is measured in turn; the first one
//! that fits entirely wins, otherwise the one with the least overflow.
//! Order is the tie-break.

use serde::Serialize;
use tracing::{debug, debug_span, trace};

use crate::config::PlaceOptions;
use crate::corner::{Align, Corner, PositionName};
use crate::error::PlaceError;
use crate::geometry::{Point, Rect, Size};
use crate::host::{Display, Host, InlineStyle, Offset, Position, Visibility};

/// Callback that lets a popup adapt itself to a candidate orientation
/// (e.g. a tooltip moving its arrow, or shrinking to the space given).
///
/// It runs before the node is measured. The returned value is added to the
/// candidate's overflow; return `0.0` when the popup fit unmodified.
pub type LayoutFn<'a, H> = dyn FnMut(&mut H, &<H as Host>::Node, &LayoutRequest) -> f32 + 'a;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutRequest {
    pub anchor_corner: Corner,
    pub node_corner: Corner,
    pub space_available: Size,
    /// Size of the anchor rectangle, for placements made with `around`.
    pub anchor_size: Option<Size>,
}

/// Hypothesis: put `node_corner` of the popup at `point`, touching
/// `anchor_corner` of the anchor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub anchor_corner: Corner,
    pub node_corner: Corner,
    pub point: Point,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacementResult {
    pub node_corner: Corner,
    pub anchor_corner: Corner,
    /// Popup rectangle after clipping to the viewport.
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub overflow: f32,
    pub space_available: Size,
    /// The (possibly clipped) anchor rectangle, set by `around`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anchor_rect: Option<Rect>,
}

impl PlacementResult {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.w, self.h)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Anchor<N> {
    Node(N),
    /// Element looked up with [`Host::element_by_id`].
    Id(String),
    Rect(Rect),
}

pub struct Placer<'h, H: Host> {
    host: &'h mut H,
    options: PlaceOptions,
}

impl<'h, H: Host> Placer<'h, H> {
    pub fn new(host: &'h mut H) -> Self {
        Self::with_options(host, PlaceOptions::default())
    }

    pub fn with_options(host: &'h mut H, options: PlaceOptions) -> Self {
        Self { host, options }
    }

    pub fn options(&self) -> &PlaceOptions {
        &self.options
    }

    /// Place `node` kitty-corner to `point`, trying `corners` in order.
    ///
    /// With `padding`, the point becomes a rectangle of `2 * padding`
    /// centered on it, and the node touches that rectangle's corners.
    pub fn at(
        &mut self,
        node: &H::Node,
        point: Point,
        corners: &[Corner],
        padding: Option<Point>,
        layout: Option<&mut LayoutFn<'_, H>>,
    ) -> Result<PlacementResult, PlaceError> {
        let _span = debug_span!("place_at", x = point.x, y = point.y, corners = corners.len())
            .entered();

        let candidates: Vec<Candidate> = corners
            .iter()
            .map(|&corner| {
                let mut at = point;
                if let Some(padding) = padding {
                    at.x += if corner.horizontal == Align::Start {
                        padding.x
                    } else {
                        -padding.x
                    };
                    at.y += if corner.vertical == Align::Start {
                        padding.y
                    } else {
                        -padding.y
                    };
                }
                Candidate {
                    anchor_corner: corner.kitty_corner(),
                    node_corner: corner,
                    point: at,
                }
            })
            .collect();

        self.place_candidates(node, &candidates, layout, None)
    }

    /// Place `node` adjacent to `anchor`, trying `positions` in order.
    pub fn around(
        &mut self,
        node: &H::Node,
        anchor: &Anchor<H::Node>,
        positions: &[PositionName],
        left_to_right: bool,
        layout: Option<&mut LayoutFn<'_, H>>,
    ) -> Result<PlacementResult, PlaceError> {
        let _span =
            debug_span!("place_around", positions = positions.len(), left_to_right).entered();

        let (mut rect, anchor_node) = match anchor {
            Anchor::Rect(rect) => (*rect, None),
            Anchor::Node(anchor_node) => (self.position(anchor_node), Some(anchor_node.clone())),
            Anchor::Id(id) => {
                let anchor_node = self
                    .host
                    .element_by_id(id)
                    .ok_or_else(|| PlaceError::UnknownAnchor(id.clone()))?;
                (self.position(&anchor_node), Some(anchor_node))
            }
        };

        if let Some(anchor_node) = &anchor_node {
            let vertical = positions.first().is_some_and(|pos| pos.is_vertical());
            if vertical && self.options.overlap_borders {
                rect = self.overlap_borders(anchor_node, node, rect);
            }
            if self.options.clip_to_scroll_ancestors {
                rect = self.clip_to_scroll_ancestors(anchor_node, rect);
            }
        }

        let candidates: Vec<Candidate> = positions
            .iter()
            .flat_map(|pos| pos.corner_pairs(left_to_right))
            .map(|(anchor_corner, node_corner)| Candidate {
                anchor_corner,
                node_corner,
                point: Point::new(
                    anchor_corner.horizontal.anchor_coord(rect.x, rect.w),
                    anchor_corner.vertical.anchor_coord(rect.y, rect.h),
                ),
            })
            .collect();

        let mut result = self.place_candidates(node, &candidates, layout, Some(rect.size()))?;
        result.anchor_rect = Some(rect);
        Ok(result)
    }

    /// Center `node` in the viewport with fixed positioning. The node is
    /// assumed to fit.
    pub fn center(&mut self, node: &H::Node) {
        let view = self.host.viewport();
        let bb = self.host.bounding_client_rect(node);
        let mut style = self.host.inline_style(node);
        style.position = Some(Position::Fixed);
        style.top = Offset::Px((view.h - bb.h) / 2.0);
        style.left = Offset::Px((view.w - bb.w) / 2.0);
        self.host.set_inline_style(node, style);
    }

    /// Rendered box of `node` relative to the document rather than the
    /// viewport.
    pub fn position(&self, node: &H::Node) -> Rect {
        let bb = self.host.bounding_client_rect(node);
        let scroll = self.host.scroll_offset();
        bb.translate(scroll.x, scroll.y)
    }

    /// Let popup and anchor borders overlap by the thinner of the two, so
    /// that a dropdown does not show a doubled border.
    fn overlap_borders(&self, anchor: &H::Node, node: &H::Node, mut rect: Rect) -> Rect {
        let (anchor_top, anchor_bottom) = self.border_widths(anchor);
        let (node_top, node_bottom) = self.border_widths(node);
        let top = anchor_top.min(node_top);
        let bottom = anchor_bottom.min(node_bottom);
        rect.y += top;
        rect.h = (rect.h - (top + bottom)).max(0.0);
        rect
    }

    /// Top and bottom border widths of `node` plus its first element child;
    /// the visible border is often drawn by an inner element.
    fn border_widths(&self, node: &H::Node) -> (f32, f32) {
        let own = self.host.computed_style(node);
        let (child_top, child_bottom) = self
            .host
            .first_element_child(node)
            .map(|child| {
                let cs = self.host.computed_style(&child);
                (cs.border_top_width, cs.border_bottom_width)
            })
            .unwrap_or((0.0, 0.0));
        (
            own.border_top_width + child_top,
            own.border_bottom_width + child_bottom,
        )
    }

    /// Intersect the anchor with each scrolling ancestor below the body.
    ///
    /// Ancestors between an absolutely positioned element and its
    /// containing block do not clip it and are skipped.
    fn clip_to_scroll_ancestors(&self, anchor: &H::Node, mut rect: Rect) -> Rect {
        let body = self.host.body();
        let mut saw_absolute = self.host.computed_style(anchor).position == Position::Absolute;
        let mut parent = self.host.parent(anchor);
        let mut visited: Vec<H::Node> = Vec::new();
        while let Some(current) = parent {
            if current == body {
                break;
            }
            if visited.contains(&current) {
                debug!(node = ?current, "parent chain loops, stopping ancestor clipping");
                break;
            }
            let style = self.host.computed_style(&current);
            if style.position.is_offset_parent() {
                saw_absolute = false;
            }
            if !saw_absolute && style.overflow.clips() {
                let clip = self.position(&current);
                rect = rect.clip_to(&clip);
                trace!(?clip, ?rect, "anchor clipped by scrolling ancestor");
            }
            if style.position == Position::Absolute {
                saw_absolute = true;
            }
            parent = self.host.parent(&current);
            visited.push(current);
        }
        rect
    }

    fn place_candidates(
        &mut self,
        node: &H::Node,
        candidates: &[Candidate],
        mut layout: Option<&mut LayoutFn<'_, H>>,
        anchor_size: Option<Size>,
    ) -> Result<PlacementResult, PlaceError> {
        let Some((first, rest)) = candidates.split_first() else {
            return Err(PlaceError::NoCandidates);
        };

        let view = self.host.viewport();
        if self.options.reattach_to_body {
            self.reattach_to_body(node);
        }

        let mut best = self.evaluate(node, first, &view, layout.as_deref_mut(), anchor_size);
        let mut best_index = 0;
        let mut last_index = 0;
        if best.overflow != 0.0 {
            for (offset, candidate) in rest.iter().enumerate() {
                let evaluated =
                    self.evaluate(node, candidate, &view, layout.as_deref_mut(), anchor_size);
                last_index = offset + 1;
                let fits = evaluated.overflow == 0.0;
                if evaluated.overflow < best.overflow {
                    best = evaluated;
                    best_index = last_index;
                }
                if fits {
                    debug!(index = last_index, "candidate fits, skipping the rest");
                    break;
                }
            }
        }

        // The node was last laid out for another candidate; put it back in
        // the shape of the winner before positioning.
        if best_index != last_index {
            if let Some(layout) = layout.as_deref_mut() {
                let request = LayoutRequest {
                    anchor_corner: best.anchor_corner,
                    node_corner: best.node_corner,
                    space_available: best.space_available,
                    anchor_size,
                };
                layout(&mut *self.host, node, &request);
            }
        }

        self.apply_position(node, &best);
        debug!(
            anchor_corner = %best.anchor_corner,
            node_corner = %best.node_corner,
            x = best.x,
            y = best.y,
            overflow = best.overflow,
            evaluated = last_index + 1,
            "placed node"
        );
        Ok(best)
    }

    fn evaluate(
        &mut self,
        node: &H::Node,
        candidate: &Candidate,
        view: &Rect,
        layout: Option<&mut LayoutFn<'_, H>>,
        anchor_size: Option<Size>,
    ) -> PlacementResult {
        let point = candidate.point;
        let corner = candidate.node_corner;
        let space_available = Size::new(
            corner.horizontal.space_available(view.x, view.w, point.x),
            corner.vertical.space_available(view.y, view.h, point.y),
        );

        // Offsets from a previous candidate would skew the natural width.
        let mut style = self.host.inline_style(node);
        style.left = Offset::Auto;
        style.right = Offset::Auto;
        self.host.set_inline_style(node, style);

        let mut overflow = match layout {
            Some(layout) => {
                let request = LayoutRequest {
                    anchor_corner: candidate.anchor_corner,
                    node_corner: corner,
                    space_available,
                    anchor_size,
                };
                layout(&mut *self.host, node, &request)
            }
            None => 0.0,
        };

        let bb = RevealGuard::new(&mut *self.host, node).bounding_client_rect();

        let start_x = corner.horizontal.start(view.x, view.w, point.x, bb.w);
        let start_y = corner.vertical.start(view.y, view.h, point.y, bb.h);
        let x = view.x.max(start_x);
        let y = view.y.max(start_y);
        let w = view.right().min(start_x + bb.w) - x;
        let h = view.bottom().min(start_y + bb.h) - y;
        overflow += (bb.w - w) + (bb.h - h);

        trace!(
            anchor_corner = %candidate.anchor_corner,
            node_corner = %corner,
            x,
            y,
            overflow,
            "evaluated candidate"
        );

        PlacementResult {
            node_corner: corner,
            anchor_corner: candidate.anchor_corner,
            x,
            y,
            w,
            h,
            overflow,
            space_available,
            anchor_rect: None,
        }
    }

    fn reattach_to_body(&mut self, node: &H::Node) {
        let body = self.host.body();
        if self.host.parent(node).as_ref() != Some(&body) {
            debug!(?node, "moving node under body");
            self.host.append_to_body(node);
        }
    }

    fn apply_position(&mut self, node: &H::Node, best: &PlacementResult) {
        let mut top = best.y;
        let mut left = best.x;
        if self.options.compensate_body_margin {
            let body = self.host.body();
            let body_style = self.host.computed_style(&body);
            if body_style.position.is_offset_parent() {
                top -= body_style.margin_top;
                left -= body_style.margin_left;
            }
        }
        let mut style = self.host.inline_style(node);
        style.top = Offset::Px(top);
        style.left = Offset::Px(left);
        style.right = Offset::Auto;
        self.host.set_inline_style(node, style);
    }
}

/// Makes a `display: none` node measurable for as long as it lives,
/// without showing it; the inline display and visibility are restored on
/// drop.
struct RevealGuard<'a, H: Host> {
    host: &'a mut H,
    node: &'a H::Node,
    saved: Option<InlineStyle>,
}

impl<'a, H: Host> RevealGuard<'a, H> {
    fn new(host: &'a mut H, node: &'a H::Node) -> Self {
        let style = host.inline_style(node);
        let saved = if style.display == Display::None {
            host.set_inline_style(
                node,
                InlineStyle {
                    display: Display::Unset,
                    visibility: Visibility::Hidden,
                    ..style
                },
            );
            Some(style)
        } else {
            None
        };
        Self { host, node, saved }
    }

    fn bounding_client_rect(&self) -> Rect {
        self.host.bounding_client_rect(self.node)
    }
}

impl<H: Host> Drop for RevealGuard<'_, H> {
    fn drop(&mut self) {
        if let Some(saved) = self.saved.take() {
            let current = self.host.inline_style(self.node);
            self.host.set_inline_style(
                self.node,
                InlineStyle {
                    display: saved.display,
                    visibility: saved.visibility,
                    ..current
                },
            );
        }
    }
}
