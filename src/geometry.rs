use serde::{Deserialize, Serialize};

/// Pixel coordinates relative to the document origin.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub w: f32,
    pub h: f32,
}

impl Size {
    pub const fn new(w: f32, h: f32) -> Self {
        Self { w, h }
    }
}

/// Position and size in document-relative pixels.
///
/// Also used for the viewport box, where `x`/`y` are the scroll offsets
/// of the visible area (the `l`/`t` of the box).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn size(&self) -> Size {
        Size::new(self.w, self.h)
    }

    pub fn translate(&self, dx: f32, dy: f32) -> Rect {
        Rect::new(self.x + dx, self.y + dy, self.w, self.h)
    }

    /// Intersection with `clip`. A disjoint pair yields an empty rect
    /// positioned at the clipped origin.
    pub fn clip_to(&self, clip: &Rect) -> Rect {
        let x = self.x.max(clip.x);
        let y = self.y.max(clip.y);
        let right = self.right().min(clip.right());
        let bottom = self.bottom().min(clip.bottom());
        Rect::new(x, y, (right - x).max(0.0), (bottom - y).max(0.0))
    }
}

/// Half of a pixel extent, truncated to a whole pixel the way an integer
/// shift would.
pub(crate) fn half_px(extent: f32) -> f32 {
    ((extent as i32) >> 1) as f32
}
