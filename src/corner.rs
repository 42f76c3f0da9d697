//! Corner codes and the position-name expansion table.
//!
//! A corner is written as two letters, vertical first (`T`, `M`, `B`) then
//! horizontal (`L`, `M`, `R`): `"TL"` is the top-left corner, `"BM"` the
//! middle of the bottom edge.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PlaceError;
use crate::geometry::half_px;

/// Position along one axis. `Start` is top/left, `End` is bottom/right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Align {
    Start,
    Middle,
    End,
}

impl Align {
    pub fn flipped(self) -> Align {
        match self {
            Align::Start => Align::End,
            Align::Middle => Align::Middle,
            Align::End => Align::Start,
        }
    }

    /// Room between `point` and the viewport edge the node extends towards.
    pub fn space_available(self, view_start: f32, view_extent: f32, point: f32) -> f32 {
        match self {
            Align::Start => view_start + view_extent - point,
            Align::End => point - view_start,
            Align::Middle => view_extent,
        }
    }

    /// Unclipped leading edge of a node of `extent` whose corner sits at `point`.
    ///
    /// A centered node is pulled back so it does not cross the far
    /// viewport edge, but never past the near one.
    pub fn start(self, view_start: f32, view_extent: f32, point: f32, extent: f32) -> f32 {
        match self {
            Align::Start => point,
            Align::End => point - extent,
            Align::Middle => {
                view_start.max((view_start + view_extent).min(point + half_px(extent)) - extent)
            }
        }
    }

    /// Coordinate of this corner on an anchor spanning `start..start + extent`.
    pub fn anchor_coord(self, start: f32, extent: f32) -> f32 {
        match self {
            Align::Start => start,
            Align::End => start + extent,
            Align::Middle => start + half_px(extent),
        }
    }

    fn vertical_code(self) -> char {
        match self {
            Align::Start => 'T',
            Align::Middle => 'M',
            Align::End => 'B',
        }
    }

    fn horizontal_code(self) -> char {
        match self {
            Align::Start => 'L',
            Align::Middle => 'M',
            Align::End => 'R',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Corner {
    pub vertical: Align,
    pub horizontal: Align,
}

impl Corner {
    pub const TL: Corner = Corner::new(Align::Start, Align::Start);
    pub const TR: Corner = Corner::new(Align::Start, Align::End);
    pub const BL: Corner = Corner::new(Align::End, Align::Start);
    pub const BR: Corner = Corner::new(Align::End, Align::End);
    pub const TM: Corner = Corner::new(Align::Start, Align::Middle);
    pub const BM: Corner = Corner::new(Align::End, Align::Middle);
    pub const ML: Corner = Corner::new(Align::Middle, Align::Start);
    pub const MR: Corner = Corner::new(Align::Middle, Align::End);

    pub const fn new(vertical: Align, horizontal: Align) -> Self {
        Self {
            vertical,
            horizontal,
        }
    }

    /// The diagonally opposite corner; middle components stay put.
    pub fn kitty_corner(self) -> Corner {
        Corner::new(self.vertical.flipped(), self.horizontal.flipped())
    }

    /// Left/right swapped, for right-to-left layout.
    pub fn mirrored(self) -> Corner {
        Corner::new(self.vertical, self.horizontal.flipped())
    }

    fn mirrored_if(self, mirror: bool) -> Corner {
        if mirror { self.mirrored() } else { self }
    }
}

impl fmt::Display for Corner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}",
            self.vertical.vertical_code(),
            self.horizontal.horizontal_code()
        )
    }
}

impl FromStr for Corner {
    type Err = PlaceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || PlaceError::InvalidCorner(s.to_string());
        let mut chars = s.chars();
        let (Some(v), Some(h), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(invalid());
        };
        let vertical = match v.to_ascii_uppercase() {
            'T' => Align::Start,
            'M' => Align::Middle,
            'B' => Align::End,
            _ => return Err(invalid()),
        };
        let horizontal = match h.to_ascii_uppercase() {
            'L' => Align::Start,
            'M' => Align::Middle,
            'R' => Align::End,
            _ => return Err(invalid()),
        };
        Ok(Corner::new(vertical, horizontal))
    }
}

impl TryFrom<String> for Corner {
    type Error = PlaceError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Corner> for String {
    fn from(corner: Corner) -> Self {
        corner.to_string()
    }
}

/// Symbolic placement of a popup relative to its anchor.
///
/// `before`/`after` are reading-direction relative: `before` is the left
/// side in left-to-right layout and the right side otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PositionName {
    Before,
    After,
    BeforeCentered,
    AfterCentered,
    Above,
    AboveAlt,
    AboveCentered,
    Below,
    BelowAlt,
    BelowCentered,
}

impl PositionName {
    pub fn as_str(self) -> &'static str {
        match self {
            PositionName::Before => "before",
            PositionName::After => "after",
            PositionName::BeforeCentered => "before-centered",
            PositionName::AfterCentered => "after-centered",
            PositionName::Above => "above",
            PositionName::AboveAlt => "above-alt",
            PositionName::AboveCentered => "above-centered",
            PositionName::Below => "below",
            PositionName::BelowAlt => "below-alt",
            PositionName::BelowCentered => "below-centered",
        }
    }

    /// True for the `above*` and `below*` families.
    pub fn is_vertical(self) -> bool {
        matches!(
            self,
            PositionName::Above
                | PositionName::AboveAlt
                | PositionName::AboveCentered
                | PositionName::Below
                | PositionName::BelowAlt
                | PositionName::BelowCentered
        )
    }

    /// `(anchor corner, node corner)` pairs to try, in order.
    pub fn corner_pairs(self, left_to_right: bool) -> Vec<(Corner, Corner)> {
        let rtl = !left_to_right;
        let pairs: &[(Corner, Corner)] = match self {
            PositionName::AboveCentered => &[(Corner::TM, Corner::BM)],
            PositionName::BelowCentered => &[(Corner::BM, Corner::TM)],
            PositionName::BeforeCentered | PositionName::AfterCentered => {
                &[(Corner::ML, Corner::MR)]
            }
            PositionName::Before | PositionName::After => {
                &[(Corner::TL, Corner::TR), (Corner::BL, Corner::BR)]
            }
            PositionName::Below | PositionName::BelowAlt => {
                &[(Corner::BL, Corner::TL), (Corner::BR, Corner::TR)]
            }
            PositionName::Above | PositionName::AboveAlt => {
                &[(Corner::TL, Corner::BL), (Corner::TR, Corner::BR)]
            }
        };
        let mirror = rtl ^ self.is_mirror_variant();
        pairs
            .iter()
            .map(|(anchor, node)| (anchor.mirrored_if(mirror), node.mirrored_if(mirror)))
            .collect()
    }

    fn is_mirror_variant(self) -> bool {
        matches!(
            self,
            PositionName::After
                | PositionName::AfterCentered
                | PositionName::AboveAlt
                | PositionName::BelowAlt
        )
    }
}

impl fmt::Display for PositionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PositionName {
    type Err = PlaceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = match s {
            "before" => PositionName::Before,
            "after" => PositionName::After,
            "before-centered" => PositionName::BeforeCentered,
            "after-centered" => PositionName::AfterCentered,
            "above" => PositionName::Above,
            "above-alt" => PositionName::AboveAlt,
            "above-centered" => PositionName::AboveCentered,
            "below" => PositionName::Below,
            "below-alt" => PositionName::BelowAlt,
            "below-centered" => PositionName::BelowCentered,
            other => return Err(PlaceError::UnknownPosition(other.to_string())),
        };
        Ok(name)
    }
}
