#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod corner;
pub mod document;
pub mod error;
pub mod geometry;
pub mod host;
pub mod place;
pub mod placement_dump;
pub mod render;
pub mod scenario;
pub mod theme;
pub mod uacss;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, PlaceOptions, RenderConfig, load_config};
pub use corner::{Align, Corner, PositionName};
pub use document::{Element, NodeId, StaticDocument};
pub use error::PlaceError;
pub use geometry::{Point, Rect, Size};
pub use host::{ComputedStyle, Host, InlineStyle};
pub use place::{Anchor, Candidate, LayoutFn, LayoutRequest, PlacementResult, Placer};
pub use placement_dump::{PlacementDump, write_placement_dump};
pub use render::render_svg;
pub use scenario::{Scenario, load_scenario, parse_scenario, run_scenario};
pub use theme::Theme;
pub use uacss::{BoxModel, UaFlags};
