//! Placement scenarios: a [`StaticDocument`] plus one request, loaded from
//! JSON (JSON5 accepted as a fallback for hand-written files).

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::config::PlaceOptions;
use crate::corner::{Corner, PositionName};
use crate::document::{NodeId, StaticDocument};
use crate::error::PlaceError;
use crate::geometry::{Point, Rect};
use crate::host::Host;
use crate::place::{Anchor, Placer};
use crate::placement_dump::PlacementDump;

/// Element reference: an index into the document, or an element id
/// (numeric strings fall back to an index).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeRef {
    Index(NodeId),
    Id(String),
}

impl NodeRef {
    pub fn resolve(&self, doc: &StaticDocument) -> Result<NodeId, PlaceError> {
        match self {
            NodeRef::Index(id) if doc.element(*id).is_some() => Ok(*id),
            NodeRef::Index(id) => Err(PlaceError::UnknownNode(id.0.to_string())),
            NodeRef::Id(id) => doc
                .resolve(id)
                .ok_or_else(|| PlaceError::UnknownNode(id.clone())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnchorSpec {
    Rect(Rect),
    Index(NodeId),
    Id(String),
}

impl AnchorSpec {
    fn to_anchor(&self, doc: &StaticDocument) -> Result<Anchor<NodeId>, PlaceError> {
        match self {
            AnchorSpec::Rect(rect) => Ok(Anchor::Rect(*rect)),
            AnchorSpec::Index(id) if doc.element(*id).is_some() => Ok(Anchor::Node(*id)),
            AnchorSpec::Index(id) => Err(PlaceError::UnknownAnchor(id.0.to_string())),
            AnchorSpec::Id(id) => doc
                .resolve(id)
                .map(Anchor::Node)
                .ok_or_else(|| PlaceError::UnknownAnchor(id.clone())),
        }
    }
}

fn default_left_to_right() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "kebab-case")]
pub enum Request {
    At {
        point: Point,
        corners: Vec<Corner>,
        #[serde(default)]
        padding: Option<Point>,
    },
    #[serde(rename_all = "camelCase")]
    Around {
        anchor: AnchorSpec,
        positions: Vec<PositionName>,
        #[serde(default = "default_left_to_right")]
        left_to_right: bool,
    },
    Center,
    Position,
}

impl Request {
    pub fn op_name(&self) -> &'static str {
        match self {
            Request::At { .. } => "at",
            Request::Around { .. } => "around",
            Request::Center => "center",
            Request::Position => "position",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    pub document: StaticDocument,
    pub node: NodeRef,
    pub request: Request,
}

pub fn parse_scenario(input: &str) -> anyhow::Result<Scenario> {
    match serde_json::from_str::<Scenario>(input) {
        Ok(scenario) => Ok(scenario),
        Err(json_err) => json5::from_str::<Scenario>(input)
            .map_err(|_| json_err)
            .context("invalid scenario"),
    }
}

pub fn load_scenario(path: &Path) -> anyhow::Result<Scenario> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read scenario {}", path.display()))?;
    parse_scenario(&contents).with_context(|| format!("in {}", path.display()))
}

/// Run the scenario's request against its document. The document keeps
/// the resulting inline styles.
pub fn run_scenario(
    scenario: &mut Scenario,
    options: &PlaceOptions,
) -> Result<PlacementDump, PlaceError> {
    let node = scenario.node.resolve(&scenario.document)?;
    let doc = &mut scenario.document;
    let mut result = None;
    let mut rect = None;
    match &scenario.request {
        Request::At {
            point,
            corners,
            padding,
        } => {
            result = Some(Placer::with_options(doc, *options).at(
                &node, *point, corners, *padding, None,
            )?);
        }
        Request::Around {
            anchor,
            positions,
            left_to_right,
        } => {
            let anchor = anchor.to_anchor(doc)?;
            result = Some(Placer::with_options(doc, *options).around(
                &node,
                &anchor,
                positions,
                *left_to_right,
                None,
            )?);
        }
        Request::Center => {
            let mut placer = Placer::with_options(doc, *options);
            placer.center(&node);
            rect = Some(placer.position(&node));
        }
        Request::Position => {
            rect = Some(Placer::with_options(doc, *options).position(&node));
        }
    }
    Ok(PlacementDump {
        op: scenario.request.op_name().to_string(),
        node: node.0,
        viewport: doc.viewport(),
        result,
        rect,
        node_style: doc.inline_style(&node),
    })
}
