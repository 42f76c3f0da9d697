use crate::geometry::Rect;
use crate::host::InlineStyle;
use crate::place::PlacementResult;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Outcome of one scenario run, as written by `placer place -e json`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacementDump {
    pub op: String,
    /// Index of the placed element.
    pub node: usize,
    pub viewport: Rect,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<PlacementResult>,
    /// Document-relative box, for `center` and `position`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rect: Option<Rect>,
    pub node_style: InlineStyle,
}

impl PlacementDump {
    /// Box to draw for the placed node: the clipped placement when there is
    /// one, the measured rectangle otherwise.
    pub fn node_rect(&self) -> Option<Rect> {
        self.result.as_ref().map(PlacementResult::rect).or(self.rect)
    }
}

pub fn write_placement_dump(dump: &PlacementDump, output: Option<&Path>) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            let file = File::create(path)?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, dump)?;
            writer.write_all(b"\n")?;
            writer.flush()?;
        }
        None => {
            println!("{}", serde_json::to_string_pretty(dump)?);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corner::Corner;
    use crate::geometry::Size;

    fn around_dump() -> PlacementDump {
        PlacementDump {
            op: "around".to_string(),
            node: 2,
            viewport: Rect::new(0.0, 0.0, 800.0, 600.0),
            result: Some(PlacementResult {
                node_corner: Corner::TL,
                anchor_corner: Corner::BL,
                x: 100.0,
                y: 124.0,
                w: 150.0,
                h: 200.0,
                overflow: 0.0,
                space_available: Size::new(700.0, 476.0),
                anchor_rect: Some(Rect::new(100.0, 100.0, 80.0, 24.0)),
            }),
            rect: None,
            node_style: InlineStyle::default(),
        }
    }

    #[test]
    fn corners_serialize_as_two_letter_codes() {
        let json = serde_json::to_value(around_dump()).unwrap();
        assert_eq!(json["result"]["nodeCorner"], "TL");
        assert_eq!(json["result"]["anchorCorner"], "BL");
        assert_eq!(json["result"]["spaceAvailable"]["w"], 700.0);
        assert!(json.get("rect").is_none());
    }

    #[test]
    fn node_rect_prefers_the_placement() {
        let mut dump = around_dump();
        assert_eq!(dump.node_rect(), Some(Rect::new(100.0, 124.0, 150.0, 200.0)));
        dump.result = None;
        dump.rect = Some(Rect::new(1.0, 2.0, 3.0, 4.0));
        assert_eq!(dump.node_rect(), Some(Rect::new(1.0, 2.0, 3.0, 4.0)));
    }

    #[test]
    fn writes_pretty_json_to_file() {
        let path = std::env::temp_dir().join(format!("placement-dump-{}.json", std::process::id()));
        write_placement_dump(&around_dump(), Some(&path)).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert!(written.contains("\"op\": \"around\""));
        assert!(written.ends_with("}\n"));
    }
}
