use serde::{Deserialize, Serialize};

/// Colors and font for the placement visualisation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub font_family: String,
    pub font_size: f32,
    pub background: String,
    pub viewport_stroke: String,
    pub anchor_fill: String,
    pub anchor_stroke: String,
    pub popup_fill: String,
    pub popup_stroke: String,
    pub text_color: String,
}

impl Theme {
    pub fn default_light() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            font_size: 12.0,
            background: "#FFFFFF".to_string(),
            viewport_stroke: "#7A8AA6".to_string(),
            anchor_fill: "#EEF2F8".to_string(),
            anchor_stroke: "#C7D2E5".to_string(),
            popup_fill: "#F8FAFF".to_string(),
            popup_stroke: "#9370DB".to_string(),
            text_color: "#1C2430".to_string(),
        }
    }

    pub fn dark() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            font_size: 12.0,
            background: "#1E1E24".to_string(),
            viewport_stroke: "#8A94A6".to_string(),
            anchor_fill: "#2C3140".to_string(),
            anchor_stroke: "#4A5368".to_string(),
            popup_fill: "#33304A".to_string(),
            popup_stroke: "#B39DDB".to_string(),
            text_color: "#E6E9F0".to_string(),
        }
    }
}
