use crate::theme::Theme;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Switches for the optional steps of the placement engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlaceOptions {
    /// Move the popup under `<body>` before positioning it, so an offset
    /// ancestor cannot shift the coordinates we write.
    pub reattach_to_body: bool,
    /// Subtract the body margin when the body is itself positioned.
    pub compensate_body_margin: bool,
    /// For `above*`/`below*` placements, let the popup border sit on top of
    /// the anchor border instead of next to it.
    pub overlap_borders: bool,
    /// Shrink the anchor to the part left visible by scrolling ancestors.
    pub clip_to_scroll_ancestors: bool,
}

impl Default for PlaceOptions {
    fn default() -> Self {
        Self {
            reattach_to_body: true,
            compensate_body_margin: true,
            overlap_borders: true,
            clip_to_scroll_ancestors: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    pub width: f32,
    pub height: f32,
    pub background: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 800.0,
            background: "#FFFFFF".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub theme: Theme,
    pub place: PlaceOptions,
    pub render: RenderConfig,
}

impl Default for Config {
    fn default() -> Self {
        let theme = Theme::default_light();
        let render = RenderConfig {
            background: theme.background.clone(),
            ..Default::default()
        };
        Self {
            theme,
            place: PlaceOptions::default(),
            render,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThemeVariables {
    font_family: Option<String>,
    font_size: Option<f32>,
    background: Option<String>,
    viewport_stroke: Option<String>,
    anchor_fill: Option<String>,
    anchor_stroke: Option<String>,
    popup_fill: Option<String>,
    popup_stroke: Option<String>,
    text_color: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlaceOptionsFile {
    reattach_to_body: Option<bool>,
    compensate_body_margin: Option<bool>,
    overlap_borders: Option<bool>,
    clip_to_scroll_ancestors: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RenderConfigFile {
    width: Option<f32>,
    height: Option<f32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<String>,
    theme_variables: Option<ThemeVariables>,
    place: Option<PlaceOptionsFile>,
    render: Option<RenderConfigFile>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let mut config = Config::default();
    let Some(path) = path else {
        return Ok(config);
    };

    let contents = std::fs::read_to_string(path)?;
    let parsed: ConfigFile = serde_json::from_str(&contents)?;
    apply_config_file(&mut config, parsed);
    Ok(config)
}

fn apply_config_file(config: &mut Config, parsed: ConfigFile) {
    if let Some(theme_name) = parsed.theme.as_deref() {
        if theme_name == "dark" {
            config.theme = Theme::dark();
        } else if theme_name == "light" || theme_name == "default" {
            config.theme = Theme::default_light();
        }
        config.render.background = config.theme.background.clone();
    }

    if let Some(vars) = parsed.theme_variables {
        if let Some(v) = vars.font_family {
            config.theme.font_family = v;
        }
        if let Some(v) = vars.font_size {
            config.theme.font_size = v;
        }
        if let Some(v) = vars.background {
            config.render.background = v.clone();
            config.theme.background = v;
        }
        if let Some(v) = vars.viewport_stroke {
            config.theme.viewport_stroke = v;
        }
        if let Some(v) = vars.anchor_fill {
            config.theme.anchor_fill = v;
        }
        if let Some(v) = vars.anchor_stroke {
            config.theme.anchor_stroke = v;
        }
        if let Some(v) = vars.popup_fill {
            config.theme.popup_fill = v;
        }
        if let Some(v) = vars.popup_stroke {
            config.theme.popup_stroke = v;
        }
        if let Some(v) = vars.text_color {
            config.theme.text_color = v;
        }
    }

    if let Some(place) = parsed.place {
        if let Some(v) = place.reattach_to_body {
            config.place.reattach_to_body = v;
        }
        if let Some(v) = place.compensate_body_margin {
            config.place.compensate_body_margin = v;
        }
        if let Some(v) = place.overlap_borders {
            config.place.overlap_borders = v;
        }
        if let Some(v) = place.clip_to_scroll_ancestors {
            config.place.clip_to_scroll_ancestors = v;
        }
    }

    if let Some(render) = parsed.render {
        if let Some(v) = render.width {
            config.render.width = v;
        }
        if let Some(v) = render.height {
            config.render.height = v;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(json: &str) -> Config {
        let mut config = Config::default();
        let parsed: ConfigFile = serde_json::from_str(json).unwrap();
        apply_config_file(&mut config, parsed);
        config
    }

    #[test]
    fn missing_path_gives_defaults() {
        let config = load_config(None).unwrap();
        assert_eq!(config.place, PlaceOptions::default());
        assert!(config.place.reattach_to_body);
    }

    #[test]
    fn partial_place_section_overrides_only_named_fields() {
        let config = apply(r#"{"place": {"compensateBodyMargin": false}}"#);
        assert!(!config.place.compensate_body_margin);
        assert!(config.place.reattach_to_body);
        assert!(config.place.overlap_borders);
    }

    #[test]
    fn theme_name_and_variables_apply_in_order() {
        let config = apply(r##"{"theme": "dark", "themeVariables": {"popupFill": "#123456"}}"##);
        assert_eq!(config.theme.background, Theme::dark().background);
        assert_eq!(config.render.background, Theme::dark().background);
        assert_eq!(config.theme.popup_fill, "#123456");
    }
}
