use popup_place::{PlaceOptions, UaFlags, parse_scenario, run_scenario};
use serde::Deserialize;
use wasm_bindgen::prelude::*;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WasmPlaceOptions {
    reattach_to_body: Option<bool>,
    compensate_body_margin: Option<bool>,
    overlap_borders: Option<bool>,
    clip_to_scroll_ancestors: Option<bool>,
}

fn build_place_options(options: WasmPlaceOptions) -> PlaceOptions {
    let mut place = PlaceOptions::default();
    if let Some(v) = options.reattach_to_body {
        place.reattach_to_body = v;
    }
    if let Some(v) = options.compensate_body_margin {
        place.compensate_body_margin = v;
    }
    if let Some(v) = options.overlap_borders {
        place.overlap_borders = v;
    }
    if let Some(v) = options.clip_to_scroll_ancestors {
        place.clip_to_scroll_ancestors = v;
    }
    place
}

fn place_json(scenario_json: &str, options: WasmPlaceOptions) -> Result<String, String> {
    let mut scenario = parse_scenario(scenario_json).map_err(|error| format!("{error:#}"))?;
    let dump = run_scenario(&mut scenario, &build_place_options(options))
        .map_err(|error| error.to_string())?;
    serde_json::to_string(&dump).map_err(|error| error.to_string())
}

/// Run a placement scenario and return the placement dump as JSON.
#[wasm_bindgen]
pub fn place_scenario_json(
    scenario_json: &str,
    options_json: Option<String>,
) -> Result<String, JsValue> {
    let options = if let Some(raw_options) = options_json {
        serde_json::from_str::<WasmPlaceOptions>(&raw_options)
            .map_err(|error| JsValue::from_str(&error.to_string()))?
    } else {
        WasmPlaceOptions::default()
    };
    place_json(scenario_json, options).map_err(|error| JsValue::from_str(&error))
}

#[wasm_bindgen]
pub fn ua_class_names(user_agent: &str, rtl: bool) -> String {
    UaFlags::sniff(user_agent).with_rtl(rtl).class_names().join(" ")
}
