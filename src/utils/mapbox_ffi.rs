// ============================================================================
// MAPBOX FFI - Foreign Function Interface to static/map_glue.js
// ============================================================================
// Wrappers for JS functions only; no state, no logic.
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

#[wasm_bindgen]
extern "C" {
    /// Creates (or recreates) the Mapbox map inside `container_id`
    #[wasm_bindgen(js_name = initPinMap, catch)]
    pub fn init_pin_map(
        container_id: &str,
        access_token: &str,
        style: &str,
        lng: f64,
        lat: f64,
        zoom: f64,
    ) -> Result<(), JsValue>;

    /// Replaces all markers: `[{ id, lng, lat, html }]`
    #[wasm_bindgen(js_name = setPinMarkers, catch)]
    pub fn set_pin_markers(markers_json: &str) -> Result<(), JsValue>;

    #[wasm_bindgen(js_name = showPinPopup, catch)]
    pub fn show_pin_popup(lng: f64, lat: f64, content: &Element) -> Result<(), JsValue>;

    /// Closes the popup without calling back into `handle_popup_closed`
    #[wasm_bindgen(js_name = closePinPopup)]
    pub fn close_pin_popup();

    #[wasm_bindgen(js_name = flyToCoordinate, catch)]
    pub fn fly_to_coordinate(lng: f64, lat: f64, zoom: f64) -> Result<(), JsValue>;
}
