use web_sys::Element;

use super::{MapError, MapRenderer, MarkerSpec, Viewport};
use crate::config::CONFIG;
use crate::models::Coordinates;
use crate::utils::mapbox_ffi;

/// Mapbox GL JS renderer driven through the JS glue
#[derive(Default)]
pub struct WebMapRenderer {
    mounted: bool,
}

impl WebMapRenderer {
    pub fn new() -> Self {
        Self::default()
    }
}

fn sdk_error(e: wasm_bindgen::JsValue) -> MapError {
    MapError::Sdk(format!("{:?}", e))
}

impl MapRenderer for WebMapRenderer {
    fn mount(&mut self, container_id: &str, viewport: Viewport) -> Result<(), MapError> {
        if !viewport.center.is_valid() {
            return Err(MapError::InvalidCoordinates);
        }
        log::info!(
            "🗺️ [MAP] Mounting map at ({}, {}) zoom {}",
            viewport.center.latitude, viewport.center.longitude, viewport.zoom
        );
        mapbox_ffi::init_pin_map(
            container_id,
            CONFIG.mapbox_token(),
            &CONFIG.map_config.style,
            viewport.center.longitude,
            viewport.center.latitude,
            viewport.zoom,
        )
        .map_err(sdk_error)?;
        self.mounted = true;
        Ok(())
    }

    fn set_markers(&mut self, markers: &[MarkerSpec]) -> Result<(), MapError> {
        if !self.is_ready() {
            return Err(MapError::NotReady);
        }
        let json = serde_json::to_string(markers).map_err(|e| MapError::Sdk(e.to_string()))?;
        log::info!("📍 [MAP] Rendering {} markers", markers.len());
        mapbox_ffi::set_pin_markers(&json).map_err(sdk_error)
    }

    fn show_popup(&mut self, at: Coordinates, content: &Element) -> Result<(), MapError> {
        if !self.is_ready() {
            return Err(MapError::NotReady);
        }
        mapbox_ffi::show_pin_popup(at.longitude, at.latitude, content).map_err(sdk_error)
    }

    fn close_popup(&mut self) {
        if self.mounted {
            mapbox_ffi::close_pin_popup();
        }
    }

    fn fly_to(&mut self, at: Coordinates, zoom: f64) -> Result<(), MapError> {
        if !at.is_valid() {
            return Err(MapError::InvalidCoordinates);
        }
        if !self.is_ready() {
            return Err(MapError::NotReady);
        }
        mapbox_ffi::fly_to_coordinate(at.longitude, at.latitude, zoom).map_err(sdk_error)
    }

    /// Markers and popups sent before the style loads are queued by the JS side
    fn is_ready(&self) -> bool {
        self.mounted
    }
}
