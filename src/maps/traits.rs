use serde::Serialize;
use web_sys::Element;

use crate::config::MapConfig;
use crate::models::{Coordinates, Pin, PinColor};

/// Map SDK surface used by the map page
pub trait MapRenderer {
    /// Create the map inside the container with an initial viewport
    fn mount(&mut self, container_id: &str, viewport: Viewport) -> Result<(), MapError>;

    fn set_markers(&mut self, markers: &[MarkerSpec]) -> Result<(), MapError>;

    fn show_popup(&mut self, at: Coordinates, content: &Element) -> Result<(), MapError>;

    fn close_popup(&mut self);

    fn fly_to(&mut self, at: Coordinates, zoom: f64) -> Result<(), MapError>;

    fn is_ready(&self) -> bool;
}

/// Center + zoom
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub center: Coordinates,
    pub zoom: f64,
}

impl Viewport {
    /// Focused on a pin when the route carries one, configured default otherwise
    pub fn initial(config: &MapConfig, focus: Option<Coordinates>) -> Self {
        match focus {
            Some(center) => Self {
                center,
                zoom: config.focus_zoom,
            },
            None => Self {
                center: Coordinates::new(config.default_center_lat, config.default_center_lng),
                zoom: config.default_zoom,
            },
        }
    }
}

/// Marker as sent to the JS glue
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerSpec {
    pub id: String,
    pub lng: f64,
    pub lat: f64,
    pub html: String,
}

impl MarkerSpec {
    pub fn from_pin(pin: &Pin) -> Self {
        Self {
            id: pin.id.clone(),
            lng: pin.longitude,
            lat: pin.latitude,
            html: marker_svg(pin.color),
        }
    }
}

/// Teardrop pin with a white dot, anchored at its bottom tip
pub fn marker_svg(color: PinColor) -> String {
    format!(
        concat!(
            r#"<svg class="pin-marker" width="32" height="40" viewBox="0 0 32 40" fill="none" xmlns="http://www.w3.org/2000/svg">"#,
            r#"<path d="M16 0C7.16 0 0 7.16 0 16C0 28 16 40 16 40C16 40 32 28 32 16C32 7.16 24.84 0 16 0Z" fill="{}"/>"#,
            r#"<circle cx="16" cy="16" r="6" fill="white"/>"#,
            "</svg>"
        ),
        color.hex()
    )
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum MapError {
    #[error("Map is not ready")]
    NotReady,
    #[error("Invalid coordinates")]
    InvalidCoordinates,
    #[error("Map SDK error: {0}")]
    Sdk(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_viewport_prefers_focus() {
        let config = MapConfig::default();
        let default = Viewport::initial(&config, None);
        assert_eq!(default.center, Coordinates::new(37.8, -122.4));
        assert_eq!(default.zoom, 14.0);

        let focus = Coordinates::new(48.85, 2.35);
        let focused = Viewport::initial(&config, Some(focus));
        assert_eq!(focused.center, focus);
        assert_eq!(focused.zoom, config.focus_zoom);
    }

    #[test]
    fn map_error_messages() {
        assert_eq!(MapError::NotReady.to_string(), "Map is not ready");
        assert_eq!(
            MapError::Sdk("style failed".into()).to_string(),
            "Map SDK error: style failed"
        );
    }

    #[test]
    fn marker_uses_pin_color() {
        let svg = marker_svg(PinColor::Blue);
        assert!(svg.contains(r##"fill="#3B82F6""##));
        assert!(svg.starts_with("<svg"));
    }
}
