/// localStorage key for the color label overrides
pub const COLOR_LABELS_STORAGE_KEY: &str = "pin_color_labels";

/// DOM id of the Mapbox container
pub const MAP_CONTAINER_ID: &str = "map";

/// Shown on cards and popups for pins without an image
pub const PLACEHOLDER_GLYPH: &str = "📍";
