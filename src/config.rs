use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub supabase_url: String,
    pub supabase_anon_key: String,
    pub pins_table: String,
    pub mapbox_access_token: String,
    pub enable_logging: bool,
    pub map_config: MapConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            supabase_url: "http://localhost:54321".to_string(),
            supabase_anon_key: String::new(),
            pins_table: "pins".to_string(),
            mapbox_access_token: String::new(),
            enable_logging: true,
            map_config: MapConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapConfig {
    pub style: String,
    pub default_center_lat: f64,
    pub default_center_lng: f64,
    pub default_zoom: f64,
    /// Zoom used when opening the map on a pin from the gallery
    pub focus_zoom: f64,
    /// Zoom used after a location search
    pub search_zoom: f64,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            style: "mapbox://styles/mapbox/standard".to_string(),
            default_center_lat: 37.8,
            default_center_lng: -122.4,
            default_zoom: 14.0,
            focus_zoom: 15.0,
            search_zoom: 13.0,
        }
    }
}

impl AppConfig {
    /// Load configuration from compile-time environment variables (see build.rs)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let map_defaults = MapConfig::default();

        Self {
            supabase_url: option_env!("SUPABASE_URL")
                .map(|s| s.trim_end_matches('/').to_string())
                .unwrap_or(defaults.supabase_url),
            supabase_anon_key: option_env!("SUPABASE_ANON_KEY")
                .unwrap_or("")
                .to_string(),
            pins_table: option_env!("PINS_TABLE")
                .unwrap_or("pins")
                .to_string(),
            mapbox_access_token: option_env!("MAPBOX_ACCESS_TOKEN")
                .unwrap_or("")
                .to_string(),
            enable_logging: parse_or(option_env!("ENABLE_LOGGING"), true),
            map_config: MapConfig {
                style: option_env!("MAPBOX_STYLE")
                    .map(str::to_string)
                    .unwrap_or(map_defaults.style),
                default_center_lat: parse_or(option_env!("DEFAULT_MAP_CENTER_LAT"), map_defaults.default_center_lat),
                default_center_lng: parse_or(option_env!("DEFAULT_MAP_CENTER_LNG"), map_defaults.default_center_lng),
                default_zoom: parse_or(option_env!("DEFAULT_MAP_ZOOM"), map_defaults.default_zoom),
                focus_zoom: parse_or(option_env!("FOCUS_ZOOM"), map_defaults.focus_zoom),
                search_zoom: parse_or(option_env!("SEARCH_ZOOM"), map_defaults.search_zoom),
            },
        }
    }

    /// Base URL of the PostgREST table holding pins
    pub fn pins_endpoint(&self) -> String {
        format!("{}/rest/v1/{}", self.supabase_url, self.pins_table)
    }

    pub fn is_logging_enabled(&self) -> bool {
        self.enable_logging
    }

    pub fn mapbox_token(&self) -> &str {
        &self.mapbox_access_token
    }
}

fn parse_or<T: std::str::FromStr>(raw: Option<&str>, default: T) -> T {
    raw.and_then(|value| value.trim().parse().ok()).unwrap_or(default)
}

lazy_static::lazy_static! {
    pub static ref CONFIG: AppConfig = AppConfig::from_env();
}
