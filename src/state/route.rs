// ============================================================================
// ROUTE - Hash-based navigation between the map and the gallery
// ============================================================================

use crate::models::Coordinates;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Route {
    /// World map, optionally centered on a pin
    #[default]
    Map,
    MapAt(Coordinates),
    Gallery,
}

const GALLERY_PATH: &str = "/saved-pins";

impl Route {
    /// Parse `location.hash` (with or without the leading '#')
    pub fn from_hash(hash: &str) -> Self {
        let hash = hash.trim_start_matches('#');
        let (path, query) = match hash.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (hash, None),
        };

        match path.trim_end_matches('/') {
            "" => query.and_then(parse_focus).map_or(Route::Map, Route::MapAt),
            GALLERY_PATH => Route::Gallery,
            other => {
                log::warn!("⚠️ [ROUTE] Unknown route '{}', falling back to map", other);
                Route::Map
            }
        }
    }

    pub fn to_hash(&self) -> String {
        match self {
            Route::Map => "#/".to_string(),
            Route::MapAt(c) => format!("#/?lat={}&lng={}", c.latitude, c.longitude),
            Route::Gallery => format!("#{}", GALLERY_PATH),
        }
    }

    pub fn is_map(&self) -> bool {
        matches!(self, Route::Map | Route::MapAt(_))
    }

    pub fn focus(&self) -> Option<Coordinates> {
        match self {
            Route::MapAt(c) => Some(*c),
            _ => None,
        }
    }
}

fn parse_focus(query: &str) -> Option<Coordinates> {
    let mut lat = None;
    let mut lng = None;
    for pair in query.split('&') {
        match pair.split_once('=') {
            Some(("lat", value)) => lat = value.parse::<f64>().ok(),
            Some(("lng", value)) => lng = value.parse::<f64>().ok(),
            _ => {}
        }
    }
    let coordinates = Coordinates::new(lat?, lng?);
    coordinates.is_valid().then_some(coordinates)
}

/// Current route from the browser location
pub fn current_route() -> Route {
    web_sys::window()
        .and_then(|w| w.location().hash().ok())
        .map(|hash| Route::from_hash(&hash))
        .unwrap_or_default()
}

/// Change the hash; the hashchange listener re-renders
pub fn navigate(route: &Route) {
    if let Some(window) = web_sys::window() {
        if let Err(e) = window.location().set_hash(&route.to_hash()) {
            log::error!("❌ [ROUTE] Could not navigate to {:?}: {:?}", route, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_routes() {
        assert_eq!(Route::from_hash(""), Route::Map);
        assert_eq!(Route::from_hash("#/"), Route::Map);
        assert_eq!(Route::from_hash("#/saved-pins"), Route::Gallery);
        assert_eq!(Route::from_hash("#/saved-pins/"), Route::Gallery);
        assert_eq!(Route::from_hash("#/nowhere"), Route::Map);
    }

    #[test]
    fn parses_focus_coordinates() {
        assert_eq!(
            Route::from_hash("#/?lat=37.8&lng=-122.4"),
            Route::MapAt(Coordinates::new(37.8, -122.4))
        );
        assert_eq!(Route::from_hash("#/?lat=99&lng=0"), Route::Map);
        assert_eq!(Route::from_hash("#/?lat=abc&lng=0"), Route::Map);
        assert_eq!(Route::from_hash("#/?lng=1"), Route::Map);
    }

    #[test]
    fn hash_round_trips() {
        for route in [Route::Map, Route::Gallery, Route::MapAt(Coordinates::new(-33.5, 151.25))] {
            assert_eq!(Route::from_hash(&route.to_hash()), route);
        }
    }
}
