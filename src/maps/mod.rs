// Map rendering behind a trait; the browser build talks to Mapbox GL JS

pub mod traits;
pub mod web;

pub use traits::{MapError, MapRenderer, MarkerSpec, Viewport};
pub use web::WebMapRenderer;
