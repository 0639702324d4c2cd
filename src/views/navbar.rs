// ============================================================================
// NAVBAR - Links between the map and the gallery
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::ElementBuilder;
use crate::state::Route;

fn nav_link(label: &str, target: &Route, active: bool) -> Result<Element, JsValue> {
    let class = if active { "nav-link active" } else { "nav-link" };
    Ok(ElementBuilder::new("a")?
        .class(class)
        .attr("href", &target.to_hash())?
        .text(label)
        .build())
}

pub fn render_navbar(route: &Route) -> Result<Element, JsValue> {
    let brand = ElementBuilder::new("a")?
        .class("nav-brand")
        .attr("href", &Route::Map.to_hash())?
        .text("📍 Pin Map")
        .build();

    let links = ElementBuilder::new("div")?
        .class("nav-links")
        .child(nav_link("World Map", &Route::Map, route.is_map())?)?
        .child(nav_link("Saved Pins", &Route::Gallery, *route == Route::Gallery)?)?
        .build();

    Ok(ElementBuilder::new("nav")?
        .class("navbar")
        .child(brand)?
        .child(links)?
        .build())
}
