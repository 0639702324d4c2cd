// ============================================================================
// APP VIEW - Navbar + current page
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::ElementBuilder;
use crate::state::app_state::AppState;
use crate::views::{render_gallery_page, render_map_page, render_navbar};

pub fn render_app(state: &AppState) -> Result<Element, JsValue> {
    let route = state.route();

    let page = if route.is_map() {
        render_map_page(state)?
    } else {
        render_gallery_page(state)?
    };

    Ok(ElementBuilder::new("div")?
        .class("app-shell")
        .child(render_navbar(&route)?)?
        .child(page)?
        .build())
}
