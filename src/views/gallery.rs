// ============================================================================
// GALLERY PAGE - Saved pins as cards with a color filter
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{append_child, ElementBuilder};
use crate::state::app_state::AppState;
use crate::state::Route;
use crate::views::{render_color_filter, render_pin_card};

pub fn render_gallery_page(state: &AppState) -> Result<Element, JsValue> {
    let header = ElementBuilder::new("div")?
        .class("gallery-header")
        .child(ElementBuilder::new("h1")?.text("Saved Pins").build())?
        .build();

    let body = ElementBuilder::new("div")?
        .class("gallery-body")
        .id("gallery-body")?
        .child(render_gallery_body(state)?)?
        .build();

    Ok(ElementBuilder::new("div")?
        .class("gallery-page")
        .child(header)?
        .child(body)?
        .build())
}

fn empty_state(title: &str, link: Option<(&str, &Route)>) -> Result<Element, JsValue> {
    let empty = ElementBuilder::new("div")?
        .class("gallery-empty")
        .child(ElementBuilder::new("p")?.text(title).build())?
        .build();
    if let Some((text, route)) = link {
        let anchor = ElementBuilder::new("a")?
            .class("btn btn-primary")
            .attr("href", &route.to_hash())?
            .text(text)
            .build();
        append_child(&empty, &anchor)?;
    }
    Ok(empty)
}

/// Everything under the header; replaced wholesale on gallery updates
pub fn render_gallery_body(state: &AppState) -> Result<Element, JsValue> {
    let content = ElementBuilder::new("div")?.class("gallery-content").build();

    let (loading, total) = (state.gallery.borrow().is_loading(), state.pins.borrow().len());
    if loading && total == 0 {
        let message = ElementBuilder::new("div")?
            .class("gallery-loading")
            .text("Loading pins...")
            .build();
        append_child(&content, &message)?;
        return Ok(content);
    }

    if total == 0 {
        let empty = empty_state("No saved pins yet", Some(("Drop your first pin", &Route::Map)))?;
        append_child(&content, &empty)?;
        return Ok(content);
    }

    let visible = state.gallery.borrow().filter.apply(&state.pins.borrow());

    let filter = render_color_filter(state)?;
    append_child(&content, &filter)?;

    let summary = ElementBuilder::new("div")?
        .class("gallery-summary")
        .text(&format!("Showing {} of {} pins", visible.len(), total))
        .build();
    append_child(&content, &summary)?;

    if visible.is_empty() {
        let empty = empty_state("No pins match the selected colors", None)?;
        append_child(&content, &empty)?;
        return Ok(content);
    }

    let grid = ElementBuilder::new("div")?.class("pin-grid").build();
    for pin in &visible {
        let card = render_pin_card(state, pin)?;
        append_child(&grid, &card)?;
    }
    append_child(&content, &grid)?;
    Ok(content)
}
