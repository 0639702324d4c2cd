// ============================================================================
// MAP PAGE - Search bar + Mapbox container
// ============================================================================
// The map itself is mounted by App::render once #map is in the document.
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::{Element, KeyboardEvent};

use crate::config::CONFIG;
use crate::dom::{get_element_by_id, input_value, on_click, on_keydown, ElementBuilder};
use crate::maps::MapRenderer;
use crate::state::app_state::{AppState, IncrementalUpdate, SearchStatus, UpdateType};
use crate::utils::MAP_CONTAINER_ID;

const SEARCH_INPUT_ID: &str = "search-input";

pub fn render_map_page(state: &AppState) -> Result<Element, JsValue> {
    let input = ElementBuilder::new("input")?
        .class("search-input")
        .id(SEARCH_INPUT_ID)?
        .attr("type", "text")?
        .attr("placeholder", "Search for a place...")?
        .build();
    {
        let state = state.clone();
        on_keydown(&input, move |e: KeyboardEvent| {
            if e.key() == "Enter" {
                e.prevent_default();
                run_search(&state);
            }
        })?;
    }

    let button = ElementBuilder::new("button")?
        .class("btn btn-primary search-button")
        .text("Search")
        .build();
    {
        let state = state.clone();
        on_click(&button, move |_| run_search(&state))?;
    }

    let status = ElementBuilder::new("div")?
        .class("search-status")
        .id("search-status")?
        .build();

    let search_bar = ElementBuilder::new("div")?
        .class("search-bar")
        .child(input)?
        .child(button)?
        .child(status)?
        .build();

    let hint = ElementBuilder::new("div")?
        .class("map-hint")
        .text("Click anywhere on the map to drop a pin")
        .build();

    let map_container = ElementBuilder::new("div")?
        .class("map-container")
        .id(MAP_CONTAINER_ID)?
        .build();

    Ok(ElementBuilder::new("div")?
        .class("map-page")
        .child(search_bar)?
        .child(hint)?
        .child(map_container)?
        .build())
}

fn set_search_status(state: &AppState, status: SearchStatus) {
    *state.search_status.borrow_mut() = status;
    crate::rerender_app_with_type(UpdateType::Incremental(IncrementalUpdate::SearchStatus));
}

/// Resolve the query and fly there; pins are untouched
fn run_search(state: &AppState) {
    let query = get_element_by_id(SEARCH_INPUT_ID)
        .map(|input| input_value(&input))
        .unwrap_or_default();
    if query.trim().is_empty() {
        set_search_status(state, SearchStatus::Idle);
        return;
    }

    set_search_status(state, SearchStatus::Searching);

    let state = state.clone();
    wasm_bindgen_futures::spawn_local(async move {
        let status = match state.geocoder.resolve(&query).await {
            Ok(place) => {
                let flown = state
                    .renderer
                    .borrow_mut()
                    .fly_to(place.coordinates, CONFIG.map_config.search_zoom);
                match flown {
                    Ok(()) => SearchStatus::Found(place.name),
                    Err(e) => {
                        log::error!("❌ [SEARCH] Could not move the map: {}", e);
                        SearchStatus::Failed(e.to_string())
                    }
                }
            }
            Err(e) => {
                log::warn!("⚠️ [SEARCH] {}", e);
                SearchStatus::Failed(e.to_string())
            }
        };
        set_search_status(&state, status);
    });
}
