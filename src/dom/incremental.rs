// ============================================================================
// INCREMENTAL DOM UPDATES - Refresh one region without a full render
// ============================================================================
// Each function is a no-op when its region is not on screen (other page).
// ============================================================================

use wasm_bindgen::prelude::*;

use crate::dom::{
    focus, get_element_by_id, replace_children, set_button_disabled, set_class_name, set_text_content,
};
use crate::maps::{MapRenderer, MarkerSpec};
use crate::state::app_state::{AppState, SearchStatus};
use crate::viewmodels::MapMode;
use crate::views::{render_draft_popup, render_gallery_body, render_inspect_popup, LABEL_EDITOR_ID};

fn map_error(e: crate::maps::MapError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Push the current pin list to the marker layer
pub fn update_map_markers(state: &AppState) -> Result<(), JsValue> {
    if !state.route().is_map() {
        return Ok(());
    }
    let markers: Vec<MarkerSpec> = state.pins.borrow().iter().map(MarkerSpec::from_pin).collect();
    let mut renderer = state.renderer.borrow_mut();
    if !renderer.is_ready() {
        log::warn!("⚠️ [MAP] Markers skipped, map not mounted");
        return Ok(());
    }
    renderer.set_markers(&markers).map_err(map_error)
}

/// Show the popup that matches the map mode, or close it
pub fn update_map_popup(state: &AppState) -> Result<(), JsValue> {
    if !state.route().is_map() {
        return Ok(());
    }

    let mode = state.map.borrow().mode().clone();
    let content = match &mode {
        MapMode::Idle => None,
        MapMode::Drafting(draft) => Some((draft.coordinates, render_draft_popup(state, draft)?)),
        MapMode::Inspecting(id) => {
            let pin = state.map.borrow().inspected(&state.pins.borrow()).cloned();
            match pin {
                Some(pin) => Some((pin.coordinates(), render_inspect_popup(state, &pin)?)),
                None => {
                    log::warn!("⚠️ [MAP] Inspected pin {} is gone", id);
                    state.map.borrow_mut().dismiss();
                    None
                }
            }
        }
    };

    let mut renderer = state.renderer.borrow_mut();
    match content {
        Some((at, element)) => renderer.show_popup(at, &element).map_err(map_error),
        None => {
            renderer.close_popup();
            Ok(())
        }
    }
}

/// Confirm button of the draft popup: disabled while invalid or saving
pub fn update_draft_confirm(state: &AppState) -> Result<(), JsValue> {
    let Some(button) = get_element_by_id("draft-confirm") else {
        return Ok(());
    };
    let (enabled, saving) = {
        let map = state.map.borrow();
        (map.can_confirm(), map.is_saving())
    };
    set_button_disabled(&button, !enabled);
    set_text_content(&button, if saving { "Saving..." } else { "Save Pin" });
    Ok(())
}

pub fn update_search_status(state: &AppState) -> Result<(), JsValue> {
    let Some(status_el) = get_element_by_id("search-status") else {
        return Ok(());
    };
    let (class, text) = match &*state.search_status.borrow() {
        SearchStatus::Idle => ("search-status", String::new()),
        SearchStatus::Searching => ("search-status", "Searching...".to_string()),
        SearchStatus::Found(name) => ("search-status found", name.clone()),
        SearchStatus::Failed(message) => ("search-status error", message.clone()),
    };
    set_class_name(&status_el, class);
    set_text_content(&status_el, &text);
    Ok(())
}

/// Filter bar + card grid of the gallery
pub fn update_gallery_body(state: &AppState) -> Result<(), JsValue> {
    let Some(container) = get_element_by_id("gallery-body") else {
        return Ok(());
    };
    let body = render_gallery_body(state)?;
    replace_children(&container, &body)?;

    if let Some(editor) = get_element_by_id(LABEL_EDITOR_ID) {
        focus(&editor);
    }
    Ok(())
}
