// ============================================================================
// PIN POPUPS - Draft editor and inspect card shown inside the map popup
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::{Element, Event};

use crate::dom::{
    event_input_value, get_element_by_id, on_click, on_input, set_button_disabled,
    set_text_content, ElementBuilder,
};
use crate::models::{DraftPin, Pin, PinColor};
use crate::state::app_state::{AppState, IncrementalUpdate, UpdateType};
use crate::utils::PLACEHOLDER_GLYPH;
use crate::viewmodels::map_viewmodel::{confirm_draft, delete_inspected};
use crate::viewmodels::DraftField;

fn refresh(update: IncrementalUpdate) {
    crate::rerender_app_with_type(UpdateType::Incremental(update));
}

/// Disable a popup button while its request is in flight
fn mark_busy(button_id: &str, text: &str) {
    if let Some(button) = get_element_by_id(button_id) {
        set_button_disabled(&button, true);
        set_text_content(&button, text);
    }
}

fn text_field(
    state: &AppState,
    id: &str,
    placeholder: &str,
    value: &str,
    field: DraftField,
) -> Result<Element, JsValue> {
    let input = ElementBuilder::new("input")?
        .class("popup-input")
        .id(id)?
        .attr("type", "text")?
        .attr("placeholder", placeholder)?
        .attr("value", value)?
        .build();

    let state = state.clone();
    on_input(&input, move |e: Event| {
        let value = event_input_value(&e);
        state.map.borrow_mut().edit_draft(field, &value);
        if field == DraftField::Description {
            refresh(IncrementalUpdate::DraftConfirm);
        }
    })?;
    Ok(input)
}

fn color_picker(state: &AppState, selected: PinColor) -> Result<Element, JsValue> {
    let picker = ElementBuilder::new("div")?.class("color-picker").build();

    for color in PinColor::ALL {
        let class = if color == selected {
            "color-swatch selected"
        } else {
            "color-swatch"
        };
        let swatch = ElementBuilder::new("button")?
            .class(class)
            .attr("type", "button")?
            .attr("title", &state.label(color))?
            .attr("style", &format!("background-color: {}", color.hex()))?
            .build();

        let state = state.clone();
        on_click(&swatch, move |_| {
            state.map.borrow_mut().set_draft_color(color);
            refresh(IncrementalUpdate::MapPopup);
        })?;
        picker.append_child(&swatch)?;
    }
    Ok(picker)
}

pub fn render_draft_popup(state: &AppState, draft: &DraftPin) -> Result<Element, JsValue> {
    let (can_confirm, saving) = {
        let map = state.map.borrow();
        (map.can_confirm(), map.is_saving())
    };

    let title = ElementBuilder::new("h3")?.class("popup-title").text("New Pin").build();
    let coords = ElementBuilder::new("div")?
        .class("popup-coords")
        .text(&format!(
            "{:.4}, {:.4}",
            draft.coordinates.latitude, draft.coordinates.longitude
        ))
        .build();

    let description = text_field(
        state,
        "draft-description",
        "What's here?",
        &draft.description,
        DraftField::Description,
    )?;
    let image = text_field(
        state,
        "draft-image",
        "Image URL (optional)",
        &draft.image_url,
        DraftField::ImageUrl,
    )?;

    let cancel = ElementBuilder::new("button")?
        .class("btn btn-secondary")
        .attr("type", "button")?
        .text("Cancel")
        .build();
    {
        let state = state.clone();
        on_click(&cancel, move |_| {
            if state.map.borrow_mut().dismiss() {
                refresh(IncrementalUpdate::MapPopup);
            }
        })?;
    }

    let confirm = ElementBuilder::new("button")?
        .class("btn btn-primary")
        .id("draft-confirm")?
        .attr("type", "button")?
        .attr_if(!can_confirm, "disabled", "")?
        .text(if saving { "Saving..." } else { "Save Pin" })
        .build();
    {
        let state = state.clone();
        on_click(&confirm, move |_| {
            if !state.map.borrow().can_confirm() {
                return;
            }
            mark_busy("draft-confirm", "Saving...");

            let state = state.clone();
            wasm_bindgen_futures::spawn_local(async move {
                if confirm_draft(&state.map, &state.pins, &*state.store).await {
                    refresh(IncrementalUpdate::MapMarkers);
                }
                refresh(IncrementalUpdate::MapPopup);
            });
        })?;
    }

    let actions = ElementBuilder::new("div")?
        .class("popup-actions")
        .child(cancel)?
        .child(confirm)?
        .build();

    Ok(ElementBuilder::new("div")?
        .class("pin-popup draft")
        .child(title)?
        .child(coords)?
        .child(description)?
        .child(image)?
        .child(color_picker(state, draft.color)?)?
        .child(actions)?
        .build())
}

/// Image or placeholder glyph
pub fn render_pin_image(pin: &Pin, class: &str) -> Result<Element, JsValue> {
    match &pin.image_url {
        Some(url) => Ok(ElementBuilder::new("img")?
            .class(class)
            .attr("src", url)?
            .attr("alt", &pin.description)?
            .build()),
        None => Ok(ElementBuilder::new("div")?
            .class(&format!("{} placeholder", class))
            .text(PLACEHOLDER_GLYPH)
            .build()),
    }
}

/// Color dot + display label
pub fn render_color_badge(state: &AppState, color: PinColor) -> Result<Element, JsValue> {
    let dot = ElementBuilder::new("span")?
        .class("color-dot")
        .attr("style", &format!("background-color: {}", color.hex()))?
        .build();
    let label = ElementBuilder::new("span")?
        .class("color-label")
        .text(&state.label(color))
        .build();
    Ok(ElementBuilder::new("span")?
        .class("color-badge")
        .child(dot)?
        .child(label)?
        .build())
}

pub fn render_inspect_popup(state: &AppState, pin: &Pin) -> Result<Element, JsValue> {
    let deleting = state.map.borrow().is_deleting();

    let description = ElementBuilder::new("p")?
        .class("popup-description")
        .text(&pin.description)
        .build();

    let meta = ElementBuilder::new("div")?
        .class("popup-meta")
        .child(render_color_badge(state, pin.color)?)?
        .child(
            ElementBuilder::new("span")?
                .class("popup-coords")
                .text(&pin.coordinates_label())
                .build(),
        )?
        .child(
            ElementBuilder::new("span")?
                .class("popup-date")
                .text(&pin.created_label())
                .build(),
        )?
        .build();

    let delete = ElementBuilder::new("button")?
        .class("btn btn-danger")
        .id("inspect-delete")?
        .attr("type", "button")?
        .attr_if(deleting, "disabled", "")?
        .text(if deleting { "Deleting..." } else { "Delete Pin" })
        .build();
    {
        let state = state.clone();
        on_click(&delete, move |_| {
            if state.map.borrow().is_deleting() {
                return;
            }
            mark_busy("inspect-delete", "Deleting...");

            let state = state.clone();
            wasm_bindgen_futures::spawn_local(async move {
                if delete_inspected(&state.map, &state.pins, &*state.store).await {
                    refresh(IncrementalUpdate::MapMarkers);
                }
                refresh(IncrementalUpdate::MapPopup);
            });
        })?;
    }

    Ok(ElementBuilder::new("div")?
        .class("pin-popup inspect")
        .child(render_pin_image(pin, "popup-image")?)?
        .child(description)?
        .child(meta)?
        .child(delete)?
        .build())
}
