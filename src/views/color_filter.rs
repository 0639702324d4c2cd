// ============================================================================
// COLOR FILTER - Filter chips with inline label editing
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::{Element, Event, KeyboardEvent};

use crate::dom::{event_input_value, on_blur, on_click, on_click_isolated, on_input, on_keydown, ElementBuilder};
use crate::models::PinColor;
use crate::state::app_state::{AppState, IncrementalUpdate, UpdateType};
use crate::viewmodels::gallery_viewmodel::color_counts;

/// DOM id of the label input while a label is being edited
pub const LABEL_EDITOR_ID: &str = "label-editor";

fn refresh() {
    crate::rerender_app_with_type(UpdateType::Incremental(IncrementalUpdate::GalleryBody));
}

fn render_label_editor(state: &AppState, color: PinColor, buffer: &str) -> Result<Element, JsValue> {
    let input = ElementBuilder::new("input")?
        .class("label-editor")
        .id(LABEL_EDITOR_ID)?
        .attr("type", "text")?
        .attr("value", buffer)?
        .attr("aria-label", &format!("Label for {}", color.default_label()))?
        .build();

    {
        let state = state.clone();
        on_input(&input, move |e: Event| {
            state.gallery.borrow_mut().editor.input(&event_input_value(&e));
        })?;
    }
    {
        let state = state.clone();
        on_keydown(&input, move |e: KeyboardEvent| {
            if state.label_key(&e.key()).ended() {
                e.prevent_default();
                refresh();
            }
        })?;
    }
    {
        let state = state.clone();
        on_blur(&input, move |_| {
            if state.label_blur(color).ended() {
                refresh();
            }
        })?;
    }

    Ok(ElementBuilder::new("div")?
        .class("filter-chip editing")
        .attr("style", &format!("border-color: {}", color.hex()))?
        .child(input)?
        .build())
}

fn render_chip(state: &AppState, color: PinColor, count: usize) -> Result<Element, JsValue> {
    let (selected, has_override) = (
        state.gallery.borrow().filter.is_selected(color),
        state.labels.borrow().has_override(color),
    );

    let chip = ElementBuilder::new("div")?
        .class(if selected { "filter-chip selected" } else { "filter-chip" })
        .attr("style", &format!("border-color: {}", color.hex()))?
        .build();

    let toggle = ElementBuilder::new("button")?
        .class("chip-toggle")
        .attr("type", "button")?
        .attr("aria-pressed", if selected { "true" } else { "false" })?
        .child(
            ElementBuilder::new("span")?
                .class("color-dot")
                .attr("style", &format!("background-color: {}", color.hex()))?
                .build(),
        )?
        .child(
            ElementBuilder::new("span")?
                .class("chip-label")
                .text(&state.label(color))
                .build(),
        )?
        .child(
            ElementBuilder::new("span")?
                .class("chip-count")
                .text(&count.to_string())
                .build(),
        )?
        .build();
    {
        let state = state.clone();
        on_click(&toggle, move |_| {
            state.gallery.borrow_mut().filter.toggle(color);
            refresh();
        })?;
    }
    chip.append_child(&toggle)?;

    let edit = ElementBuilder::new("button")?
        .class("chip-action")
        .attr("type", "button")?
        .attr("title", "Rename")?
        .text("✎")
        .build();
    {
        let state = state.clone();
        on_click_isolated(&edit, move || {
            {
                let labels = state.labels.borrow();
                state.gallery.borrow_mut().editor.start(color, &labels);
            }
            refresh();
        })?;
    }
    chip.append_child(&edit)?;

    if has_override {
        let reset = ElementBuilder::new("button")?
            .class("chip-action")
            .attr("type", "button")?
            .attr("title", &format!("Reset to \"{}\"", color.default_label()))?
            .text("↺")
            .build();
        let state = state.clone();
        on_click_isolated(&reset, move || {
            if state.reset_label(color) {
                refresh();
            }
        })?;
        chip.append_child(&reset)?;
    }

    Ok(chip)
}

pub fn render_color_filter(state: &AppState) -> Result<Element, JsValue> {
    let counts = color_counts(&state.pins.borrow());
    let (editing, buffer, active) = {
        let gallery = state.gallery.borrow();
        (
            gallery.editor.editing(),
            gallery.editor.buffer().unwrap_or_default().to_string(),
            gallery.filter.is_active(),
        )
    };

    let header = ElementBuilder::new("div")?
        .class("filter-header")
        .child(
            ElementBuilder::new("span")?
                .class("filter-title")
                .text("Filter by color")
                .build(),
        )?
        .build();

    if active {
        let clear = ElementBuilder::new("button")?
            .class("btn btn-link")
            .attr("type", "button")?
            .text("Clear filters")
            .build();
        let state = state.clone();
        on_click(&clear, move |_| {
            state.gallery.borrow_mut().filter.clear();
            refresh();
        })?;
        header.append_child(&clear)?;
    }

    let chips = ElementBuilder::new("div")?.class("filter-chips").build();
    for (color, count) in counts {
        let chip = if editing == Some(color) {
            render_label_editor(state, color, &buffer)?
        } else {
            render_chip(state, color, count)?
        };
        chips.append_child(&chip)?;
    }

    Ok(ElementBuilder::new("div")?
        .class("color-filter")
        .child(header)?
        .child(chips)?
        .build())
}
