// ============================================================================
// PIN CARD - One pin in the gallery grid
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::{Element, MouseEvent};

use crate::dom::{append_child, event_target_within, on_click, set_button_disabled, set_text_content, ElementBuilder};
use crate::models::Pin;
use crate::state::app_state::{AppState, IncrementalUpdate, UpdateType};
use crate::state::route::{navigate, Route};
use crate::viewmodels::gallery_viewmodel::delete_card;
use crate::viewmodels::{CardAction, CardPart};
use crate::views::{render_color_badge, render_pin_image};

const DELETE_SELECTOR: &str = ".pin-card-delete";

pub fn render_pin_card(state: &AppState, pin: &Pin) -> Result<Element, JsValue> {
    let deleting = state.gallery.borrow().is_deleting(&pin.id);

    let card = ElementBuilder::new("div")?
        .class("pin-card")
        .attr("data-pin-id", &pin.id)?
        .build();

    let delete = ElementBuilder::new("button")?
        .class("btn btn-danger pin-card-delete")
        .attr("type", "button")?
        .attr_if(deleting, "disabled", "")?
        .text(if deleting { "Deleting..." } else { "Delete Pin" })
        .build();

    // One listener for the whole card; the delete button must never navigate
    {
        let state = state.clone();
        let pin = pin.clone();
        let button = delete.clone();
        on_click(&card, move |e: MouseEvent| {
            let part = if event_target_within(&e, DELETE_SELECTOR) {
                CardPart::DeleteButton
            } else {
                CardPart::Body
            };
            let action = state.gallery.borrow().card_click(&pin, part);
            match action {
                CardAction::Open(at) => navigate(&Route::MapAt(at)),
                CardAction::Delete(pin_id) => {
                    e.prevent_default();
                    set_button_disabled(&button, true);
                    set_text_content(&button, "Deleting...");

                    let state = state.clone();
                    wasm_bindgen_futures::spawn_local(async move {
                        delete_card(&state.gallery, &state.pins, &*state.store, &pin_id).await;
                        crate::rerender_app_with_type(UpdateType::Incremental(IncrementalUpdate::GalleryBody));
                    });
                }
                CardAction::Ignore => e.prevent_default(),
            }
        })?;
    }

    let body = ElementBuilder::new("div")?
        .class("pin-card-body")
        .child(
            ElementBuilder::new("p")?
                .class("pin-card-description")
                .text(&pin.description)
                .build(),
        )?
        .child(render_color_badge(state, pin.color)?)?
        .child(
            ElementBuilder::new("div")?
                .class("pin-card-coords")
                .text(&pin.coordinates_label())
                .build(),
        )?
        .child(
            ElementBuilder::new("div")?
                .class("pin-card-date")
                .text(&pin.created_label())
                .build(),
        )?
        .child(delete)?
        .build();

    let image = render_pin_image(pin, "pin-card-image")?;
    append_child(&card, &image)?;
    append_child(&card, &body)?;
    Ok(card)
}
