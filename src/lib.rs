// ============================================================================
// PIN MAP - Drop pins on a map, browse them in a gallery (pure Rust + DOM)
// ============================================================================
// - Views: functions that build DOM (no logic)
// - ViewModels: UI state + transitions
// - Services: remote pin table, geocoding, local label storage
// - State: shared state with Rc<RefCell>
// - Maps: Mapbox GL JS behind the MapRenderer trait
// ============================================================================

mod app;
mod config;
mod dom;
mod error;
mod maps;
mod models;
mod services;
mod state;
mod utils;
mod viewmodels;
mod views;

use std::cell::RefCell;

use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::app::App;
use crate::config::CONFIG;
use crate::models::Coordinates;
use crate::state::app_state::{AppState, IncrementalUpdate, UpdateType};
use crate::state::route::current_route;

thread_local! {
    static APP: RefCell<Option<App>> = RefCell::new(None);
}

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let level = if CONFIG.is_logging_enabled() {
        log::Level::Info
    } else {
        log::Level::Warn
    };
    wasm_logger::init(wasm_logger::Config::new(level));
    log::info!("🚀 Pin Map - Rust + MVVM");

    let mut app = App::new()?;
    app.render()?;

    APP.with(|app_cell| {
        *app_cell.borrow_mut() = Some(app);
    });

    // Registered once here; never from a render path
    if let Some(win) = web_sys::window() {
        let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |_e: web_sys::Event| {
            on_route_change();
        }) as Box<dyn FnMut(web_sys::Event)>);
        win.add_event_listener_with_callback("hashchange", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    Ok(())
}

/// Shared state handle, without keeping APP borrowed
fn app_state() -> Option<AppState> {
    APP.with(|app_cell| {
        app_cell
            .try_borrow()
            .ok()
            .and_then(|app| app.as_ref().map(|app| app.state().clone()))
    })
}

fn on_route_change() {
    let Some(state) = app_state() else {
        return;
    };
    let route = current_route();
    if route == state.route() {
        return;
    }
    state.set_route(route);
    rerender_app();
}

/// Full re-render of the current route
pub fn rerender_app() {
    rerender_app_with_type(UpdateType::FullRender);
}

pub fn rerender_app_with_type(update_type: UpdateType) {
    APP.with(|app_cell| match update_type {
        UpdateType::Incremental(inc_type) => {
            log::debug!("🔄 [UPDATE] Incremental update: {:?}", inc_type);
            let Ok(app) = app_cell.try_borrow() else {
                log::warn!("⚠️ [UPDATE] App busy, skipping {:?}", inc_type);
                return;
            };
            match app.as_ref() {
                Some(app) => {
                    if let Err(e) = app.update_incremental(inc_type) {
                        log::error!("❌ [UPDATE] {:?} failed: {:?}", inc_type, e);
                    }
                }
                None => log::warn!("⚠️ [UPDATE] App is not initialized"),
            }
        }
        UpdateType::FullRender => {
            log::info!("🔄 [RERENDER] Full render");
            let Ok(mut app) = app_cell.try_borrow_mut() else {
                log::warn!("⚠️ [RERENDER] App busy, skipping full render");
                return;
            };
            match app.as_mut() {
                Some(app) => {
                    if let Err(e) = app.render() {
                        log::error!("❌ [RERENDER] Render failed: {:?}", e);
                    }
                }
                None => log::warn!("⚠️ [RERENDER] App is not initialized"),
            }
        }
    });
}

// ============================================================================
// Callbacks from static/map_glue.js
// ============================================================================

/// Generic click on the map canvas
#[wasm_bindgen]
pub fn handle_map_click(lng: f64, lat: f64) {
    let Some(state) = app_state() else {
        return;
    };
    let changed = state.map.borrow_mut().on_map_click(Coordinates::new(lat, lng));
    if changed {
        rerender_app_with_type(UpdateType::Incremental(IncrementalUpdate::MapPopup));
    }
}

/// Click on a pin marker
#[wasm_bindgen]
pub fn handle_marker_click(pin_id: String) {
    let Some(state) = app_state() else {
        return;
    };
    log::info!("📍 [MAP] Marker clicked: {}", pin_id);
    let changed = state.map.borrow_mut().on_marker_click(&pin_id);

    // A map click from the same gesture arrives in this event turn
    let guard_state = state.clone();
    Timeout::new(0, move || guard_state.map.borrow_mut().release_click_guard()).forget();

    if changed {
        rerender_app_with_type(UpdateType::Incremental(IncrementalUpdate::MapPopup));
    }
}

/// Popup closed by the user (close button); the popup is already gone
#[wasm_bindgen]
pub fn handle_popup_closed() {
    if let Some(state) = app_state() {
        if state.map.borrow_mut().dismiss() {
            log::info!("🗺️ [MAP] Popup dismissed");
        }
    }
}
