// ============================================================================
// APP - Root of the DOM tree and dispatcher for incremental updates
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::config::CONFIG;
use crate::dom::incremental::*;
use crate::dom::{append_child, get_element_by_id, set_inner_html};
use crate::maps::{MapRenderer, Viewport};
use crate::state::app_state::{AppState, IncrementalUpdate};
use crate::state::route::current_route;
use crate::utils::MAP_CONTAINER_ID;
use crate::views::render_app;

pub struct App {
    state: AppState,
    root: Element,
}

impl App {
    pub fn new() -> Result<Self, JsValue> {
        let root = get_element_by_id("app").ok_or_else(|| JsValue::from_str("No #app element found"))?;
        let state = AppState::new(current_route());

        log::info!(
            "🏷️ [APP] Loaded {} custom color labels",
            state.labels.borrow().to_stored().len()
        );

        Ok(Self { state, root })
    }

    /// Full render of the current route, then page setup (map mount, pin fetch)
    pub fn render(&mut self) -> Result<(), JsValue> {
        log::info!("🎬 [APP] Rendering {:?}", self.state.route());

        // Sets the loading flag before the gallery is built
        self.state.load_pins();

        set_inner_html(&self.root, "");
        let app_view = render_app(&self.state)?;
        append_child(&self.root, &app_view)?;

        let route = self.state.route();
        if route.is_map() {
            self.mount_map(route.focus())?;
        }
        Ok(())
    }

    /// #map must already be in the document
    fn mount_map(&self, focus: Option<crate::models::Coordinates>) -> Result<(), JsValue> {
        let viewport = Viewport::initial(&CONFIG.map_config, focus);
        self.state
            .renderer
            .borrow_mut()
            .mount(MAP_CONTAINER_ID, viewport)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        // Pins already in memory show up before the refetch lands
        update_map_markers(&self.state)?;
        update_map_popup(&self.state)
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Refresh a single region of the page
    pub fn update_incremental(&self, update_type: IncrementalUpdate) -> Result<(), JsValue> {
        match update_type {
            IncrementalUpdate::MapMarkers => update_map_markers(&self.state),
            IncrementalUpdate::MapPopup => update_map_popup(&self.state),
            IncrementalUpdate::DraftConfirm => update_draft_confirm(&self.state),
            IncrementalUpdate::SearchStatus => update_search_status(&self.state),
            IncrementalUpdate::GalleryBody => update_gallery_body(&self.state),
        }
    }
}
