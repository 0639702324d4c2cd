// ============================================================================
// APP STATE - Global application state
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use crate::maps::WebMapRenderer;
use crate::models::{ColorLabels, Pin, PinColor};
use crate::services::{GeocodingClient, LabelStorage, RemotePinStore, SupabaseClient};
use crate::state::route::Route;
use crate::viewmodels::{EditOutcome, GalleryViewModel, MapViewModel};

/// Kind of DOM update
#[derive(Clone, Debug)]
pub enum UpdateType {
    /// Only the listed region
    Incremental(IncrementalUpdate),
    /// Navbar + page (route changes)
    FullRender,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IncrementalUpdate {
    /// Marker layer from the pin list
    MapMarkers,
    /// Popup from the map mode
    MapPopup,
    /// Enabled state of the draft confirm button
    DraftConfirm,
    /// Message under the search box
    SearchStatus,
    /// Filter bar + card grid
    GalleryBody,
}

#[derive(Clone, Debug, PartialEq, Default)]
pub enum SearchStatus {
    #[default]
    Idle,
    Searching,
    Found(String),
    Failed(String),
}

#[derive(Clone)]
pub struct AppState {
    pub route: Rc<RefCell<Route>>,

    // Data
    pub pins: Rc<RefCell<Vec<Pin>>>,
    pub pins_loaded: Rc<RefCell<bool>>,
    pub labels: Rc<RefCell<ColorLabels>>,

    // Page viewmodels
    pub map: Rc<RefCell<MapViewModel>>,
    pub gallery: Rc<RefCell<GalleryViewModel>>,
    pub search_status: Rc<RefCell<SearchStatus>>,

    // Collaborators
    pub renderer: Rc<RefCell<WebMapRenderer>>,
    pub store: Rc<RemotePinStore>,
    pub geocoder: GeocodingClient,
    label_storage: LabelStorage,
}

impl AppState {
    pub fn new(route: Route) -> Self {
        let label_storage = LabelStorage::browser();
        let labels = label_storage.load();

        Self {
            route: Rc::new(RefCell::new(route)),
            pins: Rc::new(RefCell::new(Vec::new())),
            pins_loaded: Rc::new(RefCell::new(false)),
            labels: Rc::new(RefCell::new(labels)),
            map: Rc::new(RefCell::new(MapViewModel::new())),
            gallery: Rc::new(RefCell::new(GalleryViewModel::new())),
            search_status: Rc::new(RefCell::new(SearchStatus::Idle)),
            renderer: Rc::new(RefCell::new(WebMapRenderer::new())),
            store: Rc::new(RemotePinStore::new(SupabaseClient::new())),
            geocoder: GeocodingClient::new(),
            label_storage,
        }
    }

    pub fn route(&self) -> Route {
        self.route.borrow().clone()
    }

    /// Switch page; transient UI state of the previous page is dropped
    pub fn set_route(&self, route: Route) {
        log::info!("🧭 [ROUTE] {:?}", route);
        *self.route.borrow_mut() = route;
        self.map.borrow_mut().dismiss();
        self.gallery.borrow_mut().editor.cancel();
        *self.search_status.borrow_mut() = SearchStatus::Idle;
    }

    /// Display label for a color (override or default)
    pub fn label(&self, color: PinColor) -> String {
        self.labels.borrow().label(color).to_string()
    }

    /// Fetch all pins and refresh whichever page is showing
    pub fn load_pins(&self) {
        if !*self.pins_loaded.borrow() {
            self.gallery.borrow_mut().set_loading(true);
        }

        let state = self.clone();
        wasm_bindgen_futures::spawn_local(async move {
            let pins = state.store.list().await;
            *state.pins.borrow_mut() = pins;
            *state.pins_loaded.borrow_mut() = true;
            state.gallery.borrow_mut().set_loading(false);

            let update = if state.route().is_map() {
                IncrementalUpdate::MapMarkers
            } else {
                IncrementalUpdate::GalleryBody
            };
            crate::rerender_app_with_type(UpdateType::Incremental(update));
        });
    }

    /// Write the overrides back to localStorage
    pub fn persist_labels(&self) {
        if let Err(e) = self.label_storage.save(&self.labels.borrow()) {
            log::error!("❌ [LABELS] Could not persist labels: {}", e);
        }
    }

    /// Key pressed in the inline label editor
    pub fn label_key(&self, key: &str) -> EditOutcome {
        let outcome = {
            let mut labels = self.labels.borrow_mut();
            self.gallery.borrow_mut().editor.key(key, &mut labels)
        };
        self.after_label_edit(outcome)
    }

    /// Label editor for `color` lost focus
    pub fn label_blur(&self, color: PinColor) -> EditOutcome {
        let outcome = {
            let mut labels = self.labels.borrow_mut();
            self.gallery.borrow_mut().editor.blur(color, &mut labels)
        };
        self.after_label_edit(outcome)
    }

    fn after_label_edit(&self, outcome: EditOutcome) -> EditOutcome {
        if outcome.changed() {
            self.persist_labels();
        }
        outcome
    }

    pub fn reset_label(&self, color: PinColor) -> bool {
        let changed = self.labels.borrow_mut().clear(color);
        if changed {
            self.persist_labels();
        }
        changed
    }
}
