// ============================================================================
// MAP VIEWMODEL - Popup state machine for the map surface
// ============================================================================
// Idle / Drafting / Inspecting are mutually exclusive by construction.
// Remote calls happen outside any RefCell borrow; the list is only touched
// after the call resolves successfully.
// ============================================================================

use std::cell::RefCell;
use std::collections::HashSet;

use crate::models::{Coordinates, DraftPin, Pin, PinCandidate, PinColor};
use crate::services::pin_store::{PinBackend, PinStore};

#[derive(Debug, Clone, PartialEq, Default)]
pub enum MapMode {
    #[default]
    Idle,
    Drafting(DraftPin),
    /// Id of the pin whose popup is open
    Inspecting(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Description,
    ImageUrl,
}

#[derive(Debug, Default)]
pub struct MapViewModel {
    mode: MapMode,
    /// Set by a marker click so the map click from the same gesture is ignored
    marker_click_guard: bool,
    /// Token of the draft currently shown; bumped for every new draft
    draft_token: u64,
    /// Drafts whose create is in flight
    saving: HashSet<u64>,
    /// Pins whose delete is in flight
    deleting: HashSet<String>,
}

impl MapViewModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> &MapMode {
        &self.mode
    }

    /// The shown draft is being saved
    pub fn is_saving(&self) -> bool {
        self.draft().is_some() && self.saving.contains(&self.draft_token)
    }

    /// The inspected pin is being deleted
    pub fn is_deleting(&self) -> bool {
        match &self.mode {
            MapMode::Inspecting(id) => self.deleting.contains(id),
            _ => false,
        }
    }

    pub fn draft(&self) -> Option<&DraftPin> {
        match &self.mode {
            MapMode::Drafting(draft) => Some(draft),
            _ => None,
        }
    }

    /// The inspected pin, if it is still in the list
    pub fn inspected<'a>(&self, pins: &'a [Pin]) -> Option<&'a Pin> {
        match &self.mode {
            MapMode::Inspecting(id) => pins.iter().find(|pin| &pin.id == id),
            _ => None,
        }
    }

    /// Generic map click. Returns whether the mode changed.
    pub fn on_map_click(&mut self, coordinates: Coordinates) -> bool {
        if self.marker_click_guard {
            log::info!("🖱️ [MAP] Map click swallowed (marker click in same gesture)");
            return false;
        }
        if matches!(self.mode, MapMode::Drafting(_)) || !coordinates.is_valid() {
            return false;
        }
        log::info!("📍 [MAP] Drafting new pin at ({}, {})", coordinates.latitude, coordinates.longitude);
        self.draft_token += 1;
        self.mode = MapMode::Drafting(DraftPin::at(coordinates));
        true
    }

    /// Marker click opens the inspect popup and discards any draft
    pub fn on_marker_click(&mut self, pin_id: &str) -> bool {
        self.marker_click_guard = true;
        if self.mode == MapMode::Inspecting(pin_id.to_string()) {
            return false;
        }
        self.mode = MapMode::Inspecting(pin_id.to_string());
        true
    }

    /// Called on the next event turn after a marker click
    pub fn release_click_guard(&mut self) {
        self.marker_click_guard = false;
    }

    pub fn edit_draft(&mut self, field: DraftField, value: &str) {
        if let MapMode::Drafting(draft) = &mut self.mode {
            match field {
                DraftField::Description => draft.description = value.to_string(),
                DraftField::ImageUrl => draft.image_url = value.to_string(),
            }
        }
    }

    pub fn set_draft_color(&mut self, color: PinColor) {
        if let MapMode::Drafting(draft) = &mut self.mode {
            draft.color = color;
        }
    }

    pub fn can_confirm(&self) -> bool {
        !self.is_saving() && self.draft().map_or(false, DraftPin::can_confirm)
    }

    /// Explicit cancel or popup dismissal; never touches the network
    pub fn dismiss(&mut self) -> bool {
        if self.mode == MapMode::Idle {
            return false;
        }
        self.mode = MapMode::Idle;
        true
    }

    /// Marks the shown draft as saving and hands out its token and candidate
    pub fn begin_confirm(&mut self) -> Option<(u64, PinCandidate)> {
        if !self.can_confirm() {
            return None;
        }
        let token = self.draft_token;
        self.saving.insert(token);
        self.draft().map(|draft| (token, draft.to_candidate()))
    }

    /// Applies the create result for draft `token`. Only that draft is closed;
    /// a newer draft opened meanwhile stays. On failure the draft stays for a retry.
    pub fn finish_confirm(&mut self, token: u64, created: Option<Pin>, pins: &mut Vec<Pin>) -> bool {
        self.saving.remove(&token);
        let Some(pin) = created else {
            return false;
        };
        pins.insert(0, pin);
        if self.draft().is_some() && self.draft_token == token {
            self.mode = MapMode::Idle;
        }
        true
    }

    pub fn begin_delete(&mut self) -> Option<String> {
        let MapMode::Inspecting(id) = &self.mode else {
            return None;
        };
        if !self.deleting.insert(id.clone()) {
            return None;
        }
        Some(id.clone())
    }

    /// On failure the inspect popup stays open
    pub fn finish_delete(&mut self, pin_id: &str, removed: bool, pins: &mut Vec<Pin>) -> bool {
        self.deleting.remove(pin_id);
        if !removed {
            return false;
        }
        pins.retain(|pin| pin.id != pin_id);
        if self.mode == MapMode::Inspecting(pin_id.to_string()) {
            self.mode = MapMode::Idle;
        }
        true
    }
}

/// Confirm the current draft against the store
pub async fn confirm_draft<B: PinBackend>(
    vm: &RefCell<MapViewModel>,
    pins: &RefCell<Vec<Pin>>,
    store: &PinStore<B>,
) -> bool {
    let Some((token, candidate)) = vm.borrow_mut().begin_confirm() else {
        return false;
    };
    let created = store.create(candidate).await;
    let mut pins = pins.borrow_mut();
    vm.borrow_mut().finish_confirm(token, created, &mut pins)
}

/// Delete the inspected pin
pub async fn delete_inspected<B: PinBackend>(
    vm: &RefCell<MapViewModel>,
    pins: &RefCell<Vec<Pin>>,
    store: &PinStore<B>,
) -> bool {
    let Some(pin_id) = vm.borrow_mut().begin_delete() else {
        return false;
    };
    let removed = store.remove(&pin_id).await;
    let mut pins = pins.borrow_mut();
    vm.borrow_mut().finish_delete(&pin_id, removed, &mut pins)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::pin_store::testing::MemoryBackend;
    use futures::executor::block_on;
    use pretty_assertions::assert_eq;

    fn here() -> Coordinates {
        Coordinates::new(37.8, -122.4)
    }

    #[test]
    fn map_click_enters_drafting_and_ignores_second_click() {
        let mut vm = MapViewModel::new();
        assert!(vm.on_map_click(here()));
        assert!(!vm.on_map_click(Coordinates::new(1.0, 1.0)));
        assert_eq!(vm.draft().unwrap().coordinates, here());
    }

    #[test]
    fn marker_click_replaces_draft_and_swallows_map_click() {
        let mut vm = MapViewModel::new();
        vm.on_map_click(here());

        assert!(vm.on_marker_click("pin-1"));
        assert!(!vm.on_map_click(here()));
        assert_eq!(vm.mode(), &MapMode::Inspecting("pin-1".to_string()));

        vm.release_click_guard();
        assert!(vm.on_map_click(here()));
        assert!(matches!(vm.mode(), MapMode::Drafting(_)));
    }

    #[test]
    fn confirm_requires_non_blank_description() {
        let backend = MemoryBackend::new();
        let store = PinStore::new(backend.clone());
        let vm = RefCell::new(MapViewModel::new());
        let pins = RefCell::new(Vec::new());

        vm.borrow_mut().on_map_click(here());
        vm.borrow_mut().edit_draft(DraftField::Description, "   ");
        assert!(!vm.borrow().can_confirm());
        assert!(!block_on(confirm_draft(&vm, &pins, &store)));

        assert!(backend.calls().is_empty());
        assert!(pins.borrow().is_empty());
        assert!(matches!(vm.borrow().mode(), MapMode::Drafting(_)));
    }

    #[test]
    fn create_then_delete_scenario() {
        let backend = MemoryBackend::new();
        let store = PinStore::new(backend.clone());
        let vm = RefCell::new(MapViewModel::new());
        let pins = RefCell::new(Vec::new());

        vm.borrow_mut().on_map_click(here());
        vm.borrow_mut().edit_draft(DraftField::Description, "Coffee shop");
        assert!(block_on(confirm_draft(&vm, &pins, &store)));

        assert_eq!(vm.borrow().mode(), &MapMode::Idle);
        assert_eq!(pins.borrow().len(), 1);
        let pin = pins.borrow()[0].clone();
        assert_eq!(pin.description, "Coffee shop");
        assert_eq!(pin.color, PinColor::Red);
        assert_eq!(pin.coordinates(), here());

        vm.borrow_mut().release_click_guard();
        vm.borrow_mut().on_marker_click(&pin.id);
        assert!(block_on(delete_inspected(&vm, &pins, &store)));
        assert!(pins.borrow().is_empty());
        assert_eq!(vm.borrow().mode(), &MapMode::Idle);
    }

    #[test]
    fn new_pin_is_prepended() {
        let backend = MemoryBackend::new();
        let store = PinStore::new(backend.clone());
        let vm = RefCell::new(MapViewModel::new());
        let pins = RefCell::new(Vec::new());

        for name in ["older", "newer"] {
            vm.borrow_mut().on_map_click(here());
            vm.borrow_mut().edit_draft(DraftField::Description, name);
            vm.borrow_mut().set_draft_color(PinColor::Green);
            assert!(block_on(confirm_draft(&vm, &pins, &store)));
        }

        let names: Vec<_> = pins.borrow().iter().map(|p| p.description.clone()).collect();
        assert_eq!(names, vec!["newer", "older"]);
        assert_eq!(pins.borrow()[0].color, PinColor::Green);
    }

    #[test]
    fn failed_create_keeps_draft_for_retry() {
        let backend = MemoryBackend::failing();
        let store = PinStore::new(backend.clone());
        let vm = RefCell::new(MapViewModel::new());
        let pins = RefCell::new(Vec::new());

        vm.borrow_mut().on_map_click(here());
        vm.borrow_mut().edit_draft(DraftField::Description, "Coffee shop");
        assert!(!block_on(confirm_draft(&vm, &pins, &store)));

        assert!(pins.borrow().is_empty());
        assert!(!vm.borrow().is_saving());
        assert_eq!(vm.borrow().draft().unwrap().description, "Coffee shop");
    }

    #[test]
    fn failed_delete_stays_inspecting() {
        let backend = MemoryBackend::failing();
        let store = PinStore::new(backend.clone());
        let vm = RefCell::new(MapViewModel::new());
        let pins = RefCell::new(Vec::new());

        vm.borrow_mut().on_marker_click("pin-9");
        assert!(!block_on(delete_inspected(&vm, &pins, &store)));
        assert_eq!(vm.borrow().mode(), &MapMode::Inspecting("pin-9".to_string()));
        assert_eq!(backend.calls(), vec!["delete pin-9"]);
    }

    fn sample_pin(id: &str) -> Pin {
        Pin {
            id: id.to_string(),
            latitude: 37.8,
            longitude: -122.4,
            description: "Saved".to_string(),
            image_url: None,
            created_at: chrono::Utc::now(),
            color: PinColor::Red,
        }
    }

    #[test]
    fn late_create_keeps_newer_draft() {
        let mut vm = MapViewModel::new();
        let mut pins = Vec::new();

        vm.on_map_click(here());
        vm.edit_draft(DraftField::Description, "first");
        let (token, _) = vm.begin_confirm().unwrap();
        assert!(vm.is_saving());

        vm.dismiss();
        vm.on_map_click(Coordinates::new(40.0, -74.0));
        vm.edit_draft(DraftField::Description, "second in progress");
        assert!(!vm.is_saving());
        assert!(vm.can_confirm());

        assert!(vm.finish_confirm(token, Some(sample_pin("pin-1")), &mut pins));
        assert_eq!(pins.len(), 1);
        assert_eq!(vm.draft().unwrap().description, "second in progress");
        assert!(vm.can_confirm());
    }

    #[test]
    fn overlapping_creates_both_land() {
        let mut vm = MapViewModel::new();
        let mut pins = Vec::new();

        vm.on_map_click(here());
        vm.edit_draft(DraftField::Description, "first");
        let (first, _) = vm.begin_confirm().unwrap();
        assert!(vm.begin_confirm().is_none());

        vm.dismiss();
        vm.on_map_click(here());
        vm.edit_draft(DraftField::Description, "second");
        let (second, _) = vm.begin_confirm().unwrap();
        assert_ne!(first, second);

        vm.finish_confirm(first, Some(sample_pin("pin-1")), &mut pins);
        assert!(vm.is_saving());
        vm.finish_confirm(second, Some(sample_pin("pin-2")), &mut pins);
        assert_eq!(vm.mode(), &MapMode::Idle);
        assert_eq!(pins.len(), 2);
    }

    #[test]
    fn delete_in_flight_is_per_pin() {
        let mut vm = MapViewModel::new();
        let mut pins = vec![sample_pin("pin-x"), sample_pin("pin-y")];

        vm.on_marker_click("pin-x");
        assert_eq!(vm.begin_delete(), Some("pin-x".to_string()));
        assert!(vm.is_deleting());
        assert_eq!(vm.begin_delete(), None);

        vm.on_marker_click("pin-y");
        assert!(!vm.is_deleting());
        assert_eq!(vm.begin_delete(), Some("pin-y".to_string()));

        assert!(vm.finish_delete("pin-x", true, &mut pins));
        assert_eq!(vm.mode(), &MapMode::Inspecting("pin-y".to_string()));
        assert!(vm.is_deleting());
        assert!(vm.finish_delete("pin-y", true, &mut pins));
        assert!(pins.is_empty());
        assert_eq!(vm.mode(), &MapMode::Idle);
    }

    #[test]
    fn cancel_discards_draft_without_network() {
        let backend = MemoryBackend::new();
        let mut vm = MapViewModel::new();
        vm.on_map_click(here());
        vm.edit_draft(DraftField::Description, "half written");

        assert!(vm.dismiss());
        assert_eq!(vm.mode(), &MapMode::Idle);
        assert!(backend.calls().is_empty());
    }
}
