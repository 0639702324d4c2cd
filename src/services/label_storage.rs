// ============================================================================
// LABEL STORAGE - Color label overrides in client-local storage
// ============================================================================

use std::collections::HashMap;

use crate::error::StorageError;
use crate::models::ColorLabels;
use crate::utils::constants::COLOR_LABELS_STORAGE_KEY;
use crate::utils::storage::{load_from_storage, save_to_storage, BrowserStorage, KeyValueStore};

#[derive(Clone)]
pub struct LabelStorage<S = BrowserStorage> {
    store: S,
}

impl LabelStorage<BrowserStorage> {
    pub fn browser() -> Self {
        Self::new(BrowserStorage)
    }
}

impl<S: KeyValueStore> LabelStorage<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Read once at startup; missing or corrupt data yields no overrides
    pub fn load(&self) -> ColorLabels {
        let labels = load_from_storage::<HashMap<String, String>>(&self.store, COLOR_LABELS_STORAGE_KEY)
            .map(ColorLabels::from_stored)
            .unwrap_or_default();
        log::info!("🎨 [LABELS] Loaded {} custom labels", labels.to_stored().len());
        labels
    }

    /// Written on every change; no overrides left removes the entry
    pub fn save(&self, labels: &ColorLabels) -> Result<(), StorageError> {
        let stored = labels.to_stored();
        if stored.is_empty() {
            return self.store.remove(COLOR_LABELS_STORAGE_KEY);
        }
        save_to_storage(&self.store, COLOR_LABELS_STORAGE_KEY, &stored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PinColor;
    use crate::utils::storage::testing::MemoryStorage;

    #[test]
    fn custom_label_survives_reload() {
        let backing = MemoryStorage::default();

        let storage = LabelStorage::new(backing.clone());
        let mut labels = storage.load();
        labels.set(PinColor::Blue, "Favorites");
        storage.save(&labels).unwrap();

        let reloaded = LabelStorage::new(backing).load();
        assert_eq!(reloaded.label(PinColor::Blue), "Favorites");
        assert_eq!(reloaded.label(PinColor::Red), "Red");
    }

    #[test]
    fn clearing_last_override_removes_entry() {
        let backing = MemoryStorage::default();
        let storage = LabelStorage::new(backing.clone());

        let mut labels = ColorLabels::default();
        labels.set(PinColor::Green, "Parks");
        storage.save(&labels).unwrap();
        assert!(backing.read(COLOR_LABELS_STORAGE_KEY).is_some());

        labels.clear(PinColor::Green);
        storage.save(&labels).unwrap();
        assert_eq!(backing.read(COLOR_LABELS_STORAGE_KEY), None);
        assert_eq!(LabelStorage::new(backing).load().label(PinColor::Green), "Green");
    }

    #[test]
    fn corrupt_entry_loads_defaults() {
        let backing = MemoryStorage::default();
        backing.write(COLOR_LABELS_STORAGE_KEY, "[1, 2").unwrap();

        let labels = LabelStorage::new(backing).load();
        assert_eq!(labels, ColorLabels::default());
    }
}
