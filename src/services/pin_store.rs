// ============================================================================
// PIN STORE - create/read/delete against the remote pin collection
// ============================================================================
// Failures never escape: they are logged and reported as the no-op result
// (empty list, None, false). Callers only touch local state on success.
// ============================================================================

use std::rc::Rc;

use crate::error::PinStoreError;
use crate::models::pin::{sort_newest_first, NewPinRow, Pin, PinCandidate, PinRow};

/// Seam to the datastore
#[allow(async_fn_in_trait)]
pub trait PinBackend {
    /// All rows ordered by created_at descending
    async fn select_pins(&self) -> Result<Vec<PinRow>, PinStoreError>;

    /// Insert one row and return it as stored
    async fn insert_pin(&self, row: &NewPinRow) -> Result<PinRow, PinStoreError>;

    async fn delete_pin(&self, id: &str) -> Result<(), PinStoreError>;
}

impl<T: PinBackend> PinBackend for Rc<T> {
    async fn select_pins(&self) -> Result<Vec<PinRow>, PinStoreError> {
        (**self).select_pins().await
    }

    async fn insert_pin(&self, row: &NewPinRow) -> Result<PinRow, PinStoreError> {
        (**self).insert_pin(row).await
    }

    async fn delete_pin(&self, id: &str) -> Result<(), PinStoreError> {
        (**self).delete_pin(id).await
    }
}

#[derive(Clone)]
pub struct PinStore<B> {
    backend: B,
}

impl<B: PinBackend> PinStore<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// All pins, newest first. Empty on any failure.
    pub async fn list(&self) -> Vec<Pin> {
        let rows = match self.backend.select_pins().await {
            Ok(rows) => rows,
            Err(e) => {
                log::error!("❌ [PINS] Error fetching pins: {}", e);
                return Vec::new();
            }
        };

        let total = rows.len();
        let mut pins: Vec<Pin> = rows
            .into_iter()
            .filter_map(|row| match Pin::try_from(row) {
                Ok(pin) => Some(pin),
                Err(e) => {
                    log::warn!("⚠️ [PINS] Skipping row: {}", e);
                    None
                }
            })
            .collect();
        sort_newest_first(&mut pins);

        log::info!("📍 [PINS] Loaded {} pins ({} rows)", pins.len(), total);
        pins
    }

    /// Persist a candidate. `None` when the guard fails or the backend errors.
    pub async fn create(&self, candidate: PinCandidate) -> Option<Pin> {
        let Some(row) = candidate.to_row() else {
            log::warn!("⚠️ [PINS] Refusing to create pin without description or with invalid coordinates");
            return None;
        };

        let created = self
            .backend
            .insert_pin(&row)
            .await
            .and_then(Pin::try_from);

        match created {
            Ok(pin) => {
                log::info!("✅ [PINS] Created pin {} at ({}, {})", pin.id, pin.latitude, pin.longitude);
                Some(pin)
            }
            Err(e) => {
                log::error!("❌ [PINS] Error creating pin: {}", e);
                None
            }
        }
    }

    /// Delete by id. Unknown ids are whatever the backend says they are.
    pub async fn remove(&self, id: &str) -> bool {
        match self.backend.delete_pin(id).await {
            Ok(()) => {
                log::info!("🗑️ [PINS] Deleted pin {}", id);
                true
            }
            Err(e) => {
                log::error!("❌ [PINS] Error deleting pin {}: {}", id, e);
                false
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use chrono::{TimeZone, Utc};
    use std::cell::{Cell, RefCell};

    /// In-memory datastore recording every call
    #[derive(Default)]
    pub struct MemoryBackend {
        pub rows: RefCell<Vec<PinRow>>,
        pub calls: RefCell<Vec<String>>,
        pub fail: Cell<bool>,
        next_id: Cell<u64>,
    }

    impl MemoryBackend {
        pub fn new() -> Rc<Self> {
            Rc::new(Self::default())
        }

        pub fn failing() -> Rc<Self> {
            let backend = Self::default();
            backend.fail.set(true);
            Rc::new(backend)
        }

        pub fn calls(&self) -> Vec<String> {
            self.calls.borrow().clone()
        }

        fn check(&self) -> Result<(), PinStoreError> {
            if self.fail.get() {
                Err(PinStoreError::Network("connection refused".to_string()))
            } else {
                Ok(())
            }
        }
    }

    impl PinBackend for MemoryBackend {
        async fn select_pins(&self) -> Result<Vec<PinRow>, PinStoreError> {
            self.calls.borrow_mut().push("select".to_string());
            self.check()?;
            let mut rows = self.rows.borrow().clone();
            rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            Ok(rows)
        }

        async fn insert_pin(&self, row: &NewPinRow) -> Result<PinRow, PinStoreError> {
            self.calls.borrow_mut().push(format!("insert {}", row.description));
            self.check()?;
            let id = self.next_id.get() + 1;
            self.next_id.set(id);
            let stored = PinRow {
                id: format!("pin-{}", id),
                latitude: row.latitude,
                longitude: row.longitude,
                description: row.description.clone(),
                image_url: row.image_url.clone(),
                color: Some(row.color.as_str().to_string()),
                created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
                    + chrono::Duration::seconds(id as i64),
            };
            self.rows.borrow_mut().push(stored.clone());
            Ok(stored)
        }

        async fn delete_pin(&self, id: &str) -> Result<(), PinStoreError> {
            self.calls.borrow_mut().push(format!("delete {}", id));
            self.check()?;
            self.rows.borrow_mut().retain(|row| row.id != id);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::MemoryBackend;
    use super::*;
    use crate::models::{Coordinates, PinColor};
    use futures::executor::block_on;

    fn candidate(description: &str) -> PinCandidate {
        PinCandidate {
            coordinates: Coordinates::new(37.8, -122.4),
            description: description.to_string(),
            image_url: None,
            color: None,
        }
    }

    #[test]
    fn blank_description_never_reaches_backend() {
        let backend = MemoryBackend::new();
        let store = PinStore::new(backend.clone());

        assert_eq!(block_on(store.create(candidate(""))), None);
        assert_eq!(block_on(store.create(candidate("   \t"))), None);
        assert!(backend.calls().is_empty());
    }

    #[test]
    fn create_returns_populated_pin_with_default_color() {
        let backend = MemoryBackend::new();
        let store = PinStore::new(backend.clone());

        let pin = block_on(store.create(candidate("Coffee shop"))).unwrap();
        assert_eq!(pin.id, "pin-1");
        assert_eq!(pin.description, "Coffee shop");
        assert_eq!(pin.color, PinColor::Red);
        assert_eq!(backend.calls(), vec!["insert Coffee shop"]);
    }

    #[test]
    fn list_is_newest_first() {
        let backend = MemoryBackend::new();
        let store = PinStore::new(backend.clone());
        block_on(store.create(candidate("first")));
        block_on(store.create(candidate("second")));

        let pins = block_on(store.list());
        let names: Vec<_> = pins.iter().map(|p| p.description.as_str()).collect();
        assert_eq!(names, vec!["second", "first"]);
    }

    #[test]
    fn failures_become_no_op_results() {
        let backend = MemoryBackend::failing();
        let store = PinStore::new(backend.clone());

        assert!(block_on(store.list()).is_empty());
        assert_eq!(block_on(store.create(candidate("Coffee shop"))), None);
        assert!(!block_on(store.remove("pin-1")));
        assert_eq!(backend.calls().len(), 3);
    }

    #[test]
    fn remove_always_calls_backend() {
        let backend = MemoryBackend::new();
        let store = PinStore::new(backend.clone());

        assert!(block_on(store.remove("does-not-exist")));
        assert_eq!(backend.calls(), vec!["delete does-not-exist"]);
    }

    #[test]
    fn list_skips_invalid_rows() {
        let backend = MemoryBackend::new();
        let store = PinStore::new(backend.clone());
        block_on(store.create(candidate("valid")));
        backend.rows.borrow_mut()[0].latitude = 120.0;
        block_on(store.create(candidate("also valid")));

        let pins = block_on(store.list());
        assert_eq!(pins.len(), 1);
        assert_eq!(pins[0].description, "also valid");
    }
}
