// ============================================================================
// GALLERY VIEWMODEL - Color filter + custom label editing
// ============================================================================

use std::cell::RefCell;
use std::collections::{BTreeSet, HashSet};

use crate::models::{ColorLabels, Coordinates, Pin, PinColor};
use crate::services::pin_store::{PinBackend, PinStore};

/// Pins whose color is selected; an empty selection shows everything
pub fn filtered(pins: &[Pin], selected: &BTreeSet<PinColor>) -> Vec<Pin> {
    if selected.is_empty() {
        return pins.to_vec();
    }
    pins.iter()
        .filter(|pin| selected.contains(&pin.color))
        .cloned()
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColorFilter {
    selected: BTreeSet<PinColor>,
}

impl ColorFilter {
    pub fn toggle(&mut self, color: PinColor) {
        if !self.selected.remove(&color) {
            self.selected.insert(color);
        }
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    pub fn is_selected(&self, color: PinColor) -> bool {
        self.selected.contains(&color)
    }

    pub fn is_active(&self) -> bool {
        !self.selected.is_empty()
    }

    pub fn apply(&self, pins: &[Pin]) -> Vec<Pin> {
        filtered(pins, &self.selected)
    }
}

/// Number of loaded pins per color, for the filter chips
pub fn color_counts(pins: &[Pin]) -> Vec<(PinColor, usize)> {
    PinColor::ALL
        .into_iter()
        .map(|color| (color, pins.iter().filter(|pin| pin.color == color).count()))
        .collect()
}

/// What a key press means while editing a label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelKey {
    Commit,
    Cancel,
    Other,
}

impl LabelKey {
    pub fn from_key(key: &str) -> Self {
        match key {
            "Enter" => LabelKey::Commit,
            "Escape" | "Esc" => LabelKey::Cancel,
            _ => LabelKey::Other,
        }
    }
}

/// How an editor event ended, if it did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    /// Nothing to end (no session, other color, plain key)
    Ignored,
    Committed { changed: bool },
    Cancelled,
}

impl EditOutcome {
    pub fn ended(self) -> bool {
        self != EditOutcome::Ignored
    }

    pub fn changed(self) -> bool {
        self == EditOutcome::Committed { changed: true }
    }
}

/// Inline edit session for one color's label
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LabelEditor {
    editing: Option<(PinColor, String)>,
}

impl LabelEditor {
    /// Seed the buffer with the label currently shown
    pub fn start(&mut self, color: PinColor, labels: &ColorLabels) {
        self.editing = Some((color, labels.label(color).to_string()));
    }

    pub fn editing(&self) -> Option<PinColor> {
        self.editing.as_ref().map(|(color, _)| *color)
    }

    pub fn buffer(&self) -> Option<&str> {
        self.editing.as_ref().map(|(_, text)| text.as_str())
    }

    pub fn input(&mut self, text: &str) {
        if let Some((_, buffer)) = &mut self.editing {
            *buffer = text.to_string();
        }
    }

    /// Ends the session; blank input leaves the previous label.
    /// Returns whether the labels changed.
    pub fn commit(&mut self, labels: &mut ColorLabels) -> bool {
        match self.editing.take() {
            Some((color, text)) => labels.set(color, &text),
            None => false,
        }
    }

    pub fn cancel(&mut self) {
        self.editing = None;
    }

    /// Enter commits, Escape cancels, anything else is typing
    pub fn key(&mut self, key: &str, labels: &mut ColorLabels) -> EditOutcome {
        if self.editing.is_none() {
            return EditOutcome::Ignored;
        }
        match LabelKey::from_key(key) {
            LabelKey::Commit => EditOutcome::Committed {
                changed: self.commit(labels),
            },
            LabelKey::Cancel => {
                self.cancel();
                EditOutcome::Cancelled
            }
            LabelKey::Other => EditOutcome::Ignored,
        }
    }

    /// The input for `color` lost focus. Commits only if that session is still
    /// open, so the blur that follows Enter or Escape is a no-op.
    pub fn blur(&mut self, color: PinColor, labels: &mut ColorLabels) -> EditOutcome {
        if self.editing() != Some(color) {
            return EditOutcome::Ignored;
        }
        EditOutcome::Committed {
            changed: self.commit(labels),
        }
    }
}

/// Part of a card that received a click
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardPart {
    Body,
    DeleteButton,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CardAction {
    /// Open the map centered on the pin
    Open(Coordinates),
    Delete(String),
    /// Delete already in flight for this card
    Ignore,
}

#[derive(Debug, Default)]
pub struct GalleryViewModel {
    pub filter: ColorFilter,
    pub editor: LabelEditor,
    loading: bool,
    deleting: HashSet<String>,
}

impl GalleryViewModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub fn is_deleting(&self, pin_id: &str) -> bool {
        self.deleting.contains(pin_id)
    }

    /// The delete button never navigates; the rest of the card does
    pub fn card_click(&self, pin: &Pin, part: CardPart) -> CardAction {
        match part {
            CardPart::Body => CardAction::Open(pin.coordinates()),
            CardPart::DeleteButton if self.is_deleting(&pin.id) => CardAction::Ignore,
            CardPart::DeleteButton => CardAction::Delete(pin.id.clone()),
        }
    }

    fn begin_delete(&mut self, pin_id: &str) -> bool {
        self.deleting.insert(pin_id.to_string())
    }

    fn finish_delete(&mut self, pin_id: &str) {
        self.deleting.remove(pin_id);
    }
}

/// Delete from a card. The remote call is made even for ids not in the list.
pub async fn delete_card<B: PinBackend>(
    vm: &RefCell<GalleryViewModel>,
    pins: &RefCell<Vec<Pin>>,
    store: &PinStore<B>,
    pin_id: &str,
) -> bool {
    if !vm.borrow_mut().begin_delete(pin_id) {
        return false;
    }
    let removed = store.remove(pin_id).await;
    vm.borrow_mut().finish_delete(pin_id);
    if removed {
        pins.borrow_mut().retain(|pin| pin.id != pin_id);
    }
    removed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Coordinates, PinCandidate};
    use crate::services::pin_store::testing::MemoryBackend;
    use futures::executor::block_on;
    use pretty_assertions::assert_eq;

    fn seeded(colors: &[(&str, PinColor)]) -> (std::rc::Rc<MemoryBackend>, PinStore<std::rc::Rc<MemoryBackend>>, Vec<Pin>) {
        let backend = MemoryBackend::new();
        let store = PinStore::new(backend.clone());
        for (name, color) in colors {
            block_on(store.create(PinCandidate {
                coordinates: Coordinates::new(10.0, 20.0),
                description: name.to_string(),
                image_url: None,
                color: Some(*color),
            }));
        }
        let pins = block_on(store.list());
        (backend, store, pins)
    }

    fn names(pins: &[Pin]) -> Vec<String> {
        pins.iter().map(|p| p.description.clone()).collect()
    }

    #[test]
    fn empty_filter_is_identity() {
        let (_, _, pins) = seeded(&[("a", PinColor::Red), ("b", PinColor::Blue)]);
        assert_eq!(filtered(&pins, &BTreeSet::new()), pins);
    }

    #[test]
    fn toggling_twice_restores_selection() {
        let mut filter = ColorFilter::default();
        filter.toggle(PinColor::Green);
        let before = filter.clone();

        filter.toggle(PinColor::Blue);
        filter.toggle(PinColor::Blue);
        assert_eq!(filter, before);

        filter.toggle(PinColor::Green);
        assert!(!filter.is_active());
    }

    #[test]
    fn blue_filter_then_clear_scenario() {
        let (_, _, pins) = seeded(&[("red one", PinColor::Red), ("blue one", PinColor::Blue)]);
        let mut filter = ColorFilter::default();

        filter.toggle(PinColor::Blue);
        assert_eq!(names(&filter.apply(&pins)), vec!["blue one"]);

        filter.clear();
        assert_eq!(filter.apply(&pins).len(), 2);
    }

    #[test]
    fn counts_cover_every_color() {
        let (_, _, pins) = seeded(&[("a", PinColor::Red), ("b", PinColor::Red), ("c", PinColor::Orange)]);
        let counts = color_counts(&pins);
        assert_eq!(counts.len(), PinColor::ALL.len());
        assert_eq!(counts[0], (PinColor::Red, 2));
        assert_eq!(counts[5], (PinColor::Orange, 1));
        assert_eq!(counts[1], (PinColor::Blue, 0));
    }

    #[test]
    fn label_editor_commit_and_cancel() {
        let mut labels = ColorLabels::default();
        let mut editor = LabelEditor::default();

        editor.start(PinColor::Blue, &labels);
        assert_eq!(editor.buffer(), Some("Blue"));
        editor.input("Work");
        assert!(editor.commit(&mut labels));
        assert_eq!(labels.label(PinColor::Blue), "Work");
        assert_eq!(editor.editing(), None);

        editor.start(PinColor::Blue, &labels);
        editor.input("Something else");
        editor.cancel();
        assert_eq!(labels.label(PinColor::Blue), "Work");

        editor.start(PinColor::Blue, &labels);
        editor.input("   ");
        assert!(!editor.commit(&mut labels));
        assert_eq!(labels.label(PinColor::Blue), "Work");
    }

    #[test]
    fn blur_after_enter_or_escape_does_not_commit_again() {
        let mut labels = ColorLabels::default();
        let mut editor = LabelEditor::default();

        editor.start(PinColor::Blue, &labels);
        editor.input("Work");
        assert_eq!(editor.key("Enter", &mut labels), EditOutcome::Committed { changed: true });
        assert_eq!(editor.blur(PinColor::Blue, &mut labels), EditOutcome::Ignored);
        assert_eq!(labels.label(PinColor::Blue), "Work");

        editor.start(PinColor::Blue, &labels);
        editor.input("Discarded");
        assert_eq!(editor.key("Escape", &mut labels), EditOutcome::Cancelled);
        assert_eq!(editor.blur(PinColor::Blue, &mut labels), EditOutcome::Ignored);
        assert_eq!(labels.label(PinColor::Blue), "Work");
    }

    #[test]
    fn blur_commits_only_the_open_session() {
        let mut labels = ColorLabels::default();
        let mut editor = LabelEditor::default();

        editor.start(PinColor::Green, &labels);
        editor.input("Parks");
        assert_eq!(editor.key("a", &mut labels), EditOutcome::Ignored);
        assert_eq!(editor.blur(PinColor::Red, &mut labels), EditOutcome::Ignored);
        assert_eq!(editor.editing(), Some(PinColor::Green));

        let outcome = editor.blur(PinColor::Green, &mut labels);
        assert!(outcome.ended() && outcome.changed());
        assert_eq!(labels.label(PinColor::Green), "Parks");
        assert_eq!(labels.label(PinColor::Red), "Red");
    }

    #[test]
    fn card_delete_never_navigates() {
        let (_, _, pins) = seeded(&[("a", PinColor::Red)]);
        let pin = &pins[0];
        let mut vm = GalleryViewModel::new();

        assert_eq!(vm.card_click(pin, CardPart::Body), CardAction::Open(pin.coordinates()));
        assert_eq!(vm.card_click(pin, CardPart::DeleteButton), CardAction::Delete(pin.id.clone()));

        vm.begin_delete(&pin.id);
        assert_eq!(vm.card_click(pin, CardPart::DeleteButton), CardAction::Ignore);
        assert_eq!(vm.card_click(pin, CardPart::Body), CardAction::Open(pin.coordinates()));
    }

    #[test]
    fn key_mapping() {
        assert_eq!(LabelKey::from_key("Enter"), LabelKey::Commit);
        assert_eq!(LabelKey::from_key("Escape"), LabelKey::Cancel);
        assert_eq!(LabelKey::from_key("a"), LabelKey::Other);
    }

    #[test]
    fn deleting_unknown_id_keeps_list_but_calls_backend() {
        let (backend, store, pins) = seeded(&[("a", PinColor::Red)]);
        let vm = RefCell::new(GalleryViewModel::new());
        let list = RefCell::new(pins.clone());

        assert!(block_on(delete_card(&vm, &list, &store, "ghost")));
        assert_eq!(*list.borrow(), pins);
        assert!(backend.calls().contains(&"delete ghost".to_string()));
        assert!(!vm.borrow().is_deleting("ghost"));
    }

    #[test]
    fn delete_card_removes_pin() {
        let (_, store, pins) = seeded(&[("a", PinColor::Red), ("b", PinColor::Blue)]);
        let vm = RefCell::new(GalleryViewModel::new());
        let list = RefCell::new(pins.clone());
        let target = pins[0].id.clone();

        assert!(block_on(delete_card(&vm, &list, &store, &target)));
        assert_eq!(list.borrow().len(), 1);
        assert!(list.borrow().iter().all(|p| p.id != target));
    }
}
