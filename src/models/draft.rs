use super::pin::{Coordinates, PinCandidate, PinColor};

/// New pin being edited in the map popup. Never persisted partially.
#[derive(Debug, Clone, PartialEq)]
pub struct DraftPin {
    pub coordinates: Coordinates,
    pub description: String,
    pub image_url: String,
    pub color: PinColor,
}

impl DraftPin {
    pub fn at(coordinates: Coordinates) -> Self {
        Self {
            coordinates,
            description: String::new(),
            image_url: String::new(),
            color: PinColor::default(),
        }
    }

    /// Confirm is enabled only with a non-blank description
    pub fn can_confirm(&self) -> bool {
        !self.description.trim().is_empty()
    }

    pub fn to_candidate(&self) -> PinCandidate {
        PinCandidate {
            coordinates: self.coordinates,
            description: self.description.clone(),
            image_url: Some(self.image_url.clone()),
            color: Some(self.color),
        }
    }
}
