pub mod pin;
pub mod draft;
pub mod color_labels;

pub use pin::{Coordinates, Pin, PinCandidate, PinColor};
pub use draft::DraftPin;
pub use color_labels::ColorLabels;
