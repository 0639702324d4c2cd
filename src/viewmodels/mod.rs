pub mod map_viewmodel;
pub mod gallery_viewmodel;

pub use map_viewmodel::{DraftField, MapMode, MapViewModel};
pub use gallery_viewmodel::{CardAction, CardPart, EditOutcome, GalleryViewModel};
