// ============================================================================
// VIEWS - Functions that build DOM from state (no business logic)
// ============================================================================

pub mod app;
pub mod navbar;
pub mod map_page;
pub mod pin_popup;
pub mod gallery;
pub mod pin_card;
pub mod color_filter;

pub use app::render_app;
pub use navbar::render_navbar;
pub use map_page::render_map_page;
pub use pin_popup::{render_color_badge, render_draft_popup, render_inspect_popup, render_pin_image};
pub use gallery::{render_gallery_body, render_gallery_page};
pub use pin_card::render_pin_card;
pub use color_filter::{render_color_filter, LABEL_EDITOR_ID};
