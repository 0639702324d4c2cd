pub mod constants;
pub mod mapbox_ffi;
pub mod storage;

pub use constants::*;
