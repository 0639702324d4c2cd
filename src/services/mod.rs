pub mod api_client;
pub mod pin_store;
pub mod geocoding;
pub mod label_storage;

pub use api_client::SupabaseClient;
pub use pin_store::PinStore;
pub use geocoding::GeocodingClient;
pub use label_storage::LabelStorage;

/// Store used by the running app
pub type RemotePinStore = PinStore<SupabaseClient>;
