// ============================================================================
// API CLIENT - PostgREST/Supabase HTTP only (stateless)
// ============================================================================

use gloo_net::http::{Request, RequestBuilder, Response};

use crate::config::CONFIG;
use crate::error::PinStoreError;
use crate::models::pin::{NewPinRow, PinRow};
use crate::services::pin_store::PinBackend;

/// HTTP client for the pins table
#[derive(Clone)]
pub struct SupabaseClient {
    endpoint: String,
    anon_key: String,
}

impl SupabaseClient {
    pub fn new() -> Self {
        Self::with_endpoint(CONFIG.pins_endpoint(), CONFIG.supabase_anon_key.clone())
    }

    pub fn with_endpoint(endpoint: String, anon_key: String) -> Self {
        Self { endpoint, anon_key }
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("apikey", &self.anon_key)
            .header("Authorization", &format!("Bearer {}", self.anon_key))
    }

    fn select_url(&self) -> String {
        format!("{}?select=*&order=created_at.desc", self.endpoint)
    }

    fn insert_url(&self) -> String {
        format!("{}?select=*", self.endpoint)
    }

    fn delete_url(&self, id: &str) -> String {
        let encoded: String = js_sys::encode_uri_component(id).into();
        format!("{}?id=eq.{}", self.endpoint, encoded)
    }
}

impl Default for SupabaseClient {
    fn default() -> Self {
        Self::new()
    }
}

async fn ensure_ok(response: Response) -> Result<Response, PinStoreError> {
    if response.ok() {
        return Ok(response);
    }
    let status = response.status();
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| response.status_text());
    Err(PinStoreError::Http { status, body })
}

impl PinBackend for SupabaseClient {
    async fn select_pins(&self) -> Result<Vec<PinRow>, PinStoreError> {
        let url = self.select_url();
        log::info!("📋 [API] GET {}", url);

        let response = self
            .authorize(Request::get(&url))
            .send()
            .await
            .map_err(|e| PinStoreError::Network(e.to_string()))?;

        ensure_ok(response)
            .await?
            .json::<Vec<PinRow>>()
            .await
            .map_err(|e| PinStoreError::Parse(e.to_string()))
    }

    async fn insert_pin(&self, row: &NewPinRow) -> Result<PinRow, PinStoreError> {
        let url = self.insert_url();
        log::info!("📍 [API] POST {} ({}, {})", url, row.latitude, row.longitude);

        let response = self
            .authorize(Request::post(&url))
            .header("Prefer", "return=representation")
            .json(row)
            .map_err(|e| PinStoreError::Parse(e.to_string()))?
            .send()
            .await
            .map_err(|e| PinStoreError::Network(e.to_string()))?;

        let rows = ensure_ok(response)
            .await?
            .json::<Vec<PinRow>>()
            .await
            .map_err(|e| PinStoreError::Parse(e.to_string()))?;

        rows.into_iter().next().ok_or(PinStoreError::EmptyInsert)
    }

    async fn delete_pin(&self, id: &str) -> Result<(), PinStoreError> {
        let url = self.delete_url(id);
        log::info!("🗑️ [API] DELETE {}", url);

        let response = self
            .authorize(Request::delete(&url))
            .send()
            .await
            .map_err(|e| PinStoreError::Network(e.to_string()))?;

        ensure_ok(response).await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_postgrest_urls() {
        let client = SupabaseClient::with_endpoint(
            "https://abc.supabase.co/rest/v1/pins".to_string(),
            "key".to_string(),
        );
        assert_eq!(
            client.select_url(),
            "https://abc.supabase.co/rest/v1/pins?select=*&order=created_at.desc"
        );
        assert_eq!(client.insert_url(), "https://abc.supabase.co/rest/v1/pins?select=*");
    }
}
