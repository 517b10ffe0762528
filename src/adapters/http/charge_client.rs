//! HTTP client for the charge endpoint.
//!
//! Implements the `ChargeApi` port over reqwest. Used by checkout flows that
//! run outside the browser (kiosk registration desks, integration tests).

use async_trait::async_trait;

use crate::ports::{ChargeApi, ChargeApiError, ChargeRequest, ChargeResponse};

/// Charge endpoint client.
pub struct HttpChargeApi {
    base_url: String,
    http_client: reqwest::Client,
}

impl HttpChargeApi {
    /// Create a client targeting the service at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http_client: reqwest::Client::new(),
        }
    }

    fn charge_url(&self) -> String {
        format!("{}/api/payments/square", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl ChargeApi for HttpChargeApi {
    async fn charge(&self, request: ChargeRequest) -> Result<ChargeResponse, ChargeApiError> {
        let response = self
            .http_client
            .post(self.charge_url())
            .json(&request)
            .send()
            .await
            .map_err(|e| ChargeApiError::new(e.to_string()))?;

        // The endpoint carries the {success, paymentId?, error?} contract on
        // every status; a body that does not parse is a transport failure.
        response
            .json()
            .await
            .map_err(|e| ChargeApiError::new(format!("unreadable charge response: {}", e)))
    }
}
