//! Checkout ports for the payment form controller.
//!
//! The hosted card widget lives inside the vendor's iframe sandbox; the
//! backend charge endpoint lives across HTTP. Both are modelled as explicit
//! capability traits so the form controller can be driven end-to-end with
//! fakes in tests.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error from loading or initializing the hosted payments SDK.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct SdkError {
    pub message: String,
}

impl SdkError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Outcome of tokenizing the card input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenizeResult {
    /// Tokenization succeeded; the token is single-use.
    Ok { token: String },

    /// Card input was rejected. Recoverable; messages are user-facing.
    Error { messages: Vec<String> },
}

impl TokenizeResult {
    /// First user-facing validation message, if tokenization failed.
    pub fn first_message(&self) -> Option<&str> {
        match self {
            TokenizeResult::Ok { .. } => None,
            TokenizeResult::Error { messages } => messages.first().map(String::as_str),
        }
    }
}

/// The attached card-input widget.
#[async_trait]
pub trait CardWidget: Send + Sync {
    /// Exchange the entered card data for a single-use token.
    async fn tokenize(&self) -> TokenizeResult;

    /// Detach and dispose of the widget.
    async fn destroy(&self);
}

/// The hosted payments SDK surface the form controller needs.
///
/// Exactly the operations the controller uses: script loading, widget
/// attachment, and teardown. Nothing else from the vendor SDK leaks through.
#[async_trait]
pub trait PaymentSdk: Send + Sync {
    /// Load the hosted SDK script.
    async fn load(&self) -> Result<(), SdkError>;

    /// Create the card-input widget and attach it to the given mount point.
    async fn attach_card(&self, mount_id: &str) -> Result<Box<dyn CardWidget>, SdkError>;

    /// Create the one-click card button and attach it to the given mount point.
    async fn attach_card_button(&self, mount_id: &str) -> Result<(), SdkError>;

    /// Remove the injected script resource.
    fn unload(&self);
}

/// Body posted to the charge endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChargeRequest {
    /// The tokenized payment source.
    pub source_id: String,

    /// Amount in minor units (pence).
    pub amount: u64,

    /// What the charge is for, e.g. a tournament entry.
    pub description: String,

    /// Fresh key identifying this logical charge attempt.
    pub idempotency_key: String,
}

/// Response from the charge endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChargeResponse {
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Transport or protocol failure reaching the charge endpoint.
#[derive(Debug, Clone, Error)]
#[error("charge request failed: {message}")]
pub struct ChargeApiError {
    pub message: String,
}

impl ChargeApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// The backend charge endpoint the form controller posts tokens to.
#[async_trait]
pub trait ChargeApi: Send + Sync {
    /// Submit one charge attempt. A `Ok` response with `success: false` is a
    /// vendor-side rejection; an `Err` is a transport failure. Both are
    /// recoverable from the form's point of view.
    async fn charge(&self, request: ChargeRequest) -> Result<ChargeResponse, ChargeApiError>;
}
