//! Payment configuration (Square)

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;

/// Square environment selector.
///
/// Controls which Square host the gateway adapter talks to and which
/// Web Payments SDK bundle the checkout form loads.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SquareEnvironment {
    #[default]
    Sandbox,
    Production,
}

impl SquareEnvironment {
    /// Base URL for the Square REST API.
    pub fn api_base_url(&self) -> &'static str {
        match self {
            SquareEnvironment::Sandbox => "https://connect.squareupsandbox.com",
            SquareEnvironment::Production => "https://connect.squareup.com",
        }
    }

    /// URL of the hosted Web Payments SDK script.
    pub fn web_sdk_url(&self) -> &'static str {
        match self {
            SquareEnvironment::Sandbox => "https://sandbox.web.squarecdn.com/v1/square.js",
            SquareEnvironment::Production => "https://web.squarecdn.com/v1/square.js",
        }
    }
}

/// Payment configuration (Square)
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentConfig {
    /// Square application ID (sq0idp-... or sandbox-sq0idb-...)
    pub application_id: String,

    /// Square location ID
    pub location_id: String,

    /// Square API access token
    pub access_token: SecretString,

    /// Which Square environment to target
    #[serde(default)]
    pub environment: SquareEnvironment,

    /// Webhook signature key from the Square developer dashboard
    pub webhook_signature_key: SecretString,

    /// Default ISO 4217 currency for charges
    #[serde(default = "default_currency")]
    pub default_currency: String,
}

fn default_currency() -> String {
    "GBP".to_string()
}

impl PaymentConfig {
    /// Check if configured against the Square sandbox
    pub fn is_sandbox(&self) -> bool {
        self.environment == SquareEnvironment::Sandbox
    }

    /// Validate payment configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.application_id.is_empty() {
            return Err(ValidationError::MissingRequired("PAYMENT__APPLICATION_ID"));
        }
        if self.location_id.is_empty() {
            return Err(ValidationError::MissingRequired("PAYMENT__LOCATION_ID"));
        }
        if self.access_token.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("PAYMENT__ACCESS_TOKEN"));
        }
        if self.webhook_signature_key.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired(
                "PAYMENT__WEBHOOK_SIGNATURE_KEY",
            ));
        }

        // Verify application ID prefixes for safety
        if !self.application_id.starts_with("sq0idp-")
            && !self.application_id.starts_with("sandbox-sq0idb-")
        {
            return Err(ValidationError::InvalidApplicationId);
        }
        if self.environment == SquareEnvironment::Production
            && self.application_id.starts_with("sandbox-")
        {
            return Err(ValidationError::SandboxCredentialsInProduction);
        }

        Ok(())
    }
}
