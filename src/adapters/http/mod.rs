//! HTTP adapters.
//!
//! The axum API surface for payments and webhooks, plus the client the
//! checkout form controller uses to reach the charge endpoint.

mod charge_client;
pub mod payments;

pub use charge_client::HttpChargeApi;
pub use payments::{api_router, PaymentsAppState};
