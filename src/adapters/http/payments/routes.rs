//! Axum router configuration for payment endpoints.
//!
//! This module defines the route structure for the payments API and wires
//! routes to their corresponding handlers.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    charge_payment, get_payment, handle_square_webhook, refund_payment, PaymentsAppState,
};

/// Create the payments API router.
///
/// # Routes
///
/// - `POST /square` - Charge a tokenized card
/// - `GET /:payment_id` - Look up a payment
/// - `POST /:payment_id/refund` - Refund a payment
pub fn payments_routes() -> Router<PaymentsAppState> {
    Router::new()
        .route("/square", post(charge_payment))
        .route("/:payment_id", get(get_payment))
        .route("/:payment_id/refund", post(refund_payment))
}

/// Create the webhook router.
///
/// Separate from the payments routes because webhook deliveries carry no
/// user context; they are authenticated by signature alone.
///
/// # Routes
/// - `POST /square` - Verify a Square webhook delivery
pub fn webhook_routes() -> Router<PaymentsAppState> {
    Router::new().route("/square", post(handle_square_webhook))
}

/// Create the complete API router.
///
/// Suitable for mounting at `/api`.
///
/// # Example
///
/// ```ignore
/// use axum::Router;
/// use lords_payments::adapters::http::{api_router, PaymentsAppState};
///
/// let state = PaymentsAppState::new(gateway);
/// let app = Router::new()
///     .nest("/api", api_router())
///     .with_state(state);
/// ```
pub fn api_router() -> Router<PaymentsAppState> {
    Router::new()
        .nest("/payments", payments_routes())
        .nest("/webhooks", webhook_routes())
}
