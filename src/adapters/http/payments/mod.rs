//! HTTP adapter for the payments API.
//!
//! Split the way every HTTP module in this service is:
//! - `dto` - JSON request/response shapes
//! - `handlers` - axum handlers wiring routes to application handlers
//! - `routes` - router construction

mod dto;
mod handlers;
mod routes;

pub use dto::{
    ChargePaymentRequest, ErrorResponse, PaymentResponse, RefundRequest, RefundResponse,
};
pub use handlers::PaymentsAppState;
pub use routes::{api_router, payments_routes, webhook_routes};
