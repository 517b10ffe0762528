//! HTTP handlers for payment endpoints.
//!
//! These handlers connect axum routes to application layer command/query
//! handlers. The charge endpoint speaks the `{success, paymentId?, error?}`
//! contract the checkout form expects on every status code.

use std::sync::Arc;

use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::handlers::payments::{
    ChargeCardCommand, ChargeCardHandler, GetPaymentHandler, GetPaymentQuery,
    HandleWebhookCommand, HandleWebhookHandler, RefundPaymentCommand, RefundPaymentHandler,
};
use crate::domain::payments::PaymentError;
use crate::ports::{ChargeResponse, PaymentGateway};

use super::dto::{
    ChargePaymentRequest, ErrorResponse, PaymentResponse, RefundRequest, RefundResponse,
};

/// Header Square uses to deliver webhook signatures.
const SIGNATURE_HEADER: &str = "x-square-hmacsha256-signature";

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state containing all dependencies.
///
/// Cloned per request; the gateway is Arc-wrapped for cheap sharing.
#[derive(Clone)]
pub struct PaymentsAppState {
    pub gateway: Arc<dyn PaymentGateway>,
}

impl PaymentsAppState {
    pub fn new(gateway: Arc<dyn PaymentGateway>) -> Self {
        Self { gateway }
    }

    /// Create handlers on demand from the shared state.
    pub fn charge_handler(&self) -> ChargeCardHandler {
        ChargeCardHandler::new(self.gateway.clone())
    }

    pub fn get_payment_handler(&self) -> GetPaymentHandler {
        GetPaymentHandler::new(self.gateway.clone())
    }

    pub fn refund_handler(&self) -> RefundPaymentHandler {
        RefundPaymentHandler::new(self.gateway.clone())
    }

    pub fn webhook_handler(&self) -> HandleWebhookHandler {
        HandleWebhookHandler::new(self.gateway.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Command Handlers (POST endpoints)
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/payments/square - Charge a tokenized card
///
/// Responds with the charge contract on every path: 2xx + `success:true`
/// for a created payment, a failure status + `success:false` otherwise.
pub async fn charge_payment(
    State(state): State<PaymentsAppState>,
    Json(request): Json<ChargePaymentRequest>,
) -> impl IntoResponse {
    let handler = state.charge_handler();
    let cmd = ChargeCardCommand {
        source_id: request.source_id,
        amount_minor: request.amount,
        description: request.description,
        idempotency_key: request.idempotency_key,
        buyer_email: request.buyer_email,
        reference_id: request.reference_id,
    };

    match handler.handle(cmd).await {
        Ok(payment) => (
            StatusCode::CREATED,
            Json(ChargeResponse {
                success: true,
                payment_id: Some(payment.id),
                error: None,
            }),
        ),
        Err(error) => (
            charge_error_status(&error),
            Json(ChargeResponse {
                success: false,
                payment_id: None,
                error: Some(error.message()),
            }),
        ),
    }
}

/// POST /api/payments/{payment_id}/refund - Refund a payment
///
/// Always 200: the body's `success` field is the outcome.
pub async fn refund_payment(
    State(state): State<PaymentsAppState>,
    Path(payment_id): Path<String>,
    Json(request): Json<RefundRequest>,
) -> impl IntoResponse {
    let handler = state.refund_handler();
    let outcome = handler
        .handle(RefundPaymentCommand {
            payment_id,
            amount_minor: request.amount,
            reason: request.reason,
        })
        .await;

    Json(RefundResponse::from(outcome))
}

/// POST /api/webhooks/square - Verify a Square webhook delivery
pub async fn handle_square_webhook(
    State(state): State<PaymentsAppState>,
    headers: axum::http::HeaderMap,
    body: axum::body::Bytes,
) -> impl IntoResponse {
    let Some(signature) = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
    else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new(
                "MISSING_SIGNATURE",
                format!("Missing {} header", SIGNATURE_HEADER),
            )),
        )
            .into_response();
    };

    let handler = state.webhook_handler();
    let cmd = HandleWebhookCommand {
        payload: body.to_vec(),
        signature,
    };

    match handler.handle(cmd).await {
        Ok(()) => StatusCode::OK.into_response(),
        Err(error) => (
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse::new(error.code(), error.message())),
        )
            .into_response(),
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Query Handlers (GET endpoints)
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/payments/{payment_id} - Look up a payment
pub async fn get_payment(
    State(state): State<PaymentsAppState>,
    Path(payment_id): Path<String>,
) -> impl IntoResponse {
    let handler = state.get_payment_handler();
    let result = handler.handle(GetPaymentQuery { payment_id }).await;

    match result {
        Some(payment) => Json(PaymentResponse::from(payment)).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new("PAYMENT_NOT_FOUND", "Payment not found")),
        )
            .into_response(),
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// HTTP status for a failed charge, per the error taxonomy.
fn charge_error_status(error: &PaymentError) -> StatusCode {
    match error {
        PaymentError::ValidationFailed { .. } => StatusCode::BAD_REQUEST,
        PaymentError::GatewayRejected { .. } | PaymentError::PaymentFailed => {
            StatusCode::PAYMENT_REQUIRED
        }
        PaymentError::InvalidWebhookSignature => StatusCode::UNAUTHORIZED,
        PaymentError::Unknown(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::square::MockGateway;

    fn test_state() -> (Arc<MockGateway>, PaymentsAppState) {
        let gateway = Arc::new(MockGateway::new());
        let state = PaymentsAppState::new(gateway.clone());
        (gateway, state)
    }

    fn charge_request() -> ChargePaymentRequest {
        ChargePaymentRequest {
            source_id: "tok_1".to_string(),
            amount: 2500,
            description: "Tournament entry".to_string(),
            idempotency_key: "key-1".to_string(),
            buyer_email: None,
            reference_id: None,
        }
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Charge Endpoint
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn charge_success_returns_contract_body() {
        let (gateway, state) = test_state();

        let response = charge_payment(State(state), Json(charge_request()))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::CREATED);
        let json = body_json(response).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["paymentId"], "pay_tok_1");
        assert!(json.get("error").is_none());

        // The token and key arrive at the gateway unchanged
        let requests = gateway.recorded_payment_requests();
        assert_eq!(requests[0].source_token, "tok_1");
        assert_eq!(requests[0].idempotency_key, "key-1");
    }

    #[tokio::test]
    async fn charge_gateway_rejection_returns_402_failure_body() {
        let (gateway, state) = test_state();
        gateway.reject_next(PaymentError::gateway_rejected("Card declined"));

        let response = charge_payment(State(state), Json(charge_request()))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::PAYMENT_REQUIRED);
        let json = body_json(response).await;
        assert_eq!(json["success"], false);
        assert!(json["error"].as_str().unwrap().contains("Card declined"));
        assert!(json.get("paymentId").is_none());
    }

    #[tokio::test]
    async fn charge_zero_amount_returns_400() {
        let (_gateway, state) = test_state();

        let response = charge_payment(
            State(state),
            Json(ChargePaymentRequest {
                amount: 0,
                ..charge_request()
            }),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["success"], false);
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Lookup Endpoint
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn get_payment_returns_404_when_missing() {
        let (_gateway, state) = test_state();

        let response = get_payment(State(state), Path("pay_missing".to_string()))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Refund Endpoint
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn refund_returns_outcome_body() {
        let (_gateway, state) = test_state();

        let response = refund_payment(
            State(state),
            Path("pay_9".to_string()),
            Json(RefundRequest {
                amount: 2500,
                reason: None,
            }),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["refundId"], "rf_test123");
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Webhook Endpoint
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn webhook_accepts_verified_delivery() {
        let (_gateway, state) = test_state();
        let mut headers = axum::http::HeaderMap::new();
        headers.insert(SIGNATURE_HEADER, "sig".parse().unwrap());

        let response =
            handle_square_webhook(State(state), headers, axum::body::Bytes::from_static(b"{}"))
                .await
                .into_response();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn webhook_rejects_bad_signature_with_401() {
        let gateway = Arc::new(MockGateway::rejecting_webhooks());
        let state = PaymentsAppState::new(gateway);
        let mut headers = axum::http::HeaderMap::new();
        headers.insert(SIGNATURE_HEADER, "sig".parse().unwrap());

        let response =
            handle_square_webhook(State(state), headers, axum::body::Bytes::from_static(b"{}"))
                .await
                .into_response();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn webhook_rejects_missing_header_with_400() {
        let (_gateway, state) = test_state();

        let response = handle_square_webhook(
            State(state),
            axum::http::HeaderMap::new(),
            axum::body::Bytes::from_static(b"{}"),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
