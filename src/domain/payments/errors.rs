//! Payment-specific error types.
//!
//! The taxonomy the rest of the service programs against, insulating callers
//! from vendor SDK error shapes.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | ValidationFailed | 400 |
//! | GatewayRejected | 402 |
//! | PaymentFailed | 402 |
//! | InvalidWebhookSignature | 401 |
//! | Unknown | 500 |

/// Payment-specific errors.
///
/// Read operations never produce these: lookups collapse every failure to an
/// empty result. Mutating operations propagate exactly one of these variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentError {
    /// Card or request input was rejected before a charge was attempted.
    /// Recoverable; the message is safe to show to the user.
    ValidationFailed { field: String, message: String },

    /// The vendor reported a structured API error for the operation.
    GatewayRejected { detail: String },

    /// The vendor call succeeded transport-wise but returned no payment
    /// object. Terminal for this attempt.
    PaymentFailed,

    /// Webhook signature verification failed.
    InvalidWebhookSignature,

    /// Anything else, including transport failures.
    Unknown(String),
}

impl PaymentError {
    // Constructor functions for cleaner error creation

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        PaymentError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn gateway_rejected(detail: impl Into<String>) -> Self {
        PaymentError::GatewayRejected {
            detail: detail.into(),
        }
    }

    pub fn payment_failed() -> Self {
        PaymentError::PaymentFailed
    }

    pub fn invalid_webhook_signature() -> Self {
        PaymentError::InvalidWebhookSignature
    }

    pub fn unknown(message: impl Into<String>) -> Self {
        PaymentError::Unknown(message.into())
    }

    /// Returns the machine-readable error code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            PaymentError::ValidationFailed { .. } => "VALIDATION_FAILED",
            PaymentError::GatewayRejected { .. } => "GATEWAY_REJECTED",
            PaymentError::PaymentFailed => "PAYMENT_FAILED",
            PaymentError::InvalidWebhookSignature => "INVALID_WEBHOOK_SIGNATURE",
            PaymentError::Unknown(_) => "UNKNOWN_ERROR",
        }
    }

    /// Returns a user-friendly error message.
    pub fn message(&self) -> String {
        match self {
            PaymentError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            PaymentError::GatewayRejected { detail } => format!("Payment failed: {}", detail),
            PaymentError::PaymentFailed => "Payment creation failed".to_string(),
            PaymentError::InvalidWebhookSignature => "Invalid webhook signature".to_string(),
            PaymentError::Unknown(msg) => format!("Payment processing failed: {}", msg),
        }
    }

    /// Returns true if the caller can fix the input and try again.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, PaymentError::ValidationFailed { .. })
    }
}

impl std::fmt::Display for PaymentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for PaymentError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_creates_correctly() {
        let err = PaymentError::validation("amount", "must be greater than zero");
        assert!(matches!(
            err,
            PaymentError::ValidationFailed { ref field, ref message }
            if field == "amount" && message == "must be greater than zero"
        ));
        assert_eq!(err.code(), "VALIDATION_FAILED");
    }

    #[test]
    fn gateway_rejected_creates_correctly() {
        let err = PaymentError::gateway_rejected("Card declined");
        assert!(matches!(
            err,
            PaymentError::GatewayRejected { ref detail } if detail == "Card declined"
        ));
        assert_eq!(err.code(), "GATEWAY_REJECTED");
    }

    #[test]
    fn payment_failed_creates_correctly() {
        let err = PaymentError::payment_failed();
        assert!(matches!(err, PaymentError::PaymentFailed));
        assert_eq!(err.code(), "PAYMENT_FAILED");
    }

    #[test]
    fn invalid_webhook_signature_creates_correctly() {
        let err = PaymentError::invalid_webhook_signature();
        assert!(matches!(err, PaymentError::InvalidWebhookSignature));
        assert_eq!(err.code(), "INVALID_WEBHOOK_SIGNATURE");
    }

    #[test]
    fn unknown_creates_correctly() {
        let err = PaymentError::unknown("connection reset");
        assert!(matches!(err, PaymentError::Unknown(ref m) if m == "connection reset"));
        assert_eq!(err.code(), "UNKNOWN_ERROR");
    }

    #[test]
    fn gateway_rejected_message_includes_detail() {
        let err = PaymentError::gateway_rejected("Insufficient funds");
        assert!(err.message().contains("Insufficient funds"));
    }

    #[test]
    fn only_validation_is_recoverable() {
        assert!(PaymentError::validation("card", "declined").is_recoverable());
        assert!(!PaymentError::gateway_rejected("declined").is_recoverable());
        assert!(!PaymentError::payment_failed().is_recoverable());
        assert!(!PaymentError::unknown("boom").is_recoverable());
    }

    #[test]
    fn display_matches_message() {
        let err = PaymentError::gateway_rejected("Card declined");
        assert_eq!(format!("{}", err), err.message());
    }
}
