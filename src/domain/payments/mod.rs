//! Payment domain model.
//!
//! Gateway-agnostic payment types: normalized payments, card summaries,
//! minor-unit money helpers, and the payment error taxonomy.

mod errors;
mod money;
mod payment;

pub use errors::PaymentError;
pub use money::{format_amount, parse_amount};
pub use payment::{CardSummary, Payment, PaymentStatus};
