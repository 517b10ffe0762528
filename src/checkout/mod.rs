//! Checkout form controller.
//!
//! Coordinates the hosted card widget and the charge endpoint into the
//! tokenize-then-charge flow, behind an explicit state machine.

mod form_controller;

pub use form_controller::{
    FormObserver, FormState, PaymentForm, CARD_BUTTON_MOUNT_ID, CARD_MOUNT_ID,
};
