//! Payment form controller.
//!
//! Drives the hosted card widget through the tokenize-then-charge flow:
//! load the SDK, attach the card input and card button, tokenize on submit,
//! and post the token to the charge endpoint with a fresh idempotency key.
//!
//! # State machine
//!
//! ```text
//! Uninitialized -> Loading -> Ready -> Submitting -> Succeeded
//!                     |         ^          |
//!                     v         +----------+   (recoverable failures)
//!                   Failed
//! ```
//!
//! `Succeeded` and `Failed` are terminal for a mount; the owner may call
//! [`PaymentForm::unmount`] and mount again. Unmounting cancels the flow:
//! completions that arrive afterwards are dropped without invoking
//! callbacks.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use uuid::Uuid;

use crate::domain::foundation::StateMachine;
use crate::ports::{CardWidget, ChargeApi, ChargeRequest, PaymentSdk, TokenizeResult};

/// Mount point for the card input widget.
pub const CARD_MOUNT_ID: &str = "card-container";

/// Mount point for the one-click card button.
pub const CARD_BUTTON_MOUNT_ID: &str = "card-button-container";

/// Lifecycle state of one mounted payment form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormState {
    /// Not mounted yet.
    Uninitialized,

    /// SDK script loading and widgets attaching.
    Loading,

    /// Widgets attached; submission available.
    Ready,

    /// A submission is in flight.
    Submitting,

    /// A charge was created. Terminal for this mount.
    Succeeded,

    /// The form could not be initialized. Terminal for this mount.
    Failed,
}

impl StateMachine for FormState {
    fn can_transition_to(&self, target: &Self) -> bool {
        use FormState::*;
        matches!(
            (self, target),
            (Uninitialized, Loading)
                | (Loading, Ready)
                | (Loading, Failed)
                | (Ready, Submitting)
                | (Submitting, Ready)
                | (Submitting, Succeeded)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use FormState::*;
        match self {
            Uninitialized => vec![Loading],
            Loading => vec![Ready, Failed],
            Ready => vec![Submitting],
            Submitting => vec![Ready, Succeeded],
            Succeeded => vec![],
            Failed => vec![],
        }
    }
}

/// Callbacks the form owner receives.
///
/// Errors surfaced here are user-facing; the form never panics the page.
pub trait FormObserver: Send + Sync {
    /// A charge was created; `payment_id` is the vendor payment ID.
    fn on_success(&self, payment_id: &str);

    /// Something went wrong; `message` is safe to show to the user.
    fn on_error(&self, message: &str);
}

/// Payment form controller.
///
/// One instance per mounted form. Methods take `&self`; internal state is
/// guarded so a submission in flight can be cancelled by `unmount` from the
/// owner's teardown path.
pub struct PaymentForm {
    sdk: Arc<dyn PaymentSdk>,
    api: Arc<dyn ChargeApi>,
    observer: Arc<dyn FormObserver>,

    /// Amount in minor units (pence).
    amount_minor: u64,

    /// Description sent with the charge, e.g. the tournament name.
    description: String,

    state: Mutex<FormState>,
    widget: Mutex<Option<Arc<dyn CardWidget>>>,

    /// Bumped on unmount; completions from a stale generation are dropped.
    generation: AtomicU64,
}

impl PaymentForm {
    pub fn new(
        sdk: Arc<dyn PaymentSdk>,
        api: Arc<dyn ChargeApi>,
        observer: Arc<dyn FormObserver>,
        amount_minor: u64,
        description: impl Into<String>,
    ) -> Self {
        Self {
            sdk,
            api,
            observer,
            amount_minor,
            description: description.into(),
            state: Mutex::new(FormState::Uninitialized),
            widget: Mutex::new(None),
            generation: AtomicU64::new(0),
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> FormState {
        *self.state.lock().unwrap()
    }

    /// Mount the form: load the SDK and attach both widgets.
    ///
    /// Reaching `Ready` requires the card input and the card button to both
    /// attach. Any failure lands in `Failed` with the error surfaced through
    /// the observer; script loading is not retried automatically.
    pub async fn mount(&self) {
        if !self.try_transition(FormState::Loading) {
            return;
        }
        let generation = self.generation.load(Ordering::SeqCst);

        if let Err(e) = self.sdk.load().await {
            self.fail_mount(generation, &format!("Square SDK failed to load: {}", e));
            return;
        }

        let widget = match self.sdk.attach_card(CARD_MOUNT_ID).await {
            Ok(widget) => widget,
            Err(e) => {
                tracing::warn!(error = %e, "Card widget failed to attach");
                self.fail_mount(generation, "Failed to initialize payment form");
                return;
            }
        };

        if let Err(e) = self.sdk.attach_card_button(CARD_BUTTON_MOUNT_ID).await {
            tracing::warn!(error = %e, "Card button failed to attach");
            self.fail_mount(generation, "Failed to initialize payment form");
            return;
        }

        if self.is_stale(generation) {
            return;
        }

        *self.widget.lock().unwrap() = Some(Arc::from(widget));
        self.try_transition(FormState::Ready);
    }

    /// Submit the entered card.
    ///
    /// Only available from `Ready`; anything else reports "Payment form not
    /// ready". Tokenization failures and charge rejections return the form
    /// to `Ready` so the user can correct the card and try again; only a
    /// created charge reaches `Succeeded`.
    pub async fn submit(&self) {
        if !self.try_transition(FormState::Submitting) {
            self.observer.on_error("Payment form not ready");
            return;
        }
        let generation = self.generation.load(Ordering::SeqCst);

        let widget = self.widget.lock().unwrap().clone();
        let Some(widget) = widget else {
            self.try_transition(FormState::Ready);
            self.observer.on_error("Payment form not ready");
            return;
        };

        let token = match widget.tokenize().await {
            _ if self.is_stale(generation) => return,
            TokenizeResult::Ok { token } => token,
            result @ TokenizeResult::Error { .. } => {
                self.try_transition(FormState::Ready);
                self.observer
                    .on_error(result.first_message().unwrap_or("Card validation failed"));
                return;
            }
        };

        // Fresh key per logical attempt: a retry after a rejection is a new
        // attempt and must not be collapsed with the previous one.
        let request = ChargeRequest {
            source_id: token,
            amount: self.amount_minor,
            description: self.description.clone(),
            idempotency_key: Uuid::new_v4().to_string(),
        };

        let result = self.api.charge(request).await;
        if self.is_stale(generation) {
            return;
        }

        match result {
            Ok(response) if response.success => match response.payment_id {
                Some(payment_id) => {
                    self.try_transition(FormState::Succeeded);
                    self.observer.on_success(&payment_id);
                }
                None => {
                    self.try_transition(FormState::Ready);
                    self.observer.on_error("Payment failed");
                }
            },
            Ok(response) => {
                self.try_transition(FormState::Ready);
                self.observer
                    .on_error(response.error.as_deref().unwrap_or("Payment failed"));
            }
            Err(e) => {
                tracing::warn!(error = %e, "Charge request failed");
                self.try_transition(FormState::Ready);
                self.observer.on_error("Payment processing failed");
            }
        }
    }

    /// Tear the form down.
    ///
    /// Destroys the widget, removes the SDK script, and cancels any
    /// submission in flight: its completion will not invoke callbacks. The
    /// form returns to `Uninitialized` and may be mounted again.
    pub async fn unmount(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);

        let widget = self.widget.lock().unwrap().take();
        if let Some(widget) = widget {
            widget.destroy().await;
        }
        self.sdk.unload();

        // Reset is owner-driven, outside the per-mount transition table.
        *self.state.lock().unwrap() = FormState::Uninitialized;
    }

    fn is_stale(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) != generation
    }

    /// Attempt a validated transition; false (with a log) when invalid.
    fn try_transition(&self, target: FormState) -> bool {
        let mut state = self.state.lock().unwrap();
        match state.transition_to(target) {
            Ok(next) => {
                *state = next;
                true
            }
            Err(e) => {
                tracing::debug!(error = %e, "Ignored form transition");
                false
            }
        }
    }

    fn fail_mount(&self, generation: u64, message: &str) {
        if self.is_stale(generation) {
            return;
        }
        self.try_transition(FormState::Failed);
        self.observer.on_error(message);
    }
}
