//! # Checkout Provider Trait
//!
//! The seam between the relay and the remote payment provider's client.
//! The HTTP layer only ever talks to a `CheckoutProvider`; Stripe is one
//! implementation, test doubles are another.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  CheckoutProvider (trait)                   │
//! │  ├── create_checkout_session()                              │
//! │  ├── construct_event()                                      │
//! │  └── provider_name()                                        │
//! └─────────────────────────────────────────────────────────────┘
//!                            ▲
//!                    ┌───────┴───────┐
//!                    │ StripeClient  │
//!                    └───────────────┘
//! ```

use crate::checkout::{CheckoutRequest, CheckoutSession};
use crate::error::RelayResult;
use crate::event::WebhookEvent;
use async_trait::async_trait;
use std::sync::Arc;

/// Client for a hosted-checkout payment provider.
#[async_trait]
pub trait CheckoutProvider: Send + Sync {
    /// Create a hosted checkout session.
    ///
    /// Any failure (network, validation, authentication) comes back as an
    /// `Err`; nothing is retried.
    async fn create_checkout_session(
        &self,
        request: &CheckoutRequest,
    ) -> RelayResult<CheckoutSession>;

    /// Verify a webhook signature and parse the event.
    ///
    /// # Arguments
    /// * `payload` - Raw webhook body bytes
    /// * `signature` - Signature header from the request
    fn construct_event(&self, payload: &[u8], signature: &str) -> RelayResult<WebhookEvent>;

    /// Get the provider name (for logging).
    fn provider_name(&self) -> &'static str;
}

/// Type alias for a shared provider (dynamic dispatch)
pub type BoxedCheckoutProvider = Arc<dyn CheckoutProvider>;
