//! # relay-stripe
//!
//! Stripe provider for checkout-relay.
//!
//! `StripeClient` implements `relay_core::CheckoutProvider`:
//!
//! - **Checkout Sessions** - creates a hosted checkout for the fixed line item
//! - **Webhooks** - verifies `Stripe-Signature` and parses the event
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use relay_core::{CheckoutProvider, CheckoutRequest};
//! use relay_stripe::StripeClient;
//!
//! // Create client from environment
//! let stripe = StripeClient::from_env()?;
//!
//! let session = stripe
//!     .create_checkout_session(&CheckoutRequest::fixed(
//!         "https://example.com/success",
//!         "https://example.com/cancel",
//!     ))
//!     .await?;
//!
//! // Redirect user to session.url
//! ```
//!
//! ## Webhook Handling
//!
//! ```rust,ignore
//! use relay_core::{dispatch_webhook_event, LoggingWebhookHandler};
//!
//! // In your webhook endpoint:
//! let event = stripe.construct_event(&body, signature)?;
//! dispatch_webhook_event(&LoggingWebhookHandler, &event)?;
//! ```

pub mod checkout;
pub mod config;
pub mod webhook;

// Re-exports
pub use checkout::StripeClient;
pub use config::StripeConfig;
pub use webhook::{compute_signature, construct_event, sign_payload, verify_signature};
