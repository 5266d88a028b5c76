//! # relay-core
//!
//! Core types and traits for the checkout-relay payment gateway.
//!
//! This crate provides:
//! - `CheckoutProvider` trait for the remote payment provider client
//! - `CheckoutRequest`, `LineItem` and `CheckoutSession` for the checkout flow
//! - `WebhookEvent` and `WebhookHandler` for provider callbacks
//! - `RelayError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use relay_core::{CheckoutProvider, CheckoutRequest};
//!
//! let request = CheckoutRequest::fixed(
//!     "http://localhost:5000/success",
//!     "http://localhost:5000/cancel",
//! );
//! let session = provider.create_checkout_session(&request).await?;
//!
//! // Redirect user to session.url
//! ```

pub mod checkout;
pub mod error;
pub mod event;
pub mod handler;
pub mod provider;

// Re-exports for convenience
pub use checkout::{CheckoutMode, CheckoutRequest, CheckoutSession, LineItem};
pub use error::{RelayError, RelayResult};
pub use event::{EventData, EventType, WebhookEvent, CHECKOUT_SESSION_COMPLETED};
pub use handler::{
    dispatch_webhook_event, BoxedWebhookHandler, LoggingWebhookHandler, WebhookHandler,
};
pub use provider::{BoxedCheckoutProvider, CheckoutProvider};
