//! # Webhook Dispatch
//!
//! Routes a verified event to the matching `WebhookHandler` hook.

use crate::error::{RelayError, RelayResult};
use crate::event::{EventType, WebhookEvent};
use std::sync::Arc;
use tracing::{debug, info};

/// Webhook event handler trait
///
/// Implement this trait to react to provider events. The defaults only log.
pub trait WebhookHandler: Send + Sync {
    /// Called once per verified `checkout.session.completed` event
    fn on_checkout_completed(&self, session_id: &str) {
        info!("Payment completed: session_id={}", session_id);
    }

    /// Called for every other event type
    fn on_unhandled_event(&self, event: &WebhookEvent) {
        debug!(
            "Unhandled webhook event: type={}, id={}",
            event.event_type, event.id
        );
    }
}

/// Default handler (just logs events)
pub struct LoggingWebhookHandler;

impl WebhookHandler for LoggingWebhookHandler {}

/// Type alias for a shared webhook handler
pub type BoxedWebhookHandler = Arc<dyn WebhookHandler>;

/// Dispatch a webhook event to the appropriate handler method.
///
/// A completed checkout without a session id is a malformed payload.
pub fn dispatch_webhook_event(
    handler: &dyn WebhookHandler,
    event: &WebhookEvent,
) -> RelayResult<()> {
    match &event.event_type {
        EventType::CheckoutSessionCompleted => {
            let session_id = event.object_id().ok_or_else(|| {
                RelayError::Parse("Missing session id in checkout.session.completed".to_string())
            })?;
            handler.on_checkout_completed(session_id);
        }
        EventType::Other(_) => handler.on_unhandled_event(event),
    }
    Ok(())
}
