//! # Request Handlers
//!
//! Axum request handlers for the checkout relay.

use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    Json,
};
use relay_core::{dispatch_webhook_event, CheckoutRequest, RelayError};
use serde::Serialize;
use tracing::{error, info, instrument, warn};

/// Header carrying the provider's webhook signature
pub const SIGNATURE_HEADER: &str = "stripe-signature";

// =============================================================================
// Response Types
// =============================================================================

/// Create checkout response
#[derive(Debug, Serialize)]
pub struct CreateCheckoutResponse {
    /// Session ID
    pub id: String,
    /// Checkout URL (redirect user here)
    pub url: Option<String>,
}

/// Webhook acknowledgement
#[derive(Debug, Serialize)]
pub struct WebhookAck {
    pub success: bool,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn relay_error_to_response(err: RelayError) -> ApiError {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(ErrorResponse::new(err.to_string())))
}

// =============================================================================
// Handlers
// =============================================================================

/// Landing page
pub async fn index() -> &'static str {
    "Hello, World!"
}

/// Create a checkout session for the fixed line item.
///
/// The request body is not consulted.
#[instrument(skip(state))]
pub async fn create_checkout_session(
    State(state): State<AppState>,
) -> Result<Json<CreateCheckoutResponse>, ApiError> {
    info!("Creating checkout session");

    let request = CheckoutRequest::fixed(&state.config.success_url, &state.config.cancel_url);

    let session = state
        .provider
        .create_checkout_session(&request)
        .await
        .map_err(|e| {
            error!(
                "Failed to create checkout via {}: {}",
                state.provider.provider_name(),
                e
            );
            relay_error_to_response(e)
        })?;

    info!("Created checkout session: {}", session.id);

    Ok(Json(CreateCheckoutResponse {
        id: session.id,
        url: session.url,
    }))
}

/// Checkout success page
pub async fn success() -> &'static str {
    "Payment completed successfully!"
}

/// Checkout cancel page
pub async fn cancel() -> &'static str {
    "Payment was cancelled."
}

/// Handle a provider webhook
#[instrument(skip(state, headers, body))]
pub async fn webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<WebhookAck>, ApiError> {
    let signature = headers.get(SIGNATURE_HEADER).ok_or_else(|| {
        warn!("Webhook rejected: missing signature header");
        relay_error_to_response(RelayError::SignatureVerification(
            "Missing Stripe-Signature header".to_string(),
        ))
    })?;
    let signature = signature.to_str().map_err(|_| {
        warn!("Webhook rejected: signature header is not visible ASCII");
        relay_error_to_response(RelayError::SignatureVerification(
            "Malformed Stripe-Signature header".to_string(),
        ))
    })?;

    let event = state.provider.construct_event(&body, signature).map_err(|e| {
        warn!("Webhook verification failed: {}", e);
        relay_error_to_response(e)
    })?;

    info!("Received webhook: type={}, id={}", event.event_type, event.id);

    dispatch_webhook_event(state.webhook_handler.as_ref(), &event).map_err(|e| {
        error!("Webhook handler error: {}", e);
        relay_error_to_response(e)
    })?;

    Ok(Json(WebhookAck { success: true }))
}
