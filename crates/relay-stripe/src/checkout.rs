//! # Stripe Checkout Sessions
//!
//! Implementation of the Stripe Checkout Sessions API behind the
//! `CheckoutProvider` trait.

use crate::config::StripeConfig;
use crate::webhook;
use async_trait::async_trait;
use relay_core::{
    CheckoutProvider, CheckoutRequest, CheckoutSession, RelayError, RelayResult, WebhookEvent,
};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, error, info, instrument};

/// Stripe client
///
/// Uses Stripe's hosted checkout page for payments and the endpoint's
/// signing secret for webhooks.
pub struct StripeClient {
    config: StripeConfig,
    client: Client,
}

impl StripeClient {
    /// Create a new Stripe client
    pub fn new(config: StripeConfig) -> RelayResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| {
                RelayError::Configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        info!(
            "Stripe client ready: api={}, test_mode={}",
            config.api_base_url,
            config.is_test_mode()
        );

        Ok(Self { config, client })
    }

    /// Create from environment variables
    pub fn from_env() -> RelayResult<Self> {
        Self::new(StripeConfig::from_env()?)
    }

    /// Encode a checkout request as Stripe form parameters
    fn form_params(request: &CheckoutRequest) -> Vec<(String, String)> {
        let mut params: Vec<(String, String)> =
            vec![("mode".to_string(), request.mode.as_str().to_string())];

        for (i, method) in request.payment_method_types.iter().enumerate() {
            params.push((format!("payment_method_types[{}]", i), method.clone()));
        }

        for (i, item) in request.line_items.iter().enumerate() {
            params.push((
                format!("line_items[{}][price_data][currency]", i),
                item.currency.clone(),
            ));
            params.push((
                format!("line_items[{}][price_data][product_data][name]", i),
                item.product_name.clone(),
            ));
            params.push((
                format!("line_items[{}][price_data][unit_amount]", i),
                item.unit_amount.to_string(),
            ));
            params.push((format!("line_items[{}][quantity]", i), item.quantity.to_string()));
        }

        params.push(("success_url".to_string(), request.success_url.clone()));
        params.push(("cancel_url".to_string(), request.cancel_url.clone()));
        params
    }
}

#[async_trait]
impl CheckoutProvider for StripeClient {
    #[instrument(skip(self, request), fields(items = request.line_items.len()))]
    async fn create_checkout_session(
        &self,
        request: &CheckoutRequest,
    ) -> RelayResult<CheckoutSession> {
        let form_params = Self::form_params(request);
        let url = format!("{}/v1/checkout/sessions", self.config.api_base_url);
        let idempotency_key = uuid::Uuid::new_v4().to_string();

        debug!(
            "Creating Stripe checkout session: {} items, mode={}",
            request.line_items.len(),
            request.mode.as_str()
        );

        let response = self
            .client
            .post(&url)
            .header("Authorization", self.config.auth_header())
            .header("Stripe-Version", &self.config.api_version)
            .header("Idempotency-Key", &idempotency_key)
            .form(&form_params)
            .send()
            .await
            .map_err(|e| RelayError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| RelayError::Network(e.to_string()))?;

        if !status.is_success() {
            error!("Stripe API error: status={}, body={}", status, body);

            // Parse Stripe error
            if let Ok(error_response) = serde_json::from_str::<StripeErrorResponse>(&body) {
                return Err(RelayError::Api {
                    status: Some(status.as_u16()),
                    code: error_response.error.code,
                    message: error_response.error.message,
                });
            }

            return Err(RelayError::Api {
                status: Some(status.as_u16()),
                code: None,
                message: format!("HTTP {}: {}", status, body),
            });
        }

        let session: StripeCheckoutSessionResponse = serde_json::from_str(&body).map_err(|e| {
            RelayError::Parse(format!("Failed to parse Stripe response: {}", e))
        })?;

        info!("Created Stripe checkout session: id={}", session.id);

        Ok(CheckoutSession {
            id: session.id,
            url: session.url,
        })
    }

    fn construct_event(&self, payload: &[u8], signature: &str) -> RelayResult<WebhookEvent> {
        webhook::construct_event(
            payload,
            signature,
            &self.config.webhook_secret,
            self.config.webhook_tolerance_secs,
        )
    }

    fn provider_name(&self) -> &'static str {
        "stripe"
    }
}

// =============================================================================
// Stripe API Types
// =============================================================================

#[derive(Debug, Deserialize)]
struct StripeCheckoutSessionResponse {
    id: String,
    #[serde(default)]
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StripeErrorResponse {
    error: StripeError,
}

#[derive(Debug, Deserialize)]
struct StripeError {
    message: String,
    #[serde(default)]
    code: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_string_contains, header, header_exists, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn request() -> CheckoutRequest {
        CheckoutRequest::fixed("http://localhost:5000/success", "http://localhost:5000/cancel")
    }

    fn client_for(server: &MockServer) -> StripeClient {
        let config =
            StripeConfig::new("sk_test_abc123", "whsec_secret").with_api_base_url(server.uri());
        StripeClient::new(config).unwrap()
    }

    #[test]
    fn test_form_params() {
        let params = StripeClient::form_params(&request());
        let get = |key: &str| {
            params
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.as_str())
        };

        assert_eq!(get("mode"), Some("payment"));
        assert_eq!(get("payment_method_types[0]"), Some("card"));
        assert_eq!(get("line_items[0][price_data][currency]"), Some("usd"));
        assert_eq!(get("line_items[0][price_data][product_data][name]"), Some("Test Product"));
        assert_eq!(get("line_items[0][price_data][unit_amount]"), Some("1099"));
        assert_eq!(get("line_items[0][quantity]"), Some("1"));
        assert_eq!(get("success_url"), Some("http://localhost:5000/success"));
        assert_eq!(get("cancel_url"), Some("http://localhost:5000/cancel"));
    }

    #[tokio::test]
    async fn test_create_checkout_session() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/checkout/sessions"))
            .and(header("Authorization", "Bearer sk_test_abc123"))
            .and(header_exists("Idempotency-Key"))
            .and(body_string_contains("unit_amount%5D=1099"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "cs_test_123",
                "object": "checkout.session",
                "url": "https://checkout.stripe.com/c/pay/cs_test_123"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let session = client.create_checkout_session(&request()).await.unwrap();

        assert_eq!(session.id, "cs_test_123");
        assert_eq!(
            session.url.as_deref(),
            Some("https://checkout.stripe.com/c/pay/cs_test_123")
        );
    }

    #[tokio::test]
    async fn test_stripe_error_message_is_surfaced() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/checkout/sessions"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "error": {
                    "message": "Invalid API Key provided: sk_test_***123",
                    "type": "invalid_request_error"
                }
            })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client.create_checkout_session(&request()).await.unwrap_err();

        assert_eq!(err.to_string(), "Invalid API Key provided: sk_test_***123");
        assert!(matches!(err, RelayError::Api { status: Some(401), .. }));
        assert_eq!(err.status_code(), 400);
    }

    #[tokio::test]
    async fn test_non_json_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/checkout/sessions"))
            .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client.create_checkout_session(&request()).await.unwrap_err();

        assert!(err.to_string().contains("bad gateway"));
    }

    #[tokio::test]
    async fn test_network_error() {
        let config = StripeConfig::new("sk_test_abc123", "whsec_secret")
            .with_api_base_url("http://127.0.0.1:1");
        let client = StripeClient::new(config).unwrap();

        let err = client.create_checkout_session(&request()).await.unwrap_err();
        assert!(matches!(err, RelayError::Network(_)));
    }

    #[test]
    fn test_construct_event_uses_webhook_secret() {
        let config = StripeConfig::new("sk_test_abc123", "whsec_secret");
        let client = StripeClient::new(config).unwrap();
        let payload = br#"{"id":"evt_1","type":"charge.succeeded","created":1700000000,
"data":{"object":{"id":"ch_1"}}}"#;

        let now = chrono::Utc::now().timestamp();
        let good = webhook::sign_payload("whsec_secret", now, payload);
        let bad = webhook::sign_payload("whsec_other", now, payload);

        assert!(client.construct_event(payload, &good).is_ok());
        assert!(client.construct_event(payload, &bad).is_err());
    }
}
