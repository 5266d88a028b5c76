//! # Application State
//!
//! Shared state for the Axum application.
//! Holds the checkout provider, the webhook handler and the configuration,
//! all fixed at startup.

use relay_core::{BoxedCheckoutProvider, BoxedWebhookHandler, LoggingWebhookHandler};
use relay_stripe::StripeClient;
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Redirect target after a successful payment
    pub success_url: String,
    /// Redirect target when the customer cancels
    pub cancel_url: String,
    /// Environment (development, staging, production)
    pub environment: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            success_url: "http://localhost:5000/success".to_string(),
            cancel_url: "http://localhost:5000/cancel".to_string(),
            environment: "development".to_string(),
        }
    }
}

/// Locations searched for the optional config file
const CONFIG_PATHS: [&str; 3] = [
    "config/relay.toml",
    "../config/relay.toml",
    "../../config/relay.toml",
];

impl AppConfig {
    /// Load from `config/relay.toml` (if present), then apply environment
    /// variable overrides.
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let mut config = Self::default();
        for path in CONFIG_PATHS {
            if Path::new(path).exists() {
                let content = std::fs::read_to_string(path)?;
                config = Self::from_toml_str(&content)
                    .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", path, e))?;
                tracing::info!("Loaded configuration from {}", path);
                break;
            }
        }

        Ok(config.with_overrides(|key| std::env::var(key).ok()))
    }

    /// Parse a TOML document; missing keys keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Apply `HOST`, `PORT`, `SUCCESS_URL`, `CANCEL_URL` and `ENVIRONMENT`
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("HOST") {
            self.host = host;
        }
        if let Some(port) = lookup("PORT").and_then(|p| p.parse().ok()) {
            self.port = port;
        }
        if let Some(url) = lookup("SUCCESS_URL") {
            self.success_url = url;
        }
        if let Some(url) = lookup("CANCEL_URL") {
            self.cancel_url = url;
        }
        if let Some(env) = lookup("ENVIRONMENT") {
            self.environment = env;
        }
        self
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| {
                anyhow::anyhow!("Invalid socket address {}:{}: {}", self.host, self.port, e)
            })
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Remote payment provider
    pub provider: BoxedCheckoutProvider,
    /// Reacts to verified webhook events
    pub webhook_handler: BoxedWebhookHandler,
    /// Application config
    pub config: AppConfig,
}

impl AppState {
    /// Create an AppState backed by Stripe, configured from the environment
    pub fn new() -> anyhow::Result<Self> {
        let config = AppConfig::load()?;

        let stripe = StripeClient::from_env()
            .map_err(|e| anyhow::anyhow!("Failed to initialize Stripe: {}", e))?;

        Ok(Self::with_provider(config, Arc::new(stripe)))
    }

    /// Create an AppState around any provider, logging webhook events
    pub fn with_provider(config: AppConfig, provider: BoxedCheckoutProvider) -> Self {
        Self {
            provider,
            webhook_handler: Arc::new(LoggingWebhookHandler),
            config,
        }
    }

    /// Builder: replace the webhook handler
    pub fn with_webhook_handler(mut self, handler: BoxedWebhookHandler) -> Self {
        self.webhook_handler = handler;
        self
    }
}
