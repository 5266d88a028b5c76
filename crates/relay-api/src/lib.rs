//! # relay-api
//!
//! HTTP API layer for checkout-relay.
//!
//! This crate provides:
//! - Axum-based HTTP server
//! - Checkout session endpoint fronting the payment provider
//! - Webhook receiver for payment events
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/` | Landing page |
//! | GET, POST | `/create-checkout-session` | Create checkout session |
//! | GET | `/success` | Payment success page |
//! | GET | `/cancel` | Payment cancelled page |
//! | POST | `/webhook` | Stripe webhook |

pub mod handlers;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::{AppConfig, AppState};
