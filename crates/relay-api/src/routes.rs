//! # Routes
//!
//! Axum router configuration for the checkout relay.

use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Create the main application router
///
/// Routes:
/// - GET  /                         - Landing page
/// - GET  /create-checkout-session  - Create checkout session
/// - POST /create-checkout-session  - Create checkout session
/// - GET  /success                  - Success page
/// - GET  /cancel                   - Cancel page
/// - POST /webhook                  - Provider webhook
pub fn create_router(state: AppState) -> Router {
    // Checkout is started from arbitrary front-ends
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::index))
        .route(
            "/create-checkout-session",
            get(handlers::create_checkout_session).post(handlers::create_checkout_session),
        )
        .route("/success", get(handlers::success))
        .route("/cancel", get(handlers::cancel))
        .route("/webhook", post(handlers::webhook))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}
