//! # Checkout Types
//!
//! The request the relay sends to the provider and the session it gets back.

use serde::{Deserialize, Serialize};

/// Currency of the fixed line item
pub const DEFAULT_CURRENCY: &str = "usd";

/// Display name of the fixed line item
pub const DEFAULT_PRODUCT_NAME: &str = "Test Product";

/// Unit price of the fixed line item, in minor units (cents)
pub const DEFAULT_UNIT_AMOUNT: i64 = 1099;

/// Quantity of the fixed line item
pub const DEFAULT_QUANTITY: u32 = 1;

/// A single line item on a checkout session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItem {
    /// ISO currency code, lowercase
    pub currency: String,
    /// Product name shown on the hosted checkout page
    pub product_name: String,
    /// Unit price in minor currency units
    pub unit_amount: i64,
    pub quantity: u32,
}

impl LineItem {
    /// The one item every checkout is created with.
    pub fn fixed() -> Self {
        Self {
            currency: DEFAULT_CURRENCY.to_string(),
            product_name: DEFAULT_PRODUCT_NAME.to_string(),
            unit_amount: DEFAULT_UNIT_AMOUNT,
            quantity: DEFAULT_QUANTITY,
        }
    }
}

/// Checkout mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CheckoutMode {
    /// One-time payment
    #[default]
    Payment,
}

impl CheckoutMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutMode::Payment => "payment",
        }
    }
}

/// Everything the provider needs to open a hosted checkout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutRequest {
    pub mode: CheckoutMode,
    pub payment_method_types: Vec<String>,
    pub line_items: Vec<LineItem>,
    /// Where the provider redirects after a successful payment
    pub success_url: String,
    /// Where the provider redirects when the customer backs out
    pub cancel_url: String,
}

impl CheckoutRequest {
    /// Card payment for the fixed line item.
    pub fn fixed(success_url: impl Into<String>, cancel_url: impl Into<String>) -> Self {
        Self {
            mode: CheckoutMode::Payment,
            payment_method_types: vec!["card".to_string()],
            line_items: vec![LineItem::fixed()],
            success_url: success_url.into(),
            cancel_url: cancel_url.into(),
        }
    }
}

/// A provider-hosted checkout session.
///
/// Only the identifier and redirect URL are kept; the session itself lives
/// with the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutSession {
    pub id: String,
    /// Hosted checkout page. The provider may omit it, in which case it is
    /// relayed as `null`.
    pub url: Option<String>,
}
