//! Payment gateway boundary.

use async_trait::async_trait;
use mockall::automock;
use thiserror::Error;

mod razorpay;
mod signature;

pub use razorpay::{RazorpayConfig, RazorpayGateway};
pub use signature::SignatureKey;

/// Order to open at the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRequest {
    /// Minor units of `currency`.
    pub amount: u64,
    pub currency: String,
    pub receipt: String,
    pub notes: Vec<(String, String)>,
}

/// Order as acknowledged by the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayOrder {
    pub id: String,
    pub amount: u64,
    pub currency: String,
}

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("gateway request failed")]
    Transport(#[source] reqwest::Error),

    #[error("gateway rejected the order with status {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("gateway response could not be decoded")]
    Decode(#[source] reqwest::Error),

    #[error("gateway secret is not usable as an HMAC key")]
    InvalidSecret,
}

#[automock]
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Create a remote order for the given amount.
    async fn create_order(&self, order: OrderRequest) -> Result<GatewayOrder, GatewayError>;

    /// Public key id the client uses to open the checkout widget.
    fn key_id(&self) -> String;

    /// Whether `signature` authenticates the `order_id`/`payment_id` pair.
    fn verify_signature(&self, order_id: &str, payment_id: &str, signature: &str) -> bool;
}
