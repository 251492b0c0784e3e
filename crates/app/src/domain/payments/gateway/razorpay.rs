//! Razorpay orders API adapter.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, error};

use crate::domain::payments::gateway::{
    GatewayError, GatewayOrder, OrderRequest, PaymentGateway, SignatureKey,
};

/// Connection settings for the Razorpay API.
#[derive(Debug, Clone)]
pub struct RazorpayConfig {
    pub key_id: String,
    pub key_secret: String,
    pub api_base: String,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct RazorpayGateway {
    client: Client,
    key_id: String,
    key_secret: String,
    orders_url: String,
    signatures: SignatureKey,
}

impl RazorpayGateway {
    /// Build a gateway client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built or the secret is
    /// unusable as a signing key.
    pub fn new(config: RazorpayConfig) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(GatewayError::Transport)?;

        Ok(Self {
            client,
            signatures: SignatureKey::new(&config.key_secret)?,
            orders_url: format!("{}/v1/orders", config.api_base.trim_end_matches('/')),
            key_id: config.key_id,
            key_secret: config.key_secret,
        })
    }
}

#[derive(Debug, Serialize)]
struct CreateOrderBody<'a> {
    amount: u64,
    currency: &'a str,
    receipt: &'a str,
    notes: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
struct OrderResponse {
    id: String,
    amount: u64,
    currency: String,
}

#[async_trait]
impl PaymentGateway for RazorpayGateway {
    #[tracing::instrument(
        name = "payments.gateway.create_order",
        skip(self, order),
        fields(receipt = %order.receipt, amount = order.amount),
        err
    )]
    async fn create_order(&self, order: OrderRequest) -> Result<GatewayOrder, GatewayError> {
        let body = CreateOrderBody {
            amount: order.amount,
            currency: &order.currency,
            receipt: &order.receipt,
            notes: order
                .notes
                .iter()
                .map(|(key, value)| (key.clone(), Value::String(value.clone())))
                .collect(),
        };

        let response = self
            .client
            .post(&self.orders_url)
            .basic_auth(&self.key_id, Some(&self.key_secret))
            .json(&body)
            .send()
            .await
            .map_err(GatewayError::Transport)?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();

            error!(status = status.as_u16(), "gateway rejected order: {body}");

            return Err(GatewayError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let created: OrderResponse = response.json().await.map_err(GatewayError::Decode)?;

        debug!(order_id = %created.id, "gateway order created");

        Ok(GatewayOrder {
            id: created.id,
            amount: created.amount,
            currency: created.currency,
        })
    }

    fn key_id(&self) -> String {
        self.key_id.clone()
    }

    fn verify_signature(&self, order_id: &str, payment_id: &str, signature: &str) -> bool {
        self.signatures.verify(order_id, payment_id, signature)
    }
}
