//! Payment Gateway Config

use std::time::Duration;

use clap::Args;
use homestay_app::domain::payments::gateway::RazorpayConfig;

/// Razorpay credentials and transport settings.
#[derive(Debug, Args)]
pub struct GatewayConfig {
    /// Public key id handed to the checkout widget
    #[arg(long, env = "GATEWAY_KEY_ID")]
    pub gateway_key_id: String,

    /// Key secret used for API calls and callback signatures
    #[arg(long, env = "GATEWAY_KEY_SECRET", hide_env_values = true)]
    pub gateway_key_secret: String,

    /// Gateway API base URL
    #[arg(long, env = "GATEWAY_API_BASE", default_value = "https://api.razorpay.com")]
    pub gateway_api_base: String,

    /// Timeout for gateway API calls in seconds
    #[arg(long, env = "GATEWAY_TIMEOUT_SECONDS", default_value_t = 10_u64)]
    pub gateway_timeout_seconds: u64,
}

impl GatewayConfig {
    /// Settings for the gateway adapter.
    #[must_use]
    pub fn razorpay_config(&self) -> RazorpayConfig {
        RazorpayConfig {
            key_id: self.gateway_key_id.clone(),
            key_secret: self.gateway_key_secret.clone(),
            api_base: self.gateway_api_base.clone(),
            timeout: Duration::from_secs(self.gateway_timeout_seconds),
        }
    }
}
