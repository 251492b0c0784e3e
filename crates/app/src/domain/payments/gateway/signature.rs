//! Checkout callback signatures.
//!
//! The gateway signs `"{order_id}|{payment_id}"` with HMAC-SHA256 keyed by the
//! account secret and hands the lower-case hex digest to the client.

use std::{fmt, fmt::Write as _};

use constant_time_eq::constant_time_eq;
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::domain::payments::gateway::GatewayError;

type HmacSha256 = Hmac<Sha256>;

/// Keyed signer for checkout callbacks.
#[derive(Clone)]
pub struct SignatureKey {
    mac: HmacSha256,
}

impl fmt::Debug for SignatureKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SignatureKey(<redacted>)")
    }
}

impl SignatureKey {
    /// Build a signer from the gateway's shared secret.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidSecret`] if the secret is rejected as a key.
    pub fn new(secret: &str) -> Result<Self, GatewayError> {
        let mac = <HmacSha256 as Mac>::new_from_slice(secret.as_bytes())
            .map_err(|_| GatewayError::InvalidSecret)?;

        Ok(Self { mac })
    }

    /// Hex signature for an order/payment pair.
    #[must_use]
    pub fn sign(&self, order_id: &str, payment_id: &str) -> String {
        let mut mac = self.mac.clone();

        mac.update(order_id.as_bytes());
        mac.update(b"|");
        mac.update(payment_id.as_bytes());

        mac.finalize()
            .into_bytes()
            .iter()
            .fold(String::with_capacity(64), |mut hex, byte| {
                let _infallible = write!(hex, "{byte:02x}");

                hex
            })
    }

    /// Compare a client-supplied signature against the expected one.
    #[must_use]
    pub fn verify(&self, order_id: &str, payment_id: &str, signature: &str) -> bool {
        let expected = self.sign(order_id, payment_id);

        constant_time_eq(expected.as_bytes(), signature.as_bytes())
    }
}
