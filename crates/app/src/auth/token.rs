//! API token formatting, parsing, and verifier hashing.
//!
//! Tokens look like `hh_v1_{token uuid}.{64 hex chars}`. Only a SHA-256
//! verifier of the token is stored; the raw secret is shown once at issue time.

use std::{
    fmt::{self, Write as _},
    str::FromStr,
};

use constant_time_eq::constant_time_eq;
use rand::{RngCore, rngs::OsRng};
use sha2::{Digest, Sha256};
use thiserror::Error;
use uuid::Uuid;
use zeroize::Zeroize;

use crate::auth::UserUuid;

/// API token identifier prefix.
pub const API_TOKEN_PREFIX: &str = "hh";

/// Number of secret bytes encoded in a token.
pub const API_TOKEN_SECRET_BYTES: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiTokenVersion {
    V1,
}

impl ApiTokenVersion {
    #[must_use]
    pub const fn as_i16(self) -> i16 {
        match self {
            Self::V1 => 1,
        }
    }

    #[must_use]
    pub const fn segment(self) -> &'static str {
        match self {
            Self::V1 => "v1",
        }
    }
}

impl TryFrom<i16> for ApiTokenVersion {
    type Error = ApiTokenError;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::V1),
            _ => Err(ApiTokenError::UnsupportedVersion),
        }
    }
}

impl FromStr for ApiTokenVersion {
    type Err = ApiTokenError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "v1" => Ok(Self::V1),
            _ => Err(ApiTokenError::UnsupportedVersion),
        }
    }
}

/// Raw token secret; wiped from memory on drop.
#[derive(Clone)]
pub struct ApiTokenSecret([u8; API_TOKEN_SECRET_BYTES]);

impl ApiTokenSecret {
    #[must_use]
    pub fn generate() -> Self {
        let mut bytes = [0_u8; API_TOKEN_SECRET_BYTES];

        OsRng.fill_bytes(&mut bytes);

        Self(bytes)
    }

    #[must_use]
    pub const fn from_bytes(bytes: [u8; API_TOKEN_SECRET_BYTES]) -> Self {
        Self(bytes)
    }

    fn to_hex(&self) -> String {
        self.0
            .iter()
            .fold(String::with_capacity(API_TOKEN_SECRET_BYTES * 2), |mut hex, byte| {
                let _infallible = write!(hex, "{byte:02x}");

                hex
            })
    }

    fn from_hex(hex: &str) -> Option<Self> {
        if hex.len() != API_TOKEN_SECRET_BYTES * 2 || !hex.is_ascii() {
            return None;
        }

        let mut bytes = [0_u8; API_TOKEN_SECRET_BYTES];

        for (byte, pair) in bytes.iter_mut().zip(hex.as_bytes().chunks_exact(2)) {
            let pair = std::str::from_utf8(pair).ok()?;

            *byte = u8::from_str_radix(pair, 16).ok()?;
        }

        Some(Self(bytes))
    }
}

impl fmt::Debug for ApiTokenSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiTokenSecret(**redacted**)")
    }
}

impl PartialEq for ApiTokenSecret {
    fn eq(&self, other: &Self) -> bool {
        constant_time_eq(&self.0, &other.0)
    }
}

impl Drop for ApiTokenSecret {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

#[derive(Debug, Clone)]
pub struct ParsedApiToken {
    pub token_uuid: Uuid,
    pub version: ApiTokenVersion,
    pub secret: ApiTokenSecret,
}

#[derive(Debug, Error)]
pub enum ApiTokenError {
    #[error("api token format is invalid")]
    InvalidFormat,

    #[error("api token uses an unsupported version")]
    UnsupportedVersion,

    #[error("api token secret encoding is invalid")]
    InvalidSecretEncoding,
}

#[must_use]
pub fn format_api_token(
    token_uuid: Uuid,
    version: ApiTokenVersion,
    secret: &ApiTokenSecret,
) -> String {
    format!(
        "{API_TOKEN_PREFIX}_{}_{}.{}",
        version.segment(),
        token_uuid.simple(),
        secret.to_hex()
    )
}

/// Parse a bearer token into its parts.
///
/// # Errors
///
/// Returns an error when the prefix, version, uuid, or secret is malformed.
pub fn parse_api_token(token: &str) -> Result<ParsedApiToken, ApiTokenError> {
    let (identity, secret_hex) = token.split_once('.').ok_or(ApiTokenError::InvalidFormat)?;

    let rest = identity
        .strip_prefix(API_TOKEN_PREFIX)
        .and_then(|rest| rest.strip_prefix('_'))
        .ok_or(ApiTokenError::InvalidFormat)?;

    let (version, token_uuid) = rest.split_once('_').ok_or(ApiTokenError::InvalidFormat)?;

    Ok(ParsedApiToken {
        version: version.parse()?,
        token_uuid: Uuid::try_parse(token_uuid).map_err(|_| ApiTokenError::InvalidFormat)?,
        secret: ApiTokenSecret::from_hex(secret_hex).ok_or(ApiTokenError::InvalidSecretEncoding)?,
    })
}

/// Hash stored for a token: SHA-256 over
/// `{token_uuid}:{version}:{user_uuid}:{secret_hex}`, lower-case hex.
#[must_use]
pub fn token_verifier(
    token_uuid: &Uuid,
    version: ApiTokenVersion,
    user_uuid: UserUuid,
    secret: &ApiTokenSecret,
) -> String {
    let input = format!(
        "{}:{}:{}:{}",
        token_uuid.simple(),
        version.as_i16(),
        user_uuid.into_uuid().simple(),
        secret.to_hex(),
    );

    format!("{:x}", Sha256::digest(input.as_bytes()))
}

/// Compare a freshly computed verifier against the stored one.
#[must_use]
pub fn verifier_matches(computed: &str, stored: &str) -> bool {
    constant_time_eq(computed.as_bytes(), stored.as_bytes())
}
