/*
[INPUT]:  API key, secret key bytes, query payloads
[OUTPUT]: Lowercase hex HMAC SHA256 signatures
[POS]:    Auth layer - signing for TRADE/USER_DATA endpoints
[UPDATE]: When changing signing algorithm or key format
*/

use std::fmt;

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::config::ApiConfig;

type HmacSha256 = Hmac<Sha256>;

/// API key plus signing secret
#[derive(Clone)]
pub struct Credential {
    api_key: String,
    secret: Box<[u8]>,
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct(stringify!(Credential))
            .field("api_key", &self.api_key)
            .field("secret", &"<redacted>")
            .finish()
    }
}

impl Credential {
    pub fn new(api_key: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            secret: secret.into().into_bytes().into_boxed_slice(),
        }
    }

    /// Build from config; `None` unless both key and secret are non-empty
    pub fn from_config(config: &ApiConfig) -> Option<Self> {
        if !config.has_credentials() {
            return None;
        }
        Some(Self::new(config.api_key()?, config.secret()?))
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Sign a message and return the lowercase hex digest
    pub fn sign(&self, message: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(&self.secret)
            .unwrap_or_else(|_| unreachable!("hmac accepts any key length"));
        mac.update(message.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }
}
