/*
[INPUT]:  Encoded query string and credential
[OUTPUT]: Signed query string (recvWindow, timestamp, signature)
[POS]:    HTTP layer - request signing for TRADE/USER_DATA endpoints
[UPDATE]: When changing signing algorithm or parameter layout
*/

use chrono::Utc;

use crate::auth::Credential;

/// Appends timing params and the HMAC signature to signed requests
#[derive(Debug, Clone)]
pub struct RequestSigner {
    credential: Credential,
    recv_window: Option<u64>,
}

impl RequestSigner {
    pub fn new(credential: Credential, recv_window: Option<u64>) -> Self {
        Self {
            credential,
            recv_window,
        }
    }

    pub fn api_key(&self) -> &str {
        self.credential.api_key()
    }

    /// Current time in epoch milliseconds
    pub fn timestamp(&self) -> i64 {
        Utc::now().timestamp_millis()
    }

    /// Sign a request according to Binance SIGNED endpoint rules
    ///
    /// Format: "{query}&recvWindow={window}&timestamp={timestamp}&signature={hex}".
    /// The signature covers everything before `&signature`.
    pub fn sign_query(&self, query: &str, timestamp: i64) -> String {
        let mut payload = String::with_capacity(query.len() + 96);
        payload.push_str(query);

        if let Some(recv_window) = self.recv_window {
            push_param(&mut payload, "recvWindow", recv_window);
        }
        push_param(&mut payload, "timestamp", timestamp);

        let signature = self.credential.sign(&payload);
        push_param(&mut payload, "signature", signature);
        payload
    }
}

fn push_param(payload: &mut String, key: &str, value: impl std::fmt::Display) {
    if !payload.is_empty() {
        payload.push('&');
    }
    payload.push_str(&format!("{key}={value}"));
}
