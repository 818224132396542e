/*
[INPUT]:  Ordered key/value request parameters
[OUTPUT]: Form-urlencoded query strings (the exact bytes that get signed)
[POS]:    HTTP layer - query parameter encoding
[UPDATE]: When parameter encoding rules change
*/

use std::fmt::Display;

use rust_decimal::Decimal;
use url::form_urlencoded;

/// Ordered query parameters; encoding order is insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: &str, value: impl Display) {
        self.pairs.push((key.to_string(), value.to_string()));
    }

    pub fn with(mut self, key: &str, value: impl Display) -> Self {
        self.push(key, value);
        self
    }

    pub fn with_opt<V: Display>(self, key: &str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.with(key, value),
            None => self,
        }
    }

    /// Decimals go out without trailing zeros
    pub fn with_decimal(self, key: &str, value: Decimal) -> Self {
        self.with(key, value.normalize())
    }

    pub fn with_decimal_opt(self, key: &str, value: Option<Decimal>) -> Self {
        match value {
            Some(value) => self.with_decimal(key, value),
            None => self,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn encode(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in &self.pairs {
            serializer.append_pair(key, value);
        }
        serializer.finish()
    }
}
