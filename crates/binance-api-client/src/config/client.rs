/*
[INPUT]:  HTTP tuning options (timeouts, recv window)
[OUTPUT]: ClientConfig consumed by REST clients
[POS]:    Config layer - transport tuning
[UPDATE]: When adding connection options
*/

use std::time::Duration;

/// HTTP client configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub timeout: Duration,
    pub connect_timeout: Duration,
    /// `recvWindow` in milliseconds appended to signed requests.
    /// `None` leaves the exchange default (5000ms) in place.
    pub recv_window: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            recv_window: None,
        }
    }
}

impl ClientConfig {
    pub fn with_recv_window(mut self, recv_window: u64) -> Self {
        self.recv_window = Some(recv_window);
        self
    }
}
