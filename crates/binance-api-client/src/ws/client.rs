/*
[INPUT]:  Stream base URL, symbols and listen keys
[OUTPUT]: Real-time market and user-data events via channels
[POS]:    WebSocket layer - real-time data stream handling
[UPDATE]: When adding new channels or changing connection logic
*/

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message as WsMessage;
use tracing::{debug, info, warn};

use crate::config::ApiConfig;
use crate::http::{BinanceApiError, Result};
use crate::types::CandlestickInterval;
use crate::ws::message::{StreamEvent, parse_event};
use crate::ws::transport::SharedTransport;

const EVENT_CHANNEL_CAPACITY: usize = 100;
const OUTBOUND_CHANNEL_CAPACITY: usize = 8;
const MESSAGE_SAMPLE_LIMIT: usize = 3;
const OTHER_LOG_LIMIT: usize = 3;
const PARSE_FAIL_LOG_LIMIT: usize = 3;
const RAW_LOG_MAX_BYTES: usize = 1024;

static MESSAGE_SAMPLE_COUNT: AtomicUsize = AtomicUsize::new(0);
static OTHER_LOG_COUNT: AtomicUsize = AtomicUsize::new(0);
static PARSE_FAIL_LOG_COUNT: AtomicUsize = AtomicUsize::new(0);

/// Streaming client over the Binance raw stream endpoints
#[derive(Debug, Clone)]
pub struct BinanceApiWebSocketClient {
    transport: Arc<SharedTransport>,
    config: Arc<ApiConfig>,
    stream_base_url: String,
    rest_base_url: String,
}

impl BinanceApiWebSocketClient {
    pub fn new(transport: Arc<SharedTransport>, config: Arc<ApiConfig>) -> Self {
        let stream_base_url = config.stream_base_url();
        let rest_base_url = config.rest_base_url();
        Self::with_base_urls(transport, config, stream_base_url, rest_base_url)
    }

    /// Point the client at explicit stream and REST hosts
    pub fn with_base_urls(
        transport: Arc<SharedTransport>,
        config: Arc<ApiConfig>,
        stream_base_url: impl Into<String>,
        rest_base_url: impl Into<String>,
    ) -> Self {
        Self {
            transport,
            config,
            stream_base_url: stream_base_url.into(),
            rest_base_url: rest_base_url.into(),
        }
    }

    pub fn config(&self) -> &Arc<ApiConfig> {
        &self.config
    }

    pub fn transport(&self) -> &Arc<SharedTransport> {
        &self.transport
    }

    /// `<symbol>@depth` for each comma-separated symbol
    pub async fn on_depth_events(&self, symbols: &str) -> Result<StreamSubscription> {
        self.subscribe(symbol_channels(symbols, "depth")?).await
    }

    pub async fn on_candlestick_events(
        &self,
        symbols: &str,
        interval: CandlestickInterval,
    ) -> Result<StreamSubscription> {
        let suffix = format!("kline_{}", interval.as_str());
        self.subscribe(symbol_channels(symbols, &suffix)?).await
    }

    pub async fn on_agg_trade_events(&self, symbols: &str) -> Result<StreamSubscription> {
        self.subscribe(symbol_channels(symbols, "aggTrade")?).await
    }

    pub async fn on_ticker_events(&self, symbols: &str) -> Result<StreamSubscription> {
        self.subscribe(symbol_channels(symbols, "ticker")?).await
    }

    pub async fn on_all_market_tickers_events(&self) -> Result<StreamSubscription> {
        self.subscribe("!ticker@arr".to_string()).await
    }

    pub async fn on_book_ticker_events(&self, symbols: &str) -> Result<StreamSubscription> {
        self.subscribe(symbol_channels(symbols, "bookTicker")?).await
    }

    pub async fn on_all_book_tickers_events(&self) -> Result<StreamSubscription> {
        self.subscribe("!bookTicker".to_string()).await
    }

    /// Account, balance and order updates for a listen key
    pub async fn on_user_data_update_events(&self, listen_key: &str) -> Result<StreamSubscription> {
        let listen_key = listen_key.trim();
        if listen_key.is_empty() {
            return Err(BinanceApiError::Config("listen key is empty".to_string()));
        }
        self.subscribe(listen_key.to_string()).await
    }

    pub async fn start_user_data_stream(&self) -> Result<String> {
        self.transport
            .start_user_data_stream(&self.rest_base_url, self.api_key()?)
            .await
    }

    pub async fn keep_alive_user_data_stream(&self, listen_key: &str) -> Result<()> {
        self.transport
            .keep_alive_user_data_stream(&self.rest_base_url, self.api_key()?, listen_key)
            .await
    }

    pub async fn close_user_data_stream(&self, listen_key: &str) -> Result<()> {
        self.transport
            .close_user_data_stream(&self.rest_base_url, self.api_key()?, listen_key)
            .await
    }

    fn api_key(&self) -> Result<&str> {
        self.config
            .api_key()
            .filter(|key| !key.is_empty())
            .ok_or(BinanceApiError::MissingCredentials)
    }

    fn stream_url(&self, channel: &str) -> String {
        format!("{}/{}", self.stream_base_url.trim_end_matches('/'), channel)
    }

    async fn subscribe(&self, channel: String) -> Result<StreamSubscription> {
        let url = self.stream_url(&channel);
        let (ws_stream, _response) = connect_async(url.as_str())
            .await
            .map_err(|err| BinanceApiError::WebSocket(err.to_string()))?;
        info!(channel = %channel, "binance stream connected");

        let (mut write, mut read) = ws_stream.split();
        let (event_tx, event_rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
        let (outbound_tx, mut outbound_rx) = mpsc::channel::<WsMessage>(OUTBOUND_CHANNEL_CAPACITY);
        let task_channel = channel.clone();

        let task = tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = event_tx.closed() => {
                        let _ = write.send(WsMessage::Close(None)).await;
                        break;
                    }
                    outbound = outbound_rx.recv() => {
                        match outbound {
                            Some(message) => {
                                if write.send(message).await.is_err() {
                                    break;
                                }
                            }
                            None => {
                                let _ = write.send(WsMessage::Close(None)).await;
                                break;
                            }
                        }
                    }
                    incoming = read.next() => {
                        match incoming {
                            Some(Ok(WsMessage::Ping(payload))) => {
                                if write.send(WsMessage::Pong(payload)).await.is_err() {
                                    break;
                                }
                            }
                            Some(Ok(WsMessage::Pong(_))) => {}
                            Some(Ok(WsMessage::Close(frame))) => {
                                debug!(channel = %task_channel, frame = ?frame, "binance stream closed by server");
                                let _ = write.send(WsMessage::Close(None)).await;
                                break;
                            }
                            Some(Ok(message)) => {
                                if let Some(event) = decode_message(message)
                                    && event_tx.send(event).await.is_err()
                                {
                                    break;
                                }
                            }
                            Some(Err(err)) => {
                                warn!(channel = %task_channel, error = %err, "binance stream read failed");
                                break;
                            }
                            None => break,
                        }
                    }
                }
            }
            info!(channel = %task_channel, "binance stream task finished");
        });

        Ok(StreamSubscription {
            channel,
            events: event_rx,
            outbound: outbound_tx,
            task,
        })
    }
}

/// One live stream connection.
///
/// Dropping the subscription ends the connection task.
#[derive(Debug)]
pub struct StreamSubscription {
    channel: String,
    events: mpsc::Receiver<StreamEvent>,
    outbound: mpsc::Sender<WsMessage>,
    task: JoinHandle<()>,
}

impl StreamSubscription {
    pub fn channel(&self) -> &str {
        &self.channel
    }

    /// Next event, or `None` once the connection has ended
    pub async fn recv(&mut self) -> Option<StreamEvent> {
        self.events.recv().await
    }

    /// Send a close frame and wait for the connection task to finish
    pub async fn close(self) -> Result<()> {
        let Self {
            events,
            outbound,
            task,
            ..
        } = self;
        drop(events);
        drop(outbound);
        task.await
            .map_err(|err| BinanceApiError::WebSocket(err.to_string()))
    }
}

/// Build `<sym>@<suffix>` channels joined with `/`
fn symbol_channels(symbols: &str, suffix: &str) -> Result<String> {
    let channels: Vec<String> = symbols
        .split(',')
        .map(|symbol| symbol.trim().to_lowercase())
        .filter(|symbol| !symbol.is_empty())
        .map(|symbol| format!("{symbol}@{suffix}"))
        .collect();
    if channels.is_empty() {
        return Err(BinanceApiError::Config("no symbols given".to_string()));
    }
    Ok(channels.join("/"))
}

fn decode_message(message: WsMessage) -> Option<StreamEvent> {
    let text = match message {
        WsMessage::Text(text) => text.to_string(),
        WsMessage::Binary(bytes) => String::from_utf8(bytes.to_vec()).ok()?,
        _ => return None,
    };

    match parse_event(&text) {
        Ok(event) => {
            if matches!(event, StreamEvent::Other(_)) {
                log_other_message_once(&text);
            } else {
                log_message_sample_once(&event);
            }
            Some(event)
        }
        Err(err) => {
            log_parse_fail_once(&err, &text);
            Some(StreamEvent::Other(text))
        }
    }
}

fn log_message_sample_once(event: &StreamEvent) {
    let count = MESSAGE_SAMPLE_COUNT.fetch_add(1, Ordering::Relaxed);
    if count >= MESSAGE_SAMPLE_LIMIT {
        return;
    }

    if let Some(symbol) = event.symbol() {
        info!(
            sample_index = count + 1,
            sample_limit = MESSAGE_SAMPLE_LIMIT,
            event = event.kind(),
            symbol,
            "ws message sample"
        );
    } else {
        info!(
            sample_index = count + 1,
            sample_limit = MESSAGE_SAMPLE_LIMIT,
            event = event.kind(),
            "ws message sample"
        );
    }
}

fn log_other_message_once(raw: &str) {
    let count = OTHER_LOG_COUNT.fetch_add(1, Ordering::Relaxed);
    if count < OTHER_LOG_LIMIT {
        info!(
            sample_index = count + 1,
            sample_limit = OTHER_LOG_LIMIT,
            bytes = raw.len(),
            "ws message type unrecognized"
        );
        let preview = truncate_for_log(raw, RAW_LOG_MAX_BYTES);
        debug!(
            sample_index = count + 1,
            sample_limit = OTHER_LOG_LIMIT,
            message = %preview,
            "ws message type unrecognized"
        );
    }
}

fn log_parse_fail_once(err: &serde_json::Error, raw: &str) {
    let count = PARSE_FAIL_LOG_COUNT.fetch_add(1, Ordering::Relaxed);
    if count < PARSE_FAIL_LOG_LIMIT {
        warn!(
            sample_index = count + 1,
            sample_limit = PARSE_FAIL_LOG_LIMIT,
            error = %err,
            bytes = raw.len(),
            "ws message parse failed"
        );
        let preview = truncate_for_log(raw, RAW_LOG_MAX_BYTES);
        debug!(
            sample_index = count + 1,
            sample_limit = PARSE_FAIL_LOG_LIMIT,
            error = %err,
            message = %preview,
            "ws message parse failed"
        );
    }
}

fn truncate_for_log(value: &str, max_len: usize) -> String {
    if value.len() <= max_len {
        return value.to_string();
    }
    let mut end = max_len;
    while !value.is_char_boundary(end) {
        end -= 1;
    }
    let mut out = String::with_capacity(end + 3);
    out.push_str(&value[..end]);
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::ws::transport::shared_transport;

    #[rstest]
    #[case("BTCUSDT", "btcusdt@depth")]
    #[case(" BTCUSDT , ethusdt ", "btcusdt@depth/ethusdt@depth")]
    #[case("bnbbtc,,", "bnbbtc@depth")]
    fn test_symbol_channels(#[case] symbols: &str, #[case] expected: &str) {
        assert_eq!(symbol_channels(symbols, "depth").unwrap(), expected);
    }

    #[test]
    fn test_symbol_channels_rejects_empty_input() {
        assert!(matches!(
            symbol_channels(" , ", "depth"),
            Err(BinanceApiError::Config(_))
        ));
    }

    #[test]
    fn test_stream_url_follows_config() {
        let config = Arc::new(ApiConfig::default());
        let client = BinanceApiWebSocketClient::new(shared_transport(), config);
        assert_eq!(
            client.stream_url("btcusdt@aggTrade"),
            "wss://stream.binance.com:9443/ws/btcusdt@aggTrade"
        );
    }

    #[test]
    fn test_listen_key_requires_api_key() {
        let client =
            BinanceApiWebSocketClient::new(shared_transport(), Arc::new(ApiConfig::default()));
        let result = tokio_test::block_on(client.start_user_data_stream());
        assert!(matches!(result, Err(BinanceApiError::MissingCredentials)));
    }

    #[test]
    fn test_truncate_for_log_respects_char_boundaries() {
        assert_eq!(truncate_for_log("short", 16), "short");
        assert_eq!(truncate_for_log("aé", 2), "a...");
    }

    #[test]
    fn test_decode_message_keeps_garbage_as_other() {
        assert!(matches!(
            decode_message(WsMessage::Text("garbage".into())),
            Some(StreamEvent::Other(_))
        ));
    }
}
