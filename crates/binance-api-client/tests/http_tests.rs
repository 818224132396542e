/*
[INPUT]:  Mock HTTP responses
[OUTPUT]: Test results for REST clients
[POS]:    Integration tests - HTTP endpoints
[UPDATE]: When HTTP endpoints change
*/

mod common;

use std::str::FromStr;
use std::time::Duration;

use binance_api_client::{
    BinanceApiAsyncRestClient, BinanceApiError, BinanceApiMarginRestClient, BinanceApiRestClient, BinanceApiSwapRestClient,
    CandlestickInterval, ClientConfig, LiquidityOperationType, NewOrder, OrderStatusRequest,
    SwapStatus, TimeInForce, TransferType,
};
use common::{
    TEST_API_KEY, anonymous_config, authenticated_config, has_timestamp, has_valid_signature,
    margin_client, setup_blocking_mock_server, setup_mock_server, spot_client,
};
use rust_decimal::Decimal;
use serde_json::json;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio_test::assert_ok;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

fn dec(value: &str) -> Decimal {
    Decimal::from_str(value).unwrap()
}

#[tokio::test]
async fn test_ping_and_server_time() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/api/v3/ping"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v3/time"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"serverTime": 1499827319559_i64})))
        .mount(&server)
        .await;

    let client = spot_client(&server, anonymous_config());
    assert_ok!(client.ping().await);
    assert_eq!(assert_ok!(client.get_server_time().await), 1_499_827_319_559);
}

#[tokio::test]
async fn test_public_calls_send_no_api_key() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/api/v3/depth"))
        .and(query_param("symbol", "BNBBTC"))
        .and(query_param("limit", "5"))
        .and(|request: &wiremock::Request| !request.headers.contains_key("X-MBX-APIKEY"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "lastUpdateId": 1027024,
            "bids": [["4.00000000", "431.00000000"]],
            "asks": [["4.00000200", "12.00000000"]]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = spot_client(&server, authenticated_config());
    let book = assert_ok!(client.get_order_book("BNBBTC", Some(5)).await);
    assert_eq!(book.last_update_id, 1_027_024);
    assert_eq!(book.bids[0].price(), dec("4"));
    assert_eq!(book.asks[0].qty(), dec("12"));
}

#[tokio::test]
async fn test_candlestick_bars_decode_positional_rows() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/api/v3/klines"))
        .and(query_param("interval", "1h"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([[
            1499040000000_i64, "0.01634790", "0.80000000", "0.01575800", "0.01577100",
            "148976.11427815", 1499644799999_i64, "2434.19055334", 308,
            "1756.87402397", "28.46694368", "0"
        ]])))
        .mount(&server)
        .await;

    let client = spot_client(&server, anonymous_config());
    let bars = assert_ok!(
        client
            .get_candlestick_bars("ETHBTC", CandlestickInterval::Hourly, Some(1), None, None)
            .await
    );
    assert_eq!(bars.len(), 1);
    assert_eq!(bars[0].number_of_trades, 308);
    assert_eq!(bars[0].high, dec("0.8"));
}

#[tokio::test]
async fn test_all_assets_use_asset_info_host() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/assetWithdraw/getAllAsset.html"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"assetCode": "BTC", "assetName": "Bitcoin", "unit": "฿", "enableWithdraw": true}
        ])))
        .mount(&server)
        .await;

    let client = spot_client(&server, anonymous_config());
    let assets = assert_ok!(client.get_all_assets().await);
    assert_eq!(assets[0].asset_code, "BTC");
    assert!(assets[0].enable_withdraw);
}

#[tokio::test]
async fn test_signed_order_carries_key_timestamp_and_signature() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path("/api/v3/order"))
        .and(header("X-MBX-APIKEY", TEST_API_KEY))
        .and(query_param("symbol", "LTCBTC"))
        .and(query_param("side", "BUY"))
        .and(query_param("type", "LIMIT"))
        .and(query_param("timeInForce", "GTC"))
        .and(query_param("quantity", "1"))
        .and(query_param("price", "0.1"))
        .and(has_timestamp)
        .and(has_valid_signature)
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "symbol": "LTCBTC",
            "orderId": 28,
            "orderListId": -1,
            "clientOrderId": "6gCrw2kRUAF9CvJDGP16IP",
            "transactTime": 1507725176595_i64
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = spot_client(&server, authenticated_config());
    let order = NewOrder::limit_buy("LTCBTC", TimeInForce::Gtc, dec("1.00"), dec("0.10"));
    let response = assert_ok!(client.new_order(order).await);
    assert_eq!(response.order_id, 28);
    assert_eq!(response.status, None);
}

#[tokio::test]
async fn test_recv_window_is_signed_when_configured() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/api/v3/order"))
        .and(query_param("orderId", "42"))
        .and(query_param("recvWindow", "5000"))
        .and(has_valid_signature)
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "symbol": "LTCBTC", "orderId": 42, "clientOrderId": "abc",
            "price": "0.1", "origQty": "1.0", "executedQty": "0.0",
            "status": "NEW", "timeInForce": "GTC", "type": "LIMIT", "side": "BUY",
            "time": 1499827319559_i64, "updateTime": 1499827319559_i64, "isWorking": true
        })))
        .expect(1)
        .mount(&server)
        .await;

    let base = server.uri();
    let client = binance_api_client::BinanceApiAsyncRestClient::with_base_urls(
        authenticated_config(),
        &ClientConfig::default().with_recv_window(5000),
        &base,
        &format!("{base}/"),
    );
    let order = assert_ok!(
        client
            .get_order_status(OrderStatusRequest::by_order_id("LTCBTC", 42))
            .await
    );
    assert!(order.is_working);
}

#[tokio::test]
async fn test_signed_call_without_credentials_never_hits_network() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let client = spot_client(&server, anonymous_config());
    let result = client.get_account().await;
    assert!(matches!(result, Err(BinanceApiError::MissingCredentials)));
    let result = client.start_user_data_stream().await;
    assert!(matches!(result, Err(BinanceApiError::MissingCredentials)));
}

#[tokio::test]
async fn test_error_payload_maps_to_api_error() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/api/v3/ticker/price"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"code": -1121, "msg": "Invalid symbol."})),
        )
        .mount(&server)
        .await;

    let client = spot_client(&server, anonymous_config());
    match client.get_price("NOPE").await {
        Err(BinanceApiError::Api { code, message }) => {
            assert_eq!(code, -1121);
            assert_eq!(message, "Invalid symbol.");
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[tokio::test]
async fn test_rate_limit_reads_retry_after() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/api/v3/ticker/bookTicker"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "7"))
        .mount(&server)
        .await;

    let client = spot_client(&server, anonymous_config());
    let err = client.get_book_tickers().await.unwrap_err();
    assert!(matches!(err, BinanceApiError::RateLimit { retry_after: 7 }));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_user_data_stream_lifecycle_uses_api_key_only() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path("/api/v3/userDataStream"))
        .and(header("X-MBX-APIKEY", TEST_API_KEY))
        .and(|request: &wiremock::Request| request.url.query().is_none())
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"listenKey": "pqia91ma19a5s61cv6a81va65sdf19v8a65a1a5s61cv6a81va65sdf19v8a65a1"})))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/v3/userDataStream"))
        .and(query_param("listenKey", "lk"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/v3/userDataStream"))
        .and(query_param("listenKey", "lk"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let client = spot_client(&server, authenticated_config());
    let listen_key = assert_ok!(client.start_user_data_stream().await);
    assert!(listen_key.starts_with("pqia91ma"));
    assert_ok!(client.keep_alive_user_data_stream("lk").await);
    assert_ok!(client.close_user_data_stream("lk").await);
}

#[tokio::test]
async fn test_margin_transfer_and_order() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path("/sapi/v1/margin/transfer"))
        .and(query_param("asset", "BTC"))
        .and(query_param("amount", "0.5"))
        .and(query_param("type", "1"))
        .and(has_valid_signature)
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"tranId": 100000001})))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/sapi/v1/margin/order"))
        .and(query_param("side", "SELL"))
        .and(query_param("isIsolated", "FALSE"))
        .and(has_valid_signature)
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "symbol": "BTCUSDT", "orderId": 28, "clientOrderId": "x",
            "transactTime": 1507725176595_i64, "isIsolated": false
        })))
        .mount(&server)
        .await;

    let client = margin_client(&server, authenticated_config());
    let tx = assert_ok!(
        client
            .transfer("BTC", dec("0.50"), TransferType::MainToMargin)
            .await
    );
    assert_eq!(tx.tran_id, 100_000_001);

    let order = binance_api_client::MarginNewOrder::from(NewOrder::market_sell("BTCUSDT", dec("1")))
        .isolated(false);
    let response = assert_ok!(client.new_order(order).await);
    assert_eq!(response.order_id, 28);
}

#[tokio::test]
async fn test_margin_user_stream_path() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path("/sapi/v1/userDataStream"))
        .and(header("X-MBX-APIKEY", TEST_API_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"listenKey": "margin-key"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = margin_client(&server, authenticated_config());
    assert_eq!(assert_ok!(client.start_user_data_stream().await), "margin-key");
}

#[test]
fn test_blocking_rest_client_outside_runtime() {
    let (runtime, server) = setup_blocking_mock_server();
    runtime.block_on(
        Mock::given(method("GET"))
            .and(path("/api/v3/ticker/price"))
            .and(query_param("symbol", "BTCUSDT"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"symbol": "BTCUSDT", "price": "64000.10"})),
            )
            .mount(&server),
    );

    let base = server.uri();
    let client = BinanceApiRestClient::from_async(
        binance_api_client::BinanceApiAsyncRestClient::with_base_urls(
            anonymous_config(),
            &ClientConfig::default(),
            &base,
            &format!("{base}/"),
        ),
    );
    let price = assert_ok!(client.get_price("BTCUSDT"));
    assert_eq!(price.price, dec("64000.1"));
}

#[test]
fn test_blocking_margin_client_outside_runtime() {
    let (runtime, server) = setup_blocking_mock_server();
    runtime.block_on(
        Mock::given(method("POST"))
            .and(path("/sapi/v1/margin/loan"))
            .and(query_param("asset", "USDT"))
            .and(has_valid_signature)
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"tranId": 7})))
            .mount(&server),
    );

    let client = BinanceApiMarginRestClient::from_async(margin_client(&server, authenticated_config()));
    let tx = assert_ok!(client.borrow("USDT", dec("25")));
    assert_eq!(tx.tran_id, 7);
}

#[test]
fn test_swap_client_outside_runtime() {
    let (runtime, server) = setup_blocking_mock_server();
    runtime.block_on(async {
        Mock::given(method("GET"))
            .and(path("/sapi/v1/bswap/pools"))
            .and(header("X-MBX-APIKEY", TEST_API_KEY))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"poolId": 2, "poolName": "BUSD/USDT", "assets": ["BUSD", "USDT"]}
            ])))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/sapi/v1/bswap/liquidityRemove"))
            .and(query_param("type", "COMBINATION"))
            .and(query_param("asset", "BUSD,USDT"))
            .and(query_param("shareAmount", "10"))
            .and(has_valid_signature)
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"operationId": 12341})))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/sapi/v1/bswap/swap"))
            .and(query_param("swapId", "2314"))
            .and(has_valid_signature)
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
                "swapId": 2314, "swapTime": 1565770342148_i64, "status": 1,
                "quoteAsset": "USDT", "baseAsset": "BUSD", "quoteQty": "300000",
                "baseQty": "299975", "price": "1.00008334", "fee": "120"
            }])))
            .mount(&server)
            .await;
    });

    let client = BinanceApiSwapRestClient::with_base_url(
        authenticated_config(),
        &ClientConfig::default(),
        &server.uri(),
    );

    let pools = assert_ok!(client.list_all_swap_pools());
    assert_eq!(pools[0].assets, vec!["BUSD", "USDT"]);

    let record = assert_ok!(client.remove_liquidity(
        2,
        LiquidityOperationType::Combination,
        &["BUSD", "USDT"],
        dec("10"),
    ));
    assert_eq!(record.operation_id, 12341);

    let history = assert_ok!(client.get_swap_history(2314));
    assert_eq!(history[0].swap_status(), SwapStatus::Success);
}

#[test]
fn test_malformed_custom_domain_fails_at_call_time() {
    let config = std::sync::Arc::new(binance_api_client::ApiConfig::with_custom_domain(
        None,
        None,
        "bad domain with spaces",
    ));
    let client = BinanceApiRestClient::new(config);
    assert!(matches!(client.ping(), Err(BinanceApiError::UrlParse(_))));
}

#[tokio::test]
async fn test_stalled_body_is_timeout() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = [0u8; 1024];
        let _ = socket.read(&mut buf).await;
        // headers promise a body that never finishes
        let _ = socket
            .write_all(b"HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: 64\r\n\r\n{")
            .await;
        tokio::time::sleep(Duration::from_secs(5)).await;
    });

    let client_config = ClientConfig {
        timeout: Duration::from_millis(300),
        ..ClientConfig::default()
    };
    let base = format!("http://{addr}");
    let client = BinanceApiAsyncRestClient::with_base_urls(
        anonymous_config(),
        &client_config,
        &base,
        &format!("{base}/"),
    );

    let result = client.ping().await;
    assert!(matches!(result, Err(BinanceApiError::Timeout { .. })));
}
