/*
[INPUT]:  Comma-separated symbols
[OUTPUT]: Real-time aggregate trade updates
[POS]:    Examples - WebSocket stream handling
[UPDATE]: When WebSocket API changes
*/

use binance_api_client::*;
use tokio::time::{Duration, timeout};
use tracing_subscriber::EnvFilter;

/// Example: print aggregate trades for a few seconds, then close the stream
#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("=== Binance WebSocket Example ===\n");

    let client = BinanceApiClientFactory::new().new_web_socket_client();
    let mut subscription = match client.on_agg_trade_events("btcusdt,ethusdt").await {
        Ok(subscription) => subscription,
        Err(e) => {
            eprintln!("Failed to connect: {}", e);
            return;
        }
    };
    println!("✓ Subscribed to {}\n", subscription.channel());

    let deadline = tokio::time::Instant::now() + Duration::from_secs(10);
    loop {
        let remaining = deadline.saturating_duration_since(tokio::time::Instant::now());
        match timeout(remaining, subscription.recv()).await {
            Ok(Some(StreamEvent::AggTrade(trade))) => {
                println!("{} {} @ {}", trade.symbol, trade.qty, trade.price);
            }
            Ok(Some(other)) => println!("(other event: {})", other.kind()),
            Ok(None) => {
                println!("Stream ended by server");
                break;
            }
            Err(_) => break,
        }
    }

    if let Err(e) = subscription.close().await {
        eprintln!("Close failed: {}", e);
    }
    println!("\n✓ WebSocket example complete");
}
