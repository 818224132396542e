/*
[INPUT]:  Symbol identifier (e.g., "BTCUSDT"), optional BINANCE_* env
[OUTPUT]: Market data (server time, price, depth, 24h stats)
[POS]:    Examples - public market data queries
[UPDATE]: When adding new market data endpoints
*/

use binance_api_client::*;
use tracing_subscriber::EnvFilter;

/// Example: Query market data (no authentication required)
///
/// Set `BINANCE_NETWORK=testnet` to run against the test network.
#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let factory = match BinanceApiClientFactory::from_env() {
        Ok(factory) => factory,
        Err(e) => {
            eprintln!("Invalid BINANCE_* environment: {}", e);
            return;
        }
    };
    println!("=== Binance Market Data Example ({}) ===\n", factory.config().network());

    let client = factory.new_async_rest_client();
    let symbol = "BTCUSDT";

    match client.get_server_time().await {
        Ok(time) => println!("✓ Server time: {}", time),
        Err(e) => println!("✗ Error: {}", e),
    }

    println!("\nQuerying price for {}...", symbol);
    match client.get_price(symbol).await {
        Ok(price) => println!("✓ Price: {}", price.price),
        Err(e) => println!("✗ Error: {}", e),
    }

    println!("\nQuerying depth book for {}...", symbol);
    match client.get_order_book(symbol, Some(5)).await {
        Ok(depth) => {
            for bid in &depth.bids {
                println!("  bid {} x {}", bid.price(), bid.qty());
            }
            for ask in &depth.asks {
                println!("  ask {} x {}", ask.price(), ask.qty());
            }
        }
        Err(e) => println!("✗ Error: {}", e),
    }

    println!("\nQuerying 24h statistics for {}...", symbol);
    match client.get_24hr_price_statistics(symbol).await {
        Ok(stats) => println!(
            "✓ Last {} (high {}, low {}, volume {})",
            stats.last_price, stats.high_price, stats.low_price, stats.volume
        ),
        Err(e) => println!("✗ Error: {}", e),
    }

    println!("\n✓ Market data example complete");
}
