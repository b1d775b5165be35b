//! Live smoke tests against the real futures testnet.
//!
//! Require network access and real testnet keys in `ORDERGATE_API_KEY` /
//! `ORDERGATE_API_SECRET`. Run with:
//!
//! ```bash
//! cargo test --features integration-tests --test binance_live_smoke_tests
//! ```

#![cfg(feature = "integration-tests")]

use ordergate::config::Config;
use ordergate::exchange::{BinanceClient, ExchangeClient};

fn client_from_env() -> Option<BinanceClient> {
    let config = Config::from_env().ok()?;
    BinanceClient::with_base_url(config.credentials, config.network.api_url).ok()
}

#[tokio::test]
async fn server_time_is_close_to_local_clock() {
    let Some(client) = client_from_env() else {
        eprintln!("skipping: no testnet credentials in environment");
        return;
    };
    let server_time = client.get_server_time().await.unwrap();
    let local = chrono::Utc::now().timestamp_millis();
    assert!((server_time - local).abs() < 60_000, "clock skew over a minute");
}

#[tokio::test]
async fn exchange_lists_the_btc_pair() {
    let Some(client) = client_from_env() else {
        eprintln!("skipping: no testnet credentials in environment");
        return;
    };
    client.connect().await.unwrap();
    let symbols = client.get_symbols().await.unwrap();
    assert!(symbols.iter().any(|s| s == "BTCUSDT"));
}
