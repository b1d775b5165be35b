//! Binance USDⓈ-M futures testnet client.
//!
//! Thin REST transport: signed query strings, the five endpoints the gateway
//! needs, and classification of the exchange's `{code, msg}` error bodies.
//! Clock skew against the exchange is measured once in [`BinanceClient::connect`]
//! and folded into every signed timestamp afterwards.

use async_trait::async_trait;
use hmac::{Hmac, Mac};
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use sha2::Sha256;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;
use tracing::{debug, info};

use crate::config::Credentials;
use crate::domain::OrderRequest;
use crate::error::{Error, ExchangeError, Result};

use super::ExchangeClient;

type HmacSha256 = Hmac<Sha256>;

/// Default non-production sandbox host.
pub const TESTNET_API_URL: &str = "https://testnet.binancefuture.com";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Signed REST client for the futures testnet.
pub struct BinanceClient {
    client: Client,
    base_url: String,
    credentials: Credentials,
    /// `server_time - local_time`, in milliseconds.
    time_offset_ms: AtomicI64,
}

#[derive(Debug, Deserialize)]
struct ServerTime {
    #[serde(rename = "serverTime")]
    server_time: i64,
}

#[derive(Debug, Deserialize)]
struct ExchangeInfo {
    symbols: Vec<SymbolInfo>,
}

#[derive(Debug, Deserialize)]
struct SymbolInfo {
    symbol: String,
}

#[derive(Debug, Deserialize)]
struct AssetBalance {
    asset: String,
    balance: Decimal,
}

#[derive(Debug, Deserialize)]
struct TickerPrice {
    price: Decimal,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    code: i64,
    msg: String,
}

impl BinanceClient {
    /// Build a client against the default testnet host.
    pub fn new(credentials: Credentials) -> Result<Self> {
        Self::with_base_url(credentials, TESTNET_API_URL)
    }

    /// Build a client against an explicit host.
    pub fn with_base_url(credentials: Credentials, base_url: impl Into<String>) -> Result<Self> {
        let base_url = base_url.into();
        // Fail early on a hostname that can never produce a request.
        url::Url::parse(&base_url)?;

        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            base_url,
            credentials,
            time_offset_ms: AtomicI64::new(0),
        })
    }

    /// Measure clock skew against the exchange and store the offset for all
    /// subsequent signed requests.
    pub async fn connect(&self) -> Result<()> {
        let server_time = self.get_server_time().await?;
        let offset = server_time - local_now_ms();
        self.time_offset_ms.store(offset, Ordering::Relaxed);
        info!(offset_ms = offset, "clock offset captured from exchange");
        Ok(())
    }

    fn timestamp_ms(&self) -> i64 {
        local_now_ms() + self.time_offset_ms.load(Ordering::Relaxed)
    }

    fn sign(&self, query: &str) -> String {
        sign_query(self.credentials.api_secret.as_bytes(), query)
    }

    /// Append a timestamp and signature to the given parameters and produce
    /// the final query string.
    fn signed_query(&self, mut params: Vec<(&'static str, String)>) -> String {
        params.push(("timestamp", self.timestamp_ms().to_string()));
        let query = encode_query(&params);
        let signature = self.sign(&query);
        format!("{query}&signature={signature}")
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path_and_query: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, path_and_query);
        debug!(url = %url, "GET");
        let response = self
            .client
            .get(&url)
            .header("X-MBX-APIKEY", &self.credentials.api_key)
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn post_json<T: serde::de::DeserializeOwned>(&self, path_and_query: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, path_and_query);
        debug!(url = %url, "POST");
        let response = self
            .client
            .post(&url)
            .header("X-MBX-APIKEY", &self.credentials.api_key)
            .send()
            .await?;
        Self::decode(response).await
    }

    /// Turn a non-2xx reply into an [`ExchangeError`], keeping the exchange's
    /// own code when the body parses.
    async fn decode<T: serde::de::DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }
        let body = response.text().await.unwrap_or_default();
        let error = match serde_json::from_str::<ApiError>(&body) {
            Ok(api) => ExchangeError::new(api.code, api.msg),
            Err(_) => ExchangeError::new(i64::from(status.as_u16()), body),
        };
        Err(Error::Exchange(error))
    }
}

#[async_trait]
impl ExchangeClient for BinanceClient {
    async fn get_server_time(&self) -> Result<i64> {
        let time: ServerTime = self.get_json("/fapi/v1/time").await?;
        Ok(time.server_time)
    }

    async fn get_symbols(&self) -> Result<Vec<String>> {
        let info: ExchangeInfo = self.get_json("/fapi/v1/exchangeInfo").await?;
        Ok(info.symbols.into_iter().map(|s| s.symbol).collect())
    }

    async fn get_balance(&self, asset: &str) -> Result<Decimal> {
        let query = self.signed_query(Vec::new());
        let balances: Vec<AssetBalance> = self.get_json(&format!("/fapi/v2/balance?{query}")).await?;
        Ok(balances
            .into_iter()
            .find(|b| b.asset == asset)
            .map(|b| b.balance)
            .unwrap_or(Decimal::ZERO))
    }

    async fn get_price(&self, symbol: &str) -> Result<Decimal> {
        let ticker: TickerPrice = self
            .get_json(&format!("/fapi/v1/ticker/price?symbol={symbol}"))
            .await?;
        Ok(ticker.price)
    }

    async fn create_order(&self, order: &OrderRequest) -> Result<serde_json::Value> {
        let query = self.signed_query(order_params(order));
        self.post_json(&format!("/fapi/v1/order?{query}")).await
    }

    fn exchange_name(&self) -> &'static str {
        "binance-futures-testnet"
    }
}

fn local_now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Wire parameters for the order-placement endpoint, in a stable field order.
fn order_params(order: &OrderRequest) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("symbol", order.symbol.clone()),
        ("side", order.side.to_string()),
        ("type", order.order_type.to_string()),
        ("quantity", order.quantity.normalize().to_string()),
    ];
    if let Some(price) = order.price {
        params.push(("price", price.normalize().to_string()));
    }
    if let Some(tif) = order.time_in_force {
        params.push(("timeInForce", tif.to_string()));
    }
    params
}

fn encode_query(params: &[(&'static str, String)]) -> String {
    params
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join("&")
}

/// HMAC-SHA256 over the query string, hex-encoded, as the exchange requires.
fn sign_query(secret: &[u8], query: &str) -> String {
    // HMAC accepts keys of any length.
    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC key of any length");
    mac.update(query.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{OrderType, Side, TimeInForce};
    use rust_decimal_macros::dec;

    #[test]
    fn signature_matches_published_vector() {
        // Test vector from the Binance API documentation.
        let secret = b"NhqPtmdSJYdKjVHjA7PZj4Mge3R5YNiP1e3UZjInClVN65XAbvqqM6A7H5fATj0j";
        let query = "symbol=LTCBTC&side=BUY&type=LIMIT&timeInForce=GTC&quantity=1&price=0.1&recvWindow=5000&timestamp=1499827319559";
        assert_eq!(
            sign_query(secret, query),
            "c8db56825ae71d6d79447849e617115f4a920fa2acdcab2b053c4b2838bd6b71"
        );
    }

    #[test]
    fn limit_order_params_include_price_and_tif() {
        let order = OrderRequest {
            symbol: "BTCUSDT".into(),
            side: Side::Buy,
            order_type: OrderType::Limit,
            quantity: dec!(0.010),
            price: Some(dec!(65000.00)),
            time_in_force: Some(TimeInForce::Gtc),
        };
        let query = encode_query(&order_params(&order));
        assert_eq!(
            query,
            "symbol=BTCUSDT&side=BUY&type=LIMIT&quantity=0.01&price=65000&timeInForce=GTC"
        );
    }

    #[test]
    fn market_order_params_omit_price_and_tif() {
        let order = OrderRequest {
            symbol: "BTCUSDT".into(),
            side: Side::Sell,
            order_type: OrderType::Market,
            quantity: dec!(0.001),
            price: None,
            time_in_force: None,
        };
        let query = encode_query(&order_params(&order));
        assert_eq!(query, "symbol=BTCUSDT&side=SELL&type=MARKET&quantity=0.001");
    }

    #[test]
    fn rejects_invalid_base_url() {
        let credentials = Credentials {
            api_key: "key".into(),
            api_secret: "secret".into(),
        };
        assert!(BinanceClient::with_base_url(credentials, "not a url").is_err());
    }
}
