//! Exchange trait definitions.
//!
//! [`ExchangeClient`] is the capability interface the gateway depends on:
//! everything it needs from a remote exchange and nothing more, so the order
//! flow is testable against a stub without a network dependency.

pub mod binance;

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::domain::OrderRequest;
use crate::error::Result;

pub use binance::BinanceClient;

/// Read and order-placement capabilities of a remote exchange.
///
/// `create_order` returns the raw JSON reply; schema enforcement is the
/// gateway's job, not the transport's.
#[async_trait]
pub trait ExchangeClient: Send + Sync {
    /// Exchange clock, milliseconds since the epoch.
    async fn get_server_time(&self) -> Result<i64>;

    /// All tradable symbols the exchange currently lists.
    async fn get_symbols(&self) -> Result<Vec<String>>;

    /// Available balance for one asset; zero when the asset is absent.
    async fn get_balance(&self, asset: &str) -> Result<Decimal>;

    /// Latest traded price for a symbol.
    async fn get_price(&self, symbol: &str) -> Result<Decimal>;

    /// Submit an order, returning the exchange's raw reply.
    async fn create_order(&self, order: &OrderRequest) -> Result<serde_json::Value>;

    /// Exchange name for logging/debugging.
    fn exchange_name(&self) -> &'static str;
}
