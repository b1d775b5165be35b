//! Scripted in-memory exchange for tests.

use async_trait::async_trait;
use parking_lot::Mutex;
use rust_decimal::Decimal;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use crate::domain::OrderRequest;
use crate::error::{Error, ExchangeError, Result};
use crate::exchange::ExchangeClient;

/// [`ExchangeClient`] that replays scripted replies and records every order
/// it is asked to create.
///
/// Built with `with_*` methods; `create_order` pops the next scripted reply
/// and falls back to an exchange rejection when the script runs dry.
pub struct StubExchange {
    server_time: i64,
    symbols: Vec<String>,
    balances: HashMap<String, Decimal>,
    prices: HashMap<String, Decimal>,
    order_replies: Mutex<VecDeque<std::result::Result<serde_json::Value, ExchangeError>>>,
    submitted: Mutex<Vec<OrderRequest>>,
    create_order_calls: Arc<AtomicU32>,
}

impl StubExchange {
    pub fn new() -> Self {
        Self {
            server_time: 1_700_000_000_000,
            symbols: Vec::new(),
            balances: HashMap::new(),
            prices: HashMap::new(),
            order_replies: Mutex::new(VecDeque::new()),
            submitted: Mutex::new(Vec::new()),
            create_order_calls: Arc::new(AtomicU32::new(0)),
        }
    }

    pub fn with_server_time(mut self, millis: i64) -> Self {
        self.server_time = millis;
        self
    }

    pub fn with_symbols(mut self, symbols: &[&str]) -> Self {
        self.symbols = symbols.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_balance(mut self, asset: &str, balance: Decimal) -> Self {
        self.balances.insert(asset.to_string(), balance);
        self
    }

    pub fn with_price(mut self, symbol: &str, price: Decimal) -> Self {
        self.prices.insert(symbol.to_string(), price);
        self
    }

    /// Queue a successful `create_order` reply.
    pub fn with_order_reply(self, reply: serde_json::Value) -> Self {
        self.order_replies.lock().push_back(Ok(reply));
        self
    }

    /// Queue an exchange rejection for the next `create_order`.
    pub fn with_order_rejection(self, code: i64, message: &str) -> Self {
        self.order_replies
            .lock()
            .push_back(Err(ExchangeError::new(code, message)));
        self
    }

    /// Orders submitted so far, in call order.
    pub fn submitted(&self) -> Vec<OrderRequest> {
        self.submitted.lock().clone()
    }

    /// Counter of `create_order` invocations, shared across clones of the
    /// handle.
    pub fn create_order_calls(&self) -> Arc<AtomicU32> {
        Arc::clone(&self.create_order_calls)
    }
}

impl Default for StubExchange {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ExchangeClient for StubExchange {
    async fn get_server_time(&self) -> Result<i64> {
        Ok(self.server_time)
    }

    async fn get_symbols(&self) -> Result<Vec<String>> {
        Ok(self.symbols.clone())
    }

    async fn get_balance(&self, asset: &str) -> Result<Decimal> {
        Ok(self.balances.get(asset).copied().unwrap_or(Decimal::ZERO))
    }

    async fn get_price(&self, symbol: &str) -> Result<Decimal> {
        self.prices.get(symbol).copied().ok_or_else(|| {
            Error::Exchange(ExchangeError::new(-1121, format!("Invalid symbol: {symbol}")))
        })
    }

    async fn create_order(&self, order: &OrderRequest) -> Result<serde_json::Value> {
        self.create_order_calls.fetch_add(1, Ordering::SeqCst);
        self.submitted.lock().push(order.clone());
        match self.order_replies.lock().pop_front() {
            Some(Ok(reply)) => Ok(reply),
            Some(Err(err)) => Err(Error::Exchange(err)),
            None => Err(Error::Exchange(ExchangeError::new(
                -1000,
                "no scripted reply remaining",
            ))),
        }
    }

    fn exchange_name(&self) -> &'static str {
        "stub"
    }
}
