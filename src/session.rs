//! Caller-held trading session.
//!
//! The UI layer owns one [`Session`] per connection instead of stashing a bot
//! instance and its history in ambient global state. The session wraps the
//! gateway and keeps a display-only, in-memory list of confirmed orders;
//! nothing here is persisted.

use rust_decimal::Decimal;

use crate::audit::AuditLog;
use crate::config::Config;
use crate::domain::{OrderDraft, OrderResult};
use crate::error::Result;
use crate::exchange::{BinanceClient, ExchangeClient};
use crate::gateway::OrderGateway;

/// A connected trading session: gateway plus order history.
pub struct Session<C> {
    gateway: OrderGateway<C>,
    history: Vec<OrderResult>,
}

impl Session<BinanceClient> {
    /// Build a client from config, correct clock skew against the exchange,
    /// and open the audit log.
    pub async fn connect(config: &Config) -> Result<Self> {
        config.validate()?;
        let audit = AuditLog::open(&config.audit.path)?;
        let client =
            BinanceClient::with_base_url(config.credentials.clone(), config.network.api_url.clone())?;
        client.connect().await?;
        audit.info("session initialized: connected to exchange");
        Ok(Self::with_client(client, audit))
    }
}

impl<C: ExchangeClient> Session<C> {
    /// Wrap an already-built exchange client.
    pub fn with_client(client: C, audit: AuditLog) -> Self {
        Self {
            gateway: OrderGateway::new(client, audit),
            history: Vec::new(),
        }
    }

    /// Place an order; confirmed orders are appended to the session history.
    pub async fn place_order(
        &mut self,
        symbol: &str,
        side: &str,
        order_type: &str,
        quantity: Decimal,
        price: Option<Decimal>,
    ) -> Result<OrderResult> {
        let mut draft = OrderDraft::new(symbol, side, order_type, quantity);
        if let Some(price) = price {
            draft = draft.with_price(price);
        }
        let result = self.gateway.place_order(&draft).await?;
        self.history.push(result.clone());
        Ok(result)
    }

    /// Confirmed orders placed through this session, oldest first.
    pub fn history(&self) -> &[OrderResult] {
        &self.history
    }

    pub async fn symbols(&self) -> Result<Vec<String>> {
        self.gateway.symbols().await
    }

    pub async fn balance(&self, asset: &str) -> Result<Decimal> {
        self.gateway.balance(asset).await
    }

    pub async fn price(&self, symbol: &str) -> Result<Decimal> {
        self.gateway.price(symbol).await
    }

    /// Borrow the underlying gateway.
    pub fn gateway(&self) -> &OrderGateway<C> {
        &self.gateway
    }
}
