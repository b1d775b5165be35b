//! The order gateway.
//!
//! Sits between an untrusted caller and the exchange: normalizes a draft,
//! validates it, submits it, and enforces the result schema on whatever comes
//! back. Exactly two failure classes are produced deliberately — a
//! [`ValidationError`](crate::error::ValidationError) caught before the
//! network call, or an [`ExchangeError`](crate::error::ExchangeError) carrying
//! the remote rejection. Nothing is retried.
//!
//! Every request and its outcome lands in the audit log.

use rust_decimal::Decimal;
use tracing::{debug, instrument};

use crate::audit::AuditLog;
use crate::domain::{validate, OrderDraft, OrderResult, OrderType, TimeInForce};
use crate::error::{Error, ResponseError, Result};
use crate::exchange::ExchangeClient;

/// Validated pass-through to an exchange's order-placement API.
pub struct OrderGateway<C> {
    client: C,
    audit: AuditLog,
}

impl<C: ExchangeClient> OrderGateway<C> {
    pub fn new(client: C, audit: AuditLog) -> Self {
        Self { client, audit }
    }

    /// The exchange client this gateway forwards to.
    pub fn client(&self) -> &C {
        &self.client
    }

    /// Validate and submit one order.
    ///
    /// Uppercases symbol/side/type, injects `timeInForce = GTC` for LIMIT
    /// orders that did not specify one, collects every field violation before
    /// giving up, and strict-checks the exchange's reply against the
    /// [`OrderResult`] schema before returning it.
    #[instrument(skip(self, draft), fields(exchange = self.client.exchange_name()))]
    pub async fn place_order(&self, draft: &OrderDraft) -> Result<OrderResult> {
        self.audit.info(request_line(draft));

        let normalized = prepare(draft);
        let request = match validate(&normalized) {
            Ok(request) => request,
            Err(err) => {
                self.audit.error(format!("VALIDATION ERROR: {err}"));
                return Err(Error::Validation(err));
            }
        };
        self.audit.info("input validated, submitting order");

        let raw = match self.client.create_order(&request).await {
            Ok(raw) => raw,
            Err(Error::Exchange(err)) => {
                self.audit
                    .error(format!("RESPONSE ERROR: {} - {}", err.code, err.message));
                return Err(Error::Exchange(err));
            }
            Err(err) => {
                self.audit.error(format!("TRANSPORT ERROR: {err}"));
                return Err(err);
            }
        };
        debug!(reply = %raw, "raw exchange reply");

        let result: OrderResult = serde_json::from_value(raw).map_err(|err| {
            let response = ResponseError::new(err.to_string());
            self.audit.error(format!("OUTPUT REJECTED: {response}"));
            Error::Response(response)
        })?;

        self.audit
            .info(format!("RESPONSE SUCCESS: order id {}", result.order_id));
        Ok(result)
    }

    /// All tradable symbols, straight from the exchange.
    pub async fn symbols(&self) -> Result<Vec<String>> {
        self.client.get_symbols().await
    }

    /// Available balance for one asset.
    pub async fn balance(&self, asset: &str) -> Result<Decimal> {
        self.client.get_balance(asset).await
    }

    /// Latest price for a symbol.
    pub async fn price(&self, symbol: &str) -> Result<Decimal> {
        self.client.get_price(&symbol.to_uppercase()).await
    }
}

/// Normalize a draft for validation: uppercase the string fields and default
/// LIMIT orders to GTC when no time-in-force was given.
fn prepare(draft: &OrderDraft) -> OrderDraft {
    let mut normalized = draft.normalized();
    if normalized.order_type == OrderType::Limit.to_string() {
        normalized
            .time_in_force
            .get_or_insert_with(|| TimeInForce::Gtc.to_string());
    }
    normalized
}

fn request_line(draft: &OrderDraft) -> String {
    let mut line = format!(
        "REQUEST: {} {} | {} {}",
        draft.side.to_uppercase(),
        draft.order_type.to_uppercase(),
        draft.quantity,
        draft.symbol.to_uppercase()
    );
    if let Some(price) = draft.price {
        line.push_str(&format!(" @ {price}"));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn prepare_uppercases_and_injects_gtc_for_limit() {
        let draft = OrderDraft::new("btcusdt", "buy", "limit", dec!(0.01)).with_price(dec!(100));
        let normalized = prepare(&draft);
        assert_eq!(normalized.symbol, "BTCUSDT");
        assert_eq!(normalized.side, "BUY");
        assert_eq!(normalized.order_type, "LIMIT");
        assert_eq!(normalized.time_in_force.as_deref(), Some("GTC"));
    }

    #[test]
    fn prepare_keeps_explicit_time_in_force() {
        let draft = OrderDraft::new("BTCUSDT", "SELL", "LIMIT", dec!(0.01))
            .with_price(dec!(100))
            .with_time_in_force("ioc");
        let normalized = prepare(&draft);
        assert_eq!(normalized.time_in_force.as_deref(), Some("IOC"));
    }

    #[test]
    fn prepare_leaves_market_orders_without_time_in_force() {
        let draft = OrderDraft::new("BTCUSDT", "BUY", "market", dec!(0.001));
        let normalized = prepare(&draft);
        assert!(normalized.time_in_force.is_none());
    }

    #[test]
    fn request_line_includes_price_only_when_present() {
        let market = OrderDraft::new("btcusdt", "buy", "market", dec!(0.001));
        assert_eq!(request_line(&market), "REQUEST: BUY MARKET | 0.001 BTCUSDT");

        let limit = market.clone().with_price(dec!(65000));
        assert!(request_line(&limit).ends_with(" @ 65000"));
    }
}
