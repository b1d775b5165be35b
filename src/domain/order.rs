//! Order value types.
//!
//! Three immutable shapes, created fresh per request:
//!
//! - [`OrderDraft`] - raw caller input, strings in whatever case the UI
//!   collected them
//! - [`OrderRequest`] - the validated, well-typed order as it goes on the wire
//! - [`OrderResult`] - the exchange's confirmation, accepted only if it
//!   matches the result schema exactly
//!
//! # Examples
//!
//! ```
//! use ordergate::domain::OrderDraft;
//! use rust_decimal::Decimal;
//!
//! let draft = OrderDraft::new("BTCUSDT", "buy", "market", Decimal::new(1, 3));
//! assert!(draft.price.is_none());
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// BUY or SELL direction of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    Buy,
    Sell,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Buy => write!(f, "BUY"),
            Side::Sell => write!(f, "SELL"),
        }
    }
}

/// Order pricing mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderType {
    Market,
    Limit,
}

impl std::fmt::Display for OrderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderType::Market => write!(f, "MARKET"),
            OrderType::Limit => write!(f, "LIMIT"),
        }
    }
}

/// Order-duration policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TimeInForce {
    /// Good till date.
    Gtd,
    /// Good till cancelled.
    Gtc,
    /// Immediate or cancel.
    Ioc,
}

impl std::fmt::Display for TimeInForce {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimeInForce::Gtd => write!(f, "GTD"),
            TimeInForce::Gtc => write!(f, "GTC"),
            TimeInForce::Ioc => write!(f, "IOC"),
        }
    }
}

/// Order lifecycle state as reported by the exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    New,
    PartiallyFilled,
    Filled,
    Canceled,
    Rejected,
    Expired,
}

/// Raw caller input, prior to normalization and validation.
///
/// The UI layer constructs one of these from whatever the user typed; the
/// gateway uppercases the string fields and runs the validator before
/// anything leaves the process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderDraft {
    pub symbol: String,
    pub side: String,
    pub order_type: String,
    pub quantity: Decimal,
    pub price: Option<Decimal>,
    pub time_in_force: Option<String>,
}

impl OrderDraft {
    /// Create a draft with no price and no time-in-force.
    pub fn new(
        symbol: impl Into<String>,
        side: impl Into<String>,
        order_type: impl Into<String>,
        quantity: Decimal,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            side: side.into(),
            order_type: order_type.into(),
            quantity,
            price: None,
            time_in_force: None,
        }
    }

    /// Set a limit price.
    pub fn with_price(mut self, price: Decimal) -> Self {
        self.price = Some(price);
        self
    }

    /// Set an explicit time-in-force.
    pub fn with_time_in_force(mut self, tif: impl Into<String>) -> Self {
        self.time_in_force = Some(tif.into());
        self
    }

    /// Uppercase the string fields, as the exchange expects them.
    pub(crate) fn normalized(&self) -> Self {
        Self {
            symbol: self.symbol.to_uppercase(),
            side: self.side.to_uppercase(),
            order_type: self.order_type.to_uppercase(),
            quantity: self.quantity,
            price: self.price,
            time_in_force: self.time_in_force.as_deref().map(str::to_uppercase),
        }
    }
}

/// A validated order in the exchange's wire shape.
///
/// Serializes to the field names the order-placement endpoint expects;
/// optional fields are omitted entirely when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderRequest {
    pub symbol: String,
    pub side: Side,
    #[serde(rename = "type")]
    pub order_type: OrderType,
    pub quantity: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    #[serde(rename = "timeInForce", skip_serializing_if = "Option::is_none")]
    pub time_in_force: Option<TimeInForce>,
}

/// Confirmed order as returned by the exchange.
///
/// Deserialization is strict: a missing required field or an unrecognized
/// extra field rejects the whole reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OrderResult {
    #[serde(rename = "orderId")]
    pub order_id: i64,
    pub symbol: String,
    pub side: Side,
    #[serde(rename = "type")]
    pub order_type: OrderType,
    pub status: OrderStatus,
    pub price: Decimal,
    #[serde(rename = "avgPrice")]
    pub avg_price: Decimal,
}
