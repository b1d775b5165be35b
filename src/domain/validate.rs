//! Input validation for order drafts.
//!
//! Produces a well-typed [`OrderRequest`] or a [`ValidationError`] listing
//! every violated field, so the caller sees all problems in one pass rather
//! than fixing them one at a time.

use rust_decimal::Decimal;

use crate::error::{ValidationError, Violation};

use super::order::{OrderDraft, OrderRequest, OrderType, Side, TimeInForce};

const SYMBOL_MIN_LEN: usize = 5;
const SYMBOL_MAX_LEN: usize = 12;

/// Trading-pair identifier: `^[A-Z0-9]{5,12}$`.
fn symbol_is_valid(symbol: &str) -> bool {
    (SYMBOL_MIN_LEN..=SYMBOL_MAX_LEN).contains(&symbol.len())
        && symbol
            .bytes()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
}

fn parse_side(raw: &str) -> Option<Side> {
    match raw {
        "BUY" => Some(Side::Buy),
        "SELL" => Some(Side::Sell),
        _ => None,
    }
}

fn parse_order_type(raw: &str) -> Option<OrderType> {
    match raw {
        "MARKET" => Some(OrderType::Market),
        "LIMIT" => Some(OrderType::Limit),
        _ => None,
    }
}

fn parse_time_in_force(raw: &str) -> Option<TimeInForce> {
    match raw {
        "GTD" => Some(TimeInForce::Gtd),
        "GTC" => Some(TimeInForce::Gtc),
        "IOC" => Some(TimeInForce::Ioc),
        _ => None,
    }
}

/// Validate a (normalized) draft into a typed [`OrderRequest`].
///
/// Expects string fields already uppercased; the gateway takes care of that.
/// Collects every violation before returning.
pub fn validate(draft: &OrderDraft) -> Result<OrderRequest, ValidationError> {
    let mut violations = Vec::new();

    if !symbol_is_valid(&draft.symbol) {
        violations.push(Violation::new(
            "symbol",
            format!(
                "'{}' does not match pattern [A-Z0-9]{{{SYMBOL_MIN_LEN},{SYMBOL_MAX_LEN}}}",
                draft.symbol
            ),
        ));
    }

    let side = parse_side(&draft.side);
    if side.is_none() {
        violations.push(Violation::new(
            "side",
            format!("'{}' is not one of BUY, SELL", draft.side),
        ));
    }

    let order_type = parse_order_type(&draft.order_type);
    if order_type.is_none() {
        violations.push(Violation::new(
            "type",
            format!("'{}' is not one of MARKET, LIMIT", draft.order_type),
        ));
    }

    let time_in_force = match draft.time_in_force.as_deref() {
        None => None,
        Some(raw) => match parse_time_in_force(raw) {
            Some(tif) => Some(tif),
            None => {
                violations.push(Violation::new(
                    "timeInForce",
                    format!("'{raw}' is not one of GTD, GTC, IOC"),
                ));
                None
            }
        },
    };

    if draft.quantity <= Decimal::ZERO {
        violations.push(Violation::new("quantity", "must be greater than 0"));
    }

    if let Some(price) = draft.price {
        if price < Decimal::ZERO {
            violations.push(Violation::new("price", "must be greater than or equal to 0"));
        }
    }

    // LIMIT orders must carry a price.
    if order_type == Some(OrderType::Limit) && draft.price.is_none() {
        violations.push(Violation::new("price", "required for LIMIT orders"));
    }

    if !violations.is_empty() {
        return Err(ValidationError::new(violations));
    }

    Ok(OrderRequest {
        symbol: draft.symbol.clone(),
        // Parse failures were recorded as violations above.
        side: side.unwrap(),
        order_type: order_type.unwrap(),
        quantity: draft.quantity,
        price: draft.price,
        time_in_force,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn market_draft() -> OrderDraft {
        OrderDraft::new("BTCUSDT", "BUY", "MARKET", dec!(0.001))
    }

    #[test]
    fn accepts_market_order_without_price() {
        let request = validate(&market_draft()).unwrap();
        assert_eq!(request.side, Side::Buy);
        assert_eq!(request.order_type, OrderType::Market);
        assert!(request.price.is_none());
        assert!(request.time_in_force.is_none());
    }

    #[test]
    fn rejects_zero_and_negative_quantity() {
        for quantity in [Decimal::ZERO, dec!(-0.5)] {
            let mut draft = market_draft();
            draft.quantity = quantity;
            let err = validate(&draft).unwrap_err();
            assert!(err.mentions("quantity"), "quantity {quantity} must be rejected");
        }
    }

    #[test]
    fn rejects_symbols_outside_pattern() {
        for symbol in ["BTC", "btcusdt", "BTC-USDT", "VERYLONGSYMBOL", ""] {
            let mut draft = market_draft();
            draft.symbol = symbol.into();
            let err = validate(&draft).unwrap_err();
            assert!(err.mentions("symbol"), "symbol '{symbol}' must be rejected");
        }
    }

    #[test]
    fn accepts_pattern_boundary_symbols() {
        for symbol in ["AB123", "ABCDEF123456"] {
            let mut draft = market_draft();
            draft.symbol = symbol.into();
            assert!(validate(&draft).is_ok(), "symbol '{symbol}' must be accepted");
        }
    }

    #[test]
    fn limit_without_price_is_rejected() {
        let mut draft = market_draft();
        draft.order_type = "LIMIT".into();
        let err = validate(&draft).unwrap_err();
        assert!(err.mentions("price"));
    }

    #[test]
    fn limit_with_price_is_accepted() {
        let mut draft = market_draft();
        draft.order_type = "LIMIT".into();
        draft.price = Some(dec!(65000));
        let request = validate(&draft).unwrap();
        assert_eq!(request.price, Some(dec!(65000)));
    }

    #[test]
    fn rejects_negative_price() {
        let mut draft = market_draft();
        draft.price = Some(dec!(-1));
        let err = validate(&draft).unwrap_err();
        assert!(err.mentions("price"));
    }

    #[test]
    fn zero_price_is_allowed_when_present() {
        let mut draft = market_draft();
        draft.price = Some(Decimal::ZERO);
        assert!(validate(&draft).is_ok());
    }

    #[test]
    fn rejects_unknown_enums() {
        let mut draft = market_draft();
        draft.side = "HOLD".into();
        draft.order_type = "STOP".into();
        draft.time_in_force = Some("FOK".into());
        let err = validate(&draft).unwrap_err();
        assert!(err.mentions("side"));
        assert!(err.mentions("type"));
        assert!(err.mentions("timeInForce"));
    }

    #[test]
    fn collects_all_violations_in_one_pass() {
        let draft = OrderDraft {
            symbol: "btc".into(),
            side: "HOLD".into(),
            order_type: "LIMIT".into(),
            quantity: Decimal::ZERO,
            price: None,
            time_in_force: None,
        };
        let err = validate(&draft).unwrap_err();
        assert_eq!(err.violations.len(), 4);
    }

    #[test]
    fn parses_time_in_force_variants() {
        for (raw, expected) in [
            ("GTD", TimeInForce::Gtd),
            ("GTC", TimeInForce::Gtc),
            ("IOC", TimeInForce::Ioc),
        ] {
            let mut draft = market_draft();
            draft.time_in_force = Some(raw.into());
            let request = validate(&draft).unwrap();
            assert_eq!(request.time_in_force, Some(expected));
        }
    }
}
