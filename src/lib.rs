//! Ordergate - validated order gateway for a Binance-style futures testnet.
//!
//! A thin client library between an untrusted caller (typically a dashboard
//! UI) and an exchange's order-placement REST API. Orders are schema-checked
//! on the way out, the exchange's reply is schema-checked on the way back,
//! and failures come back as structured data rather than panics.
//!
//! # Modules
//!
//! - [`config`] - Configuration from TOML/env, tracing initialization
//! - [`domain`] - Order value types and the input validator
//! - [`error`] - Error taxonomy: validation, exchange rejection, transport
//! - [`exchange`] - The [`ExchangeClient`](exchange::ExchangeClient)
//!   capability trait and the Binance testnet implementation
//! - [`gateway`] - Normalize, validate, submit, enforce the result schema
//! - [`audit`] - Append-only audit log, one line per event
//! - [`session`] - UI-owned session holding the in-memory order history
//!
//! # Example
//!
//! ```no_run
//! use ordergate::config::Config;
//! use ordergate::session::Session;
//! use rust_decimal_macros::dec;
//!
//! # async fn run() -> ordergate::error::Result<()> {
//! let config = Config::from_env()?;
//! let mut session = Session::connect(&config).await?;
//! let order = session
//!     .place_order("BTCUSDT", "buy", "market", dec!(0.001), None)
//!     .await?;
//! println!("filled at {}", order.avg_price);
//! # Ok(())
//! # }
//! ```

pub mod audit;
pub mod config;
pub mod domain;
pub mod error;
pub mod exchange;
pub mod gateway;
pub mod session;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;

pub use error::{Error, Result};
